//! Picker configuration

use serde::{Deserialize, Serialize};

use crate::timing::SpinTiming;

/// Default filler items per reel
pub const DEFAULT_MAX_REEL_ITEMS: usize = 30;

/// Default number of reels
pub const DEFAULT_NUMBER_OF_SLOTS: usize = 5;

/// Construction-time picker configuration
///
/// Immutable once handed to [`SlotPicker::new`](crate::SlotPicker::new),
/// except for `remove_winner` which has a runtime setter on the picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerConfig {
    /// Length of the filler sequence mounted on a reel per spin
    #[serde(default = "default_max_reel_items")]
    pub max_reel_items: usize,

    /// Remove each winner from the name list after a spin
    #[serde(default = "default_remove_winner")]
    pub remove_winner: bool,

    /// Base selector for reel surfaces; reel `i` resolves to `{selector}-{i}`
    pub reel_container_selector: String,

    /// Number of reels (fixed for the picker's lifetime)
    #[serde(default = "default_number_of_slots")]
    pub number_of_slots: usize,

    /// Spin animation timing
    #[serde(default)]
    pub timing: SpinTiming,
}

fn default_max_reel_items() -> usize {
    DEFAULT_MAX_REEL_ITEMS
}

fn default_remove_winner() -> bool {
    true
}

fn default_number_of_slots() -> usize {
    DEFAULT_NUMBER_OF_SLOTS
}

impl PickerConfig {
    /// Config with defaults for everything but the reel selector
    pub fn new(reel_container_selector: impl Into<String>) -> Self {
        Self {
            max_reel_items: DEFAULT_MAX_REEL_ITEMS,
            remove_winner: true,
            reel_container_selector: reel_container_selector.into(),
            number_of_slots: DEFAULT_NUMBER_OF_SLOTS,
            timing: SpinTiming::default(),
        }
    }

    pub fn with_slots(mut self, number_of_slots: usize) -> Self {
        self.number_of_slots = number_of_slots;
        self
    }

    pub fn with_max_reel_items(mut self, max_reel_items: usize) -> Self {
        self.max_reel_items = max_reel_items;
        self
    }

    pub fn with_remove_winner(mut self, remove_winner: bool) -> Self {
        self.remove_winner = remove_winner;
        self
    }

    pub fn with_timing(mut self, timing: SpinTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Parse a JSON config (camelCase keys, defaults applied) and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;

        if value.get("reelContainerSelector").is_none() {
            return Err(ConfigError::MissingField("reelContainerSelector".into()));
        }

        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_slots == 0 {
            return Err(ConfigError::InvalidValue(
                "numberOfSlots must be at least 1".into(),
            ));
        }

        // One slot may be reserved for a persisted winner; at least one
        // freshly built item must remain.
        if self.max_reel_items < 2 {
            return Err(ConfigError::InvalidValue(format!(
                "maxReelItems must be at least 2, got {}",
                self.max_reel_items
            )));
        }

        if self.reel_container_selector.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "reelContainerSelector must not be empty".into(),
            ));
        }

        self.timing.validate()
    }

    /// Selector of every reel surface, 1-indexed
    pub fn reel_selectors(&self) -> Vec<String> {
        (1..=self.number_of_slots)
            .map(|i| format!("{}-{}", self.reel_container_selector, i))
            .collect()
    }

    /// Spin animation duration for this config (ms)
    pub fn spin_duration_ms(&self) -> f64 {
        self.timing.spin_duration_ms(self.max_reel_items)
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::new("#reel");
        assert_eq!(config.max_reel_items, 30);
        assert!(config.remove_winner);
        assert_eq!(config.number_of_slots, 5);
        assert!(config.validate().is_ok());
        assert_eq!(config.spin_duration_ms(), 3000.0);
    }

    #[test]
    fn test_reel_selectors_are_one_indexed() {
        let config = PickerConfig::new("#reel").with_slots(3);
        assert_eq!(
            config.reel_selectors(),
            vec!["#reel-1", "#reel-2", "#reel-3"]
        );
    }

    #[test]
    fn test_parse_minimal_json() {
        let config = PickerConfig::from_json(r##"{ "reelContainerSelector": "#slot" }"##).unwrap();
        assert_eq!(config, PickerConfig::new("#slot"));
    }

    #[test]
    fn test_parse_full_json() {
        let json = r##"{
            "reelContainerSelector": "#reel",
            "maxReelItems": 12,
            "removeWinner": false,
            "numberOfSlots": 2,
            "timing": { "msPerItem": 50.0 }
        }"##;

        let config = PickerConfig::from_json(json).unwrap();
        assert_eq!(config.max_reel_items, 12);
        assert!(!config.remove_winner);
        assert_eq!(config.number_of_slots, 2);
        assert_eq!(config.spin_duration_ms(), 600.0);
    }

    #[test]
    fn test_missing_selector() {
        let result = PickerConfig::from_json(r#"{ "numberOfSlots": 3 }"#);
        assert_eq!(
            result,
            Err(ConfigError::MissingField("reelContainerSelector".into()))
        );
    }

    #[test]
    fn test_malformed_json() {
        let result = PickerConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_validation_limits() {
        assert!(PickerConfig::new("#reel").with_slots(0).validate().is_err());
        assert!(
            PickerConfig::new("#reel")
                .with_max_reel_items(1)
                .validate()
                .is_err()
        );
        assert!(PickerConfig::new("  ").validate().is_err());
        assert!(
            PickerConfig::new("#reel")
                .with_max_reel_items(2)
                .validate()
                .is_ok()
        );
    }
}
