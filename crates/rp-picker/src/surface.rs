//! Host display surface of a reel

use std::future::Future;
use std::pin::Pin;

use crate::timing::{Frame, TransitionSpec};

/// Completion signal of a started transition
pub type TransitionDone = Pin<Box<dyn Future<Output = ()>>>;

/// Display surface a reel renders into
///
/// The host owns the surface; the picker only appends items, measures, and
/// prunes. Implementations keep one transition handle for their lifetime and
/// re-configure it on every [`start_transition`](Self::start_transition).
pub trait ReelSurface {
    /// Append one display item per entry, after any items already mounted
    fn mount(&mut self, items: &[String]);

    /// Remove every mounted item
    fn clear(&mut self);

    fn mounted_count(&self) -> usize;

    /// Extent of all mounted content along the scroll axis
    fn total_extent(&self) -> Option<f64>;

    /// Extent of a single item, `None` if it cannot be measured
    fn item_extent(&self) -> Option<f64>;

    /// Configure and play the spin transition
    fn start_transition(&mut self, spec: &TransitionSpec) -> TransitionDone;

    /// Jump the transition to its final state
    fn force_to_end(&mut self);

    /// Remove all mounted items except the last `keep_last`
    fn trim(&mut self, keep_last: usize);
}

/// In-memory reel surface
///
/// Items have a fixed extent and transitions complete immediately. Used by
/// headless hosts and tests; it records what was mounted and played.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    items: Vec<String>,
    item_extent: Option<f64>,
    transition: Option<TransitionSpec>,
    transitions_started: usize,
    finished: bool,
}

impl MemorySurface {
    /// Surface with 120-unit items
    pub fn new() -> Self {
        Self::with_item_extent(Some(120.0))
    }

    /// Surface with a given item extent; `None` simulates an unmeasurable item
    pub fn with_item_extent(item_extent: Option<f64>) -> Self {
        Self {
            items: Vec::new(),
            item_extent,
            transition: None,
            transitions_started: 0,
            finished: true,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Most recently configured transition
    pub fn transition(&self) -> Option<&TransitionSpec> {
        self.transition.as_ref()
    }

    pub fn transitions_started(&self) -> usize {
        self.transitions_started
    }

    /// Whether the last transition has been forced to its end
    ///
    /// Like a DOM animation without fill, a finished transition no longer
    /// applies its offset; the trimmed winner rests at the origin.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Visual state at linear progress `t` of the current transition
    pub fn frame_at(&self, t: f64) -> Frame {
        self.transition
            .as_ref()
            .map(|spec| spec.frame_at(t))
            .unwrap_or_default()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ReelSurface for MemorySurface {
    fn mount(&mut self, items: &[String]) {
        self.items.extend_from_slice(items);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn mounted_count(&self) -> usize {
        self.items.len()
    }

    fn total_extent(&self) -> Option<f64> {
        self.item_extent.map(|extent| extent * self.items.len() as f64)
    }

    fn item_extent(&self) -> Option<f64> {
        if self.items.is_empty() {
            return None;
        }
        self.item_extent
    }

    fn start_transition(&mut self, spec: &TransitionSpec) -> TransitionDone {
        self.transition = Some(spec.clone());
        self.transitions_started += 1;
        self.finished = false;
        Box::pin(futures_util::future::ready(()))
    }

    fn force_to_end(&mut self) {
        self.finished = true;
    }

    fn trim(&mut self, keep_last: usize) {
        let excess = self.items.len().saturating_sub(keep_last);
        self.items.drain(..excess);
    }
}
