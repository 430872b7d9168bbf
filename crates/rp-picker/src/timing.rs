//! Spin timing and transition keyframes

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Easing curve applied to the whole spin transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
}

impl Default for Easing {
    fn default() -> Self {
        Self::EaseInOut
    }
}

impl Easing {
    /// CSS timing-function name
    pub fn css_name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInOut => "ease-in-out",
        }
    }

    /// Map linear progress (0..=1) to eased progress (0..=1)
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// Evaluate a CSS cubic-bezier timing function at `x`
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Newton first, bisection if the slope flattens out
    let s = newton_solve(x1, x2, x).unwrap_or_else(|| bisect_solve(x1, x2, x));
    bezier(y1, y2, s)
}

/// One coordinate of a cubic bezier with fixed endpoints 0 and 1
fn bezier(a: f64, b: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
}

fn bezier_slope(a: f64, b: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
}

/// Curve parameter `s` with `bezier(x1, x2, s) == x`, if Newton converges
fn newton_solve(x1: f64, x2: f64, x: f64) -> Option<f64> {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(x1, x2, s) - x;
        if err.abs() < 1e-7 {
            return Some(s);
        }
        let d = bezier_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            return None;
        }
        s -= err / d;
    }
    None
}

/// Curve parameter `s` with `bezier(x1, x2, s) == x`, by halving `[0, 1]`
fn bisect_solve(x1: f64, x2: f64, x: f64) -> f64 {
    let (mut lo, mut hi) = (0.0, 1.0);
    let mut s = (lo + hi) / 2.0;
    for _ in 0..50 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// Timing parameters of a spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinTiming {
    /// Animation time per filler item (ms)
    pub ms_per_item: f64,

    /// Blur radius at the midpoint of the spin (px)
    pub peak_blur_px: f64,

    /// Item height assumed when the surface cannot measure one
    pub fallback_item_extent: f64,

    /// Easing of the whole transition
    pub easing: Easing,
}

impl SpinTiming {
    /// Standard reel timing: 100ms per item, 1px blur peak
    pub fn normal() -> Self {
        Self {
            ms_per_item: 100.0,
            peak_blur_px: 1.0,
            fallback_item_extent: 120.0,
            easing: Easing::EaseInOut,
        }
    }

    /// Zero-duration spins (headless hosts, tests)
    pub fn instant() -> Self {
        Self {
            ms_per_item: 0.0,
            peak_blur_px: 0.0,
            ..Self::normal()
        }
    }

    /// Total spin duration for a reel of `max_reel_items` (ms)
    pub fn spin_duration_ms(&self, max_reel_items: usize) -> f64 {
        max_reel_items as f64 * self.ms_per_item
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("msPerItem", self.ms_per_item),
            ("peakBlurPx", self.peak_blur_px),
            ("fallbackItemExtent", self.fallback_item_extent),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "timing.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self::normal()
    }
}

/// One keyframe of the spin effect
///
/// `None` properties are interpolated from the neighbouring keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub offset: f64,
    pub translate_y: Option<f64>,
    pub blur_px: Option<f64>,
}

/// Sampled visual state of a reel at some progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub translate_y: f64,
    pub blur_px: f64,
}

/// Fully configured reel transition for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Scroll distance (positive; the reel moves to `-distance`)
    pub distance: f64,
    pub duration_ms: f64,
    pub easing: Easing,
    pub keyframes: Vec<Keyframe>,
}

impl TransitionSpec {
    /// Scroll from rest to `-distance`, blur peaking at the midpoint
    pub fn spin(distance: f64, duration_ms: f64, timing: &SpinTiming) -> Self {
        Self {
            distance,
            duration_ms,
            easing: timing.easing,
            keyframes: vec![
                Keyframe {
                    offset: 0.0,
                    translate_y: Some(0.0),
                    blur_px: Some(0.0),
                },
                Keyframe {
                    offset: 0.5,
                    translate_y: None,
                    blur_px: Some(timing.peak_blur_px),
                },
                Keyframe {
                    offset: 1.0,
                    translate_y: Some(-distance),
                    blur_px: Some(0.0),
                },
            ],
        }
    }

    /// Final resting offset
    pub fn end_offset(&self) -> f64 {
        -self.distance
    }

    /// Sample the effect at linear progress `t` (0..=1)
    pub fn frame_at(&self, t: f64) -> Frame {
        let eased = self.easing.apply(t);
        Frame {
            translate_y: interpolate(&self.keyframes, eased, |k| k.translate_y),
            blur_px: interpolate(&self.keyframes, eased, |k| k.blur_px),
        }
    }

    /// Sample the effect at `elapsed_ms` since the transition started
    pub fn frame_at_ms(&self, elapsed_ms: f64) -> Frame {
        if self.duration_ms <= 0.0 {
            return self.frame_at(1.0);
        }
        self.frame_at(elapsed_ms / self.duration_ms)
    }
}

fn interpolate(keyframes: &[Keyframe], t: f64, property: impl Fn(&Keyframe) -> Option<f64>) -> f64 {
    let stops: Vec<(f64, f64)> = keyframes
        .iter()
        .filter_map(|k| property(k).map(|v| (k.offset, v)))
        .collect();

    let Some(&(first_offset, first_value)) = stops.first() else {
        return 0.0;
    };
    if t <= first_offset {
        return first_value;
    }

    for pair in stops.windows(2) {
        let (a_offset, a_value) = pair[0];
        let (b_offset, b_value) = pair[1];
        if t <= b_offset {
            let span = b_offset - a_offset;
            if span <= 0.0 {
                return b_value;
            }
            return a_value + (b_value - a_value) * (t - a_offset) / span;
        }
    }

    stops.last().map(|&(_, v)| v).unwrap_or(first_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spin_duration() {
        let timing = SpinTiming::normal();
        assert_eq!(timing.spin_duration_ms(30), 3000.0);
        assert_eq!(SpinTiming::instant().spin_duration_ms(30), 0.0);
    }

    #[test]
    fn test_ease_in_out_shape() {
        let easing = Easing::EaseInOut;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(1.0), 1.0);
        assert_relative_eq!(easing.apply(0.5), 0.5, epsilon = 1e-4);

        // Slow start, slow end
        assert!(easing.apply(0.1) < 0.1);
        assert!(easing.apply(0.9) > 0.9);

        // Monotonic
        let mut last = 0.0;
        for i in 1..=100 {
            let value = easing.apply(i as f64 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_easing_symmetry() {
        let easing = Easing::EaseInOut;
        for t in [0.1, 0.25, 0.4] {
            assert_relative_eq!(easing.apply(t) + easing.apply(1.0 - t), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_bisection_matches_newton() {
        for x in [0.05, 0.3, 0.5, 0.7, 0.95] {
            let s = bisect_solve(0.42, 0.58, x);
            assert_relative_eq!(bezier(0.42, 0.58, s), x, epsilon = 1e-6);

            let newton = newton_solve(0.42, 0.58, x).unwrap();
            assert_relative_eq!(s, newton, epsilon = 1e-5);
        }

        // Midpoint of a symmetric curve is hit on the first probe
        assert_eq!(bisect_solve(0.42, 0.58, 0.5), 0.5);
    }

    #[test]
    fn test_frame_endpoints() {
        let spec = TransitionSpec::spin(1000.0, 3000.0, &SpinTiming::normal());

        let start = spec.frame_at(0.0);
        assert_eq!(start.translate_y, 0.0);
        assert_eq!(start.blur_px, 0.0);

        let end = spec.frame_at(1.0);
        assert_eq!(end.translate_y, -1000.0);
        assert_eq!(end.blur_px, 0.0);
        assert_eq!(spec.end_offset(), -1000.0);
    }

    #[test]
    fn test_blur_peaks_at_midpoint() {
        let spec = TransitionSpec::spin(500.0, 2000.0, &SpinTiming::normal());

        let mid = spec.frame_at(0.5);
        assert_relative_eq!(mid.blur_px, 1.0, epsilon = 1e-3);
        assert_relative_eq!(mid.translate_y, -250.0, epsilon = 0.1);

        assert!(spec.frame_at(0.25).blur_px < mid.blur_px);
        assert!(spec.frame_at(0.75).blur_px < mid.blur_px);
    }

    #[test]
    fn test_frame_at_ms_zero_duration() {
        let spec = TransitionSpec::spin(240.0, 0.0, &SpinTiming::instant());
        assert_eq!(spec.frame_at_ms(0.0).translate_y, -240.0);
    }

    #[test]
    fn test_timing_validation() {
        assert!(SpinTiming::normal().validate().is_ok());

        let bad = SpinTiming {
            ms_per_item: f64::NAN,
            ..SpinTiming::normal()
        };
        assert!(bad.validate().is_err());

        let negative = SpinTiming {
            fallback_item_extent: -1.0,
            ..SpinTiming::normal()
        };
        assert!(negative.validate().is_err());
    }
}
