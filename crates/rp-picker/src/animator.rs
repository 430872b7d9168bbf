//! Per-reel animation state machine
//!
//! ```text
//!  Idle ──start──> Spinning ──settle──> Settled
//!   ^                 ^                    │
//!   │                 └───────start────────┤
//!   └──────────────────reset───────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::strip::ReelContent;
use crate::surface::{ReelSurface, TransitionDone};
use crate::timing::{SpinTiming, TransitionSpec};

/// Animation phase of a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReelPhase {
    /// No motion; the reel is empty or shows its last winner
    #[default]
    Idle,
    /// Transition playing, filler items mounted
    Spinning,
    /// Transition complete, only the winner remains
    Settled,
}

/// Drives one reel's surface through a spin
#[derive(Debug)]
pub struct ReelAnimator<S> {
    index: usize,
    surface: S,
    had_previous_winner: bool,
    phase: ReelPhase,
}

impl<S: ReelSurface> ReelAnimator<S> {
    pub fn new(index: usize, surface: S) -> Self {
        Self {
            index,
            surface,
            had_previous_winner: false,
            phase: ReelPhase::Idle,
        }
    }

    /// Zero-based reel index
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn had_previous_winner(&self) -> bool {
        self.had_previous_winner
    }

    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    /// Mount `content` and start scrolling towards its last item
    ///
    /// `duration_ms` is the same for every reel of a spin.
    pub fn start(
        &mut self,
        content: &ReelContent,
        duration_ms: f64,
        timing: &SpinTiming,
    ) -> TransitionDone {
        self.surface.mount(content.items());

        let distance = self.scroll_distance(timing);
        let spec = TransitionSpec::spin(distance, duration_ms, timing);

        log::debug!(
            "Reel {}: {} items mounted, scrolling {:.1} over {:.0}ms",
            self.index + 1,
            self.surface.mounted_count(),
            distance,
            duration_ms
        );

        self.phase = ReelPhase::Spinning;
        self.surface.start_transition(&spec)
    }

    /// Distance that brings the last mounted item into view
    fn scroll_distance(&self, timing: &SpinTiming) -> f64 {
        let item = self
            .surface
            .item_extent()
            .filter(|extent| *extent > 0.0)
            .unwrap_or(timing.fallback_item_extent);
        let total = self
            .surface
            .total_extent()
            .unwrap_or(item * self.surface.mounted_count() as f64);

        (total - item).max(0.0)
    }

    /// Finish the transition and prune everything but the winner
    pub fn settle(&mut self) {
        self.surface.force_to_end();
        self.surface.trim(1);
        self.had_previous_winner = true;
        self.phase = ReelPhase::Settled;
    }

    /// Empty the reel and forget the previous winner
    pub fn reset(&mut self) {
        self.surface.clear();
        self.had_previous_winner = false;
        self.phase = ReelPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strip::build_reel_content;
    use crate::surface::MemorySurface;
    use futures_util::FutureExt;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_start_scrolls_to_last_item() {
        let mut reel = ReelAnimator::new(0, MemorySurface::new());
        let content = build_reel_content(names(&["A", "B", "C"]), 10, false, "B");

        let done = reel.start(&content, 1000.0, &SpinTiming::normal());
        assert_eq!(reel.phase(), ReelPhase::Spinning);
        assert_eq!(reel.surface().mounted_count(), 10);

        let spec = reel.surface().transition().unwrap();
        assert_eq!(spec.distance, 9.0 * 120.0);
        assert_eq!(spec.duration_ms, 1000.0);
        assert_eq!(done.now_or_never(), Some(()));
    }

    #[test]
    fn test_settle_leaves_winner() {
        let mut reel = ReelAnimator::new(0, MemorySurface::new());
        let content = build_reel_content(names(&["A", "B", "C"]), 10, false, "C");
        let _ = reel.start(&content, 0.0, &SpinTiming::instant());

        reel.settle();
        assert_eq!(reel.phase(), ReelPhase::Settled);
        assert!(reel.had_previous_winner());
        assert!(reel.surface().is_finished());
        assert_eq!(reel.surface().items(), names(&["C"]));
    }

    #[test]
    fn test_previous_winner_counts_towards_extent() {
        let mut reel = ReelAnimator::new(0, MemorySurface::new());
        let timing = SpinTiming::normal();

        let first = build_reel_content(names(&["A", "B"]), 6, false, "A");
        let _ = reel.start(&first, 600.0, &timing);
        reel.settle();

        let second = build_reel_content(names(&["A", "B"]), 6, reel.had_previous_winner(), "B");
        assert_eq!(second.len(), 5);
        let _ = reel.start(&second, 600.0, &timing);

        // previous winner + 5 new items, same strip length as the first spin
        assert_eq!(reel.surface().mounted_count(), 6);
        assert_eq!(reel.surface().transition().unwrap().distance, 5.0 * 120.0);
        assert_eq!(reel.surface().items()[0], "A");
    }

    #[test]
    fn test_unmeasurable_items_use_fallback() {
        let mut reel = ReelAnimator::new(2, MemorySurface::with_item_extent(None));
        let content = build_reel_content(names(&["A", "B", "C", "D"]), 4, false, "D");
        let timing = SpinTiming {
            fallback_item_extent: 50.0,
            ..SpinTiming::normal()
        };

        let _ = reel.start(&content, 400.0, &timing);
        assert_eq!(reel.surface().transition().unwrap().distance, 150.0);
    }

    #[test]
    fn test_empty_content_does_not_scroll() {
        let mut reel = ReelAnimator::new(0, MemorySurface::new());
        let content = build_reel_content(Vec::new(), 10, false, "A");
        let _ = reel.start(&content, 1000.0, &SpinTiming::normal());
        assert_eq!(reel.surface().transition().unwrap().distance, 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut reel = ReelAnimator::new(0, MemorySurface::new());
        let content = build_reel_content(names(&["A", "B"]), 4, false, "A");
        let _ = reel.start(&content, 0.0, &SpinTiming::instant());
        reel.settle();

        reel.reset();
        assert_eq!(reel.phase(), ReelPhase::Idle);
        assert!(!reel.had_previous_winner());
        assert_eq!(reel.surface().mounted_count(), 0);
    }
}
