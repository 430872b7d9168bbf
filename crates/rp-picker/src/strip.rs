//! Reel content: the filler sequence a reel scrolls through

use serde::{Deserialize, Serialize};

/// Items mounted on a reel for one spin, ending in the winner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelContent {
    items: Vec<String>,
}

impl ReelContent {
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last item, the one the reel settles on
    pub fn winner(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Number of items to mount on a reel
///
/// A reel still showing its previous winner gets one item less so the
/// visible strip keeps the same length across spins.
pub fn reel_length(max_reel_items: usize, had_previous_winner: bool) -> usize {
    max_reel_items.saturating_sub(usize::from(had_previous_winner))
}

/// Build a reel's filler sequence from a shuffled permutation of the names
///
/// The permutation is doubled until it covers `max_reel_items`, cut to
/// [`reel_length`], and its last item replaced by `winner`. An empty
/// permutation yields empty content.
pub fn build_reel_content(
    permutation: Vec<String>,
    max_reel_items: usize,
    had_previous_winner: bool,
    winner: &str,
) -> ReelContent {
    let mut items = permutation;

    while !items.is_empty() && items.len() < max_reel_items {
        items.extend_from_within(..);
    }

    items.truncate(reel_length(max_reel_items, had_previous_winner));

    if let Some(last) = items.last_mut() {
        *last = winner.to_string();
    }

    ReelContent { items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_spin_length() {
        let content = build_reel_content(names(&["A", "B", "C"]), 30, false, "B");
        assert_eq!(content.len(), 30);
        assert_eq!(content.winner(), Some("B"));
    }

    #[test]
    fn test_reserves_slot_for_previous_winner() {
        let content = build_reel_content(names(&["A", "B", "C"]), 30, true, "C");
        assert_eq!(content.len(), 29);
        assert_eq!(content.winner(), Some("C"));
    }

    #[test]
    fn test_doubling_preserves_order() {
        let content = build_reel_content(names(&["A", "B", "C"]), 7, false, "Z");
        // A B C A B C -> A B C A B C A B C A B C, cut to 7
        assert_eq!(content.items(), names(&["A", "B", "C", "A", "B", "C", "Z"]));
    }

    #[test]
    fn test_long_permutation_is_truncated() {
        let permutation: Vec<String> = (0..50).map(|i| format!("N{i}")).collect();
        let content = build_reel_content(permutation, 10, false, "N3");
        assert_eq!(content.len(), 10);
        assert_eq!(content.items()[0], "N0");
        assert_eq!(content.winner(), Some("N3"));
    }

    #[test]
    fn test_empty_permutation_terminates() {
        let content = build_reel_content(Vec::new(), 30, false, "A");
        assert!(content.is_empty());
        assert_eq!(content.winner(), None);
    }

    #[test]
    fn test_reel_length() {
        assert_eq!(reel_length(30, false), 30);
        assert_eq!(reel_length(30, true), 29);
        assert_eq!(reel_length(0, true), 0);
    }
}
