//! Names the user has marked for the next group.

use std::collections::{BTreeSet, HashSet};

/// Tracks selected device names.
///
/// Stale names are tolerated until the next `prune`.
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    selected: BTreeSet<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership and return whether `name` is now selected.
    pub fn toggle(&mut self, name: &str) -> bool {
        if self.selected.remove(name) {
            false
        } else {
            self.selected.insert(name.to_string());
            true
        }
    }

    /// Keep only names present in `valid_names`.
    pub fn prune(&mut self, valid_names: &HashSet<String>) {
        self.selected.retain(|name| valid_names.contains(name));
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.contains(name)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle("Kitchen"));
        assert!(selection.contains("Kitchen"));
        assert!(!selection.toggle("Kitchen"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_prune_is_intersection() {
        let cases: [(&[&str], &[&str], &[&str]); 4] = [
            (&["a", "b", "c"], &["b", "c", "d"], &["b", "c"]),
            (&["a"], &[], &[]),
            (&[], &["a"], &[]),
            (&["x", "y"], &["x", "y"], &["x", "y"]),
        ];

        for (selected, valid, expected) in cases {
            let mut selection = SelectionTracker::new();
            for name in selected {
                selection.toggle(name);
            }
            selection.prune(&set(valid));
            let result: HashSet<String> = selection.snapshot().into_iter().collect();
            assert_eq!(result, set(expected));
        }
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionTracker::new();
        selection.toggle("a");
        selection.toggle("b");
        assert_eq!(selection.len(), 2);
        selection.clear();
        assert!(selection.snapshot().is_empty());
    }
}
