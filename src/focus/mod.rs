pub mod dom;

/// Which rendered row holds keyboard focus, and a way to move it.
///
/// Rows are indexed like the working list, trailing slot included.
pub trait FocusQuery {
    fn focused_index(&self) -> Option<usize>;

    /// Focuses the row at `index`. Returns false when that row is not
    /// rendered (yet).
    fn focus(&self, index: usize) -> bool;
}

/// Where focus belongs after a commit removed `removed` (ascending input
/// indices): one row up for every removed row above the focused one.
pub fn focus_after_removals(focus_before: Option<usize>, removed: &[usize]) -> Option<usize> {
    let before = focus_before?;
    let shift = removed.iter().take_while(|&&i| i < before).count();
    Some(before - shift)
}

/// Where focus belongs after the row at `removed` was deleted while
/// `blurred` was the last focused row. `new_len` is the working-list length
/// after removal.
pub fn focus_after_remove_item(blurred: usize, removed: usize, new_len: usize) -> usize {
    if blurred == removed {
        new_len.saturating_sub(1)
    } else if blurred < removed {
        blurred
    } else {
        blurred - 1
    }
}

/// Short-lived memory of the row that last lost focus.
#[derive(Clone, Debug, Default)]
pub struct FocusTracker {
    blurred: Option<usize>,
    generation: u64,
}

impl FocusTracker {
    pub fn blurred(&self) -> Option<usize> {
        self.blurred
    }

    /// Remembers `index` and returns the token its expiry must present.
    pub fn record_blur(&mut self, index: usize) -> u64 {
        self.blurred = Some(index);
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Forgets the blur recorded under `generation`; a newer blur survives.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation != generation || self.blurred.is_none() {
            return false;
        }
        self.blurred = None;
        true
    }

    pub fn clear(&mut self) {
        self.blurred = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_after_removals_shifts_for_rows_above() {
        assert_eq!(focus_after_removals(Some(2), &[1]), Some(1));
        assert_eq!(focus_after_removals(Some(3), &[0, 1, 5]), Some(1));
    }

    #[test]
    fn test_focus_after_removals_ignores_rows_at_or_below() {
        assert_eq!(focus_after_removals(Some(0), &[0]), Some(0));
        assert_eq!(focus_after_removals(Some(1), &[1, 2]), Some(1));
        assert_eq!(focus_after_removals(Some(1), &[]), Some(1));
    }

    #[test]
    fn test_focus_after_removals_without_focus() {
        assert_eq!(focus_after_removals(None, &[0, 1]), None);
    }

    #[test]
    fn test_focus_after_remove_item() {
        // Removed the blurred row: go to the new last row.
        assert_eq!(focus_after_remove_item(1, 1, 3), 2);
        // Row above the removed one keeps its index.
        assert_eq!(focus_after_remove_item(0, 1, 3), 0);
        // Row below shifts up.
        assert_eq!(focus_after_remove_item(2, 1, 3), 1);
    }

    #[test]
    fn test_tracker_expiry_only_clears_own_blur() {
        let mut t = FocusTracker::default();
        let first = t.record_blur(1);
        let second = t.record_blur(2);

        assert!(!t.expire(first));
        assert_eq!(t.blurred(), Some(2));
        assert!(t.expire(second));
        assert_eq!(t.blurred(), None);
        assert!(!t.expire(second));
    }

    #[test]
    fn test_tracker_clear() {
        let mut t = FocusTracker::default();
        let g = t.record_blur(0);
        t.clear();
        assert_eq!(t.blurred(), None);
        assert!(!t.expire(g));
    }
}
