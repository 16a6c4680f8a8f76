// SPDX-License-Identifier: MPL-2.0
//! Navigation state for the full-screen viewer.
//!
//! The navigator tracks an active index into an ordered list owned by the
//! gallery. It never wraps: `next()` at the last index and `previous()` at
//! index 0 are no-ops. When the backing list shrinks (an item deleted while
//! viewing) the index is re-clamped, and the viewer closes itself when the
//! list becomes empty.

/// Viewer position over an externally owned ordered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerNavigator {
    len: usize,
    index: usize,
    open: bool,
}

impl ViewerNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the viewer at `position`, as resolved by the caller's linear
    /// scan over the list. `None` (item not found) falls back to index 0.
    /// Opening over an empty list is refused.
    pub fn open(&mut self, position: Option<usize>) {
        if self.len == 0 {
            self.open = false;
            return;
        }
        self.index = position.unwrap_or(0).min(self.len - 1);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Active index while the viewer is open.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.open.then_some(self.index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.open && self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.open && self.index + 1 < self.len
    }

    /// Steps back one item; a no-op at index 0.
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.index -= 1;
        }
    }

    /// Steps forward one item; a no-op at the last index.
    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
        }
    }

    /// Informs the navigator of the backing list's current length.
    ///
    /// Re-clamps the active index when the list shrank; closes the viewer
    /// when the list became empty.
    pub fn sync(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.open = false;
            self.index = 0;
        } else if self.index >= len {
            self.index = len - 1;
        }
    }

    /// Position caption for the viewer chrome, e.g. `3 / 12`.
    #[must_use]
    pub fn position_label(&self) -> String {
        if self.open {
            format!("{} / {}", self.index + 1, self.len)
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator(len: usize) -> ViewerNavigator {
        let mut nav = ViewerNavigator::new();
        nav.sync(len);
        nav
    }

    #[test]
    fn starts_closed() {
        let nav = ViewerNavigator::new();
        assert!(!nav.is_open());
        assert_eq!(nav.current_index(), None);
    }

    #[test]
    fn open_at_resolved_position() {
        let mut nav = navigator(5);
        nav.open(Some(2));
        assert!(nav.is_open());
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn open_with_unresolved_id_falls_back_to_first() {
        let mut nav = navigator(5);
        nav.open(None);
        assert_eq!(nav.current_index(), Some(0));
    }

    #[test]
    fn open_over_empty_list_is_refused() {
        let mut nav = navigator(0);
        nav.open(Some(0));
        assert!(!nav.is_open());
    }

    #[test]
    fn next_clamps_at_last_index() {
        let mut nav = navigator(5);
        nav.open(Some(2));

        nav.next();
        nav.next();
        nav.next();

        assert_eq!(nav.current_index(), Some(4));
        assert!(!nav.has_next());
    }

    #[test]
    fn previous_is_noop_at_zero() {
        let mut nav = navigator(3);
        nav.open(Some(0));

        nav.previous();

        assert_eq!(nav.current_index(), Some(0));
        assert!(!nav.has_previous());
    }

    #[test]
    fn close_keeps_list_length() {
        let mut nav = navigator(3);
        nav.open(Some(1));
        nav.close();

        assert!(!nav.is_open());
        assert_eq!(nav.len(), 3);
    }

    #[test]
    fn sync_reclamps_when_list_shrinks() {
        let mut nav = navigator(5);
        nav.open(Some(4));

        nav.sync(3);

        assert!(nav.is_open());
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn sync_to_empty_closes_the_viewer() {
        let mut nav = navigator(2);
        nav.open(Some(1));

        nav.sync(0);

        assert!(!nav.is_open());
        assert_eq!(nav.current_index(), None);
    }

    #[test]
    fn boundary_flags_track_position() {
        let mut nav = navigator(3);
        nav.open(Some(1));
        assert!(nav.has_previous());
        assert!(nav.has_next());

        nav.next();
        assert!(!nav.has_next());
        assert!(nav.has_previous());
    }

    #[test]
    fn position_label_is_one_based() {
        let mut nav = navigator(12);
        nav.open(Some(2));
        assert_eq!(nav.position_label(), "3 / 12");

        nav.close();
        assert_eq!(nav.position_label(), "");
    }
}
