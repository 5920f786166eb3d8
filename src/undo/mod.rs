//! Snapshot undo/redo history
//!
//! History stores whole document snapshots rather than reversible commands.
//! Layout edits are small compared to the page, and a snapshot restores the
//! exact tree including every generated id.

use std::collections::VecDeque;

/// Default number of snapshots retained
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Linear snapshot history with a cursor
///
/// `entries[current_index]` is always the present state. Recording a new state
/// while the cursor is behind the newest entry discards the redo future.
#[derive(Clone, Debug, PartialEq)]
pub struct History<T> {
    entries: VecDeque<T>,
    current_index: usize,
    max_size: usize,
}

impl<T: Clone> History<T> {
    /// A history holding only `initial`; `max_size` is at least 1
    pub fn new(initial: T, max_size: usize) -> Self {
        let mut entries = VecDeque::with_capacity(max_size.clamp(1, DEFAULT_HISTORY_LIMIT));
        entries.push_back(initial);
        Self {
            entries,
            current_index: 0,
            max_size: max_size.max(1),
        }
    }

    /// Drop all history and start again from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.current_index = 0;
    }

    /// Push a new present state
    pub fn record(&mut self, snapshot: T) {
        let discarded = self.redo_count();
        if discarded > 0 {
            log::debug!("history: recording discards {} redo snapshot(s)", discarded);
            self.entries.truncate(self.current_index + 1);
        }
        self.entries.push_back(snapshot);
        self.current_index = self.entries.len() - 1;

        // Enforce max size
        if self.entries.len() > self.max_size {
            log::debug!("history: cap of {} reached, evicting oldest snapshot", self.max_size);
            self.entries.pop_front();
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Step back; `None` when already at the oldest snapshot
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        self.entries.get(self.current_index).cloned()
    }

    /// Step forward; `None` when already at the newest snapshot
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        self.entries.get(self.current_index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.current_index)
    }

    /// Overwrite the present snapshot without adding an undo step
    pub fn replace_current(&mut self, snapshot: T) {
        if let Some(slot) = self.entries.get_mut(self.current_index) {
            *slot = snapshot;
        }
    }

    /// Apply `f` to every stored snapshot in place, cursor unchanged
    pub fn update_all<F: FnMut(&mut T)>(&mut self, f: F) {
        self.entries.iter_mut().for_each(f);
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn undo_count(&self) -> usize {
        self.current_index
    }

    pub fn redo_count(&self) -> usize {
        self.entries.len() - self.current_index - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_twice_then_record_discards_future() {
        let mut history = History::new("S0", 10);
        history.record("S1");
        history.record("S2");

        assert_eq!(history.undo(), Some("S1"));
        assert_eq!(history.undo(), Some("S0"));
        assert!(history.can_redo());

        history.record("S3");
        assert_eq!(history.current(), Some(&"S3"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(), Some("S0"));
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = History::new(0, 10);
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some(&0));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_redo_at_newest_is_noop() {
        let mut history = History::new(0, 10);
        history.record(1);
        assert_eq!(history.redo(), None);
        assert_eq!(history.undo(), Some(0));
        assert_eq!(history.redo(), Some(1));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = History::new(0, 3);
        for i in 1..=5 {
            history.record(i);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&5));
        assert_eq!(history.undo(), Some(4));
        assert_eq!(history.undo(), Some(3));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_replace_current_adds_no_step() {
        let mut history = History::new("a", 10);
        history.record("b");
        history.replace_current("b2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(&"b2"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.redo(), Some("b2"));
    }

    #[test]
    fn test_update_all_keeps_cursor() {
        let mut history = History::new(1, 10);
        history.record(2);
        history.record(3);
        history.undo();
        history.update_all(|n| *n *= 10);
        assert_eq!(history.current(), Some(&20));
        assert_eq!(history.undo(), Some(10));
        assert_eq!(history.redo(), Some(20));
        assert_eq!(history.redo(), Some(30));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut history = History::new(1, 10);
        history.record(2);
        history.reset(9);
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo_count(), 0);
        assert_eq!(history.redo_count(), 0);
    }
}
