/// Browsing direction for [`History::recall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall {
    Up,
    Down,
}

/// Ordered record of submitted lines plus a browsing cursor.
///
/// Entries are append-only, oldest first; duplicates and empty lines are kept.
/// The cursor counts back from the most recent entry: `0` means "not
/// browsing, show the live buffer", `k > 0` selects the k-th most recent
/// entry. It never exceeds `entries.len()`.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_browsing(&self) -> bool {
        self.cursor > 0
    }

    /// Moves the browse cursor one step, clamping at both ends, and returns
    /// the entry to display. `None` means the live buffer should be shown.
    pub fn recall(&mut self, direction: Recall) -> Option<&str> {
        match direction {
            Recall::Up => {
                if self.cursor < self.entries.len() {
                    self.cursor += 1;
                }
            }
            Recall::Down => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
        }
        self.displayed()
    }

    /// The entry selected by the current cursor, or `None` when not browsing.
    pub fn displayed(&self) -> Option<&str> {
        if self.cursor == 0 {
            None
        } else {
            Some(&self.entries[self.entries.len() - self.cursor])
        }
    }

    /// Leaves browsing mode without touching the entries.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Drops every entry and leaves browsing mode. Removing the backing
    /// transcript is the caller's job.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> History {
        let mut history = History::new();
        for line in ["ls", "cd", "pwd"] {
            history.push(line);
        }
        history
    }

    #[test]
    fn test_up_walks_from_most_recent_backwards() {
        let mut history = sample();
        assert_eq!(history.recall(Recall::Up), Some("pwd"));
        assert_eq!(history.recall(Recall::Up), Some("cd"));
        assert_eq!(history.recall(Recall::Up), Some("ls"));
    }

    #[test]
    fn test_up_clamps_at_oldest_entry() {
        let mut history = sample();
        for _ in 0..10 {
            history.recall(Recall::Up);
        }
        assert_eq!(history.displayed(), Some("ls"));
    }

    #[test]
    fn test_down_returns_towards_live_buffer() {
        let mut history = sample();
        history.recall(Recall::Up);
        history.recall(Recall::Up);
        assert_eq!(history.recall(Recall::Down), Some("pwd"));
        assert_eq!(history.recall(Recall::Down), None);
        assert_eq!(history.recall(Recall::Down), None);
    }

    #[test]
    fn test_up_on_empty_history_stays_live() {
        let mut history = History::new();
        assert_eq!(history.recall(Recall::Up), None);
        assert!(!history.is_browsing());
    }

    #[test]
    fn test_push_keeps_duplicates_and_empties() {
        let mut history = History::new();
        history.push("x");
        history.push("x");
        history.push("");
        assert_eq!(history.entries(), ["x", "x", ""]);
    }

    #[test]
    fn test_clear_empties_entries_and_cursor() {
        let mut history = sample();
        history.recall(Recall::Up);
        history.clear();
        assert!(history.entries().is_empty());
        assert!(!history.is_browsing());
        assert_eq!(history.recall(Recall::Up), None);
    }

    #[test]
    fn test_reset_cursor_keeps_entries() {
        let mut history = sample();
        history.recall(Recall::Up);
        history.reset_cursor();
        assert_eq!(history.entries().len(), 3);
        assert_eq!(history.displayed(), None);
    }
}
