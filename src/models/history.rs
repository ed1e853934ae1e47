use std::collections::VecDeque;

use super::constants::HISTORY_LIMIT;

/// Submitted commands, oldest first, with an up/down navigation cursor.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: VecDeque<String>,
    /// None = not navigating (input line is fresh).
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command unless it repeats the previous one. Resets the cursor.
    pub fn push(&mut self, command: &str) {
        self.cursor = None;
        if self.entries.back().map(String::as_str) == Some(command) {
            return;
        }
        self.entries.push_back(command.to_string());
        if self.entries.len() > HISTORY_LIMIT {
            self.entries.pop_front();
        }
    }

    /// Step toward older entries, stopping at the oldest.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let index = match self.cursor {
            None => self.entries.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step toward newer entries, stopping at the newest.
    pub fn next(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        let index = match self.cursor {
            None => last,
            Some(i) => (i + 1).min(last),
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_consecutive_duplicates_only() {
        let mut h = CommandHistory::new();
        h.push("scan");
        h.push("scan");
        h.push("help");
        h.push("scan");
        assert_eq!(h.iter().collect::<Vec<_>>(), vec!["scan", "help", "scan"]);
    }

    #[test]
    fn caps_at_limit() {
        let mut h = CommandHistory::new();
        for n in 0..60 {
            h.push(&format!("cmd {}", n));
        }
        assert_eq!(h.len(), HISTORY_LIMIT);
        assert_eq!(h.iter().next(), Some("cmd 10"));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut h = CommandHistory::new();
        h.push("a");
        h.push("b");
        h.push("c");
        assert_eq!(h.previous(), Some("c"));
        assert_eq!(h.previous(), Some("b"));
        assert_eq!(h.previous(), Some("a"));
        assert_eq!(h.previous(), Some("a"));
        assert_eq!(h.next(), Some("b"));
        assert_eq!(h.next(), Some("c"));
        assert_eq!(h.next(), Some("c"));
    }

    #[test]
    fn push_resets_cursor() {
        let mut h = CommandHistory::new();
        h.push("a");
        h.push("b");
        h.previous();
        h.previous();
        h.push("c");
        assert_eq!(h.previous(), Some("c"));
    }

    #[test]
    fn empty_history_navigates_to_nothing() {
        let mut h = CommandHistory::new();
        assert_eq!(h.previous(), None);
        assert_eq!(h.next(), None);
    }
}
