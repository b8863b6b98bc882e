//! Bounded narration log used by sessions and clients.
use std::collections::VecDeque;
use std::fmt;

use game_core::{MessageSink, MessageStyle};

/// One log line. Identical consecutive lines are folded into a single entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub style: MessageStyle,
    pub count: u32,
    /// Log revision at which this entry last changed.
    pub revision: u64,
}

impl LogEntry {
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}

/// Message history with stacking and a fixed capacity.
///
/// Oldest entries are dropped once `capacity` is reached. Every insertion bumps
/// the revision so readers can ask for what changed since they last looked.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    revision: u64,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
            revision: 0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, style: MessageStyle) {
        let text = text.into();
        self.revision += 1;

        if let Some(last) = self.entries.back_mut() {
            if last.text == text {
                last.count += 1;
                last.revision = self.revision;
                return;
            }
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            text,
            style,
            count: 1,
            revision: self.revision,
        });
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Entries added or re-stacked after `revision`, oldest first.
    pub fn since(&self, revision: u64) -> impl Iterator<Item = &LogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.revision > revision)
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(256)
    }
}

impl MessageSink for MessageLog {
    fn add_message(&mut self, text: String, style: MessageStyle) {
        self.push(text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_lines_stack() {
        let mut log = MessageLog::new(8);
        log.push("That way is blocked.", MessageStyle::Impossible);
        log.push("That way is blocked.", MessageStyle::Impossible);
        log.push("You wait.", MessageStyle::Normal);
        log.push("That way is blocked.", MessageStyle::Impossible);

        let lines: Vec<String> = log.iter().map(LogEntry::full_text).collect();
        assert_eq!(
            lines,
            vec!["That way is blocked. (x2)", "You wait.", "That way is blocked."]
        );
    }

    #[test]
    fn capacity_drops_oldest() {
        let mut log = MessageLog::new(2);
        log.push("one", MessageStyle::Normal);
        log.push("two", MessageStyle::Normal);
        log.push("three", MessageStyle::Normal);

        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().map(|e| e.text.as_str()), Some("two"));
    }

    #[test]
    fn since_reports_restacked_entries() {
        let mut log = MessageLog::new(8);
        log.push("hit", MessageStyle::Normal);
        let seen = log.revision();
        assert_eq!(log.since(seen).count(), 0);

        log.push("hit", MessageStyle::Normal);
        let fresh: Vec<_> = log.since(seen).map(LogEntry::full_text).collect();
        assert_eq!(fresh, vec!["hit (x2)"]);
    }
}
