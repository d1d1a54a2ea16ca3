/// A LIFO stack of recorded edits.
use crate::operation::LogEntry;

/// Ordered stack of entries, most recent on top.
///
/// Entries are never handed out mutably, so nothing changes after a push.
#[derive(Debug, Clone, Default)]
pub struct EditLog {
    entries: Vec<LogEntry>,
}

impl EditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an entry on top of the log.
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Pops the most recent entry. Returns `None` when empty.
    pub fn pop(&mut self) -> Option<LogEntry> {
        self.entries.pop()
    }

    /// The most recent entry, without removing it.
    pub fn peek(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops everything.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Evicts the oldest entries so at most `max` remain.
    /// Returns how many were evicted.
    pub fn truncate_oldest(&mut self, max: usize) -> usize {
        let excess = self.entries.len().saturating_sub(max);
        if excess > 0 {
            self.entries.drain(..excess);
        }
        excess
    }

    /// Iterates from oldest to most recent.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
