//! Sorted event queue with stable FIFO tie-breaking.
//!
//! Entries live in a single `Vec` kept sorted by priority. Among equal
//! priorities the insertion order is preserved: a new entry is placed after
//! every existing entry with the same priority. Small actor counts make the
//! O(n) shift on insert cheaper than maintaining a heap with sequence numbers.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Tick;

/// Identity of one queued entry, assigned by [`EventQueue::enqueue`].
///
/// Two entries holding equal values are still distinct: cancelling by
/// `EntryId` touches exactly the entry that was enqueued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueEntry<T> {
    pub id: EntryId,
    pub priority: Tick,
    pub value: T,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueError {
    /// Popped with nothing queued; the caller broke its scheduling discipline.
    #[error("event queue is empty")]
    Empty,
}

impl GameError for QueueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            QueueError::Empty => "QUEUE_EMPTY",
        }
    }
}

/// Priority-ordered queue, lowest priority first.
///
/// # Invariants
///
/// - `entries` is sorted by `priority` ascending
/// - equal priorities appear in insertion order
/// - `next_id` is greater than every id ever handed out
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventQueue<T> {
    entries: Vec<QueueEntry<T>>,
    next_id: u64,
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventQueue<T> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Inserts `value` behind every entry whose priority is `<= priority`.
    pub fn enqueue(&mut self, value: T, priority: Tick) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        let index = self.entries.partition_point(|entry| entry.priority <= priority);
        self.entries.insert(
            index,
            QueueEntry {
                id,
                priority,
                value,
            },
        );
        id
    }

    /// Adds `delta` to every priority. Relative order is unchanged.
    pub fn adjust_priorities(&mut self, delta: Tick) {
        for entry in &mut self.entries {
            entry.priority += delta;
        }
    }

    pub fn front(&self) -> Option<&QueueEntry<T>> {
        self.entries.first()
    }

    pub fn dequeue_entry(&mut self) -> Result<QueueEntry<T>, QueueError> {
        if self.entries.is_empty() {
            return Err(QueueError::Empty);
        }
        Ok(self.entries.remove(0))
    }

    pub fn dequeue_with_priority(&mut self) -> Result<(Tick, T), QueueError> {
        self.dequeue_entry().map(|entry| (entry.priority, entry.value))
    }

    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        self.dequeue_entry().map(|entry| entry.value)
    }

    /// Removes every entry matching `predicate`, returning how many were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&QueueEntry<T>) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(entry));
        before - self.entries.len()
    }

    /// Removes the single entry created by the `enqueue` call that returned `id`.
    pub fn remove_by_identity(&mut self, id: EntryId) -> usize {
        self.remove_where(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from front (next due) to back.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry<T>> {
        self.entries.iter()
    }
}

impl<T: PartialEq> EventQueue<T> {
    /// Removes every entry whose value equals `value`.
    pub fn remove_by_value(&mut self, value: &T) -> usize {
        self.remove_where(|entry| entry.value == *value)
    }
}
