//! Turn schedule: "when" expressed as a delay relative to now.
//!
//! Priorities are re-based on every [`TurnSchedule::advance`], so the front
//! entry's priority is always the time remaining until it is due. Absolute game
//! time is not stored here; callers sum the `elapsed` values they receive.

use super::queue::{EntryId, EventQueue, QueueEntry, QueueError};
use crate::action::Action;
use crate::state::{EntityId, Tick};

/// Handle to one scheduled intent, used to cancel exactly that intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentHandle(EntryId);

impl IntentHandle {
    pub fn entry_id(self) -> EntryId {
        self.0
    }
}

/// An intent popped from the schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledAction {
    pub action: Action,
    /// Time that passed between the previous advance and this intent becoming due.
    pub elapsed: Tick,
    pub handle: IntentHandle,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnSchedule {
    queue: EventQueue<Action>,
}

impl TurnSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action` to become due `delay` ticks from now. `None` is ignored.
    pub fn schedule(&mut self, action: Option<Action>, delay: Tick) -> Option<IntentHandle> {
        let action = action?;
        Some(IntentHandle(self.queue.enqueue(action, delay)))
    }

    /// Owner of the next due intent. Never mutates the queue.
    pub fn peek_owner(&self) -> Option<EntityId> {
        self.queue.front().map(|entry| entry.value.actor())
    }

    /// Pops the next due intent and re-expresses every remaining priority
    /// relative to the instant it became due.
    pub fn advance(&mut self) -> Result<ScheduledAction, QueueError> {
        let QueueEntry {
            id,
            priority,
            value,
        } = self.queue.dequeue_entry()?;
        self.queue.adjust_priorities(-priority);
        Ok(ScheduledAction {
            action: value,
            elapsed: priority,
            handle: IntentHandle(id),
        })
    }

    /// Cancels one intent. Cancelling something already consumed is a no-op.
    pub fn cancel(&mut self, handle: IntentHandle) -> bool {
        self.queue.remove_by_identity(handle.0) > 0
    }

    /// Cancels every pending intent owned by `actor`.
    pub fn cancel_actor(&mut self, actor: EntityId) -> usize {
        self.queue.remove_where(|entry| entry.value.actor() == actor)
    }

    /// Cancels every pending intent whose owner fails `keep`.
    pub fn retain_actors<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(EntityId) -> bool,
    {
        self.queue.remove_where(|entry| !keep(entry.value.actor()))
    }

    pub fn has_pending(&self, actor: EntityId) -> bool {
        self.queue.iter().any(|entry| entry.value.actor() == actor)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Pending intents from next due to last.
    pub fn iter(&self) -> impl Iterator<Item = &QueueEntry<Action>> {
        self.queue.iter()
    }
}
