//! Time ordering of pending intents.
//!
//! [`EventQueue`] is the generic sorted container; [`TurnSchedule`] wraps it
//! with relative delays, the non-destructive "who is next" peek, and
//! re-basing on every consumed intent.
pub mod queue;
pub mod turn;

pub use queue::{EntryId, EventQueue, QueueEntry, QueueError};
pub use turn::{IntentHandle, ScheduledAction, TurnSchedule};
