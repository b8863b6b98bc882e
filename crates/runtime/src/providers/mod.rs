//! Decision providers for non-player actors.
mod ai;

pub use ai::{ConfusedAi, HostileAi, NpcBrain};
