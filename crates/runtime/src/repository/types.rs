//! Persisted records.

use serde::{Deserialize, Serialize};

use game_core::{GameState, Tick};

use crate::orchestrator::OrchestratorSnapshot;

/// Everything needed to resume a session exactly where it stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub orchestrator: OrchestratorSnapshot,
}

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Human-readable metadata written next to a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub session_id: String,

    /// Unix timestamp when this checkpoint was created
    pub timestamp: Timestamp,

    /// Floor the player was on.
    pub depth: u32,

    pub elapsed: Tick,

    /// Executed-intent count at save time.
    pub nonce: u64,
}

impl Checkpoint {
    pub fn for_snapshot(session_id: impl Into<String>, snapshot: &SessionSnapshot) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp: now(),
            depth: snapshot.state.world.depth,
            elapsed: snapshot.orchestrator.elapsed,
            nonce: snapshot.state.nonce,
        }
    }
}

fn now() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}
