//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::{SnapshotRepository, validate_session_id};
use super::types::SessionSnapshot;

#[derive(Default)]
pub struct InMemorySnapshotRepo {
    snapshots: RwLock<HashMap<String, SessionSnapshot>>,
}

impl InMemorySnapshotRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<()> {
        validate_session_id(session_id)?;
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert(session_id.to_string(), snapshot.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(session_id).cloned())
    }

    fn exists(&self, session_id: &str) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(session_id))
            .unwrap_or(false)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(session_id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut sessions: Vec<String> = snapshots.keys().cloned().collect();
        sessions.sort_unstable();
        Ok(sessions)
    }
}
