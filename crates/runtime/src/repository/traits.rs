//! Repository contract for saving and loading sessions.

use super::error::{RepositoryError, Result};
use super::types::SessionSnapshot;

/// Persists whole-session snapshots keyed by session id.
pub trait SnapshotRepository: Send + Sync {
    /// Save (or overwrite) the snapshot for a session.
    fn save(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<()>;

    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>>;

    fn exists(&self, session_id: &str) -> bool;

    /// Deleting a missing session is not an error.
    fn delete(&self, session_id: &str) -> Result<()>;

    /// Sorted session ids with a stored snapshot.
    fn list_sessions(&self) -> Result<Vec<String>>;
}

/// Session ids become directory names, so they are restricted to a safe alphabet.
pub(crate) fn validate_session_id(session_id: &str) -> Result<()> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSessionId(session_id.to_string()))
    }
}
