//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::traits::{SnapshotRepository, validate_session_id};
use super::types::{Checkpoint, SessionSnapshot};

const SNAPSHOT_FILE: &str = "snapshot.bin";
const CHECKPOINT_FILE: &str = "checkpoint.json";

/// Stores each session in its own directory.
///
/// # File Format
///
/// ```text
/// <base_dir>/<session_id>/snapshot.bin     bincode SessionSnapshot
/// <base_dir>/<session_id>/checkpoint.json  Checkpoint metadata
/// ```
///
/// Both files are written to a temp file first and renamed into place.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn session_dir(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(session_id)
    }

    fn snapshot_path(&self, session_id: &str) -> PathBuf {
        self.session_dir(session_id).join(SNAPSHOT_FILE)
    }

    fn checkpoint_path(&self, session_id: &str) -> PathBuf {
        self.session_dir(session_id).join(CHECKPOINT_FILE)
    }

    /// Loads the metadata written alongside the last snapshot.
    pub fn load_checkpoint(&self, session_id: &str) -> Result<Option<Checkpoint>> {
        validate_session_id(session_id)?;
        let path = self.checkpoint_path(session_id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let checkpoint =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;
        Ok(Some(checkpoint))
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
    fs::rename(&temp_path, path).map_err(RepositoryError::Io)
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, session_id: &str, snapshot: &SessionSnapshot) -> Result<()> {
        validate_session_id(session_id)?;
        fs::create_dir_all(self.session_dir(session_id)).map_err(RepositoryError::Io)?;

        let bytes = bincode::serialize(snapshot)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let path = self.snapshot_path(session_id);
        write_atomic(&path, &bytes)?;

        let checkpoint = Checkpoint::for_snapshot(session_id, snapshot);
        let json = serde_json::to_vec_pretty(&checkpoint)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        write_atomic(&self.checkpoint_path(session_id), &json)?;

        tracing::debug!(
            target: "runtime::repository",
            session = session_id,
            nonce = snapshot.state.nonce,
            "Saved snapshot to {}",
            path.display()
        );
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SessionSnapshot>> {
        validate_session_id(session_id)?;
        let path = self.snapshot_path(session_id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let snapshot: SessionSnapshot = bincode::deserialize(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {e}", path.display()))
        })?;

        tracing::debug!(
            target: "runtime::repository",
            session = session_id,
            nonce = snapshot.state.nonce,
            "Loaded snapshot from {}",
            path.display()
        );
        Ok(Some(snapshot))
    }

    fn exists(&self, session_id: &str) -> bool {
        validate_session_id(session_id).is_ok() && self.snapshot_path(session_id).exists()
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        let dir = self.session_dir(session_id);
        if dir.exists() {
            fs::remove_dir_all(&dir).map_err(RepositoryError::Io)?;
            tracing::debug!(target: "runtime::repository", session = session_id, "Deleted session");
        }
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();
            if !path.join(SNAPSHOT_FILE).is_file() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                sessions.push(name.to_string());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}
