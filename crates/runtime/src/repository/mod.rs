//! Repository layer for session snapshots.
//!
//! Repositories handle data that CHANGES during gameplay. Static content
//! (map, items) is handled by oracles, not repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::FileSnapshotRepository;
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
pub use types::{Checkpoint, SessionSnapshot, Timestamp};
