//! CLI configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;
use runtime::RuntimeConfig;
use runtime::session::DEFAULT_SESSION_ID;

#[derive(Clone, Debug)]
pub struct CliConfig {
    pub fov_radius: u32,
    pub message_capacity: usize,
    pub save_dir: PathBuf,
    pub session_id: String,
    pub snapshot_on_quit: bool,
    pub log_dir: PathBuf,
    /// Seed for a new game. A resumed game keeps its stored seed.
    pub seed: Option<u64>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            fov_radius: runtime.game_config.fov_radius,
            message_capacity: runtime.message_capacity,
            save_dir: data_dir().join("saves"),
            session_id: DEFAULT_SESSION_ID.to_string(),
            snapshot_on_quit: runtime.snapshot_on_quit,
            log_dir: cache_dir().join("logs"),
            seed: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_FOV_RADIUS` - Field-of-view radius in tiles (default: 8)
    /// - `DUNGEON_MESSAGE_CAPACITY` - Message log capacity (default: 256)
    /// - `DUNGEON_SAVE_DIR` - Directory for snapshots (default: platform data dir)
    /// - `DUNGEON_SESSION_ID` - Save slot name (default: `default`)
    /// - `DUNGEON_SNAPSHOT_ON_QUIT` - Save when quitting (default: true)
    /// - `DUNGEON_LOG_DIR` - Directory for log files (default: platform cache dir)
    /// - `DUNGEON_SEED` - Seed for a new game (default: derived from the clock)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(radius) = read_env::<u32>("DUNGEON_FOV_RADIUS") {
            config.fov_radius = radius;
        }
        if let Some(capacity) = read_env::<usize>("DUNGEON_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }
        if let Ok(dir) = env::var("DUNGEON_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Ok(session_id) = env::var("DUNGEON_SESSION_ID") {
            config.session_id = session_id;
        }
        if let Some(enable) = read_env::<bool>("DUNGEON_SNAPSHOT_ON_QUIT") {
            config.snapshot_on_quit = enable;
        }
        if let Ok(dir) = env::var("DUNGEON_LOG_DIR") {
            config.log_dir = PathBuf::from(dir);
        }
        config.seed = read_env::<u64>("DUNGEON_SEED");

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game_config: GameConfig::with_fov_radius(self.fov_radius),
            message_capacity: self.message_capacity,
            snapshot_on_quit: self.snapshot_on_quit,
        }
    }

    pub fn seed_or_clock(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

/// Platform data directory, e.g. `~/.local/share/dungeon` on Linux.
fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

/// Platform cache directory, e.g. `~/.cache/dungeon` on Linux.
fn cache_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "dungeon")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/dungeon"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
