//! Session: one game in progress.
//!
//! The session owns the state, the orchestrator and the message log, and is
//! the only place that blocks (waiting on an [`InputSource`]).

use std::fmt;

use tracing::{debug, info};

use game_core::{Action, GameConfig, GameState};

use crate::api::{DecisionProvider, InputSource, PlayerCommand, Result, RuntimeError};
use crate::hooks::HookRegistry;
use crate::messages::MessageLog;
use crate::oracle::OracleBundle;
use crate::orchestrator::{TurnContext, TurnOrchestrator, TurnReport};
use crate::providers::NpcBrain;
use crate::repository::{SessionSnapshot, SnapshotRepository};

pub const DEFAULT_SESSION_ID: &str = "default";

/// Runtime configuration shared by the session and its collaborators.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Maximum number of stacked lines kept in the message log.
    pub message_capacity: usize,
    /// Write a snapshot when the player quits (requires a repository).
    pub snapshot_on_quit: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            message_capacity: 256,
            snapshot_on_quit: true,
        }
    }
}

/// Why [`Session::run`] returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    PlayerDied,
}

pub struct Session {
    config: RuntimeConfig,
    session_id: String,
    state: GameState,
    orchestrator: TurnOrchestrator,
    messages: MessageLog,
    oracles: OracleBundle,
    decisions: Box<dyn DecisionProvider>,
    hooks: HookRegistry,
    repository: Option<Box<dyn SnapshotRepository>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .field("nonce", &self.state.nonce)
            .field("elapsed", &self.orchestrator.elapsed())
            .field("pending", &self.orchestrator.schedule().len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Resolves one player turn.
    pub fn submit(&mut self, action: Action) -> Result<TurnReport> {
        let mut ctx = TurnContext {
            state: &mut self.state,
            env: self.oracles.as_game_env(),
            decisions: self.decisions.as_ref(),
            sink: &mut self.messages,
            hooks: &self.hooks,
        };
        self.orchestrator.submit(&mut ctx, action)
    }

    /// Pulls commands from `input` until the player quits or dies.
    pub fn run(&mut self, input: &mut dyn InputSource) -> Result<SessionEnd> {
        info!(
            target: "runtime::session",
            session = %self.session_id,
            nonce = self.state.nonce,
            "session started"
        );

        loop {
            if !self.state.player().is_alive() {
                return Ok(self.finish(input, SessionEnd::PlayerDied));
            }

            match input.next_command(&self.state, &self.messages)? {
                PlayerCommand::Quit => {
                    if self.config.snapshot_on_quit {
                        self.save()?;
                    }
                    return Ok(self.finish(input, SessionEnd::Quit));
                }
                PlayerCommand::Act(action) => {
                    if self.submit(action)? == TurnReport::PlayerDied {
                        return Ok(self.finish(input, SessionEnd::PlayerDied));
                    }
                }
            }
        }
    }

    fn finish(&mut self, input: &mut dyn InputSource, end: SessionEnd) -> SessionEnd {
        info!(
            target: "runtime::session",
            session = %self.session_id,
            end = ?end,
            elapsed = %self.orchestrator.elapsed(),
            "session ended"
        );
        input.session_ended(end, &self.state, &self.messages);
        end
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            orchestrator: self.orchestrator.snapshot(),
        }
    }

    /// Replaces the state and pending intents. The message log is kept.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        debug!(
            target: "runtime::session",
            nonce = snapshot.state.nonce,
            pending = snapshot.orchestrator.schedule.len(),
            "restoring snapshot"
        );
        self.state = snapshot.state;
        self.orchestrator = TurnOrchestrator::from_snapshot(snapshot.orchestrator);
    }

    /// Writes a snapshot to the repository. A session without one saves nothing.
    pub fn save(&self) -> Result<bool> {
        let Some(repository) = self.repository.as_deref() else {
            debug!(target: "runtime::session", "no repository configured, skipping save");
            return Ok(false);
        };
        repository.save(&self.session_id, &self.snapshot())?;
        info!(
            target: "runtime::repository",
            session = %self.session_id,
            nonce = self.state.nonce,
            "snapshot saved"
        );
        Ok(true)
    }

    /// Restores this session's stored snapshot, if the repository has one.
    pub fn resume(&mut self) -> Result<bool> {
        let Some(repository) = self.repository.as_deref() else {
            return Ok(false);
        };
        let Some(snapshot) = repository.load(&self.session_id)? else {
            return Ok(false);
        };
        self.restore(snapshot);
        info!(
            target: "runtime::repository",
            session = %self.session_id,
            nonce = self.state.nonce,
            "snapshot restored"
        );
        Ok(true)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    pub fn oracles(&self) -> &OracleBundle {
        &self.oracles
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    session_id: String,
    state: Option<GameState>,
    oracles: Option<OracleBundle>,
    decisions: Option<Box<dyn DecisionProvider>>,
    hooks: Option<HookRegistry>,
    repository: Option<Box<dyn SnapshotRepository>>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            state: None,
            oracles: None,
            decisions: None,
            hooks: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Provide initial game state
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracles
    pub fn oracles(mut self, oracles: OracleBundle) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the non-player decision provider. Defaults to [`NpcBrain`].
    pub fn decisions(mut self, provider: impl DecisionProvider + 'static) -> Self {
        self.decisions = Some(Box::new(provider));
        self
    }

    /// Set custom post-turn hooks.
    ///
    /// If not provided, [`HookRegistry::default_hooks`] is used.
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn repository(mut self, repository: impl SnapshotRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Builds the session and computes the player's initial view.
    pub fn build(self) -> Result<Session> {
        let state = self.state.ok_or(RuntimeError::MissingState)?;
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let hooks = self
            .hooks
            .unwrap_or_else(|| HookRegistry::default_hooks(&self.config.game_config));
        let decisions = self
            .decisions
            .unwrap_or_else(|| Box::new(NpcBrain::new()) as Box<dyn DecisionProvider>);

        let mut session = Session {
            messages: MessageLog::new(self.config.message_capacity),
            config: self.config,
            session_id: self.session_id,
            state,
            orchestrator: TurnOrchestrator::new(),
            oracles,
            decisions,
            hooks,
            repository: self.repository,
        };

        let env = session.oracles.as_game_env();
        session
            .hooks
            .run_after_player(&mut session.state, &env, &mut session.messages)?;

        Ok(session)
    }
}
