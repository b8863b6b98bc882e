//! Runtime orchestration for the turn-based simulation.
//!
//! This crate drives `game-core`: it owns the turn schedule through the
//! [`TurnOrchestrator`], sources intents from the player and the built-in AI,
//! keeps derived world data current through hooks, and persists sessions.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the session object and builder
//! - [`orchestrator`] resolves one player turn at a time
//! - [`api`] exposes the types downstream clients interact with
//! - [`providers`] contains the non-player decision policies
//! - [`hooks`] provides the post-turn hook system
//! - [`oracle`] and [`repository`] provide data adapters reused by clients
pub mod api;
pub mod hooks;
pub mod messages;
pub mod oracle;
pub mod orchestrator;
pub mod providers;
pub mod repository;
pub mod session;

pub use api::{
    DecisionProvider, InputSource, PlayerCommand, Result, RuntimeError, ScriptedInput,
    WaitProvider,
};
pub use hooks::{
    ConfusionHook, FieldOfView, HookCriticality, HookError, HookRegistry, PostTurnHook, RadiusFov,
    VisibilityHook,
};
pub use messages::{LogEntry, MessageLog};
pub use oracle::{ItemOracleImpl, MapOracleImpl, OracleBundle};
pub use orchestrator::{OrchestratorSnapshot, TurnContext, TurnOrchestrator, TurnPhase, TurnReport};
pub use providers::{ConfusedAi, HostileAi, NpcBrain};
pub use repository::{
    Checkpoint, FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SessionSnapshot,
    SnapshotRepository,
};
pub use session::{RuntimeConfig, Session, SessionBuilder, SessionEnd};
