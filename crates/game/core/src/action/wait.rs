use crate::action::{ActionError, ActionOutcome, ActionTransition, living_actor};
use crate::env::GameEnv;
use crate::narration::MessageSink;
use crate::state::{EntityId, GameState};

/// Wait action - actor passes their turn without performing any action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitAction {
    pub actor: EntityId,
}

impl WaitAction {
    pub fn new(actor: EntityId) -> Self {
        Self { actor }
    }
}

impl ActionTransition for WaitAction {
    fn actor(&self) -> EntityId {
        self.actor
    }

    fn validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), ActionError> {
        living_actor(state, self.actor).map(|_| ())
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _env: &GameEnv<'_>,
        _sink: &mut dyn MessageSink,
    ) -> Result<ActionOutcome, ActionError> {
        Ok(ActionOutcome::Performed)
    }
}
