//! Action execution errors.
//!
//! Every variant whose severity is `Recoverable` means the world refused the
//! intent right now. Its `Display` text is the line shown to the player.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("That way is blocked.")]
    Blocked { destination: Position },

    #[error("That way is blocked.")]
    OutOfBounds { destination: Position },

    #[error("That way is blocked.")]
    Occupied { destination: Position },

    #[error("Nothing to attack.")]
    NothingToAttack { destination: Position },

    #[error("The dead cannot act.")]
    ActorDead(EntityId),

    #[error("There is nothing here to pick up.")]
    NothingToPickUp,

    #[error("Your inventory is full.")]
    InventoryFull,

    #[error("You have nothing in that slot.")]
    EmptySlot { slot: usize },

    #[error("The {name} cannot be used.")]
    NotConsumable { name: String },

    #[error("The {name} cannot be equipped.")]
    NotEquippable { name: String },

    #[error("Your health is already full.")]
    HealthFull,

    #[error("No enemy is close enough to strike.")]
    NoTargetInRange,

    #[error("You cannot target an area that you cannot see.")]
    TargetNotVisible { target: Position },

    #[error("You must select an enemy to target.")]
    InvalidTarget { target: Option<Position> },

    #[error("You cannot confuse yourself!")]
    TargetIsSelf,

    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,

    #[error("There are no stairs here.")]
    NoStairs,

    #[error("The stairs lead nowhere.")]
    NoSuchFloor { floor: u32 },

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ActionError {
    /// Whether this is the expected "cannot do that now" channel.
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            ActorNotFound(_) => ErrorSeverity::Internal,
            Oracle(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            Blocked { .. } => "ACTION_BLOCKED",
            OutOfBounds { .. } => "ACTION_OUT_OF_BOUNDS",
            Occupied { .. } => "ACTION_OCCUPIED",
            NothingToAttack { .. } => "ACTION_NOTHING_TO_ATTACK",
            ActorDead(_) => "ACTION_ACTOR_DEAD",
            NothingToPickUp => "ACTION_NOTHING_TO_PICK_UP",
            InventoryFull => "ACTION_INVENTORY_FULL",
            EmptySlot { .. } => "ACTION_EMPTY_SLOT",
            NotConsumable { .. } => "ACTION_NOT_CONSUMABLE",
            NotEquippable { .. } => "ACTION_NOT_EQUIPPABLE",
            HealthFull => "ACTION_HEALTH_FULL",
            NoTargetInRange => "ACTION_NO_TARGET_IN_RANGE",
            TargetNotVisible { .. } => "ACTION_TARGET_NOT_VISIBLE",
            InvalidTarget { .. } => "ACTION_INVALID_TARGET",
            TargetIsSelf => "ACTION_TARGET_IS_SELF",
            NoTargetsInRadius => "ACTION_NO_TARGETS_IN_RADIUS",
            NoStairs => "ACTION_NO_STAIRS",
            NoSuchFloor { .. } => "ACTION_NO_SUCH_FLOOR",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            Oracle(_) => "ACTION_ORACLE",
        }
    }
}
