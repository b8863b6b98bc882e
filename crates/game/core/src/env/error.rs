//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ItemHandle, Position};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle means the session was wired incorrectly, so those variants
/// are fatal. Dangling references are validation failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("ItemOracle not available")]
    ItemsNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("position {position} is outside floor {floor}")]
    PositionOutOfBounds { floor: u32, position: Position },

    #[error("item definition {0:?} not found")]
    ItemNotFound(ItemHandle),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | ItemsNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,
            PositionOutOfBounds { .. } | ItemNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            PositionOutOfBounds { .. } => "ORACLE_POSITION_OUT_OF_BOUNDS",
            ItemNotFound(_) => "ORACLE_ITEM_NOT_FOUND",
        }
    }
}
