//! Upgrade validation and economy errors.

use crate::error::{ErrorSeverity, GameError};
use crate::stats::LookupError;

/// Reasons an upgrade definition is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("upgrade id is empty")]
    EmptyId,

    #[error("display name is empty")]
    EmptyDisplayName,

    #[error("max level must be at least 1")]
    ZeroMaxLevel,

    /// Unique upgrades can only be taken once.
    #[error("unique upgrade must have max level 1, got {0}")]
    UniqueMaxLevel(u32),

    #[error("upgrade has no stat modifiers")]
    NoModifiers,
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyId => "UPGRADE_EMPTY_ID",
            Self::EmptyDisplayName => "UPGRADE_EMPTY_DISPLAY_NAME",
            Self::ZeroMaxLevel => "UPGRADE_ZERO_MAX_LEVEL",
            Self::UniqueMaxLevel(_) => "UPGRADE_UNIQUE_MAX_LEVEL",
            Self::NoModifiers => "UPGRADE_NO_MODIFIERS",
        }
    }
}

/// Rejected upgrade selection. State is never modified when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EconomyError {
    /// No upgrade point to spend.
    #[error("no upgrade points available")]
    InsufficientPoints,

    /// Index does not address an option of the current offer.
    #[error("option {index} is out of range for an offer of {len}")]
    InvalidIndex { index: usize, len: usize },

    /// The option was offered before its last level was taken.
    #[error("option is already at max level {max_level}")]
    MaxLevelReached { max_level: u32 },

    /// The option refers to something the tables no longer resolve.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl GameError for EconomyError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientPoints | Self::InvalidIndex { .. } | Self::MaxLevelReached { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::Lookup(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientPoints => "ECONOMY_INSUFFICIENT_POINTS",
            Self::InvalidIndex { .. } => "ECONOMY_INVALID_INDEX",
            Self::MaxLevelReached { .. } => "ECONOMY_MAX_LEVEL_REACHED",
            Self::Lookup(err) => err.error_code(),
        }
    }
}
