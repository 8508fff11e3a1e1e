//! Unified error types surfaced by the runtime API.
//!
//! Wraps content, validation and rule failures so hosts can bubble them up
//! with consistent context.
use thiserror::Error;

use starfall_core::{ConfigError, EconomyError, GameError, InvariantViolation};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A content table failed validation.
    #[error("invalid content: {0}")]
    Config(#[from] ConfigError),

    /// A content file could not be read or parsed.
    #[error("failed to load content")]
    Content(#[source] anyhow::Error),

    #[error("session requires content (stat table, catalog) before building")]
    MissingContent,

    /// A selection was rejected; the session is unchanged.
    #[error(transparent)]
    Economy(#[from] EconomyError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl RuntimeError {
    /// Split a loader error into its validation part, if any.
    pub(crate) fn from_load(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(config) => Self::Config(config),
            Err(other) => Self::Content(other),
        }
    }

    /// Rejections the player can retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Economy(err) if err.severity().is_recoverable())
    }
}
