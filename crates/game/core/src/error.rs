//! Common error infrastructure for starfall-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g., [`ConfigError`](crate::stats::ConfigError),
//! [`EconomyError`](crate::upgrades::EconomyError)) are defined in their
//! respective modules alongside the operations that produce them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each domain has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Values, not panics**: Runtime failures are returned to the caller; only
//!   programmer errors trip `debug_assert!` in debug builds

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Rejected player input; state is unchanged and the player may retry
/// - **Validation**: Invalid reference (unknown field or upgrade id); caller gets a sentinel
/// - **Internal**: Programmer error such as a non-positive credit or damage amount
/// - **Fatal**: Configuration cannot be used; startup must abort
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - surfaced to the player as a rejected action.
    ///
    /// Examples: no upgrade points, option already at max level
    Recoverable,

    /// Validation error - invalid reference, should not retry without changes.
    ///
    /// Examples: stat field missing from the registry, unknown upgrade id
    Validation,

    /// Internal error - caller broke an operation precondition.
    ///
    /// Examples: negative point credit, zero damage
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - content tables are unusable, cannot start a run.
    ///
    /// Examples: duplicate stat definitions, unique upgrade with max level 5
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all starfall-core errors.
///
/// This trait provides a uniform interface for error classification
/// across all error types in the crate.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Broken operation preconditions.
///
/// These are programmer errors: every operation that can produce one also
/// trips a `debug_assert!`, so debug builds fail loudly while release builds
/// leave state untouched and hand the violation back to the caller.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    /// Upgrade points may only be credited in positive amounts.
    #[error("point credit must be positive, got {0}")]
    NonPositiveCredit(i64),

    /// Damage must be a positive, finite amount.
    #[error("damage must be positive and finite, got {0}")]
    NonPositiveDamage(f32),
}

impl GameError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveCredit(_) => "INVARIANT_NON_POSITIVE_CREDIT",
            Self::NonPositiveDamage(_) => "INVARIANT_NON_POSITIVE_DAMAGE",
        }
    }
}
