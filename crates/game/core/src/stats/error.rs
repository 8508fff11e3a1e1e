//! Table loading and lookup errors.

use core::fmt;

use super::field::{StatCategory, StatField};
use crate::error::{ErrorSeverity, GameError};
use crate::upgrades::ValidationError;

/// A single problem found while loading a stat or upgrade table.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigViolation {
    /// Two stat definitions share a field.
    #[error("duplicate definition for stat `{0}`")]
    DuplicateField(StatField),

    /// A strict stat table has no definition for a field.
    #[error("no definition for stat `{0}`")]
    MissingDefinition(StatField),

    /// A stat definition has an empty display name.
    #[error("stat `{0}` has an empty display name")]
    EmptyStatName(StatField),

    /// A stat definition lists a category its field does not belong to.
    #[error("stat `{field}` is a {expected} stat, not {found}")]
    CategoryMismatch {
        field: StatField,
        expected: StatCategory,
        found: StatCategory,
    },

    /// A numeric column of a stat definition is NaN or infinite.
    #[error("stat `{field}` has a non-finite {column}")]
    NonFiniteStatValue {
        field: StatField,
        column: &'static str,
    },

    /// An upgrade definition failed validation.
    #[error("upgrade #{index} (`{id}`): {error}")]
    InvalidUpgrade {
        index: usize,
        id: String,
        error: ValidationError,
    },

    /// Two upgrade definitions share an id.
    #[error("duplicate upgrade id `{0}`")]
    DuplicateUpgradeId(String),

    /// An upgrade modifies a stat the registry does not define.
    #[error("upgrade `{id}` modifies unregistered stat `{field}`")]
    UnregisteredModifierField { id: String, field: StatField },
}

/// Load-time failure carrying every violation found, not just the first.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigError {
    pub violations: Vec<ConfigViolation>,
}

impl ConfigError {
    pub fn new(violations: Vec<ConfigViolation>) -> Self {
        Self { violations }
    }

    /// Returns `Ok(())` when no violations were collected.
    pub fn check(violations: Vec<ConfigViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self::new(violations))
        }
    }

    pub fn violations(&self) -> &[ConfigViolation] {
        &self.violations
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} configuration violation(s)", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "CONFIG_INVALID"
    }
}

/// Runtime query for something the loaded tables do not contain.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The registry has no definition for this field.
    #[error("stat `{0}` is not registered")]
    MissingDefinition(StatField),

    /// The catalog has no upgrade with this id.
    #[error("upgrade `{0}` is not in the catalog")]
    UnknownUpgrade(String),
}

impl GameError for LookupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingDefinition(_) => "LOOKUP_MISSING_DEFINITION",
            Self::UnknownUpgrade(_) => "LOOKUP_UNKNOWN_UPGRADE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_enumerates_every_violation() {
        let err = ConfigError::new(vec![
            ConfigViolation::DuplicateField(StatField::Mass),
            ConfigViolation::MissingDefinition(StatField::Spread),
        ]);
        assert_eq!(
            err.to_string(),
            "2 configuration violation(s): duplicate definition for stat `mass`; \
             no definition for stat `spread`"
        );
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn check_passes_on_empty() {
        assert!(ConfigError::check(Vec::new()).is_ok());
        assert!(ConfigError::check(vec![ConfigViolation::EmptyStatName(StatField::Mass)]).is_err());
    }
}
