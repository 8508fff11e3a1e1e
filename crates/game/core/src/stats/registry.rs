//! Stat registry - the validated, immutable stat table of a run.

use super::definition::StatDefinition;
use super::error::{ConfigError, ConfigViolation, LookupError};
use super::field::{StatCategory, StatField};

/// Immutable table of stat definitions, indexed by [`StatField`].
///
/// Built once at startup through [`StatRegistry::load`] (every field must be
/// defined) or [`StatRegistry::load_partial`] (a subset is acceptable and
/// missing fields surface as [`LookupError::MissingDefinition`] on access).
#[derive(Clone, Debug, PartialEq)]
pub struct StatRegistry {
    definitions: [Option<StatDefinition>; StatField::COUNT],
}

impl StatRegistry {
    /// Load a complete stat table.
    ///
    /// Fails with every violation found: duplicates, missing fields, wrong
    /// categories, empty display names and non-finite numbers.
    pub fn load(definitions: impl IntoIterator<Item = StatDefinition>) -> Result<Self, ConfigError> {
        Self::build(definitions, true)
    }

    /// Load a stat table that may leave some fields undefined.
    pub fn load_partial(
        definitions: impl IntoIterator<Item = StatDefinition>,
    ) -> Result<Self, ConfigError> {
        Self::build(definitions, false)
    }

    fn build(
        definitions: impl IntoIterator<Item = StatDefinition>,
        require_complete: bool,
    ) -> Result<Self, ConfigError> {
        let mut table: [Option<StatDefinition>; StatField::COUNT] = core::array::from_fn(|_| None);
        let mut violations = Vec::new();

        for def in definitions {
            let field = def.field;
            if def.display_name.trim().is_empty() {
                violations.push(ConfigViolation::EmptyStatName(field));
            }
            if def.category != field.category() {
                violations.push(ConfigViolation::CategoryMismatch {
                    field,
                    expected: field.category(),
                    found: def.category,
                });
            }
            if !def.default_value.is_finite() {
                violations.push(ConfigViolation::NonFiniteStatValue {
                    field,
                    column: "default_value",
                });
            }
            if !def.increment_per_level.is_finite() {
                violations.push(ConfigViolation::NonFiniteStatValue {
                    field,
                    column: "increment_per_level",
                });
            }

            let slot = &mut table[field.as_index()];
            if slot.is_some() {
                violations.push(ConfigViolation::DuplicateField(field));
            } else {
                *slot = Some(def);
            }
        }

        if require_complete {
            violations.extend(
                StatField::all()
                    .into_iter()
                    .filter(|f| table[f.as_index()].is_none())
                    .map(ConfigViolation::MissingDefinition),
            );
        }

        ConfigError::check(violations)?;
        Ok(Self { definitions: table })
    }

    /// Look up the definition of a field.
    pub fn get(&self, field: StatField) -> Result<&StatDefinition, LookupError> {
        self.definitions[field.as_index()]
            .as_ref()
            .ok_or(LookupError::MissingDefinition(field))
    }

    /// Returns true if the field has a definition.
    pub fn contains(&self, field: StatField) -> bool {
        self.definitions[field.as_index()].is_some()
    }

    /// Format a value using the field's integer/fractional rule.
    pub fn format_value(&self, field: StatField, value: f32) -> Result<String, LookupError> {
        self.get(field).map(|def| def.format_value(value))
    }

    /// Unit suffix of a field.
    pub fn unit(&self, field: StatField) -> Result<&str, LookupError> {
        self.get(field).map(|def| def.unit.as_str())
    }

    /// Iterate definitions in field order.
    pub fn iter(&self) -> impl Iterator<Item = &StatDefinition> + '_ {
        self.definitions.iter().flatten()
    }

    /// Registered fields in field order.
    pub fn fields(&self) -> impl Iterator<Item = StatField> + '_ {
        self.iter().map(|def| def.field)
    }

    /// Definitions tagged with a category.
    pub fn by_category(&self, category: StatCategory) -> Vec<&StatDefinition> {
        self.iter().filter(|def| def.category == category).collect()
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
