//! Stat definitions - one row of the stat table.

use super::field::{StatCategory, StatField};

/// Static configuration of one stat field.
///
/// Owned by [`StatRegistry`](super::StatRegistry); immutable for the
/// duration of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDefinition {
    pub field: StatField,
    pub display_name: String,
    pub category: StatCategory,
    pub default_value: f32,
    /// Amount added per upgrade level taken.
    pub increment_per_level: f32,
    /// Number of times this stat can be upgraded (0 = never offered).
    pub max_level: u32,
    /// Unit suffix used in display strings (`"/s"`, `"s"`, `"°"`, ...).
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit: String,
    /// Integer stats always render truncated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_integer: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl StatDefinition {
    /// Create a definition whose category is derived from the field.
    pub fn new(
        field: StatField,
        display_name: impl Into<String>,
        default_value: f32,
        increment_per_level: f32,
        max_level: u32,
    ) -> Self {
        Self {
            field,
            display_name: display_name.into(),
            category: field.category(),
            default_value,
            increment_per_level,
            max_level,
            unit: String::new(),
            is_integer: false,
            description: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn integer(mut self) -> Self {
        self.is_integer = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Value after `level` upgrades of `increment_per_level` each.
    pub fn value_at_level(&self, level: u32) -> f32 {
        self.default_value + level as f32 * self.increment_per_level
    }

    /// Render a value of this stat for display.
    ///
    /// - integer stats truncate: `12.9` → `"12"`
    /// - fractional stats with a remainder keep one decimal: `12.34` → `"12.3"`
    /// - fractional stats without a remainder truncate: `12.0` → `"12"`
    pub fn format_value(&self, value: f32) -> String {
        if !self.is_integer && value.fract() != 0.0 {
            return format!("{value:.1}");
        }
        (value.trunc() as i64).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_values_truncate() {
        let def = StatDefinition::new(StatField::MultiShot, "Multi Shot", 1.0, 1.0, 4).integer();
        assert_eq!(def.format_value(12.9), "12");
        assert_eq!(def.format_value(-0.4), "0");
    }

    #[test]
    fn fractional_values_keep_one_decimal() {
        let def = StatDefinition::new(StatField::ShieldRegenDelay, "Shield Delay", 2.0, -0.2, 5)
            .with_unit("s");
        assert_eq!(def.format_value(12.34), "12.3");
        assert_eq!(def.format_value(12.0), "12");
        assert_eq!(def.format_value(-0.2), "-0.2");
    }

    #[test]
    fn value_at_level_accumulates_increments() {
        let def = StatDefinition::new(StatField::MaxShield, "Max Shield", 100.0, 50.0, 10);
        assert_eq!(def.value_at_level(0), 100.0);
        assert_eq!(def.value_at_level(3), 250.0);
        assert_eq!(def.category, StatCategory::Survival);
    }
}
