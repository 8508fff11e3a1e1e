//! Upgrade definitions - named bundles of stat modifiers.

use super::error::ValidationError;
use crate::stats::StatField;

/// Upgrade grouping used by the selection screen.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UpgradeType {
    Ship,
    Shooter,
    Missile,
    Pulse,
    EmergencyProtocol,
}

/// Effect of one upgrade level on a stat.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub field: StatField,
    pub value_per_level: f32,
}

impl StatModifier {
    pub const fn new(field: StatField, value_per_level: f32) -> Self {
        Self {
            field,
            value_per_level,
        }
    }
}

/// One entry of the upgrade catalog.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeDefinition {
    /// Stable identifier (`rapid_fire`, `spread_shot`, ...).
    pub id: String,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub upgrade_type: UpgradeType,
    /// Unique upgrades are taken at most once.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unique: bool,
    pub max_level: u32,
    pub modifiers: Vec<StatModifier>,
}

impl UpgradeDefinition {
    /// Leveled upgrade (max level 5 by default).
    pub fn general(
        id: impl Into<String>,
        display_name: impl Into<String>,
        upgrade_type: UpgradeType,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            description: String::new(),
            upgrade_type,
            unique: false,
            max_level: 5,
            modifiers: Vec::new(),
        }
    }

    /// Unique upgrade (max level 1).
    pub fn unique(
        id: impl Into<String>,
        display_name: impl Into<String>,
        upgrade_type: UpgradeType,
    ) -> Self {
        Self {
            unique: true,
            max_level: 1,
            ..Self::general(id, display_name, upgrade_type)
        }
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_modifier(mut self, field: StatField, value_per_level: f32) -> Self {
        self.modifiers.push(StatModifier::new(field, value_per_level));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Check the definition's own invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.display_name.trim().is_empty() {
            return Err(ValidationError::EmptyDisplayName);
        }
        if self.max_level < 1 {
            return Err(ValidationError::ZeroMaxLevel);
        }
        if self.unique && self.max_level != 1 {
            return Err(ValidationError::UniqueMaxLevel(self.max_level));
        }
        if self.modifiers.is_empty() {
            return Err(ValidationError::NoModifiers);
        }
        Ok(())
    }

    /// Total effect on each modified stat after `level` levels.
    pub fn stat_effects(&self, level: u32) -> Vec<(StatField, f32)> {
        self.modifiers
            .iter()
            .map(|m| (m.field, m.value_per_level * level as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rapid_fire() -> UpgradeDefinition {
        UpgradeDefinition::general("rapid_fire", "Rapid Fire", UpgradeType::Shooter)
            .with_modifier(StatField::FireRate, -0.02)
            .with_modifier(StatField::ProjectileSpeed, 1.0)
    }

    #[test]
    fn valid_definitions_pass() {
        assert_eq!(rapid_fire().validate(), Ok(()));
        let overdrive = UpgradeDefinition::unique("overdrive", "Overdrive", UpgradeType::EmergencyProtocol)
            .with_modifier(StatField::MoveSpeed, 3.0);
        assert_eq!(overdrive.validate(), Ok(()));
    }

    #[test]
    fn validation_checks_in_order() {
        let mut def = rapid_fire();
        def.id = "  ".into();
        assert_eq!(def.validate(), Err(ValidationError::EmptyId));

        let mut def = rapid_fire();
        def.display_name.clear();
        assert_eq!(def.validate(), Err(ValidationError::EmptyDisplayName));

        assert_eq!(
            rapid_fire().with_max_level(0).validate(),
            Err(ValidationError::ZeroMaxLevel)
        );

        let mut def = rapid_fire();
        def.unique = true;
        assert_eq!(def.validate(), Err(ValidationError::UniqueMaxLevel(5)));

        let mut def = rapid_fire();
        def.modifiers.clear();
        assert_eq!(def.validate(), Err(ValidationError::NoModifiers));
    }

    #[test]
    fn stat_effects_scale_with_level() {
        let effects = rapid_fire().stat_effects(3);
        assert_eq!(effects[0].0, StatField::FireRate);
        assert!((effects[0].1 + 0.06).abs() < 1e-6);
        assert_eq!(effects[1], (StatField::ProjectileSpeed, 3.0));
    }
}
