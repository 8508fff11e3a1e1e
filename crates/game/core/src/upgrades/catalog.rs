//! Upgrade catalog - validated, immutable upgrade table.

use std::collections::HashMap;

use super::definition::{UpgradeDefinition, UpgradeType};
use crate::stats::{ConfigError, ConfigViolation, LookupError, StatRegistry};

/// All upgrades available in a run, in table order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpgradeCatalog {
    upgrades: Vec<UpgradeDefinition>,
    index: HashMap<String, usize>,
}

impl UpgradeCatalog {
    /// Validate and index an upgrade table.
    ///
    /// Collects every failing definition, every duplicate id and, when a
    /// registry is given, every modifier naming a stat the registry lacks.
    pub fn load(
        definitions: impl IntoIterator<Item = UpgradeDefinition>,
        registry: Option<&StatRegistry>,
    ) -> Result<Self, ConfigError> {
        let mut upgrades = Vec::new();
        let mut index = HashMap::new();
        let mut violations = Vec::new();

        for (position, def) in definitions.into_iter().enumerate() {
            if let Err(error) = def.validate() {
                violations.push(ConfigViolation::InvalidUpgrade {
                    index: position,
                    id: def.id.clone(),
                    error,
                });
            }

            if let Some(registry) = registry {
                violations.extend(
                    def.modifiers
                        .iter()
                        .filter(|m| !registry.contains(m.field))
                        .map(|m| ConfigViolation::UnregisteredModifierField {
                            id: def.id.clone(),
                            field: m.field,
                        }),
                );
            }

            if index.contains_key(&def.id) {
                violations.push(ConfigViolation::DuplicateUpgradeId(def.id.clone()));
                continue;
            }
            index.insert(def.id.clone(), upgrades.len());
            upgrades.push(def);
        }

        ConfigError::check(violations)?;
        Ok(Self { upgrades, index })
    }

    /// Look up an upgrade by id.
    pub fn get(&self, id: &str) -> Result<&UpgradeDefinition, LookupError> {
        self.index
            .get(id)
            .map(|&i| &self.upgrades[i])
            .ok_or_else(|| LookupError::UnknownUpgrade(id.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpgradeDefinition> + '_ {
        self.upgrades.iter()
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    pub fn upgrades_by_type(&self, upgrade_type: UpgradeType) -> Vec<&UpgradeDefinition> {
        self.filtered(|u| u.upgrade_type == upgrade_type)
    }

    pub fn unique_upgrades(&self) -> Vec<&UpgradeDefinition> {
        self.filtered(|u| u.unique)
    }

    pub fn general_upgrades(&self) -> Vec<&UpgradeDefinition> {
        self.filtered(|u| !u.unique)
    }

    pub fn unique_upgrades_by_type(&self, upgrade_type: UpgradeType) -> Vec<&UpgradeDefinition> {
        self.filtered(|u| u.unique && u.upgrade_type == upgrade_type)
    }

    pub fn general_upgrades_by_type(&self, upgrade_type: UpgradeType) -> Vec<&UpgradeDefinition> {
        self.filtered(|u| !u.unique && u.upgrade_type == upgrade_type)
    }

    fn filtered(&self, keep: impl Fn(&UpgradeDefinition) -> bool) -> Vec<&UpgradeDefinition> {
        self.upgrades.iter().filter(|u| keep(u)).collect()
    }
}
