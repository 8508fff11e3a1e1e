//! Upgrade offers - random batches of eligible options.
//!
//! Two candidate sets are supported:
//! - [`StatOffers`]: every registered stat field is an option on its own
//! - [`CatalogOffers`]: named upgrades from the [`UpgradeCatalog`]
//!
//! Both go through the same [`sample`] algorithm: keep candidates below their
//! max level, shuffle, take the first `count`.

use core::fmt;
use std::collections::HashMap;

use super::catalog::UpgradeCatalog;
use super::definition::StatModifier;
use crate::rng::{RandomSource, shuffle};
use crate::stats::{LookupError, StatDefinition, StatField, StatRegistry, StatState};

/// What a ledger level counter and an offer option refer to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpgradeKey {
    /// A raw stat field upgraded by its registry increment.
    Stat(StatField),
    /// A catalog upgrade, by id.
    Upgrade(String),
}

impl fmt::Display for UpgradeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stat(field) => write!(f, "stat:{field}"),
            Self::Upgrade(id) => write!(f, "upgrade:{id}"),
        }
    }
}

/// Levels taken per key; absent keys are at level 0.
pub type Levels = HashMap<UpgradeKey, u32>;

/// Which candidate set offers are drawn from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OfferMode {
    #[default]
    Stats,
    Catalog,
}

/// One entry of an offer, ready for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeOption {
    pub key: UpgradeKey,
    pub display_name: String,
    /// `"{sign}{increment}{unit}\n({current}{unit} → {next}{unit})\nLv.{level}/{max}"`
    pub description: String,
    pub increment_value: f32,
    pub current_level: u32,
    pub max_level: u32,
}

impl UpgradeOption {
    pub fn is_maxed(&self) -> bool {
        self.current_level >= self.max_level
    }
}

/// A candidate set offers can be drawn from.
pub trait OfferSource {
    /// Every candidate key with its max level.
    fn candidates(&self) -> Vec<(UpgradeKey, u32)>;

    /// Build the displayable option for `key` at `current_level`.
    ///
    /// Returns `None` if the key does not belong to this source.
    fn option(&self, key: &UpgradeKey, current_level: u32, state: &StatState) -> Option<UpgradeOption>;

    /// Stat deltas applied when one level of `key` is taken.
    fn modifiers(&self, key: &UpgradeKey) -> Result<Vec<StatModifier>, LookupError>;
}

/// Draw up to `count` distinct eligible options.
///
/// Eligible means `current_level < max_level`. Returns fewer than `count`
/// options (possibly none) when the eligible set is smaller.
pub fn sample<S, R>(
    source: &S,
    count: usize,
    levels: &Levels,
    state: &StatState,
    rng: &mut R,
) -> Vec<UpgradeOption>
where
    S: OfferSource + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut eligible: Vec<(UpgradeKey, u32)> = source
        .candidates()
        .into_iter()
        .filter_map(|(key, max_level)| {
            let level = levels.get(&key).copied().unwrap_or(0);
            (level < max_level).then_some((key, level))
        })
        .collect();

    shuffle(rng, &mut eligible);

    eligible
        .into_iter()
        .filter_map(|(key, level)| source.option(&key, level, state))
        .take(count)
        .collect()
}

/// Offers drawn from raw stat fields.
#[derive(Clone, Copy, Debug)]
pub struct StatOffers<'a> {
    registry: &'a StatRegistry,
}

impl<'a> StatOffers<'a> {
    pub fn new(registry: &'a StatRegistry) -> Self {
        Self { registry }
    }
}

impl OfferSource for StatOffers<'_> {
    fn candidates(&self) -> Vec<(UpgradeKey, u32)> {
        self.registry
            .iter()
            .map(|def| (UpgradeKey::Stat(def.field), def.max_level))
            .collect()
    }

    fn option(&self, key: &UpgradeKey, current_level: u32, state: &StatState) -> Option<UpgradeOption> {
        let UpgradeKey::Stat(field) = key else {
            return None;
        };
        let def = self.registry.get(*field).ok()?;
        let current = state.effective_value(*field);
        let mut description = change_lines(Some(def), def.increment_per_level, current);
        description.push('\n');
        description.push_str(&level_line(current_level, def.max_level));

        Some(UpgradeOption {
            key: key.clone(),
            display_name: def.display_name.clone(),
            description,
            increment_value: def.increment_per_level,
            current_level,
            max_level: def.max_level,
        })
    }

    fn modifiers(&self, key: &UpgradeKey) -> Result<Vec<StatModifier>, LookupError> {
        match key {
            UpgradeKey::Stat(field) => {
                let def = self.registry.get(*field)?;
                Ok(vec![StatModifier::new(*field, def.increment_per_level)])
            }
            UpgradeKey::Upgrade(id) => Err(LookupError::UnknownUpgrade(id.clone())),
        }
    }
}

/// Offers drawn from the upgrade catalog.
#[derive(Clone, Copy, Debug)]
pub struct CatalogOffers<'a> {
    catalog: &'a UpgradeCatalog,
    registry: &'a StatRegistry,
}

impl<'a> CatalogOffers<'a> {
    pub fn new(catalog: &'a UpgradeCatalog, registry: &'a StatRegistry) -> Self {
        Self { catalog, registry }
    }
}

impl OfferSource for CatalogOffers<'_> {
    fn candidates(&self) -> Vec<(UpgradeKey, u32)> {
        self.catalog
            .iter()
            .map(|def| (UpgradeKey::Upgrade(def.id.clone()), def.max_level))
            .collect()
    }

    fn option(&self, key: &UpgradeKey, current_level: u32, state: &StatState) -> Option<UpgradeOption> {
        let UpgradeKey::Upgrade(id) = key else {
            return None;
        };
        let def = self.catalog.get(id).ok()?;

        let mut description = String::new();
        for modifier in &def.modifiers {
            let stat = self.registry.get(modifier.field).ok();
            let current = state.effective_value(modifier.field);
            description.push_str(&change_lines(stat, modifier.value_per_level, current));
            description.push('\n');
        }
        description.push_str(&level_line(current_level, def.max_level));

        Some(UpgradeOption {
            key: key.clone(),
            display_name: def.display_name.clone(),
            description,
            increment_value: def.modifiers.first().map_or(0.0, |m| m.value_per_level),
            current_level,
            max_level: def.max_level,
        })
    }

    fn modifiers(&self, key: &UpgradeKey) -> Result<Vec<StatModifier>, LookupError> {
        match key {
            UpgradeKey::Upgrade(id) => Ok(self.catalog.get(id)?.modifiers.clone()),
            UpgradeKey::Stat(field) => Err(LookupError::UnknownUpgrade(field.to_string())),
        }
    }
}

/// `"+50\n(100 → 150)"`, formatted with the stat's display rule.
///
/// Without a definition the raw value is printed and no unit is shown.
fn change_lines(def: Option<&StatDefinition>, increment: f32, current: f32) -> String {
    let format = |value: f32| match def {
        Some(def) => def.format_value(value),
        None => value.to_string(),
    };
    let unit = def.map_or("", |d| d.unit.as_str());
    let sign = if increment > 0.0 { "+" } else { "" };
    format!(
        "{sign}{inc}{unit}\n({cur}{unit} → {next}{unit})",
        inc = format(increment),
        cur = format(current),
        next = format(current + increment),
    )
}

fn level_line(current_level: u32, max_level: u32) -> String {
    format!("Lv.{current_level}/{max_level}")
}
