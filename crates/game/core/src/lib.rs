//! Deterministic upgrade and durability rules shared by loaders and hosts.
//!
//! `starfall-core` defines the canonical rules (stat table, per-entity stat
//! state, upgrade catalog, offers, the upgrade ledger and the shield and
//! durability model) and exposes pure APIs with no I/O and no logging.
//! Randomness is injected through [`RandomSource`]; time is passed in as
//! [`SimTime`] seconds.
pub mod combat;
pub mod config;
pub mod error;
mod listeners;
pub mod rng;
pub mod stats;
pub mod upgrades;

pub use combat::{
    CapacityAdjust, DamageOutcome, DurabilityEvent, DurabilityProfile, DurabilityShieldModel,
    RegenTimerMode, SimTime,
};
pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError, InvariantViolation};
pub use listeners::ListenerId;
pub use rng::{PcgRandom, RandomSource};
pub use stats::{
    ConfigError, ConfigViolation, LookupError, StatCategory, StatChange, StatDefinition,
    StatField, StatRegistry, StatState,
};
pub use upgrades::{
    CatalogOffers, EconomyError, LedgerPhase, Levels, OfferMode, OfferSource, Selection,
    StatModifier, StatOffers, UpgradeCatalog, UpgradeDefinition, UpgradeKey, UpgradeLedger,
    UpgradeOption, UpgradeType, ValidationError,
};
