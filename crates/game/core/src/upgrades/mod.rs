//! Upgrade catalog, offers and the per-run upgrade ledger.
//!
//! Points are credited to the [`UpgradeLedger`], which opens an offer drawn
//! from an [`OfferSource`]. Selecting an option spends a point, bumps the
//! option's level counter and applies its stat modifiers to a
//! [`StatState`](crate::stats::StatState).
pub mod catalog;
pub mod definition;
pub mod error;
pub mod ledger;
pub mod offer;

pub use catalog::UpgradeCatalog;
pub use definition::{StatModifier, UpgradeDefinition, UpgradeType};
pub use error::{EconomyError, ValidationError};
pub use ledger::{LedgerPhase, Selection, UpgradeLedger};
pub use offer::{
    CatalogOffers, Levels, OfferMode, OfferSource, StatOffers, UpgradeKey, UpgradeOption, sample,
};
