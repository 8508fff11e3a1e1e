//! Data-driven content tables and loaders.
//!
//! This crate ships the default content set under `data/` and provides
//! loaders for RON/TOML data files:
//! - Stat table (`stats.ron`)
//! - Upgrade catalog (`upgrades.ron`)
//! - Game configuration (`config.toml`)
//!
//! Loaders deserialize straight into starfall-core types and then run the
//! core validation, so a table that loads is a table the rules accept.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, LoadResult, StatLoader, StatTable, UpgradeLoader,
    UpgradeTable,
};
