//! Event types for different topics.

use serde::{Deserialize, Serialize};
use starfall_core::{DurabilityEvent, StatChange, UpgradeKey, UpgradeOption};

/// Events related to upgrade points, offers and selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EconomyEvent {
    /// Points were added to the balance.
    PointsCredited { amount: u32, balance: u32 },

    /// A new offer was drawn (after a credit or a selection).
    OfferOpened { options: Vec<UpgradeOption> },

    /// One option was bought.
    UpgradeSelected {
        key: UpgradeKey,
        level: u32,
        balance: u32,
    },

    /// A selection was refused; nothing changed.
    SelectionRejected { index: usize, reason: String },

    /// The balance ran out and the selection screen closed.
    OfferClosed,
}

/// A stat of the player ship changed.
pub type StatsEvent = StatChange;

/// Shield, durability or life-cycle change of the player ship.
pub type CombatEvent = DurabilityEvent;
