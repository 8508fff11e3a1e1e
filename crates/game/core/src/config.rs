//! Run configuration shared by the loaders and the runtime.

use crate::combat::RegenTimerMode;
use crate::upgrades::OfferMode;

/// Run configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of options presented per upgrade offer.
    pub offer_size: usize,

    /// Whether shield and durability regen share one last-damage timestamp.
    pub regen_timer: RegenTimerMode,

    /// Whether offers are drawn from raw stat fields or from the upgrade catalog.
    pub offer_mode: OfferMode,

    /// Upgrade points granted when a run starts.
    pub starting_points: u32,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OFFER_SIZE: usize = 3;
    pub const DEFAULT_STARTING_POINTS: u32 = 0;

    pub fn new() -> Self {
        Self {
            offer_size: Self::DEFAULT_OFFER_SIZE,
            regen_timer: RegenTimerMode::Shared,
            offer_mode: OfferMode::Stats,
            starting_points: Self::DEFAULT_STARTING_POINTS,
        }
    }

    pub fn with_offer_size(mut self, offer_size: usize) -> Self {
        self.offer_size = offer_size;
        self
    }

    pub fn with_regen_timer(mut self, regen_timer: RegenTimerMode) -> Self {
        self.regen_timer = regen_timer;
        self
    }

    pub fn with_offer_mode(mut self, offer_mode: OfferMode) -> Self {
        self.offer_mode = offer_mode;
        self
    }

    pub fn with_starting_points(mut self, starting_points: u32) -> Self {
        self.starting_points = starting_points;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
