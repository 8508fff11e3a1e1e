//! Notifications emitted by [`DurabilityShieldModel`](super::DurabilityShieldModel).

/// Pool or life-cycle change of a damageable entity.
///
/// A hit that reaches both layers emits, in order: `ShieldDamaged`,
/// `ShieldChanged`, (`ShieldDepleted`), `Damaged`, `DurabilityChanged`,
/// then `Killed`/`Died` if the hit was lethal.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DurabilityEvent {
    /// Shield absorbed `amount` of a hit.
    ShieldDamaged { amount: f32 },

    /// Shield reached 0 from a positive value.
    ShieldDepleted,

    /// Current or max shield changed for any reason.
    ShieldChanged { current: f32, max: f32 },

    /// Durability lost `amount` to a hit.
    Damaged { amount: f32 },

    /// Current or max durability changed for any reason.
    DurabilityChanged { current: f32, max: f32 },

    /// Death that grants a reward. Always followed by `Died`.
    Killed,

    /// Terminal. Emitted exactly once per entity.
    Died,
}

impl DurabilityEvent {
    pub fn is_death(&self) -> bool {
        matches!(self, Self::Died)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShieldDamaged { .. } => "shield_damaged",
            Self::ShieldDepleted => "shield_depleted",
            Self::ShieldChanged { .. } => "shield_changed",
            Self::Damaged { .. } => "damaged",
            Self::DurabilityChanged { .. } => "durability_changed",
            Self::Killed => "killed",
            Self::Died => "died",
        }
    }
}
