//! Stat field identifiers.
//!
//! The field set is closed: adding a field means adding a variant here and a
//! definition to every strict stat table.

/// Category a stat field belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatCategory {
    /// Durability and shield pools and their regeneration.
    Survival,
    /// Weapon and projectile behavior.
    Shooting,
    /// Ramming damage dealt and received.
    Impact,
    /// Movement and handling.
    Mobility,
}

/// One tunable gameplay attribute of a ship.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum StatField {
    // ========================================================================
    // Survival
    // ========================================================================
    /// Durability capacity.
    MaxDurability = 0,
    /// Shield capacity.
    MaxShield = 1,
    /// Shield regenerated per second once the delay has elapsed.
    ShieldRegenRate = 2,
    /// Seconds after a hit before the shield starts regenerating.
    ShieldRegenDelay = 3,
    /// Durability regenerated per second (0 disables regeneration).
    DurabilityRegenRate = 4,
    /// Seconds after a hit before durability starts regenerating.
    DurabilityRegenDelay = 5,

    // ========================================================================
    // Shooting
    // ========================================================================
    /// Delay between shots; upgrades lower it.
    FireRate = 6,
    /// Damage per projectile.
    ProjectileDamage = 7,
    /// Projectile travel speed.
    ProjectileSpeed = 8,
    /// Projectile scale.
    ProjectileSize = 9,
    /// Projectiles per volley.
    MultiShot = 10,
    /// Spread angle between projectiles of one volley.
    Spread = 11,
    /// Homing turn strength (0 = none).
    HomingPower = 12,
    /// Fraction of hit damage dealt again as an explosion (0 = disabled).
    ExplosionDamageRatio = 13,

    // ========================================================================
    // Impact
    // ========================================================================
    /// Damage dealt when ramming.
    OnImpact = 14,
    /// Reduction of ramming damage received.
    ImpactResist = 15,

    // ========================================================================
    // Mobility
    // ========================================================================
    /// Linear movement speed.
    MoveSpeed = 16,
    /// Rotation speed in degrees per second.
    RotateSpeed = 17,
    /// Ship mass used by collisions.
    Mass = 18,
}

impl StatField {
    /// Total number of stat fields.
    pub const COUNT: usize = 19;

    /// Returns all stat fields in declaration order.
    pub const fn all() -> [StatField; Self::COUNT] {
        [
            StatField::MaxDurability,
            StatField::MaxShield,
            StatField::ShieldRegenRate,
            StatField::ShieldRegenDelay,
            StatField::DurabilityRegenRate,
            StatField::DurabilityRegenDelay,
            StatField::FireRate,
            StatField::ProjectileDamage,
            StatField::ProjectileSpeed,
            StatField::ProjectileSize,
            StatField::MultiShot,
            StatField::Spread,
            StatField::HomingPower,
            StatField::ExplosionDamageRatio,
            StatField::OnImpact,
            StatField::ImpactResist,
            StatField::MoveSpeed,
            StatField::RotateSpeed,
            StatField::Mass,
        ]
    }

    /// Returns the field as an array index.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the category this field belongs to.
    pub const fn category(self) -> StatCategory {
        use StatField::*;
        match self {
            MaxDurability | MaxShield | ShieldRegenRate | ShieldRegenDelay
            | DurabilityRegenRate | DurabilityRegenDelay => StatCategory::Survival,
            FireRate | ProjectileDamage | ProjectileSpeed | ProjectileSize | MultiShot | Spread
            | HomingPower | ExplosionDamageRatio => StatCategory::Shooting,
            OnImpact | ImpactResist => StatCategory::Impact,
            MoveSpeed | RotateSpeed | Mass => StatCategory::Mobility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn indices_match_declaration_order() {
        for (i, field) in StatField::all().into_iter().enumerate() {
            assert_eq!(field.as_index(), i);
        }
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(
            StatField::from_str("shield_regen_delay").unwrap(),
            StatField::ShieldRegenDelay
        );
        assert_eq!(StatField::MultiShot.to_string(), "multi_shot");
        assert_eq!(
            StatCategory::from_str("MOBILITY").unwrap(),
            StatCategory::Mobility
        );
    }

    #[test]
    fn every_category_is_populated() {
        let fields = StatField::all();
        for category in [
            StatCategory::Survival,
            StatCategory::Shooting,
            StatCategory::Impact,
            StatCategory::Mobility,
        ] {
            assert!(fields.iter().any(|f| f.category() == category));
        }
        assert_eq!(StatField::Mass.category(), StatCategory::Mobility);
        assert_eq!(
            StatField::ExplosionDamageRatio.category(),
            StatCategory::Shooting
        );
    }
}
