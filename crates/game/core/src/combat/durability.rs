//! Two-layer damage absorption with delayed regeneration.
//!
//! Shield absorbs first; whatever is left reduces durability. Each layer
//! regenerates on its own once enough time has passed since the last hit.
//! Durability reaching 0 kills the entity, and death is terminal.

use super::events::DurabilityEvent;
use crate::error::InvariantViolation;
use crate::listeners::{ListenerId, Listeners};
use crate::stats::{StatChange, StatField, StatRegistry, StatState};

/// Monotonic simulation time in seconds.
pub type SimTime = f32;

/// How regen delays are measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RegenTimerMode {
    /// Any hit restarts both layers' delays.
    #[default]
    Shared,
    /// A hit only restarts the delay of the layers that absorbed it.
    Independent,
}

/// What happens to the current value when a capacity changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityAdjust {
    /// Keep the current value, clamped to the new max.
    KeepCurrent,
    /// Move the current value by the same amount as the max.
    ShiftCurrent,
}

/// Capacities and regen parameters of one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurabilityProfile {
    pub max_durability: f32,
    pub max_shield: f32,
    /// Points per second.
    pub shield_regen_rate: f32,
    /// Seconds after a hit before the shield regenerates.
    pub shield_regen_delay: f32,
    /// Points per second; 0 disables durability regen.
    pub durability_regen_rate: f32,
    pub durability_regen_delay: f32,
}

impl DurabilityProfile {
    /// Read the survival stats of an entity.
    pub fn from_stats(stats: &StatState) -> Self {
        Self {
            max_durability: stats.effective_value(StatField::MaxDurability),
            max_shield: stats.effective_value(StatField::MaxShield),
            shield_regen_rate: stats.effective_value(StatField::ShieldRegenRate),
            shield_regen_delay: stats.effective_value(StatField::ShieldRegenDelay),
            durability_regen_rate: stats.effective_value(StatField::DurabilityRegenRate),
            durability_regen_delay: stats.effective_value(StatField::DurabilityRegenDelay),
        }
    }

    /// Read the survival stats `registry` defines and take the [`Default`]
    /// value for the rest. Also returns the fields that fell back.
    pub fn from_registered(registry: &StatRegistry, stats: &StatState) -> (Self, Vec<StatField>) {
        let fallback = Self::default();
        let mut missing = Vec::new();
        let mut read = |field: StatField, default: f32| {
            if registry.contains(field) {
                stats.effective_value(field)
            } else {
                missing.push(field);
                default
            }
        };

        let profile = Self {
            max_durability: read(StatField::MaxDurability, fallback.max_durability),
            max_shield: read(StatField::MaxShield, fallback.max_shield),
            shield_regen_rate: read(StatField::ShieldRegenRate, fallback.shield_regen_rate),
            shield_regen_delay: read(StatField::ShieldRegenDelay, fallback.shield_regen_delay),
            durability_regen_rate: read(StatField::DurabilityRegenRate, fallback.durability_regen_rate),
            durability_regen_delay: read(StatField::DurabilityRegenDelay, fallback.durability_regen_delay),
        };
        (profile, missing)
    }
}

impl Default for DurabilityProfile {
    fn default() -> Self {
        Self {
            max_durability: 100.0,
            max_shield: 100.0,
            shield_regen_rate: 20.0,
            shield_regen_delay: 2.0,
            durability_regen_rate: 0.0,
            durability_regen_delay: 5.0,
        }
    }
}

/// Result of [`DurabilityShieldModel::apply_damage`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    Applied {
        shield_absorbed: f32,
        durability_lost: f32,
        /// This hit killed the entity.
        died: bool,
    },
    /// The entity was already dead.
    Ignored,
}

impl DamageOutcome {
    pub fn is_lethal(&self) -> bool {
        matches!(self, Self::Applied { died: true, .. })
    }
}

/// Shield and durability pools of one entity.
#[derive(Debug)]
pub struct DurabilityShieldModel {
    profile: DurabilityProfile,
    current_durability: f32,
    current_shield: f32,
    regen_timer: RegenTimerMode,
    /// Time each layer's regen delay is measured from: the last hit on it,
    /// or the spawn time before any hit.
    last_shield_hit: SimTime,
    last_durability_hit: SimTime,
    dead: bool,
    listeners: Listeners<DurabilityEvent>,
}

impl DurabilityShieldModel {
    /// Create a model at full capacity, spawned at time 0.
    ///
    /// A profile without durability starts alive at 0 and dies on its first
    /// hit.
    pub fn new(profile: DurabilityProfile, regen_timer: RegenTimerMode) -> Self {
        let profile = DurabilityProfile {
            max_durability: non_negative(profile.max_durability),
            max_shield: non_negative(profile.max_shield),
            ..profile
        };
        Self {
            current_durability: profile.max_durability,
            current_shield: profile.max_shield,
            profile,
            regen_timer,
            last_shield_hit: 0.0,
            last_durability_hit: 0.0,
            dead: false,
            listeners: Listeners::new(),
        }
    }

    pub fn from_stats(stats: &StatState, regen_timer: RegenTimerMode) -> Self {
        Self::new(DurabilityProfile::from_stats(stats), regen_timer)
    }

    /// Start both regen delays at `now` instead of 0.
    pub fn spawned_at(mut self, now: SimTime) -> Self {
        self.last_shield_hit = now;
        self.last_durability_hit = now;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn profile(&self) -> &DurabilityProfile {
        &self.profile
    }

    pub fn regen_timer(&self) -> RegenTimerMode {
        self.regen_timer
    }

    pub fn current_durability(&self) -> f32 {
        self.current_durability
    }

    pub fn max_durability(&self) -> f32 {
        self.profile.max_durability
    }

    pub fn current_shield(&self) -> f32 {
        self.current_shield
    }

    pub fn max_shield(&self) -> f32 {
        self.profile.max_shield
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Current / max durability, 0 when max is 0.
    pub fn durability_ratio(&self) -> f32 {
        ratio(self.current_durability, self.profile.max_durability)
    }

    pub fn shield_ratio(&self) -> f32 {
        ratio(self.current_shield, self.profile.max_shield)
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    pub fn subscribe(&mut self, listener: impl FnMut(&DurabilityEvent) + Send + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // ========================================================================
    // Damage and death
    // ========================================================================

    /// Apply a hit at time `now`.
    ///
    /// `amount` must be positive and finite. Debug builds assert; release
    /// builds leave the model untouched and return the violation. Hits on a
    /// dead entity are ignored.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        now: SimTime,
    ) -> Result<DamageOutcome, InvariantViolation> {
        if self.dead {
            return Ok(DamageOutcome::Ignored);
        }
        debug_assert!(
            amount > 0.0 && amount.is_finite(),
            "damage must be positive and finite, got {amount}"
        );
        if !(amount > 0.0 && amount.is_finite()) {
            return Err(InvariantViolation::NonPositiveDamage(amount));
        }

        let shield_absorbed = self.current_shield.min(amount);
        if shield_absorbed > 0.0 {
            self.current_shield -= shield_absorbed;
            self.emit(DurabilityEvent::ShieldDamaged {
                amount: shield_absorbed,
            });
            self.emit_shield_changed();
            if self.current_shield <= 0.0 {
                self.current_shield = 0.0;
                self.emit(DurabilityEvent::ShieldDepleted);
            }
        }

        let remainder = amount - shield_absorbed;
        let durability_lost = self.current_durability.min(remainder);
        if remainder > 0.0 {
            self.current_durability -= durability_lost;
            self.emit(DurabilityEvent::Damaged {
                amount: durability_lost,
            });
            self.emit_durability_changed();
        }

        self.record_hit(now, shield_absorbed > 0.0, remainder > 0.0);

        let died = remainder > 0.0 && self.current_durability <= 0.0;
        if died {
            self.current_durability = 0.0;
            self.die(true);
        }

        Ok(DamageOutcome::Applied {
            shield_absorbed,
            durability_lost,
            died,
        })
    }

    /// Kill without damage. `Killed` is only emitted when `rewarded`.
    ///
    /// Returns false if the entity was already dead.
    pub fn kill(&mut self, rewarded: bool) -> bool {
        if self.dead {
            return false;
        }
        if self.current_durability > 0.0 {
            self.current_durability = 0.0;
            self.emit_durability_changed();
        }
        self.die(rewarded);
        true
    }

    fn die(&mut self, rewarded: bool) {
        if self.dead {
            return;
        }
        self.dead = true;
        if rewarded {
            self.emit(DurabilityEvent::Killed);
        }
        self.emit(DurabilityEvent::Died);
    }

    fn record_hit(&mut self, now: SimTime, shield_hit: bool, durability_hit: bool) {
        match self.regen_timer {
            RegenTimerMode::Shared => {
                self.last_shield_hit = now;
                self.last_durability_hit = now;
            }
            RegenTimerMode::Independent => {
                if shield_hit {
                    self.last_shield_hit = now;
                }
                if durability_hit {
                    self.last_durability_hit = now;
                }
            }
        }
    }

    // ========================================================================
    // Regeneration
    // ========================================================================

    /// Advance regeneration by `dt` seconds, ending at `now`.
    pub fn tick(&mut self, dt: f32, now: SimTime) {
        if self.dead || !(dt > 0.0) {
            return;
        }

        let profile = self.profile;

        if profile.durability_regen_rate > 0.0
            && self.current_durability < profile.max_durability
            && elapsed(self.last_durability_hit, now, profile.durability_regen_delay)
        {
            self.current_durability =
                (self.current_durability + profile.durability_regen_rate * dt).min(profile.max_durability);
            self.emit_durability_changed();
        }

        if profile.max_shield > 0.0
            && profile.shield_regen_rate > 0.0
            && self.current_shield < profile.max_shield
            && elapsed(self.last_shield_hit, now, profile.shield_regen_delay)
        {
            self.current_shield =
                (self.current_shield + profile.shield_regen_rate * dt).min(profile.max_shield);
            self.emit_shield_changed();
        }
    }

    pub fn set_shield_regen_rate(&mut self, rate: f32) {
        self.profile.shield_regen_rate = non_negative(rate);
    }

    pub fn set_shield_regen_delay(&mut self, delay: f32) {
        self.profile.shield_regen_delay = non_negative(delay);
    }

    pub fn set_durability_regen_rate(&mut self, rate: f32) {
        self.profile.durability_regen_rate = non_negative(rate);
    }

    pub fn set_durability_regen_delay(&mut self, delay: f32) {
        self.profile.durability_regen_delay = non_negative(delay);
    }

    // ========================================================================
    // Capacity and restoration
    // ========================================================================

    /// Change max durability. A shift that empties durability kills the
    /// entity (without reward).
    pub fn set_max_durability(&mut self, max: f32, adjust: CapacityAdjust) {
        let max = non_negative(max);
        let old_max = self.profile.max_durability;
        self.profile.max_durability = max;
        if self.dead {
            return;
        }

        self.current_durability = adjusted(self.current_durability, old_max, max, adjust);
        self.emit_durability_changed();
        if self.current_durability <= 0.0 {
            self.die(false);
        }
    }

    pub fn set_max_shield(&mut self, max: f32, adjust: CapacityAdjust) {
        let max = non_negative(max);
        let old_max = self.profile.max_shield;
        self.profile.max_shield = max;
        if self.dead {
            return;
        }

        let before = self.current_shield;
        self.current_shield = adjusted(self.current_shield, old_max, max, adjust);
        self.emit_shield_changed();
        if before > 0.0 && self.current_shield <= 0.0 {
            self.emit(DurabilityEvent::ShieldDepleted);
        }
    }

    /// Route a survival stat change to the matching setter.
    ///
    /// Capacity changes shift the current value with the max. Returns false
    /// for fields the model does not track.
    pub fn apply_stat_change(&mut self, change: &StatChange) -> bool {
        let value = change.current;
        match change.field {
            StatField::MaxDurability => self.set_max_durability(value, CapacityAdjust::ShiftCurrent),
            StatField::MaxShield => self.set_max_shield(value, CapacityAdjust::ShiftCurrent),
            StatField::ShieldRegenRate => self.set_shield_regen_rate(value),
            StatField::ShieldRegenDelay => self.set_shield_regen_delay(value),
            StatField::DurabilityRegenRate => self.set_durability_regen_rate(value),
            StatField::DurabilityRegenDelay => self.set_durability_regen_delay(value),
            _ => return false,
        }
        true
    }

    /// Refill both layers. No effect on a dead entity.
    pub fn restore_full(&mut self) {
        if self.dead {
            return;
        }
        self.current_durability = self.profile.max_durability;
        self.current_shield = self.profile.max_shield;
        self.emit_durability_changed();
        self.emit_shield_changed();
    }

    /// Add durability up to the max. Returns the amount actually restored.
    pub fn restore_durability(&mut self, amount: f32) -> f32 {
        if self.dead || !(amount > 0.0) {
            return 0.0;
        }
        let before = self.current_durability;
        self.current_durability = (before + amount).min(self.profile.max_durability);
        self.emit_durability_changed();
        self.current_durability - before
    }

    /// Add shield up to the max. Returns the amount actually restored.
    pub fn restore_shield(&mut self, amount: f32) -> f32 {
        if self.dead || !(amount > 0.0) {
            return 0.0;
        }
        let before = self.current_shield;
        self.current_shield = (before + amount).min(self.profile.max_shield);
        self.emit_shield_changed();
        self.current_shield - before
    }

    // ========================================================================
    // Notification helpers
    // ========================================================================

    fn emit(&mut self, event: DurabilityEvent) {
        self.listeners.notify(&event);
    }

    fn emit_shield_changed(&mut self) {
        self.emit(DurabilityEvent::ShieldChanged {
            current: self.current_shield,
            max: self.profile.max_shield,
        });
    }

    fn emit_durability_changed(&mut self) {
        self.emit(DurabilityEvent::DurabilityChanged {
            current: self.current_durability,
            max: self.profile.max_durability,
        });
    }
}

fn elapsed(last_hit: SimTime, now: SimTime, delay: f32) -> bool {
    now - last_hit >= delay
}

fn adjusted(current: f32, old_max: f32, new_max: f32, adjust: CapacityAdjust) -> f32 {
    let value = match adjust {
        CapacityAdjust::KeepCurrent => current,
        CapacityAdjust::ShiftCurrent => current + (new_max - old_max),
    };
    value.clamp(0.0, new_max)
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn ratio(current: f32, max: f32) -> f32 {
    if max > 0.0 { current / max } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::stats::StatDefinition;

    fn profile(durability: f32, shield: f32) -> DurabilityProfile {
        DurabilityProfile {
            max_durability: durability,
            max_shield: shield,
            ..DurabilityProfile::default()
        }
    }

    fn recorded(model: &mut DurabilityShieldModel) -> Arc<Mutex<Vec<DurabilityEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        model.subscribe(move |e| sink.lock().unwrap().push(*e));
        events
    }

    #[test]
    fn shield_absorbs_before_durability() {
        let mut model = DurabilityShieldModel::new(profile(50.0, 30.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);

        let outcome = model.apply_damage(50.0, 1.0).unwrap();
        assert_eq!(
            outcome,
            DamageOutcome::Applied {
                shield_absorbed: 30.0,
                durability_lost: 20.0,
                died: false,
            }
        );
        assert_eq!(model.current_shield(), 0.0);
        assert_eq!(model.current_durability(), 30.0);
        assert_eq!(model.last_shield_hit, 1.0);
        assert_eq!(model.last_durability_hit, 1.0);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                DurabilityEvent::ShieldDamaged { amount: 30.0 },
                DurabilityEvent::ShieldChanged { current: 0.0, max: 30.0 },
                DurabilityEvent::ShieldDepleted,
                DurabilityEvent::Damaged { amount: 20.0 },
                DurabilityEvent::DurabilityChanged { current: 30.0, max: 50.0 },
            ]
        );
    }

    #[test]
    fn shield_regenerates_after_delay() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        model.apply_damage(100.0, 10.0).unwrap();
        assert_eq!(model.current_shield(), 0.0);

        // Still inside the 2 s delay.
        model.tick(0.5, 11.5);
        assert_eq!(model.current_shield(), 0.0);

        model.tick(0.5, 12.5);
        assert!((model.current_shield() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn regen_waits_for_the_delay_after_spawn() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        model.set_max_shield(150.0, CapacityAdjust::KeepCurrent);

        model.tick(0.5, 0.5);
        assert_eq!(model.current_shield(), 100.0);

        model.tick(0.5, 2.0);
        assert_eq!(model.current_shield(), 110.0);
    }

    #[test]
    fn spawn_time_offsets_the_first_delay() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared)
            .spawned_at(30.0);
        model.set_max_shield(150.0, CapacityAdjust::KeepCurrent);

        model.tick(1.0, 31.0);
        assert_eq!(model.current_shield(), 100.0);

        model.tick(1.0, 32.0);
        assert_eq!(model.current_shield(), 120.0);
    }

    #[test]
    fn zero_durability_profile_dies_on_first_hit() {
        let mut model = DurabilityShieldModel::new(profile(0.0, 0.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);
        assert!(!model.is_dead());

        assert!(model.apply_damage(1.0, 0.0).unwrap().is_lethal());
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                DurabilityEvent::Damaged { amount: 0.0 },
                DurabilityEvent::DurabilityChanged { current: 0.0, max: 0.0 },
                DurabilityEvent::Killed,
                DurabilityEvent::Died,
            ]
        );
    }

    #[test]
    fn durability_regen_requires_a_rate() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 0.0), RegenTimerMode::Shared);
        model.apply_damage(40.0, 0.0).unwrap();
        model.tick(1.0, 100.0);
        assert_eq!(model.current_durability(), 60.0);

        model.set_durability_regen_rate(4.0);
        model.tick(1.0, 101.0);
        assert_eq!(model.current_durability(), 64.0);
        assert_eq!(model.current_shield(), 0.0);
    }

    #[test]
    fn independent_timers_only_reset_hit_layers() {
        let mut p = profile(100.0, 50.0);
        p.durability_regen_rate = 10.0;
        p.durability_regen_delay = 5.0;
        let mut model = DurabilityShieldModel::new(p, RegenTimerMode::Independent);

        model.apply_damage(60.0, 0.0).unwrap(); // shield 0, durability 90
        model.apply_damage(0.0001, 4.0).unwrap(); // durability only

        // Shield delay runs from t=0, durability delay from t=4.
        model.tick(1.0, 5.0);
        assert_eq!(model.current_shield(), 20.0);
        assert!(model.current_durability() < 90.0);

        let mut shared = DurabilityShieldModel::new(p, RegenTimerMode::Shared);
        shared.apply_damage(60.0, 0.0).unwrap();
        shared.apply_damage(0.0001, 4.0).unwrap();
        shared.tick(1.0, 5.0);
        assert_eq!(shared.current_shield(), 0.0);
    }

    #[test]
    fn death_is_terminal_and_reported_once() {
        let mut model = DurabilityShieldModel::new(profile(20.0, 10.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);

        assert!(model.apply_damage(100.0, 0.0).unwrap().is_lethal());
        assert!(model.is_dead());
        assert_eq!(model.current_durability(), 0.0);

        assert_eq!(model.apply_damage(5.0, 1.0), Ok(DamageOutcome::Ignored));
        assert!(!model.kill(true));
        model.tick(10.0, 50.0);
        model.restore_full();
        assert_eq!(model.current_durability(), 0.0);

        let events = events.lock().unwrap();
        assert_eq!(events.iter().filter(|e| e.is_death()).count(), 1);
        assert_eq!(events.iter().filter(|e| **e == DurabilityEvent::Killed).count(), 1);
        assert_eq!(events.last(), Some(&DurabilityEvent::Died));
    }

    #[test]
    fn kill_emits_killed_only_when_rewarded() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);
        assert!(model.kill(false));
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                DurabilityEvent::DurabilityChanged { current: 0.0, max: 100.0 },
                DurabilityEvent::Died,
            ]
        );

        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);
        assert!(model.kill(true));
        assert_eq!(events.lock().unwrap()[1..], [DurabilityEvent::Killed, DurabilityEvent::Died]);
    }

    #[test]
    fn capacity_changes_follow_adjust_mode() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        model.apply_damage(120.0, 0.0).unwrap(); // shield 0, durability 80

        model.set_max_durability(150.0, CapacityAdjust::ShiftCurrent);
        assert_eq!(model.current_durability(), 130.0);

        model.set_max_durability(200.0, CapacityAdjust::KeepCurrent);
        assert_eq!(model.current_durability(), 130.0);

        model.set_max_durability(100.0, CapacityAdjust::KeepCurrent);
        assert_eq!(model.current_durability(), 100.0);

        model.set_max_shield(150.0, CapacityAdjust::ShiftCurrent);
        assert_eq!(model.current_shield(), 50.0);
        assert_eq!(model.max_shield(), 150.0);
    }

    #[test]
    fn shrinking_capacity_to_zero_kills() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 0.0), RegenTimerMode::Shared);
        let events = recorded(&mut model);
        model.apply_damage(60.0, 0.0).unwrap();

        model.set_max_durability(60.0, CapacityAdjust::ShiftCurrent);
        assert!(model.is_dead());
        assert_eq!(model.current_durability(), 0.0);
        assert_eq!(events.lock().unwrap().last(), Some(&DurabilityEvent::Died));
        assert!(!events.lock().unwrap().contains(&DurabilityEvent::Killed));
    }

    #[test]
    fn unregistered_survival_stats_fall_back_to_defaults() {
        let registry = StatRegistry::load_partial(vec![
            StatDefinition::new(StatField::MaxShield, "Max Shield", 40.0, 10.0, 5).integer(),
        ])
        .unwrap();
        let stats = StatState::new(&registry);

        let (profile, missing) = DurabilityProfile::from_registered(&registry, &stats);
        assert_eq!(profile.max_shield, 40.0);
        assert_eq!(profile.max_durability, DurabilityProfile::default().max_durability);
        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&StatField::MaxDurability));
        assert!(!missing.contains(&StatField::MaxShield));

        let model = DurabilityShieldModel::new(profile, RegenTimerMode::Shared);
        assert!(!model.is_dead());
        assert_eq!(model.current_durability(), 100.0);
    }

    #[test]
    fn stat_changes_reach_the_model() {
        let mut model = DurabilityShieldModel::new(DurabilityProfile::default(), RegenTimerMode::Shared);
        let change = StatChange {
            field: StatField::MaxShield,
            previous: 100.0,
            current: 150.0,
            level: 1,
        };
        assert!(model.apply_stat_change(&change));
        assert_eq!(model.current_shield(), 150.0);

        let change = StatChange {
            field: StatField::ShieldRegenDelay,
            previous: 2.0,
            current: 1.8,
            level: 1,
        };
        assert!(model.apply_stat_change(&change));
        assert_eq!(model.profile().shield_regen_delay, 1.8);

        let change = StatChange {
            field: StatField::FireRate,
            previous: 0.3,
            current: 0.28,
            level: 1,
        };
        assert!(!model.apply_stat_change(&change));
    }

    #[test]
    fn restores_are_clamped() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 50.0), RegenTimerMode::Shared);
        model.apply_damage(80.0, 0.0).unwrap(); // shield 0, durability 70
        assert_eq!(model.restore_shield(20.0), 20.0);
        assert_eq!(model.restore_durability(50.0), 30.0);
        assert_eq!(model.restore_durability(-5.0), 0.0);
        model.apply_damage(10.0, 1.0).unwrap();
        model.restore_full();
        assert_eq!(model.shield_ratio(), 1.0);
        assert_eq!(model.durability_ratio(), 1.0);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "damage must be positive"))]
    fn non_positive_damage_is_rejected() {
        let mut model = DurabilityShieldModel::new(profile(100.0, 100.0), RegenTimerMode::Shared);
        assert_eq!(
            model.apply_damage(0.0, 0.0),
            Err(InvariantViolation::NonPositiveDamage(0.0))
        );
        assert_eq!(model.current_shield(), 100.0);
        assert_eq!(model.last_shield_hit, 0.0);
    }
}
