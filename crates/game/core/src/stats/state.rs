//! Per-entity stat state.
//!
//! Effective values are a cache over `default + Σ applied deltas`. The cache
//! only changes through [`StatState::apply_level`], which notifies listeners
//! synchronously after the value is updated.

use super::field::StatField;
use super::registry::StatRegistry;
use crate::listeners::{ListenerId, Listeners};

/// Notification emitted after a stat changed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatChange {
    pub field: StatField,
    pub previous: f32,
    pub current: f32,
    /// Levels taken on this field after the change.
    pub level: u32,
}

impl StatChange {
    pub fn delta(&self) -> f32 {
        self.current - self.previous
    }
}

/// Current effective values and levels for every stat field of one entity.
#[derive(Debug)]
pub struct StatState {
    values: [f32; StatField::COUNT],
    levels: [u32; StatField::COUNT],
    listeners: Listeners<StatChange>,
}

impl StatState {
    /// Initialize from registry defaults. Unregistered fields start at 0.
    pub fn new(registry: &StatRegistry) -> Self {
        let mut values = [0.0; StatField::COUNT];
        for def in registry.iter() {
            values[def.field.as_index()] = def.default_value;
        }
        Self {
            values,
            levels: [0; StatField::COUNT],
            listeners: Listeners::new(),
        }
    }

    /// Current effective value of a field.
    #[inline]
    pub fn effective_value(&self, field: StatField) -> f32 {
        self.values[field.as_index()]
    }

    /// Number of levels applied to a field.
    #[inline]
    pub fn level(&self, field: StatField) -> u32 {
        self.levels[field.as_index()]
    }

    /// Take one level of `field`, adding `delta` to its effective value.
    ///
    /// Every listener observes the change before this returns, in
    /// registration order.
    pub fn apply_level(&mut self, field: StatField, delta: f32) -> StatChange {
        let idx = field.as_index();
        let previous = self.values[idx];
        self.values[idx] = previous + delta;
        self.levels[idx] += 1;

        let change = StatChange {
            field,
            previous,
            current: self.values[idx],
            level: self.levels[idx],
        };
        self.listeners.notify(&change);
        change
    }

    /// Rebuild every cached value as `default + level × increment_per_level`.
    ///
    /// Only meaningful when levels were taken through raw stat upgrades,
    /// where each delta equals the registry increment.
    pub fn recompute(&mut self, registry: &StatRegistry) {
        for field in StatField::all() {
            let idx = field.as_index();
            self.values[idx] = registry
                .get(field)
                .map(|def| def.value_at_level(self.levels[idx]))
                .unwrap_or(0.0);
        }
    }

    /// Register a stat-changed listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&StatChange) + Send + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::stats::registry::tests::full_registry;

    #[test]
    fn starts_at_registry_defaults() {
        let registry = full_registry();
        let state = StatState::new(&registry);
        assert_eq!(state.effective_value(StatField::MaxShield), 100.0);
        assert_eq!(state.effective_value(StatField::RotateSpeed), 180.0);
        assert_eq!(state.level(StatField::MaxShield), 0);
    }

    #[test]
    fn effective_value_matches_derivation_after_levels() {
        let registry = full_registry();
        let mut state = StatState::new(&registry);

        let sequence = [
            StatField::MaxShield,
            StatField::ShieldRegenDelay,
            StatField::MaxShield,
            StatField::FireRate,
            StatField::ShieldRegenDelay,
            StatField::ShieldRegenDelay,
        ];
        for field in sequence {
            let inc = registry.get(field).unwrap().increment_per_level;
            state.apply_level(field, inc);
        }

        for def in registry.iter() {
            let expected = def.default_value + state.level(def.field) as f32 * def.increment_per_level;
            assert!(
                (state.effective_value(def.field) - expected).abs() < 1e-4,
                "{} drifted",
                def.field
            );
        }

        let cached = state.effective_value(StatField::ShieldRegenDelay);
        state.recompute(&registry);
        assert!((state.effective_value(StatField::ShieldRegenDelay) - cached).abs() < 1e-4);
    }

    #[test]
    fn listeners_observe_new_value_in_order() {
        let registry = full_registry();
        let mut state = StatState::new(&registry);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&seen);
        state.subscribe(move |c| first.lock().unwrap().push(("first", c.current)));
        let second = Arc::clone(&seen);
        let id = state.subscribe(move |c| second.lock().unwrap().push(("second", c.current)));

        let change = state.apply_level(StatField::MaxDurability, 50.0);
        assert_eq!(change.previous, 100.0);
        assert_eq!(change.current, 150.0);
        assert_eq!(change.level, 1);
        assert_eq!(change.delta(), 50.0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", 150.0), ("second", 150.0)]
        );

        assert!(state.unsubscribe(id));
        assert!(!state.unsubscribe(id));
        state.apply_level(StatField::MaxDurability, 50.0);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
