//! Mutex-guarded session for hosts that feed input from several threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use starfall_core::{DamageOutcome, Selection, UpgradeOption};

use super::Result;
use crate::session::RunSession;

/// Cloneable handle to a [`RunSession`] behind one lock.
///
/// Each method takes the lock once, so a selection's balance check and spend
/// never interleave with another thread's selection.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<RunSession>>,
}

impl SharedSession {
    pub fn new(session: RunSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session for several operations in one critical section.
    pub fn lock(&self) -> MutexGuard<'_, RunSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn credit_points(&self, amount: i64) -> Result<Vec<UpgradeOption>> {
        self.lock().credit_points(amount).map(<[UpgradeOption]>::to_vec)
    }

    pub fn select(&self, index: usize) -> Result<Selection> {
        self.lock().select(index)
    }

    pub fn apply_damage(&self, amount: f32, now: f32) -> Result<DamageOutcome> {
        self.lock().apply_damage(amount, now)
    }

    pub fn tick(&self, dt: f32, now: f32) {
        self.lock().tick(dt, now);
    }

    pub fn balance(&self) -> u32 {
        self.lock().balance()
    }
}
