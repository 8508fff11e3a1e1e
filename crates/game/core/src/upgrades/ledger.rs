//! Upgrade ledger - point balance, level counters and the open offer.
//!
//! The ledger is the only place upgrade levels change. Every mutation takes
//! `&mut self`, so the balance check and the spend in [`UpgradeLedger::try_select`]
//! cannot interleave with another selection.

use super::error::EconomyError;
use super::offer::{Levels, OfferSource, UpgradeKey, UpgradeOption, sample};
use crate::error::InvariantViolation;
use crate::rng::RandomSource;
use crate::stats::{StatChange, StatState};

/// Whether a selection screen is currently open.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LedgerPhase {
    #[default]
    Idle,
    /// Options may be empty when nothing is left to upgrade.
    OfferOpen { options: Vec<UpgradeOption> },
}

impl LedgerPhase {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::OfferOpen { .. })
    }
}

/// Result of a successful selection.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub key: UpgradeKey,
    /// Level of `key` after the selection.
    pub level: u32,
    /// One entry per modifier applied, in modifier order.
    pub changes: Vec<StatChange>,
    /// Points left after the spend.
    pub balance: u32,
    /// True when the balance ran out and the ledger went back to idle.
    pub closed: bool,
}

/// Per-run upgrade bookkeeping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpgradeLedger {
    balance: u32,
    levels: Levels,
    phase: LedgerPhase,
    offer_size: usize,
}

impl UpgradeLedger {
    pub fn new(offer_size: usize) -> Self {
        Self {
            offer_size,
            ..Self::default()
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    /// Levels taken for `key` (0 if never selected).
    pub fn level(&self, key: &UpgradeKey) -> u32 {
        self.levels.get(key).copied().unwrap_or(0)
    }

    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    pub fn phase(&self) -> &LedgerPhase {
        &self.phase
    }

    pub fn offer_size(&self) -> usize {
        self.offer_size
    }

    /// Options of the open offer; empty while idle.
    pub fn current_options(&self) -> &[UpgradeOption] {
        match &self.phase {
            LedgerPhase::Idle => &[],
            LedgerPhase::OfferOpen { options } => options,
        }
    }

    /// Add upgrade points and open (or refresh) the offer.
    ///
    /// `amount` must be positive. Debug builds assert; release builds leave
    /// the ledger untouched and return the violation.
    pub fn credit_points<S, R>(
        &mut self,
        amount: i64,
        source: &S,
        state: &StatState,
        rng: &mut R,
    ) -> Result<&[UpgradeOption], InvariantViolation>
    where
        S: OfferSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        debug_assert!(amount > 0, "credited non-positive upgrade points: {amount}");
        if amount <= 0 {
            return Err(InvariantViolation::NonPositiveCredit(amount));
        }

        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        self.balance = self.balance.saturating_add(amount);
        self.open_offer(source, state, rng);
        Ok(self.current_options())
    }

    /// Spend one point on the option at `index` of the open offer.
    ///
    /// Checks run in order: balance, index, level cap, modifier lookup. On
    /// any failure neither the ledger nor `state` is modified.
    pub fn try_select<S, R>(
        &mut self,
        index: usize,
        source: &S,
        state: &mut StatState,
        rng: &mut R,
    ) -> Result<Selection, EconomyError>
    where
        S: OfferSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        if self.balance < 1 {
            return Err(EconomyError::InsufficientPoints);
        }

        let options = self.current_options();
        let option = options.get(index).ok_or(EconomyError::InvalidIndex {
            index,
            len: options.len(),
        })?;

        let key = option.key.clone();
        let max_level = option.max_level;
        let level = self.level(&key);
        if level >= max_level {
            return Err(EconomyError::MaxLevelReached { max_level });
        }

        let modifiers = source.modifiers(&key)?;

        self.levels.insert(key.clone(), level + 1);
        let changes = modifiers
            .iter()
            .map(|m| state.apply_level(m.field, m.value_per_level))
            .collect();
        self.balance -= 1;

        let closed = if self.balance > 0 {
            self.open_offer(source, state, rng);
            false
        } else {
            self.phase = LedgerPhase::Idle;
            true
        };

        Ok(Selection {
            key,
            level: level + 1,
            changes,
            balance: self.balance,
            closed,
        })
    }

    fn open_offer<S, R>(&mut self, source: &S, state: &StatState, rng: &mut R)
    where
        S: OfferSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        let options = sample(source, self.offer_size, &self.levels, state, rng);
        self.phase = LedgerPhase::OfferOpen { options };
    }
}
