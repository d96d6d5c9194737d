//! # Stake Ledger — Custody Accounting and Settlement
//!
//! Every report and dispute is backed by locked value. The ledger owns
//! the bookkeeping half of that promise: which account locked how much
//! behind which side of which cycle, pulled into custody through the
//! injected token collaborator at lock time and paid back out at
//! settlement.
//!
//! A cycle holds at most two entries — one reporter, one disputer —
//! and each entry settles exactly once:
//!
//! ```text
//! lock(Reporter) ──▶ [cycle stakes] ──settle(outcome)──▶ refund / forfeit
//! lock(Disputer) ──▶      ──┘                              (entries removed)
//! ```
//!
//! Settlement follows the binary rule: `Confirmed` refunds the reporter
//! and forfeits any disputer stake to the protocol sink; `Rejected`
//! refunds the disputer and forfeits the reporter. No partial or
//! proportional splits exist.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use parapet_core::{ActorId, CoverKey, IncidentDate, StakeAmount, Timestamp};

use crate::error::GovernanceError;
use crate::resolution::Outcome;
use crate::traits::TokenTransfer;

// ── Entries ─────────────────────────────────────────────────────────────────

/// Which side of a cycle a stake backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StakeRole {
    /// Backs the incident report.
    Reporter,
    /// Backs the dispute against it.
    Disputer,
}

impl StakeRole {
    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StakeRole::Reporter => "REPORTER",
            StakeRole::Disputer => "DISPUTER",
        }
    }
}

impl std::fmt::Display for StakeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One locked stake, created at lock time and destroyed at settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StakeEntry {
    /// Account the stake was pulled from (and refunded to, if the
    /// outcome favors it).
    pub holder: ActorId,
    /// Cycle the stake backs.
    pub cover_key: CoverKey,
    /// Cycle the stake backs.
    pub incident_date: IncidentDate,
    /// Side of the cycle.
    pub role: StakeRole,
    /// Locked amount.
    pub amount: StakeAmount,
    /// Instant the stake entered custody.
    pub locked_at: Timestamp,
}

/// The at-most-two stakes of one cycle.
#[derive(Debug, Default)]
struct CycleStakes {
    reporter: Option<StakeEntry>,
    disputer: Option<StakeEntry>,
}

impl CycleStakes {
    fn get(&self, role: StakeRole) -> Option<&StakeEntry> {
        match role {
            StakeRole::Reporter => self.reporter.as_ref(),
            StakeRole::Disputer => self.disputer.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: StakeRole) -> &mut Option<StakeEntry> {
        match role {
            StakeRole::Reporter => &mut self.reporter,
            StakeRole::Disputer => &mut self.disputer,
        }
    }
}

// ── Ledger ──────────────────────────────────────────────────────────────────

/// Custody accounting for every open cycle.
#[derive(Debug, Default)]
pub struct StakeLedger {
    cycles: HashMap<(CoverKey, IncidentDate), CycleStakes>,
}

impl StakeLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pull `amount` from `holder` into custody and record the entry.
    ///
    /// The pull runs first: if the token collaborator refuses, the call
    /// fails with `TransferFailed` and the ledger is unchanged. A
    /// second lock for an occupied (cycle, role) slot is refused before
    /// any value moves.
    #[allow(clippy::too_many_arguments)]
    pub fn lock(
        &mut self,
        token: &dyn TokenTransfer,
        holder: ActorId,
        cover_key: CoverKey,
        incident_date: IncidentDate,
        role: StakeRole,
        amount: StakeAmount,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let key = (cover_key, incident_date);
        if self.cycles.get(&key).is_some_and(|c| c.get(role).is_some()) {
            return Err(GovernanceError::StakeAlreadyLocked);
        }

        token
            .pull(&holder, amount)
            .map_err(|e| GovernanceError::TransferFailed {
                reason: e.to_string(),
            })?;

        let entry = StakeEntry {
            holder,
            cover_key,
            incident_date,
            role,
            amount,
            locked_at: now,
        };
        *self.cycles.entry(key).or_default().slot_mut(role) = Some(entry);
        Ok(())
    }

    /// Settle an entire cycle per `outcome` and destroy its entries,
    /// returning the total amount settled.
    ///
    /// `Confirmed`: reporter refunded, any disputer stake pushed to
    /// `sink`. `Rejected`: disputer refunded, reporter stake pushed to
    /// `sink`.
    ///
    /// The ledger mutates only after every push succeeded. A failed
    /// push fails the whole call with `SettlementFailed`, keeps every
    /// entry, and a retried settlement reissues the identical payout
    /// plan — custody implementations must treat settlement pushes as
    /// replayable.
    pub fn settle(
        &mut self,
        token: &dyn TokenTransfer,
        cover_key: CoverKey,
        incident_date: IncidentDate,
        outcome: Outcome,
        sink: &ActorId,
    ) -> Result<StakeAmount, GovernanceError> {
        let key = (cover_key, incident_date);
        let slot = self
            .cycles
            .get(&key)
            .ok_or_else(|| GovernanceError::SettlementFailed {
                reason: "no stakes locked for cycle".to_string(),
            })?;
        let reporter = slot
            .reporter
            .as_ref()
            .ok_or_else(|| GovernanceError::SettlementFailed {
                reason: "reporter stake missing".to_string(),
            })?;
        let disputer = slot.disputer.as_ref();

        let total = match disputer {
            Some(d) => reporter.amount.checked_add(d.amount).ok_or_else(|| {
                GovernanceError::SettlementFailed {
                    reason: "stake total overflows".to_string(),
                }
            })?,
            None => reporter.amount,
        };

        let mut payouts: Vec<(ActorId, StakeAmount)> = Vec::with_capacity(2);
        match outcome {
            Outcome::Confirmed => {
                payouts.push((reporter.holder, reporter.amount));
                if let Some(d) = disputer {
                    payouts.push((*sink, d.amount));
                }
            }
            Outcome::Rejected => {
                payouts.push((*sink, reporter.amount));
                if let Some(d) = disputer {
                    payouts.push((d.holder, d.amount));
                }
            }
        }

        for (to, amount) in &payouts {
            token
                .push(to, *amount)
                .map_err(|e| GovernanceError::SettlementFailed {
                    reason: e.to_string(),
                })?;
        }

        self.cycles.remove(&key);
        Ok(total)
    }

    /// The locked entry for one side of a cycle, if present.
    pub fn locked_for(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
        role: StakeRole,
    ) -> Option<&StakeEntry> {
        self.cycles.get(&(*cover_key, incident_date))?.get(role)
    }

    /// Total value in custody across all cycles, saturating at the
    /// `u128` ceiling.
    pub fn total_locked(&self) -> StakeAmount {
        let mut total = StakeAmount::ZERO;
        for slot in self.cycles.values() {
            for entry in [slot.reporter.as_ref(), slot.disputer.as_ref()].into_iter().flatten() {
                total = total
                    .checked_add(entry.amount)
                    .unwrap_or(StakeAmount::new(u128::MAX));
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockToken;

    fn cycle() -> (CoverKey, IncidentDate) {
        (
            CoverKey::from_slug("test").unwrap(),
            IncidentDate::parse("2026-01-15").unwrap(),
        )
    }

    fn locked_at() -> Timestamp {
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
    }

    fn funded_actor(token: &MockToken, balance: u128) -> ActorId {
        let actor = ActorId::new();
        token.mint(&actor, balance);
        actor
    }

    #[test]
    fn lock_pulls_value_and_records_entry() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();

        assert_eq!(token.balance_of(&reporter), 750);
        assert_eq!(token.custody(), 250);
        let entry = ledger.locked_for(&key, date, StakeRole::Reporter).unwrap();
        assert_eq!(entry.amount, StakeAmount::new(250));
        assert_eq!(entry.holder, reporter);
        assert_eq!(ledger.total_locked(), StakeAmount::new(250));
    }

    #[test]
    fn occupied_slot_refused_before_any_transfer() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();
        let err = ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap_err();

        assert_eq!(err.to_string(), "Stake already locked");
        assert_eq!(token.custody(), 250);

        // The other side of the cycle is its own slot.
        let disputer = funded_actor(&token, 500);
        ledger
            .lock(&token, disputer, key, date, StakeRole::Disputer, StakeAmount::new(100), locked_at())
            .unwrap();
        assert_eq!(ledger.total_locked(), StakeAmount::new(350));
    }

    #[test]
    fn refused_pull_leaves_ledger_unchanged() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 10);

        let err = ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap_err();

        assert!(err.to_string().starts_with("Transfer failed"));
        assert!(ledger.locked_for(&key, date, StakeRole::Reporter).is_none());
        assert_eq!(ledger.total_locked(), StakeAmount::ZERO);
        assert_eq!(token.balance_of(&reporter), 10);
    }

    #[test]
    fn settle_confirmed_without_dispute_refunds_reporter() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);
        let sink = ActorId::new();

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();
        let total = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap();

        assert_eq!(total, StakeAmount::new(250));
        assert_eq!(token.balance_of(&reporter), 1_000);
        assert_eq!(token.balance_of(&sink), 0);
        assert_eq!(token.custody(), 0);
        assert!(ledger.locked_for(&key, date, StakeRole::Reporter).is_none());
    }

    #[test]
    fn settle_confirmed_forfeits_disputer_to_sink() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);
        let disputer = funded_actor(&token, 500);
        let sink = ActorId::new();

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();
        ledger
            .lock(&token, disputer, key, date, StakeRole::Disputer, StakeAmount::new(100), locked_at())
            .unwrap();
        let total = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap();

        assert_eq!(total, StakeAmount::new(350));
        assert_eq!(token.balance_of(&reporter), 1_000);
        assert_eq!(token.balance_of(&disputer), 400);
        assert_eq!(token.balance_of(&sink), 100);
        assert_eq!(token.custody(), 0);
    }

    #[test]
    fn settle_rejected_refunds_disputer_and_forfeits_reporter() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);
        let disputer = funded_actor(&token, 500);
        let sink = ActorId::new();

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();
        ledger
            .lock(&token, disputer, key, date, StakeRole::Disputer, StakeAmount::new(100), locked_at())
            .unwrap();
        let total = ledger
            .settle(&token, key, date, Outcome::Rejected, &sink)
            .unwrap();

        assert_eq!(total, StakeAmount::new(350));
        assert_eq!(token.balance_of(&reporter), 750);
        assert_eq!(token.balance_of(&disputer), 500);
        assert_eq!(token.balance_of(&sink), 250);
        assert_eq!(token.custody(), 0);
    }

    #[test]
    fn settle_with_no_stakes_fails() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let sink = ActorId::new();

        let err = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap_err();
        assert!(err.to_string().starts_with("Settlement failed"));
    }

    #[test]
    fn failed_push_keeps_entries_and_allows_retry() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);
        let sink = ActorId::new();

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();

        token.set_fail_pushes(true);
        let err = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap_err();
        assert!(err.to_string().starts_with("Settlement failed"));
        assert!(ledger.locked_for(&key, date, StakeRole::Reporter).is_some());
        assert_eq!(ledger.total_locked(), StakeAmount::new(250));

        token.set_fail_pushes(false);
        let total = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap();
        assert_eq!(total, StakeAmount::new(250));
        assert_eq!(token.balance_of(&reporter), 1_000);
    }

    #[test]
    fn settle_twice_fails_cleanly() {
        let token = MockToken::new();
        let mut ledger = StakeLedger::new();
        let (key, date) = cycle();
        let reporter = funded_actor(&token, 1_000);
        let sink = ActorId::new();

        ledger
            .lock(&token, reporter, key, date, StakeRole::Reporter, StakeAmount::new(250), locked_at())
            .unwrap();
        ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap();

        let err = ledger
            .settle(&token, key, date, Outcome::Confirmed, &sink)
            .unwrap_err();
        assert_eq!(err.to_string(), "Settlement failed: no stakes locked for cycle");
    }

    #[test]
    fn role_strings() {
        assert_eq!(StakeRole::Reporter.as_str(), "REPORTER");
        assert_eq!(StakeRole::Disputer.to_string(), "DISPUTER");
    }
}
