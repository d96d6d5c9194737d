//! # Resolution — Outcomes, Records, and the Finalization Sequence
//!
//! Resolution closes a report/dispute cycle: it decides the outcome,
//! drives stake settlement, marks the report resolved, and writes the
//! immutable `ResolutionRecord` that survives the cycle. Records are
//! never deleted or overwritten — one per (cover, incident date),
//! forever.
//!
//! The coordinator holds no collaborator handles of its own. Everything
//! the sequence touches arrives in an explicit [`ResolveContext`] per
//! call, so the full set of state a resolution can read or mutate is
//! visible in its signature.
//!
//! ```text
//! Active    ──cooldown──▶ Confirmed            (no dispute filed)
//! Disputed  ──cooldown──▶ arbitration verdict  (Confirmed | Rejected)
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use parapet_core::{ActorId, CoverKey, IncidentDate, StakeAmount, Timestamp};

use crate::config::GovernanceConfig;
use crate::dispute::DisputeRegistry;
use crate::error::GovernanceError;
use crate::report::{ReportRegistry, ReportStatus};
use crate::stake::StakeLedger;
use crate::traits::{Arbitration, TokenTransfer};

// ── Outcome ─────────────────────────────────────────────────────────────────

/// Final verdict of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// The incident stands: the reporter is refunded, any disputer
    /// stake is forfeited.
    Confirmed,
    /// The report was refuted: the disputer is refunded, the reporter's
    /// stake is forfeited.
    Rejected,
}

impl Outcome {
    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Confirmed => "CONFIRMED",
            Outcome::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record ──────────────────────────────────────────────────────────────────

/// Immutable finalization record of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionRecord {
    /// Cover the cycle ran against.
    pub cover_key: CoverKey,
    /// Incident date of the finalized cycle.
    pub incident_date: IncidentDate,
    /// The verdict.
    pub outcome: Outcome,
    /// Instant of finalization.
    pub resolved_at: Timestamp,
    /// Account that drove the resolution.
    pub resolved_by: ActorId,
    /// Total stake moved out of custody at settlement.
    pub total_stake_settled: StakeAmount,
}

// ── Coordinator ─────────────────────────────────────────────────────────────

/// Everything one resolution call may read or mutate.
///
/// Registries and ledger arrive as explicit borrows from the engine
/// that owns them; collaborators arrive as trait objects; `now` is the
/// injected clock reading taken at call time.
pub struct ResolveContext<'a> {
    /// Report cycles (mutated: status transition, active marker).
    pub reports: &'a mut ReportRegistry,
    /// Dispute records (read: cooldown basis, dispute presence).
    pub disputes: &'a DisputeRegistry,
    /// Stake custody (mutated: settlement).
    pub ledger: &'a mut StakeLedger,
    /// Value custody collaborator, driven by the ledger.
    pub token: &'a dyn TokenTransfer,
    /// Verdict provider for disputed cycles.
    pub arbitration: &'a dyn Arbitration,
    /// Cooldown length and forfeiture sink.
    pub config: &'a GovernanceConfig,
    /// The current instant.
    pub now: Timestamp,
}

/// Owns the resolution records and drives the finalization sequence.
#[derive(Debug, Default)]
pub struct ResolutionCoordinator {
    records: HashMap<(CoverKey, IncidentDate), ResolutionRecord>,
}

impl ResolutionCoordinator {
    /// Empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for (`cover_key`, `incident_date`), if the cycle was
    /// finalized.
    pub fn record_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&ResolutionRecord> {
        self.records.get(&(*cover_key, incident_date))
    }

    /// Whether the cycle was finalized.
    pub fn is_resolved(&self, cover_key: &CoverKey, incident_date: IncidentDate) -> bool {
        self.records.contains_key(&(*cover_key, incident_date))
    }

    /// Finalize the cycle at (`cover_key`, `incident_date`).
    ///
    /// Sequence: refuse a second resolution (`AlreadyResolved`); require
    /// the active cycle to match exactly (`NoActiveCycle`); require the
    /// cooldown to have elapsed since the later of report and dispute
    /// time (`TooEarly`); take the outcome — `Confirmed` outright for an
    /// undisputed cycle, the arbitration verdict otherwise; settle
    /// stakes; mark the report resolved; write and return the record.
    ///
    /// Settlement failure aborts before any registry mutation, so the
    /// identical call can be retried.
    pub fn resolve(
        &mut self,
        cover_key: CoverKey,
        incident_date: IncidentDate,
        resolved_by: ActorId,
        ctx: ResolveContext<'_>,
    ) -> Result<ResolutionRecord, GovernanceError> {
        if self.records.contains_key(&(cover_key, incident_date)) {
            return Err(GovernanceError::AlreadyResolved);
        }

        let report = ctx
            .reports
            .active_report(&cover_key)
            .filter(|r| r.incident_date == incident_date)
            .ok_or(GovernanceError::NoActiveCycle)?;

        let dispute = ctx.disputes.dispute_at(&cover_key, incident_date);

        // Cooldown runs from the last staking activity on the cycle.
        let basis = match dispute {
            Some(d) => report.reported_at.max(d.disputed_at),
            None => report.reported_at,
        };
        if ctx.now.duration_since(basis) < ctx.config.cooldown() {
            return Err(GovernanceError::TooEarly);
        }

        let outcome = match report.status {
            ReportStatus::Active => Outcome::Confirmed,
            ReportStatus::Disputed => ctx.arbitration.decide(&cover_key, incident_date),
            ReportStatus::Resolved => return Err(GovernanceError::AlreadyResolved),
        };

        let total_stake_settled = ctx.ledger.settle(
            ctx.token,
            cover_key,
            incident_date,
            outcome,
            &ctx.config.forfeit_sink,
        )?;

        ctx.reports.mark_resolved(&cover_key, incident_date)?;

        let record = ResolutionRecord {
            cover_key,
            incident_date,
            outcome,
            resolved_at: ctx.now,
            resolved_by,
            total_stake_settled,
        };
        self.records.insert((cover_key, incident_date), record.clone());
        Ok(record)
    }
}
