//! # GovernanceEngine — the Incident Governance Entry Surface
//!
//! One engine instance owns all governance state for a deployment: the
//! report cycles, disputes, stake custody, and resolution records. The
//! three mutations — report, dispute, resolve — run their full
//! validation sequence before touching any state, and every value
//! movement goes through the injected [`TokenTransfer`] collaborator.
//!
//! ```text
//!                 ┌──────────────┐
//!   reportIncident│              │ disputeIncident
//!        ────────▶│  Governance  │◀────────
//!                 │    Engine    │
//!  resolveIncident│              │ queries (read-only)
//!        ────────▶│              │◀────────
//!                 └──────┬───────┘
//!                        │ pulls/pushes stake, checks pause + roles,
//!                        │ reads the clock, asks for verdicts
//!                        ▼
//!            TokenTransfer · CoverRegistry · AccessControl
//!            PauseSwitch · Arbitration · Clock
//! ```
//!
//! The clock is read once per mutation, at call time. Nothing in the
//! engine caches a timestamp across calls.

use std::sync::Arc;

use parapet_core::{ActorId, CoverKey, IncidentDate, ProofRef, Role, StakeAmount};

use crate::config::GovernanceConfig;
use crate::dispute::{Dispute, DisputeRegistry};
use crate::error::GovernanceError;
use crate::guard::ProtocolGuard;
use crate::report::{IncidentReport, ReportRegistry};
use crate::resolution::{ResolutionCoordinator, ResolutionRecord, ResolveContext};
use crate::stake::{StakeEntry, StakeLedger, StakeRole};
use crate::traits::{AccessControl, Arbitration, Clock, CoverRegistry, PauseSwitch, TokenTransfer};

// ── Collaborators ───────────────────────────────────────────────────────────

/// The external surfaces one engine instance is wired to.
///
/// Everything is shared ownership so a host can hand the same
/// collaborator to several components.
#[derive(Clone)]
pub struct Collaborators {
    /// Stake custody: pulls on lock, pushes on settlement.
    pub token: Arc<dyn TokenTransfer>,
    /// Which covers exist.
    pub covers: Arc<dyn CoverRegistry>,
    /// Role grants for privileged operations.
    pub access: Arc<dyn AccessControl>,
    /// Protocol-wide emergency stop.
    pub pause: Arc<dyn PauseSwitch>,
    /// Verdict provider for disputed cycles.
    pub arbitration: Arc<dyn Arbitration>,
    /// Time source, read at call time.
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

// ── Engine ──────────────────────────────────────────────────────────────────

/// Incident governance engine: report, dispute, resolve, query.
#[derive(Debug)]
pub struct GovernanceEngine {
    config: GovernanceConfig,
    guard: ProtocolGuard,
    collaborators: Collaborators,
    reports: ReportRegistry,
    disputes: DisputeRegistry,
    ledger: StakeLedger,
    coordinator: ResolutionCoordinator,
}

impl GovernanceEngine {
    /// A fresh engine with empty registries.
    pub fn new(config: GovernanceConfig, collaborators: Collaborators) -> Self {
        let guard = ProtocolGuard::new(
            Arc::clone(&collaborators.pause),
            Arc::clone(&collaborators.access),
        );
        Self {
            config,
            guard,
            collaborators,
            reports: ReportRegistry::new(),
            disputes: DisputeRegistry::new(),
            ledger: StakeLedger::new(),
            coordinator: ResolutionCoordinator::new(),
        }
    }

    /// The active policy.
    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Report an incident against `cover_key`, staking `stake`.
    ///
    /// The incident date is the current clock reading bucketed to its
    /// UTC day, and is returned so the caller can dispute or resolve
    /// the exact cycle later. The reporter's stake is pulled into
    /// custody before the cycle opens; if the pull fails, no cycle
    /// opens and nothing is recorded.
    pub fn report_incident(
        &mut self,
        reporter: ActorId,
        cover_key: CoverKey,
        proof_ref: ProofRef,
        stake: StakeAmount,
    ) -> Result<IncidentDate, GovernanceError> {
        self.guard.require_not_paused()?;
        if !self.collaborators.covers.exists(&cover_key) {
            return Err(GovernanceError::CoverNotFound);
        }
        if stake.is_zero() || stake < self.config.min_reporting_stake {
            return Err(GovernanceError::InsufficientStake);
        }

        let now = self.collaborators.clock.now();
        let incident_date = IncidentDate::bucket(now);
        self.reports.ensure_can_open(&cover_key, incident_date)?;

        self.ledger.lock(
            self.collaborators.token.as_ref(),
            reporter,
            cover_key,
            incident_date,
            StakeRole::Reporter,
            stake,
            now,
        )?;
        self.reports.open_cycle(IncidentReport::open(
            cover_key,
            incident_date,
            reporter,
            proof_ref,
            stake,
            now,
        ))?;

        tracing::info!(
            cover = %cover_key,
            incident_date = %incident_date,
            reporter = %reporter,
            stake = %stake,
            "Incident report accepted"
        );
        Ok(incident_date)
    }

    /// Dispute the open cycle at exactly (`cover_key`, `incident_date`),
    /// staking `stake` on the counter-claim.
    ///
    /// When no cycle is open at that date, including a date that merely
    /// misses the reported one, the dispute is refused as `NotReporting`
    /// and no stake is pulled. One dispute per cycle.
    pub fn dispute_incident(
        &mut self,
        disputer: ActorId,
        cover_key: CoverKey,
        incident_date: IncidentDate,
        counter_proof_ref: ProofRef,
        stake: StakeAmount,
    ) -> Result<(), GovernanceError> {
        self.guard.require_not_paused()?;
        if self.reports.active_date(&cover_key) != Some(incident_date) {
            return Err(GovernanceError::NotReporting);
        }
        // Covers can be delisted while a cycle is open.
        if !self.collaborators.covers.exists(&cover_key) {
            return Err(GovernanceError::CoverNotFound);
        }
        if self.disputes.exists(&cover_key, incident_date) {
            return Err(GovernanceError::DisputeAlreadyExists);
        }
        if stake.is_zero() {
            return Err(GovernanceError::InsufficientStake);
        }

        let now = self.collaborators.clock.now();
        self.ledger.lock(
            self.collaborators.token.as_ref(),
            disputer,
            cover_key,
            incident_date,
            StakeRole::Disputer,
            stake,
            now,
        )?;
        self.disputes.record(Dispute {
            cover_key,
            incident_date,
            disputer,
            counter_proof_ref,
            stake,
            disputed_at: now,
        })?;
        self.reports.mark_disputed(&cover_key, incident_date)?;

        tracing::info!(
            cover = %cover_key,
            incident_date = %incident_date,
            disputer = %disputer,
            stake = %stake,
            "Dispute accepted"
        );
        Ok(())
    }

    /// Resolve the cycle at (`cover_key`, `incident_date`).
    ///
    /// Restricted to holders of [`Role::GovernanceAgent`]. The cooldown
    /// must have elapsed since the cycle's last staking activity; an
    /// undisputed cycle confirms outright, a disputed one takes the
    /// arbitration verdict. Settlement pays every refund and forfeiture
    /// before any state is marked resolved, so a failed settlement
    /// leaves the identical call retryable.
    pub fn resolve_incident(
        &mut self,
        resolver: ActorId,
        cover_key: CoverKey,
        incident_date: IncidentDate,
    ) -> Result<ResolutionRecord, GovernanceError> {
        self.guard.require_not_paused()?;
        self.guard.require_role(Role::GovernanceAgent, &resolver)?;

        let now = self.collaborators.clock.now();
        let record = self.coordinator.resolve(
            cover_key,
            incident_date,
            resolver,
            ResolveContext {
                reports: &mut self.reports,
                disputes: &self.disputes,
                ledger: &mut self.ledger,
                token: self.collaborators.token.as_ref(),
                arbitration: self.collaborators.arbitration.as_ref(),
                config: &self.config,
                now,
            },
        )?;

        tracing::info!(
            cover = %cover_key,
            incident_date = %incident_date,
            outcome = %record.outcome,
            resolver = %resolver,
            total_settled = %record.total_stake_settled,
            "Incident cycle resolved"
        );
        Ok(record)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// The cover's unresolved report, if a cycle is open.
    pub fn active_report(&self, cover_key: &CoverKey) -> Option<&IncidentReport> {
        self.reports.active_report(cover_key)
    }

    /// The report filed at (`cover_key`, `incident_date`), resolved or
    /// not.
    pub fn report_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&IncidentReport> {
        self.reports.report_at(cover_key, incident_date)
    }

    /// The dispute filed against (`cover_key`, `incident_date`), if any.
    pub fn dispute_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&Dispute> {
        self.disputes.dispute_at(cover_key, incident_date)
    }

    /// The finalization record for (`cover_key`, `incident_date`), or
    /// `None` while the cycle is unresolved or was never opened.
    pub fn resolution_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&ResolutionRecord> {
        self.coordinator.record_at(cover_key, incident_date)
    }

    /// All reports ever filed against the cover, in date order.
    pub fn report_history(&self, cover_key: &CoverKey) -> impl Iterator<Item = &IncidentReport> {
        self.reports.history(cover_key)
    }

    /// The stake entry held in custody for one side of a cycle.
    pub fn staked_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
        role: StakeRole,
    ) -> Option<&StakeEntry> {
        self.ledger.locked_for(cover_key, incident_date, role)
    }

    /// Total value currently held in stake custody.
    pub fn total_locked(&self) -> StakeAmount {
        self.ledger.total_locked()
    }
}
