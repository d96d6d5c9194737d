//! # Incident Reports — Cycle Storage and Status Machine
//!
//! An incident report is a stake-backed claim that a covered event
//! occurred. Each cover runs at most one report cycle at a time; the
//! registry here owns every cycle ever filed (resolved cycles are
//! superseded, never deleted) plus the at-most-one active marker per
//! cover.
//!
//! ## Status machine
//!
//! ```text
//! Active ──dispute──▶ Disputed
//!    │                    │
//!    └──────resolve───────┴──▶ Resolved (terminal)
//! ```
//!
//! The registry refuses any call that does not match this machine, so
//! callers above it can sequence stake movement against guaranteed
//! state.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use parapet_core::{ActorId, CoverKey, IncidentDate, ProofRef, StakeAmount, Timestamp};

use crate::error::GovernanceError;

// ── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of one incident report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// Reported, open to disputes.
    Active,
    /// A counter-claim has been staked against it.
    Disputed,
    /// Finalized; stakes settled.
    Resolved,
}

impl ReportStatus {
    /// Stable string form, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Active => "ACTIVE",
            ReportStatus::Disputed => "DISPUTED",
            ReportStatus::Resolved => "RESOLVED",
        }
    }

    /// Whether this status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Resolved)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Report ──────────────────────────────────────────────────────────────────

/// One incident report cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    /// Cover the incident is claimed against.
    pub cover_key: CoverKey,
    /// Canonical day bucket the incident is attributed to.
    pub incident_date: IncidentDate,
    /// Account that filed the report.
    pub reporter: ActorId,
    /// Reference to the reporter's published evidence.
    pub proof_ref: ProofRef,
    /// Stake locked behind the report.
    pub stake: StakeAmount,
    /// Current lifecycle status.
    pub status: ReportStatus,
    /// Instant the report was accepted.
    pub reported_at: Timestamp,
}

impl IncidentReport {
    /// A freshly filed report, status `Active`.
    pub fn open(
        cover_key: CoverKey,
        incident_date: IncidentDate,
        reporter: ActorId,
        proof_ref: ProofRef,
        stake: StakeAmount,
        reported_at: Timestamp,
    ) -> Self {
        Self {
            cover_key,
            incident_date,
            reporter,
            proof_ref,
            stake,
            status: ReportStatus::Active,
            reported_at,
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────────────

/// All report cycles, keyed by cover and incident date.
#[derive(Debug, Default)]
pub struct ReportRegistry {
    /// Every cycle ever filed, date-ordered per cover.
    cycles: HashMap<CoverKey, BTreeMap<IncidentDate, IncidentReport>>,
    /// The one unresolved cycle per cover, if any.
    active: HashMap<CoverKey, IncidentDate>,
}

impl ReportRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Incident date of the cover's unresolved cycle, if one is open.
    pub fn active_date(&self, cover_key: &CoverKey) -> Option<IncidentDate> {
        self.active.get(cover_key).copied()
    }

    /// The cover's unresolved report, if one is open.
    pub fn active_report(&self, cover_key: &CoverKey) -> Option<&IncidentReport> {
        let date = self.active.get(cover_key)?;
        self.cycles.get(cover_key)?.get(date)
    }

    /// The report filed at exactly (`cover_key`, `incident_date`),
    /// resolved or not.
    pub fn report_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&IncidentReport> {
        self.cycles.get(cover_key)?.get(&incident_date)
    }

    /// Every cycle filed for `cover_key`, oldest first.
    pub fn history(&self, cover_key: &CoverKey) -> impl Iterator<Item = &IncidentReport> {
        self.cycles.get(cover_key).into_iter().flat_map(|c| c.values())
    }

    /// Check that a new cycle may open at (`cover_key`, `incident_date`)
    /// without changing anything.
    ///
    /// Callers run this before moving stake, then [`open_cycle`] after;
    /// both enforce the same rules.
    ///
    /// [`open_cycle`]: ReportRegistry::open_cycle
    pub fn ensure_can_open(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Result<(), GovernanceError> {
        if self.active.contains_key(cover_key) {
            return Err(GovernanceError::AlreadyReporting);
        }
        // A prior cycle at the same date can only be a resolved one; a
        // same-day re-report must wait for the next day bucket.
        if self
            .cycles
            .get(cover_key)
            .is_some_and(|c| c.contains_key(&incident_date))
        {
            return Err(GovernanceError::AlreadyResolved);
        }
        Ok(())
    }

    /// Open a new cycle, marking it active.
    pub fn open_cycle(&mut self, report: IncidentReport) -> Result<(), GovernanceError> {
        self.ensure_can_open(&report.cover_key, report.incident_date)?;
        let cover_key = report.cover_key;
        let incident_date = report.incident_date;
        self.cycles
            .entry(cover_key)
            .or_default()
            .insert(incident_date, report);
        self.active.insert(cover_key, incident_date);
        Ok(())
    }

    /// Transition the active report at exactly (`cover_key`,
    /// `incident_date`) from `Active` to `Disputed`.
    pub fn mark_disputed(
        &mut self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Result<(), GovernanceError> {
        let report = self.active_report_mut(cover_key, incident_date)?;
        match report.status {
            ReportStatus::Active => {
                report.status = ReportStatus::Disputed;
                Ok(())
            }
            ReportStatus::Disputed => Err(GovernanceError::DisputeAlreadyExists),
            ReportStatus::Resolved => Err(GovernanceError::AlreadyResolved),
        }
    }

    /// Transition the active report at exactly (`cover_key`,
    /// `incident_date`) to `Resolved` and clear the active marker,
    /// returning the cover to idle.
    ///
    /// Mismatches here speak the resolution path's language: no open
    /// cycle, or a different date, is `NoActiveCycle`.
    pub fn mark_resolved(
        &mut self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Result<(), GovernanceError> {
        let active_date = self
            .active
            .get(cover_key)
            .copied()
            .ok_or(GovernanceError::NoActiveCycle)?;
        if active_date != incident_date {
            return Err(GovernanceError::NoActiveCycle);
        }
        let report = self
            .cycles
            .get_mut(cover_key)
            .and_then(|c| c.get_mut(&incident_date))
            .ok_or(GovernanceError::NoActiveCycle)?;
        report.status = ReportStatus::Resolved;
        self.active.remove(cover_key);
        Ok(())
    }

    /// The active report at exactly the given cycle, mutable. Any
    /// mismatch — no active cycle, or a different incident date — is
    /// `NotReporting`.
    fn active_report_mut(
        &mut self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Result<&mut IncidentReport, GovernanceError> {
        let active_date = self
            .active
            .get(cover_key)
            .copied()
            .ok_or(GovernanceError::NotReporting)?;
        if active_date != incident_date {
            return Err(GovernanceError::NotReporting);
        }
        self.cycles
            .get_mut(cover_key)
            .and_then(|c| c.get_mut(&incident_date))
            .ok_or(GovernanceError::NotReporting)
    }
}
