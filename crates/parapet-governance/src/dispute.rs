//! # Disputes — Counter-Claims Against Active Reports
//!
//! A dispute stakes value against an active incident report, asserting
//! the reported event did not occur (or not as claimed). Disputes are
//! addressed by the exact cycle they contest: the cover key plus the
//! incident date the report established. One dispute per cycle; there
//! is no counter-counter-claim.
//!
//! The registry here owns only the dispute records. Whether a dispute
//! may be filed at all — the cycle is open, the date matches, the
//! report is still undisputed — is checked against the report registry
//! by the engine before anything lands here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use parapet_core::{ActorId, CoverKey, IncidentDate, ProofRef, StakeAmount, Timestamp};

use crate::error::GovernanceError;

/// One stake-backed counter-claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dispute {
    /// Cover whose report is contested.
    pub cover_key: CoverKey,
    /// Incident date of the contested cycle.
    pub incident_date: IncidentDate,
    /// Account that filed the dispute.
    pub disputer: ActorId,
    /// Reference to the disputer's published counter-evidence.
    pub counter_proof_ref: ProofRef,
    /// Stake locked behind the dispute.
    pub stake: StakeAmount,
    /// Instant the dispute was accepted.
    pub disputed_at: Timestamp,
}

/// Dispute records keyed by cycle.
#[derive(Debug, Default)]
pub struct DisputeRegistry {
    disputes: HashMap<(CoverKey, IncidentDate), Dispute>,
}

impl DisputeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The dispute filed against (`cover_key`, `incident_date`), if any.
    pub fn dispute_at(
        &self,
        cover_key: &CoverKey,
        incident_date: IncidentDate,
    ) -> Option<&Dispute> {
        self.disputes.get(&(*cover_key, incident_date))
    }

    /// Whether a dispute exists for the cycle.
    pub fn exists(&self, cover_key: &CoverKey, incident_date: IncidentDate) -> bool {
        self.disputes.contains_key(&(*cover_key, incident_date))
    }

    /// Record a dispute. Refuses a second dispute for the same cycle.
    pub fn record(&mut self, dispute: Dispute) -> Result<(), GovernanceError> {
        let key = (dispute.cover_key, dispute.incident_date);
        if self.disputes.contains_key(&key) {
            return Err(GovernanceError::DisputeAlreadyExists);
        }
        self.disputes.insert(key, dispute);
        Ok(())
    }
}
