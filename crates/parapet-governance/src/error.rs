//! # Error Types — Governance Operation Failures
//!
//! Every way a report, dispute, or resolution can be refused, as one
//! `thiserror` enum. Each variant carries a stable `Display` string that
//! operators and tests match on verbatim, and maps into a coarse
//! [`ErrorCategory`] for callers that meter or alert by failure class.
//!
//! A failed operation mutates nothing. Callers may resubmit the same
//! call after fixing the precondition; the engine performs no internal
//! retries.

use thiserror::Error;

use parapet_core::CoreError;

/// A governance operation was refused.
#[derive(Error, Debug)]
pub enum GovernanceError {
    /// The protocol-wide pause flag is set.
    #[error("Protocol is paused")]
    ProtocolPaused,

    /// The acting account lacks the required role.
    #[error("Access is denied")]
    Unauthorized,

    /// The cover key is not registered with the cover registry.
    #[error("Cover does not exist")]
    CoverNotFound,

    /// A vocabulary value failed validation at the boundary.
    #[error(transparent)]
    InvalidInput(#[from] CoreError),

    /// The cover already has an active report cycle.
    #[error("Already reporting")]
    AlreadyReporting,

    /// No active report cycle matches the named cover and incident date.
    #[error("Not reporting")]
    NotReporting,

    /// The cycle already has a dispute recorded against it.
    #[error("Already disputed")]
    DisputeAlreadyExists,

    /// The cycle has already been finalized.
    #[error("Already resolved")]
    AlreadyResolved,

    /// Resolution was requested for a cover with no open cycle.
    #[error("No active cycle")]
    NoActiveCycle,

    /// The offered stake is zero or below the configured minimum.
    #[error("Insufficient stake")]
    InsufficientStake,

    /// A stake entry already occupies this cycle/role slot.
    #[error("Stake already locked")]
    StakeAlreadyLocked,

    /// The token collaborator refused to pull the stake.
    #[error("Transfer failed: {reason}")]
    TransferFailed {
        /// Reason reported by the token collaborator.
        reason: String,
    },

    /// A settlement payout could not be executed; the ledger is unchanged.
    #[error("Settlement failed: {reason}")]
    SettlementFailed {
        /// Reason reported by the token collaborator.
        reason: String,
    },

    /// The cooldown period since the last report/dispute activity has
    /// not yet elapsed.
    #[error("Cooldown period has not elapsed")]
    TooEarly,
}

impl GovernanceError {
    /// The coarse failure class this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GovernanceError::ProtocolPaused | GovernanceError::Unauthorized => {
                ErrorCategory::Authorization
            }
            GovernanceError::CoverNotFound | GovernanceError::InvalidInput(_) => {
                ErrorCategory::Validation
            }
            GovernanceError::AlreadyReporting
            | GovernanceError::NotReporting
            | GovernanceError::DisputeAlreadyExists
            | GovernanceError::AlreadyResolved
            | GovernanceError::NoActiveCycle => ErrorCategory::State,
            GovernanceError::InsufficientStake
            | GovernanceError::StakeAlreadyLocked
            | GovernanceError::TransferFailed { .. }
            | GovernanceError::SettlementFailed { .. } => ErrorCategory::Economic,
            GovernanceError::TooEarly => ErrorCategory::Timing,
        }
    }
}

/// Coarse classification of governance failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed or unknown input values.
    Validation,
    /// The lifecycle state machine refused the transition.
    State,
    /// Pause flag or role check refused the caller.
    Authorization,
    /// Stake custody or settlement could not proceed.
    Economic,
    /// A time window has not elapsed.
    Timing,
}

impl ErrorCategory {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "VALIDATION",
            ErrorCategory::State => "STATE",
            ErrorCategory::Authorization => "AUTHORIZATION",
            ErrorCategory::Economic => "ECONOMIC",
            ErrorCategory::Timing => "TIMING",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
