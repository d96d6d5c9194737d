//! # Collaborator Traits
//!
//! The engine owns lifecycle state and stake accounting, nothing else.
//! Token custody, cover registration, access policy, the pause flag,
//! arbitration verdicts, and time itself are consumed through these
//! traits, injected once at construction by a composition root. There
//! is no ambient fallback: an engine without a clock collaborator has
//! no idea what time it is.
//!
//! All traits require `Send + Sync` so an engine can sit behind a lock
//! shared across threads.

use thiserror::Error;

use parapet_core::{ActorId, CoverKey, IncidentDate, Role, StakeAmount, Timestamp};

use crate::resolution::Outcome;

/// Reason the custody collaborator refused a transfer.
///
/// Surfaced to callers inside `TransferFailed` (stake locking) or
/// `SettlementFailed` (payouts).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransferError(pub String);

/// Value custody. The engine pulls stakes into custody at lock time and
/// pushes them out at settlement.
///
/// Implementations decide what a transfer is — a token contract call, a
/// ledger row, an in-memory balance map. The engine requires only that
/// `Ok` means the value actually moved.
pub trait TokenTransfer: Send + Sync {
    /// Move `amount` from `from` into engine custody.
    fn pull(&self, from: &ActorId, amount: StakeAmount) -> Result<(), TransferError>;

    /// Move `amount` out of engine custody to `to`.
    fn push(&self, to: &ActorId, amount: StakeAmount) -> Result<(), TransferError>;
}

/// Cover existence lookup. Covers are created and configured elsewhere;
/// the engine only ever asks whether a key names a real one.
pub trait CoverRegistry: Send + Sync {
    /// Whether `cover_key` names a registered cover.
    fn exists(&self, cover_key: &CoverKey) -> bool;
}

/// Role membership lookup, managed by the host's access layer.
pub trait AccessControl: Send + Sync {
    /// Whether `actor` currently holds `role`.
    fn has_role(&self, role: Role, actor: &ActorId) -> bool;
}

/// Protocol-wide pause flag. Checked first by every mutating operation.
pub trait PauseSwitch: Send + Sync {
    /// Whether the protocol is currently paused.
    fn is_paused(&self) -> bool;
}

/// Verdict provider for disputed cycles.
///
/// Consulted exactly once per disputed resolution; the answer is
/// authoritative and the engine does not second-guess it. Undisputed
/// cycles never reach arbitration.
pub trait Arbitration: Send + Sync {
    /// Decide the outcome of the disputed cycle at (`cover_key`,
    /// `incident_date`).
    fn decide(&self, cover_key: &CoverKey, incident_date: IncidentDate) -> Outcome;
}

/// Time source. Read at the moment a call needs the current instant and
/// never cached across calls, so hosts control time completely — in
/// production with the system clock, in tests with a manual one.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}
