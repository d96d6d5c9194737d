//! # parapet-governance — Incident Governance & Resolution
//!
//! Drives the incident lifecycle for parametric covers: anyone may
//! stake value to report an incident, anyone may stake a counter-claim
//! to dispute it, and after a cooldown a governance agent resolves the
//! cycle — refunding the winning side and forfeiting the losing side's
//! stake.
//!
//! - **Engine** ([`engine`]): The entry surface. One instance owns all
//!   governance state and runs the report/dispute/resolve sequences.
//!
//! - **Reports** ([`report`]): Per-cover report cycles with the
//!   Active → Disputed → Resolved status machine and the one-open-cycle
//!   rule.
//!
//! - **Disputes** ([`dispute`]): Counter-claims, one per cycle, keyed
//!   by cover and incident date.
//!
//! - **Stakes** ([`stake`]): Custody ledger. Locks pull value in before
//!   any cycle state is written; settlement pays every leg before any
//!   entry is released.
//!
//! - **Resolution** ([`resolution`]): Outcome decision, settlement
//!   orchestration, and the immutable per-cycle record.
//!
//! - **Collaborator traits** ([`traits`]) and test doubles ([`mock`]):
//!   the seams a host wires to its token, cover registry, access
//!   control, pause switch, arbitration, and clock.

pub mod config;
pub mod dispute;
pub mod engine;
pub mod error;
pub mod guard;
pub mod mock;
pub mod report;
pub mod resolution;
pub mod stake;
pub mod traits;

// Re-export primary types.
pub use config::{GovernanceConfig, DEFAULT_COOLDOWN_SECS};
pub use dispute::{Dispute, DisputeRegistry};
pub use engine::{Collaborators, GovernanceEngine};
pub use error::{ErrorCategory, GovernanceError};
pub use guard::ProtocolGuard;
pub use report::{IncidentReport, ReportRegistry, ReportStatus};
pub use resolution::{Outcome, ResolutionCoordinator, ResolutionRecord, ResolveContext};
pub use stake::{StakeEntry, StakeLedger, StakeRole};
pub use traits::{
    AccessControl, Arbitration, Clock, CoverRegistry, PauseSwitch, TokenTransfer, TransferError,
};
