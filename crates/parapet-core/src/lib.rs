//! # parapet-core — Foundational Types for the Parapet Cover Protocol
//!
//! This crate is the vocabulary of the Parapet governance engine. It
//! defines the primitive types every other crate in the workspace
//! speaks — cover keys, actor identities, stake amounts, timestamps,
//! incident dates, and evidence references — and it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `CoverKey`, `ActorId`,
//!    `StakeAmount`, `ProofRef` — no bare strings or integers where a
//!    domain value is meant. Mixing up a reporter and a cover does not
//!    compile.
//!
//! 2. **Validation at construction.** A `CoverKey` that exists is a
//!    well-formed key; an `IncidentDate` that exists is day-aligned.
//!    Downstream code never re-validates.
//!
//! 3. **UTC-only, seconds-precision time.** `Timestamp` rejects non-UTC
//!    input at parse and truncates sub-seconds, so cycle keys derived
//!    from timestamps are deterministic.
//!
//! 4. **Day-bucketed incident dates.** `IncidentDate` can only hold the
//!    start of a UTC day; the bucketing rule lives here, next to the
//!    type that enforces it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `parapet-*` crates (this is the leaf of
//!   the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod actor;
pub mod amount;
pub mod error;
pub mod key;
pub mod proof;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use actor::{ActorId, Role};
pub use amount::StakeAmount;
pub use error::CoreError;
pub use key::{CoverKey, COVER_KEY_LEN};
pub use proof::{ProofRef, PROOF_REF_LEN};
pub use temporal::{IncidentDate, Timestamp, SECS_PER_DAY};
