//! # Error Types — Core Validation Failures
//!
//! Errors raised when constructing the protocol's vocabulary types. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Construction is the only place a malformed value can enter the
//!   system; once a value exists, it is valid.
//! - Every variant carries a `reason` naming the exact rule violated,
//!   because callers surface these strings to operators verbatim.

use thiserror::Error;

/// Validation failure while constructing a core protocol type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Cover key slug rejected at construction.
    #[error("Invalid cover key: {reason}")]
    InvalidCoverKey {
        /// Rule the slug violated.
        reason: String,
    },

    /// Evidence reference rejected at construction.
    #[error("Invalid proof reference: {reason}")]
    InvalidProofRef {
        /// Rule the reference violated.
        reason: String,
    },

    /// Timestamp rejected at construction or parse.
    #[error("Invalid timestamp: {reason}")]
    InvalidTimestamp {
        /// Rule the timestamp violated.
        reason: String,
    },

    /// Incident date not aligned to a UTC day boundary.
    #[error("Invalid incident date: {reason}")]
    MalformedIncidentDate {
        /// Rule the date violated.
        reason: String,
    },
}
