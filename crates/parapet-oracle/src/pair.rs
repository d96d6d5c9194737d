//! # Liquidity Pairs — Tokens, Snapshots, and the Observation Seam
//!
//! The oracle observes a two-token liquidity pair through the
//! [`LiquidityPair`] trait: an instantaneous view of both reserves plus
//! the pair's own last-change timestamp. How the pair tracks its
//! reserves — AMM contract, order book shim, test double — is the
//! host's business.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Token identity ──────────────────────────────────────────────────────────

/// Opaque identifier of one token in a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(Uuid);

impl TokenId {
    /// A fresh random token identity.
    pub fn new() -> Self {
        TokenId(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        TokenId(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token:{}", self.0)
    }
}

// ── Reserve snapshots ───────────────────────────────────────────────────────

/// One instantaneous view of a pair.
///
/// `block_timestamp_last` is the pair's clock, seconds in a fixed
/// `u32` that wraps around; consumers must difference timestamps with
/// wrapping arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairSnapshot {
    /// Reserve of the pair's first token.
    pub reserve0: u128,
    /// Reserve of the pair's second token.
    pub reserve1: u128,
    /// When the reserves last changed, on the pair's wrapping clock.
    pub block_timestamp_last: u32,
}

/// The observation seam between the oracle and a reserve-holding pair.
pub trait LiquidityPair: Send + Sync {
    /// Identity of the pair's first token.
    fn token0(&self) -> TokenId;

    /// Identity of the pair's second token.
    fn token1(&self) -> TokenId;

    /// Current reserves and last-change timestamp.
    fn snapshot(&self) -> PairSnapshot;
}
