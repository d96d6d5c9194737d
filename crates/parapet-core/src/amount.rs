//! # Stake Amounts
//!
//! Integer token quantities, denominated in the token's smallest unit.
//! A newtype keeps stake arithmetic out of bare `u128` land and forces
//! overflow handling through checked operations.
//!
//! Positivity is an *operation* precondition, not a type invariant: the
//! engine rejects zero and below-minimum stakes with its own economic
//! error, so the constructor here stays total.

use serde::{Deserialize, Serialize};

/// A quantity of stake tokens, in the token's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StakeAmount(u128);

impl StakeAmount {
    /// The zero amount.
    pub const ZERO: StakeAmount = StakeAmount(0);

    /// Wrap a raw token quantity.
    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// The raw token quantity.
    pub const fn raw(&self) -> u128 {
        self.0
    }

    /// Whether this amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(self, other: StakeAmount) -> Option<StakeAmount> {
        self.0.checked_add(other.0).map(StakeAmount)
    }
}

impl std::fmt::Display for StakeAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
