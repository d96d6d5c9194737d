//! # Governance Configuration
//!
//! Tunable policy for one engine instance: how long the cooldown runs,
//! the smallest stake accepted, and where forfeited stakes go. Carried
//! by value inside the engine; serde-friendly so hosts load it from
//! their own configuration files.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use parapet_core::{ActorId, StakeAmount};

/// Default cooldown: one UTC day.
pub const DEFAULT_COOLDOWN_SECS: u64 = 86_400;

/// Policy knobs for the governance engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Seconds that must elapse after the last report/dispute activity
    /// before resolution is permitted.
    pub cooldown_secs: u64,
    /// Smallest stake accepted from a reporter or disputer. Zero is
    /// rejected regardless of this value.
    pub min_reporting_stake: StakeAmount,
    /// Account receiving forfeited stakes.
    pub forfeit_sink: ActorId,
}

impl GovernanceConfig {
    /// Build an explicit configuration.
    pub fn new(cooldown_secs: u64, min_reporting_stake: StakeAmount, forfeit_sink: ActorId) -> Self {
        Self {
            cooldown_secs,
            min_reporting_stake,
            forfeit_sink,
        }
    }

    /// The cooldown as a signed duration for timestamp math, clamped to
    /// the representable range instead of panicking on absurd values.
    pub fn cooldown(&self) -> Duration {
        i64::try_from(self.cooldown_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }
}

impl Default for GovernanceConfig {
    /// One-day cooldown, one-unit minimum stake, nil forfeiture sink.
    /// Composition roots must point `forfeit_sink` at a real treasury
    /// before forfeited value matters.
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            min_reporting_stake: StakeAmount::new(1),
            forfeit_sink: ActorId::nil(),
        }
    }
}
