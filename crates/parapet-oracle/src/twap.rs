//! # ReservesOracle — Windowed Time-Weighted Average Reserves
//!
//! Observes one liquidity pair and maintains a rolling time-weighted
//! average of both reserves. Each [`update`](ReservesOracle::update)
//! credits the pair's current reserves for the interval since the
//! previous observation, accumulating `reserve × elapsed` products into
//! per-token cumulative counters; once a full averaging window has
//! elapsed, the averages are recomputed from the cumulative deltas and
//! the window restarts.
//!
//! All counter and timestamp arithmetic wraps by design. The pair's
//! clock is a fixed-width `u32` and the cumulative counters are `u128`;
//! both may roll over during a long-lived deployment, and the deltas
//! remain correct across a roll-over as long as a single window's true
//! accumulation fits the counter width.
//!
//! ```text
//!   update()        update()        update()
//!      │               │               │
//!      ▼               ▼               ▼
//!  ────┬───────────────┬───────────────┬────────▶ pair time
//!      │◀── elapsed ──▶│               │
//!      cum += reserve × elapsed        │
//!      │◀────────── window ──────────▶ │
//!                      averages recomputed, window restarts
//! ```

use std::sync::Arc;

use thiserror::Error;

use crate::pair::{LiquidityPair, TokenId};

// ── Errors ──────────────────────────────────────────────────────────────────

/// Why a consultation was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The token is neither side of the observed pair.
    #[error("Unknown token: {0}")]
    UnknownToken(TokenId),

    /// No averaging window has completed yet, or the averaged reserve
    /// on the input side is zero.
    #[error("No completed observation window")]
    NoObservation,

    /// The conversion product exceeds the amount width.
    #[error("Amount overflows the conversion")]
    AmountOverflow,
}

// ── Oracle ──────────────────────────────────────────────────────────────────

/// Windowed time-weighted average reserves over one pair.
pub struct ReservesOracle {
    pair: Arc<dyn LiquidityPair>,
    token0: TokenId,
    token1: TokenId,
    window: u32,
    reserve0_cumulative_last: u128,
    reserve1_cumulative_last: u128,
    block_timestamp_last: u32,
    // Cumulative counters and timestamp as of the last average
    // recomputation.
    window_cumulative0: u128,
    window_cumulative1: u128,
    window_timestamp: u32,
    reserve0_average: Option<u128>,
    reserve1_average: Option<u128>,
}

impl ReservesOracle {
    /// Start observing `pair` with the given averaging window, seconds
    /// on the pair's clock.
    ///
    /// The construction instant anchors the first window; averages stay
    /// empty until one full window has elapsed through [`update`]
    /// (ReservesOracle::update) calls.
    pub fn new(pair: Arc<dyn LiquidityPair>, window: u32) -> Self {
        let snapshot = pair.snapshot();
        let token0 = pair.token0();
        let token1 = pair.token1();
        Self {
            pair,
            token0,
            token1,
            window,
            reserve0_cumulative_last: 0,
            reserve1_cumulative_last: 0,
            block_timestamp_last: snapshot.block_timestamp_last,
            window_cumulative0: 0,
            window_cumulative1: 0,
            window_timestamp: snapshot.block_timestamp_last,
            reserve0_average: None,
            reserve1_average: None,
        }
    }

    /// Observe the pair once.
    ///
    /// Accumulates the snapshot's reserves over the interval since the
    /// previous observation, then recomputes both averages if a full
    /// window has elapsed since the last recomputation. Never panics:
    /// counter and timestamp overflow wrap.
    pub fn update(&mut self) {
        let snapshot = self.pair.snapshot();

        let elapsed = snapshot
            .block_timestamp_last
            .wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 {
            self.reserve0_cumulative_last = self
                .reserve0_cumulative_last
                .wrapping_add(snapshot.reserve0.wrapping_mul(u128::from(elapsed)));
            self.reserve1_cumulative_last = self
                .reserve1_cumulative_last
                .wrapping_add(snapshot.reserve1.wrapping_mul(u128::from(elapsed)));
            self.block_timestamp_last = snapshot.block_timestamp_last;
        }

        let window_elapsed = self.block_timestamp_last.wrapping_sub(self.window_timestamp);
        if window_elapsed >= self.window && window_elapsed > 0 {
            self.reserve0_average = Some(
                self.reserve0_cumulative_last
                    .wrapping_sub(self.window_cumulative0)
                    / u128::from(window_elapsed),
            );
            self.reserve1_average = Some(
                self.reserve1_cumulative_last
                    .wrapping_sub(self.window_cumulative1)
                    / u128::from(window_elapsed),
            );
            self.window_cumulative0 = self.reserve0_cumulative_last;
            self.window_cumulative1 = self.reserve1_cumulative_last;
            self.window_timestamp = self.block_timestamp_last;
        }
    }

    /// Price `amount_in` of `token` in the pair's other token, using
    /// the stored averages.
    pub fn consult(&self, token: TokenId, amount_in: u128) -> Result<u128, OracleError> {
        let (own, other) = if token == self.token0 {
            (self.reserve0_average, self.reserve1_average)
        } else if token == self.token1 {
            (self.reserve1_average, self.reserve0_average)
        } else {
            return Err(OracleError::UnknownToken(token));
        };
        let (own, other) = match (own, other) {
            (Some(own), Some(other)) => (own, other),
            _ => return Err(OracleError::NoObservation),
        };

        amount_in
            .checked_mul(other)
            .ok_or(OracleError::AmountOverflow)?
            .checked_div(own)
            .ok_or(OracleError::NoObservation)
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    /// The pair's first token.
    pub fn token0(&self) -> TokenId {
        self.token0
    }

    /// The pair's second token.
    pub fn token1(&self) -> TokenId {
        self.token1
    }

    /// The averaging window, seconds on the pair's clock.
    pub fn window(&self) -> u32 {
        self.window
    }

    /// Wrapping cumulative `reserve0 × elapsed` counter.
    pub fn reserve0_cumulative_last(&self) -> u128 {
        self.reserve0_cumulative_last
    }

    /// Wrapping cumulative `reserve1 × elapsed` counter.
    pub fn reserve1_cumulative_last(&self) -> u128 {
        self.reserve1_cumulative_last
    }

    /// Pair timestamp of the last observation.
    pub fn block_timestamp_last(&self) -> u32 {
        self.block_timestamp_last
    }

    /// Time-weighted average of `reserve0` over the last completed
    /// window, if one has completed.
    pub fn reserve0_average(&self) -> Option<u128> {
        self.reserve0_average
    }

    /// Time-weighted average of `reserve1` over the last completed
    /// window, if one has completed.
    pub fn reserve1_average(&self) -> Option<u128> {
        self.reserve1_average
    }
}

impl std::fmt::Debug for ReservesOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservesOracle")
            .field("token0", &self.token0)
            .field("token1", &self.token1)
            .field("window", &self.window)
            .field("reserve0_cumulative_last", &self.reserve0_cumulative_last)
            .field("reserve1_cumulative_last", &self.reserve1_cumulative_last)
            .field("block_timestamp_last", &self.block_timestamp_last)
            .field("reserve0_average", &self.reserve0_average)
            .field("reserve1_average", &self.reserve1_average)
            .finish_non_exhaustive()
    }
}
