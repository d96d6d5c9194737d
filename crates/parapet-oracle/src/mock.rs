//! In-memory pair double for driving the oracle in tests.

use parking_lot::Mutex;

use crate::pair::{LiquidityPair, PairSnapshot, TokenId};

/// Liquidity pair double: reserves and timestamp set by hand.
#[derive(Debug)]
pub struct MockPair {
    token0: TokenId,
    token1: TokenId,
    state: Mutex<PairSnapshot>,
}

impl MockPair {
    /// A pair with empty reserves at timestamp zero.
    pub fn new(token0: TokenId, token1: TokenId) -> Self {
        Self {
            token0,
            token1,
            state: Mutex::new(PairSnapshot {
                reserve0: 0,
                reserve1: 0,
                block_timestamp_last: 0,
            }),
        }
    }

    /// Overwrite both reserves as of pair time `at`.
    pub fn set_reserves(&self, reserve0: u128, reserve1: u128, at: u32) {
        *self.state.lock() = PairSnapshot {
            reserve0,
            reserve1,
            block_timestamp_last: at,
        };
    }
}

impl LiquidityPair for MockPair {
    fn token0(&self) -> TokenId {
        self.token0
    }

    fn token1(&self) -> TokenId {
        self.token1
    }

    fn snapshot(&self) -> PairSnapshot {
        *self.state.lock()
    }
}
