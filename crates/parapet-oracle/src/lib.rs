//! # parapet-oracle — Time-Weighted Average Reserves
//!
//! A small observation oracle over two-token liquidity pairs, used by
//! hosts of the Parapet protocol to value stake tokens. It is a sibling
//! of the governance engine, not a dependency: governance never prices
//! stakes itself.
//!
//! - **Pairs** ([`pair`]): token identities, reserve snapshots, and the
//!   [`pair::LiquidityPair`] seam the oracle observes through.
//!
//! - **Averaging** ([`twap`]): the [`twap::ReservesOracle`] — wrapping
//!   cumulative counters, windowed average recomputation, and
//!   [`twap::ReservesOracle::consult`] for converting amounts at the
//!   averaged rate.
//!
//! - **Doubles** ([`mock`]): a hand-driven pair for tests.

pub mod mock;
pub mod pair;
pub mod twap;

// Re-export primary types.
pub use mock::MockPair;
pub use pair::{LiquidityPair, PairSnapshot, TokenId};
pub use twap::{OracleError, ReservesOracle};
