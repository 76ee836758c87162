//! Uniswap V3 pool resolution and exact-input swaps.

pub mod pool;
pub mod swap;

pub use pool::{PoolInfo, resolve_pool};
pub use swap::{SwapParameters, deadline_from_now, swap};
