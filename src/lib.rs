//! Core library for the swap-supply pipeline.
//!
//! Approves a stablecoin, swaps it through a Uniswap V3 router, then approves
//! and deposits the proceeds into an Aave lending pool, waiting for each
//! transaction to be mined before starting the next.

pub mod chain;
pub mod config;
pub mod dex;
pub mod errors;
pub mod lending;
pub mod models;
pub mod pipeline;
pub mod token;
pub mod units;
pub mod utils;
