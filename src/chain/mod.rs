//! Chain access for the pipeline.
//!
//! Each external contract is reached through a narrow trait exposing only the
//! calls the pipeline makes. Write calls resolve once the transaction is
//! mined, so callers can treat a returned [`TxReceipt`] as confirmation.

use crate::dex::SwapParameters;
use crate::errors::Result;
use crate::models::TxReceipt;
use async_trait::async_trait;
use ethers::types::{Address, U256};

pub mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::EthersChain;

/// ERC-20 allowance management.
#[async_trait]
pub trait Erc20Api: Send + Sync {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt>;
}

/// Uniswap V3 factory lookups.
#[async_trait]
pub trait FactoryApi: Send + Sync {
    /// Returns the zero address when no pool exists for the pair and tier.
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address>;
}

/// Read-only views of a Uniswap V3 pool.
#[async_trait]
pub trait PoolApi: Send + Sync {
    async fn token0(&self, pool: Address) -> Result<Address>;
    async fn token1(&self, pool: Address) -> Result<Address>;
    async fn fee(&self, pool: Address) -> Result<u32>;
}

#[async_trait]
pub trait RouterApi: Send + Sync {
    async fn exact_input_single(&self, router: Address, params: &SwapParameters)
    -> Result<TxReceipt>;
}

#[async_trait]
pub trait LendingPoolApi: Send + Sync {
    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> Result<TxReceipt>;
}

/// The signing identity every transaction is sent from.
pub trait WalletApi {
    fn address(&self) -> Address;
}

/// Everything the orchestrator needs from the chain.
pub trait ChainClient:
    Erc20Api + FactoryApi + PoolApi + RouterApi + LendingPoolApi + WalletApi
{
}

impl<T> ChainClient for T where
    T: Erc20Api + FactoryApi + PoolApi + RouterApi + LendingPoolApi + WalletApi
{
}
