use crate::chain::{FactoryApi, PoolApi};
use crate::errors::{AppError, Result};
use crate::models::TokenDescriptor;
use ethers::types::Address;
use tracing::info;

/// Immutable snapshot of a pool's identity, read once per swap.
///
/// `token0`/`token1` follow the pool's own ordering, which need not match the
/// caller's input/output tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolInfo {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    /// Fee tier in hundredths of a bip (3000 = 0.3%).
    pub fee: u32,
}

impl PoolInfo {
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }
}

/// Look up the pool for `token_a`/`token_b` at `fee_tier` and read its identity.
pub async fn resolve_pool<C>(
    client: &C,
    factory: Address,
    token_a: &TokenDescriptor,
    token_b: &TokenDescriptor,
    fee_tier: u32,
) -> Result<PoolInfo>
where
    C: FactoryApi + PoolApi,
{
    let address = client
        .get_pool(factory, token_a.address, token_b.address, fee_tier)
        .await?;
    if address == Address::zero() {
        return Err(AppError::PoolNotFound {
            token_a: token_a.address,
            token_b: token_b.address,
            fee: fee_tier,
        });
    }

    let (token0, token1, fee) = futures::try_join!(
        client.token0(address),
        client.token1(address),
        client.fee(address)
    )?;

    let pool = PoolInfo {
        address,
        token0,
        token1,
        fee,
    };
    if !(pool.contains(token_a.address) && pool.contains(token_b.address)) {
        return Err(AppError::PoolMismatch {
            pool: address,
            token0,
            token1,
            token_a: token_a.address,
            token_b: token_b.address,
        });
    }

    info!(
        pool = ?pool.address,
        pair = %format!("{}/{}", token_a.symbol, token_b.symbol),
        fee = pool.fee,
        "[POOL] resolved"
    );
    Ok(pool)
}
