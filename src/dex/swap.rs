use crate::chain::RouterApi;
use crate::dex::PoolInfo;
use crate::errors::Result;
use crate::models::{TokenDescriptor, TxReceipt};
use crate::utils::Explorer;
use ethers::types::{Address, U256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

/// Arguments of `SwapRouter.exactInputSingle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapParameters {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    /// Unix timestamp after which the router reverts the swap.
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U256,
}

impl SwapParameters {
    /// Exact-input single-hop swap through `pool`.
    ///
    /// The minimum output and the price limit are both zero: any amount out is
    /// accepted and the swap may move the price without bound.
    pub fn exact_input_single(
        token_in: &TokenDescriptor,
        token_out: &TokenDescriptor,
        pool: &PoolInfo,
        recipient: Address,
        amount_in: U256,
        deadline: U256,
    ) -> Self {
        Self {
            token_in: token_in.address,
            token_out: token_out.address,
            fee: pool.fee,
            recipient,
            deadline,
            amount_in,
            amount_out_minimum: U256::zero(),
            sqrt_price_limit_x96: U256::zero(),
        }
    }
}

/// Unix timestamp `window` from now.
pub fn deadline_from_now(window: Duration) -> U256 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    U256::from((now + window).as_secs())
}

/// Submit the swap and wait for it to be mined.
pub async fn swap<C: RouterApi>(
    client: &C,
    router: Address,
    params: &SwapParameters,
    explorer: &Explorer,
) -> Result<TxReceipt> {
    let receipt = client.exact_input_single(router, params).await?;
    info!(
        tx = ?receipt.tx_hash,
        amount_in = %params.amount_in,
        "[SWAP] Swap Executed: {}",
        explorer.tx_url(receipt.tx_hash)
    );
    Ok(receipt)
}
