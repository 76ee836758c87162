//! Aave lending-pool deposit step.

use crate::chain::LendingPoolApi;
use crate::errors::Result;
use crate::models::{TokenDescriptor, TxReceipt};
use crate::utils::Explorer;
use ethers::types::{Address, U256};
use tracing::info;

/// Supply `amount` (smallest units) of `asset`, credited to `on_behalf_of`.
///
/// No balance or allowance check happens here; a shortfall surfaces as a
/// revert.
pub async fn deposit<C: LendingPoolApi>(
    client: &C,
    lending_pool: Address,
    asset: &TokenDescriptor,
    amount: U256,
    on_behalf_of: Address,
    referral_code: u16,
    explorer: &Explorer,
) -> Result<TxReceipt> {
    let receipt = client
        .deposit(lending_pool, asset.address, amount, on_behalf_of, referral_code)
        .await?;
    info!(
        tx = ?receipt.tx_hash,
        token = %asset.symbol,
        %amount,
        "[DEPOSIT] Deposit Executed: {}",
        explorer.tx_url(receipt.tx_hash)
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::{Call, MockChain};
    use crate::errors::AppError;

    fn link() -> TokenDescriptor {
        TokenDescriptor::new("LINK", Address::from_low_u64_be(0xb), 18)
    }

    #[tokio::test]
    async fn deposits_on_behalf_of_wallet() {
        let wallet = Address::from_low_u64_be(1);
        let chain = MockChain::new(wallet);
        let lending_pool = Address::from_low_u64_be(0xaa);
        let explorer = Explorer::new("https://sepolia.etherscan.io").unwrap();
        let amount = U256::exp10(18);

        deposit(&chain, lending_pool, &link(), amount, wallet, 0, &explorer)
            .await
            .unwrap();

        assert_eq!(
            chain.calls(),
            vec![Call::Deposit {
                lending_pool,
                asset: link().address,
                amount,
                on_behalf_of: wallet,
                referral_code: 0,
            }]
        );
    }

    #[tokio::test]
    async fn revert_propagates() {
        let chain = MockChain::new(Address::from_low_u64_be(1)).failing_at("deposit", 1);
        let explorer = Explorer::new("https://sepolia.etherscan.io").unwrap();

        let err = deposit(
            &chain,
            Address::from_low_u64_be(0xaa),
            &link(),
            U256::one(),
            Address::from_low_u64_be(1),
            0,
            &explorer,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::ChainRejection { step: "deposit", .. }));
    }
}
