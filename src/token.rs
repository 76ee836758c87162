//! ERC-20 allowance step.

use crate::chain::Erc20Api;
use crate::errors::Result;
use crate::models::{TokenDescriptor, TxReceipt};
use bigdecimal::BigDecimal;
use ethers::types::Address;
use tracing::{debug, info};

/// Let `spender` move up to `amount` (display units) of `token` from the
/// client's wallet. Returns once the approval is mined.
///
/// Replaces any existing allowance for the same spender.
pub async fn approve<C: Erc20Api>(
    client: &C,
    token: &TokenDescriptor,
    spender: Address,
    amount: &BigDecimal,
) -> Result<TxReceipt> {
    let value = token.to_smallest_unit(amount)?;
    let receipt = client.approve(token.address, spender, value).await?;
    info!(token = %token.symbol, ?spender, %amount, "[APPROVE] allowance confirmed");
    debug!(tx = ?receipt.tx_hash, block = ?receipt.block_number, "[APPROVE] receipt");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::{Call, MockChain};
    use crate::errors::AppError;
    use ethers::types::U256;
    use std::str::FromStr;

    #[tokio::test]
    async fn approves_amount_in_smallest_units() {
        let chain = MockChain::new(Address::from_low_u64_be(1));
        let usdc = TokenDescriptor::new("USDC", Address::from_low_u64_be(0xa), 6);
        let spender = Address::from_low_u64_be(0xe0);

        approve(&chain, &usdc, spender, &BigDecimal::from_str("2.5").unwrap())
            .await
            .unwrap();

        assert_eq!(
            chain.calls(),
            vec![Call::Approve {
                token: usdc.address,
                spender,
                amount: U256::from(2_500_000u64),
            }]
        );
    }

    #[tokio::test]
    async fn invalid_amount_never_reaches_the_chain() {
        let chain = MockChain::new(Address::from_low_u64_be(1));
        let usdc = TokenDescriptor::new("USDC", Address::from_low_u64_be(0xa), 6);

        let err = approve(
            &chain,
            &usdc,
            Address::from_low_u64_be(0xe0),
            &BigDecimal::from_str("0.0000001").unwrap(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Amount(_)));
        assert!(chain.calls().is_empty());
    }

    #[tokio::test]
    async fn rejection_is_fatal() {
        let chain = MockChain::new(Address::from_low_u64_be(1)).failing_at("approve", 1);
        let link = TokenDescriptor::new("LINK", Address::from_low_u64_be(0xb), 18);

        let err = approve(&chain, &link, Address::from_low_u64_be(0xe1), &BigDecimal::from(1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ChainRejection { step: "approve", .. }));
        assert_eq!(chain.calls().len(), 1);
    }
}
