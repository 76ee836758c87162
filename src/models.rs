//! Shared data structures used throughout the application.

use crate::errors::Result;
use crate::units;
use bigdecimal::BigDecimal;
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

/// An ERC-20 token as configured for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub symbol: String,
    pub address: Address,
    /// Token decimals (e.g., USDC 6, LINK 18)
    pub decimals: u8,
}

impl TokenDescriptor {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            address,
            decimals,
        }
    }

    /// Express a display amount of this token in smallest units.
    pub fn to_smallest_unit(&self, amount: &BigDecimal) -> Result<U256> {
        units::to_smallest_unit(amount, self.decimals)
    }
}

/// Confirmation record of a mined transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: H256,
    pub block_number: Option<u64>,
}
