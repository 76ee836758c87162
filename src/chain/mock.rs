//! Recording chain client for tests.

use crate::chain::{Erc20Api, FactoryApi, LendingPoolApi, PoolApi, RouterApi, WalletApi};
use crate::dex::SwapParameters;
use crate::errors::{AppError, Result};
use crate::models::TxReceipt;
use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    GetPool {
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    },
    Token0(Address),
    Token1(Address),
    Fee(Address),
    Swap {
        router: Address,
        params: SwapParameters,
    },
    Deposit {
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    },
}

impl Call {
    fn op(&self) -> &'static str {
        match self {
            Call::Approve { .. } => "approve",
            Call::GetPool { .. } => "get_pool",
            Call::Token0(_) | Call::Token1(_) | Call::Fee(_) => "pool_read",
            Call::Swap { .. } => "swap",
            Call::Deposit { .. } => "deposit",
        }
    }
}

pub struct MockChain {
    wallet: Address,
    pool: Address,
    token0: Address,
    token1: Address,
    fee: u32,
    fail_at: Option<(&'static str, usize)>,
    calls: Mutex<Vec<Call>>,
}

impl MockChain {
    pub fn new(wallet: Address) -> Self {
        Self {
            wallet,
            pool: Address::zero(),
            token0: Address::zero(),
            token1: Address::zero(),
            fee: 0,
            fail_at: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Pool the factory reports, and what the pool returns for its views.
    pub fn with_pool(mut self, pool: Address, token0: Address, token1: Address, fee: u32) -> Self {
        self.pool = pool;
        self.token0 = token0;
        self.token1 = token1;
        self.fee = fee;
        self
    }

    /// Reject the `occurrence`-th (1-based) call of kind `op`.
    pub fn failing_at(mut self, op: &'static str, occurrence: usize) -> Self {
        self.fail_at = Some((op, occurrence));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Call kinds in order, with the three pool reads collapsed into one entry.
    pub fn ops(&self) -> Vec<&'static str> {
        let mut ops: Vec<&'static str> = Vec::new();
        for call in self.calls() {
            let op = call.op();
            if op == "pool_read" && ops.last() == Some(&"pool_read") {
                continue;
            }
            ops.push(op);
        }
        ops
    }

    fn record(&self, call: Call) -> Result<usize> {
        let mut calls = self.calls.lock().unwrap();
        let op = call.op();
        calls.push(call);
        let count = calls.iter().filter(|c| c.op() == op).count();
        match self.fail_at {
            Some((fail_op, n)) if fail_op == op && n == count => {
                Err(AppError::rejected(op, "execution reverted"))
            }
            _ => Ok(calls.len()),
        }
    }

    fn receipt(seq: usize) -> TxReceipt {
        TxReceipt {
            tx_hash: H256::from_low_u64_be(seq as u64),
            block_number: Some(seq as u64),
        }
    }
}

impl WalletApi for MockChain {
    fn address(&self) -> Address {
        self.wallet
    }
}

#[async_trait]
impl Erc20Api for MockChain {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt> {
        let seq = self.record(Call::Approve {
            token,
            spender,
            amount,
        })?;
        Ok(Self::receipt(seq))
    }
}

#[async_trait]
impl FactoryApi for MockChain {
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address> {
        self.record(Call::GetPool {
            factory,
            token_a,
            token_b,
            fee,
        })?;
        Ok(self.pool)
    }
}

#[async_trait]
impl PoolApi for MockChain {
    async fn token0(&self, pool: Address) -> Result<Address> {
        self.record(Call::Token0(pool))?;
        Ok(self.token0)
    }

    async fn token1(&self, pool: Address) -> Result<Address> {
        self.record(Call::Token1(pool))?;
        Ok(self.token1)
    }

    async fn fee(&self, pool: Address) -> Result<u32> {
        self.record(Call::Fee(pool))?;
        Ok(self.fee)
    }
}

#[async_trait]
impl RouterApi for MockChain {
    async fn exact_input_single(
        &self,
        router: Address,
        params: &SwapParameters,
    ) -> Result<TxReceipt> {
        let seq = self.record(Call::Swap {
            router,
            params: params.clone(),
        })?;
        Ok(Self::receipt(seq))
    }
}

#[async_trait]
impl LendingPoolApi for MockChain {
    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> Result<TxReceipt> {
        let seq = self.record(Call::Deposit {
            lending_pool,
            asset,
            amount,
            on_behalf_of,
            referral_code,
        })?;
        Ok(Self::receipt(seq))
    }
}
