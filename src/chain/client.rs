use crate::chain::{Erc20Api, FactoryApi, LendingPoolApi, PoolApi, RouterApi, WalletApi};
use crate::dex::SwapParameters;
use crate::errors::{AppError, Result};
use crate::models::TxReceipt;
use async_trait::async_trait;
use ethers::{
    abi::Detokenize,
    contract::{ContractCall, abigen},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TransactionReceipt, U64, U256},
};
use std::sync::Arc;
use tracing::debug;

abigen!(
    Erc20Token,
    r"[
        function approve(address spender, uint256 amount) external returns (bool)
    ]",
);

abigen!(
    UniswapV3Factory,
    r"[
        function getPool(address tokenA, address tokenB, uint24 fee) external view returns (address pool)
    ]",
);

abigen!(
    UniswapV3Pool,
    r"[
        function token0() external view returns (address)
        function token1() external view returns (address)
        function fee() external view returns (uint24)
    ]",
);

abigen!(
    SwapRouter,
    r"[
        struct ExactInputSingleParams { address tokenIn; address tokenOut; uint24 fee; address recipient; uint256 deadline; uint256 amountIn; uint256 amountOutMinimum; uint160 sqrtPriceLimitX96; }
        function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut)
    ]",
);

abigen!(
    AaveLendingPool,
    r"[
        function deposit(address asset, uint256 amount, address onBehalfOf, uint16 referralCode) external
    ]",
);

pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Signing client over a single HTTP RPC endpoint.
#[derive(Clone)]
pub struct EthersChain {
    client: Arc<SignerClient>,
    confirmations: usize,
}

impl EthersChain {
    /// Connects to `rpc_url` and binds the wallet to the node's chain id.
    pub async fn connect(rpc_url: &str, private_key: &str, confirmations: usize) -> Result<Self> {
        let provider = Provider::<Http>::try_from(rpc_url)?;
        let chain_id = provider.get_chainid().await?;
        let wallet: LocalWallet = private_key
            .parse()
            .map_err(|e| AppError::Config(format!("invalid PRIVATE_KEY: {e}")))?;
        let wallet = wallet.with_chain_id(chain_id.as_u64());
        debug!(chain_id = chain_id.as_u64(), wallet = ?wallet.address(), "[INIT] signer ready");

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            confirmations,
        })
    }

    /// Sends `call` and waits until it is mined with the configured depth.
    async fn confirm<D: Detokenize>(
        &self,
        step: &'static str,
        call: ContractCall<SignerClient, D>,
    ) -> Result<TxReceipt> {
        let pending = call
            .send()
            .await
            .map_err(|e| AppError::rejected(step, e))?;
        let tx_hash = *pending;
        debug!(step, ?tx_hash, "[TX] submitted, waiting for confirmation");

        let receipt = pending
            .confirmations(self.confirmations)
            .await?
            .ok_or_else(|| {
                AppError::rejected(step, format!("transaction {tx_hash:?} dropped from mempool"))
            })?;
        into_tx_receipt(step, receipt)
    }
}

fn into_tx_receipt(step: &'static str, receipt: TransactionReceipt) -> Result<TxReceipt> {
    if receipt.status == Some(U64::zero()) {
        return Err(AppError::rejected(
            step,
            format!("transaction {:?} reverted", receipt.transaction_hash),
        ));
    }
    Ok(TxReceipt {
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number.map(|n| n.as_u64()),
    })
}

impl WalletApi for EthersChain {
    fn address(&self) -> Address {
        self.client.address()
    }
}

#[async_trait]
impl Erc20Api for EthersChain {
    async fn approve(&self, token: Address, spender: Address, amount: U256) -> Result<TxReceipt> {
        let call = Erc20Token::new(token, self.client.clone()).approve(spender, amount);
        self.confirm("approve", call).await
    }
}

#[async_trait]
impl FactoryApi for EthersChain {
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address> {
        let factory = UniswapV3Factory::new(factory, self.client.clone());
        Ok(factory.get_pool(token_a, token_b, fee).call().await?)
    }
}

#[async_trait]
impl PoolApi for EthersChain {
    async fn token0(&self, pool: Address) -> Result<Address> {
        let pool = UniswapV3Pool::new(pool, self.client.clone());
        Ok(pool.token_0().call().await?)
    }

    async fn token1(&self, pool: Address) -> Result<Address> {
        let pool = UniswapV3Pool::new(pool, self.client.clone());
        Ok(pool.token_1().call().await?)
    }

    async fn fee(&self, pool: Address) -> Result<u32> {
        let pool = UniswapV3Pool::new(pool, self.client.clone());
        Ok(pool.fee().call().await?)
    }
}

#[async_trait]
impl RouterApi for EthersChain {
    async fn exact_input_single(
        &self,
        router: Address,
        params: &SwapParameters,
    ) -> Result<TxReceipt> {
        let params = ExactInputSingleParams {
            token_in: params.token_in,
            token_out: params.token_out,
            fee: params.fee,
            recipient: params.recipient,
            deadline: params.deadline,
            amount_in: params.amount_in,
            amount_out_minimum: params.amount_out_minimum,
            sqrt_price_limit_x96: params.sqrt_price_limit_x96,
        };
        let call = SwapRouter::new(router, self.client.clone()).exact_input_single(params);
        self.confirm("swap", call).await
    }
}

#[async_trait]
impl LendingPoolApi for EthersChain {
    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> Result<TxReceipt> {
        let call = AaveLendingPool::new(lending_pool, self.client.clone()).deposit(
            asset,
            amount,
            on_behalf_of,
            referral_code,
        );
        self.confirm("deposit", call).await
    }
}
