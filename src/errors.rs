use ethers::{
    contract::ContractError,
    providers::{Middleware, ProviderError},
    signers::WalletError,
    types::Address,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid amount: {0}")]
    Amount(String),

    #[error("Transaction rejected during {step}: {reason}")]
    ChainRejection { step: &'static str, reason: String },

    #[error("Pool not found for {token_a:?}/{token_b:?} at fee tier {fee}")]
    PoolNotFound {
        token_a: Address,
        token_b: Address,
        fee: u32,
    },

    #[error("Pool {pool:?} trades {token0:?}/{token1:?}, expected {token_a:?}/{token_b:?}")]
    PoolMismatch {
        pool: Address,
        token0: Address,
        token1: Address,
        token_a: Address,
        token_b: Address,
    },

    #[error("Pipeline already ran (stage {0})")]
    AlreadyRan(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl<M: Middleware> From<ContractError<M>> for AppError {
    fn from(err: ContractError<M>) -> Self {
        AppError::Contract(err.to_string())
    }
}

impl AppError {
    /// Shorthand used by the chain client when a transaction does not make it.
    pub fn rejected(step: &'static str, reason: impl ToString) -> Self {
        AppError::ChainRejection {
            step,
            reason: reason.to_string(),
        }
    }
}
