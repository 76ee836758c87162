//! Miscellaneous helper utilities.

use crate::errors::Result;
use ethers::types::H256;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Builds block-explorer links for transaction hashes.
#[derive(Debug, Clone)]
pub struct Explorer {
    base: Url,
}

impl Explorer {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self::from_url(Url::parse(base)?))
    }

    pub fn from_url(base: Url) -> Self {
        Self { base }
    }

    pub fn tx_url(&self, tx_hash: H256) -> String {
        format!("{}/tx/{:?}", self.base.as_str().trim_end_matches('/'), tx_hash)
    }
}
