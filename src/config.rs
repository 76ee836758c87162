//! Configuration loader and application settings.

use crate::errors::{AppError, Result};
use crate::models::TokenDescriptor;
use ethers::types::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const SEPOLIA_DEPLOYMENT: &str = include_str!("../deployments/sepolia.json");

const DEFAULT_EXPLORER_URL: &str = "https://sepolia.etherscan.io";

/// Contract addresses and tokens the pipeline runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Stablecoin sold in the swap.
    pub input_token: TokenDescriptor,
    /// Token bought in the swap and supplied to the lending pool.
    pub output_token: TokenDescriptor,
    pub router: Address,
    pub factory: Address,
    pub lending_pool: Address,
    #[serde(default = "default_fee_tier")]
    pub fee_tier: u32,
    #[serde(default)]
    pub referral_code: u16,
    #[serde(default = "default_swap_deadline_secs")]
    pub swap_deadline_secs: u64,
}

fn default_fee_tier() -> u32 {
    3000
}

fn default_swap_deadline_secs() -> u64 {
    300
}

impl Deployment {
    /// The Sepolia deployment bundled with the binary.
    pub fn sepolia() -> Result<Self> {
        Self::from_json(SEPOLIA_DEPLOYMENT)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn swap_deadline(&self) -> Duration {
        Duration::from_secs(self.swap_deadline_secs)
    }
}

/// Consolidated application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// RPC endpoint for the Ethereum-compatible node.
    pub rpc_url: Url,
    private_key: String,
    /// Block explorer used for transaction links.
    pub explorer_url: Url,
    /// Block confirmations to wait for after each transaction.
    pub confirmations: usize,
    pub deployment: Deployment,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("rpc_url", &self.rpc_url.as_str())
            .field("private_key", &"<redacted>")
            .field("explorer_url", &self.explorer_url.as_str())
            .field("confirmations", &self.confirmations)
            .field("deployment", &self.deployment)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_url = required(&lookup, "RPC_URL", "your Ethereum node HTTP endpoint")?;
        let rpc_url = Url::parse(&rpc_url)
            .map_err(|e| AppError::Config(format!("RPC_URL is not a valid URL: {e}")))?;
        let private_key = required(&lookup, "PRIVATE_KEY", "the signing key of the wallet")?;

        let explorer_url = lookup("EXPLORER_URL").unwrap_or_else(|| DEFAULT_EXPLORER_URL.into());
        let explorer_url = Url::parse(&explorer_url)
            .map_err(|e| AppError::Config(format!("EXPLORER_URL is not a valid URL: {e}")))?;
        let confirmations = parse_or(&lookup, "CONFIRMATIONS", 1usize)?;

        let deployment = match lookup("DEPLOYMENT_FILE") {
            Some(path) => Deployment::from_file(&path)
                .map_err(|e| AppError::Config(format!("DEPLOYMENT_FILE {path}: {e}")))?,
            None => Deployment::sepolia()?,
        };

        Ok(Self {
            rpc_url,
            private_key,
            explorer_url,
            confirmations,
            deployment,
        })
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    what: &str,
) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Set {key} env var to {what}")))
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T>
where
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be valid: {e}"))),
        None => Ok(default),
    }
}
