//! Swap-and-supply orchestration.
//!
//! One run walks a fixed sequence of stages. Each stage blocks until its
//! transaction is mined before the next one starts; the first error moves the
//! pipeline to [`Stage::Failed`] and nothing further is submitted. Confirmed
//! approvals or swaps are left in place.

use crate::chain::ChainClient;
use crate::config::Deployment;
use crate::dex::{self, PoolInfo, SwapParameters};
use crate::errors::{AppError, Result};
use crate::lending;
use crate::models::TxReceipt;
use crate::token;
use crate::utils::Explorer;
use bigdecimal::BigDecimal;
use ethers::types::U256;
use std::fmt;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    /// Router allowance over the input token.
    ApprovingInput,
    ResolvingPool,
    Swapping,
    /// Lending-pool allowance over the output token.
    ApprovingOutput,
    Depositing,
    Complete,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ApprovingInput => "approving-input",
            Stage::ResolvingPool => "resolving-pool",
            Stage::Swapping => "swapping",
            Stage::ApprovingOutput => "approving-output",
            Stage::Depositing => "depositing",
            Stage::Complete => "complete",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Receipts and derived values of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub amount_in: U256,
    pub deposit_amount: U256,
    pub pool: PoolInfo,
    pub input_approval: TxReceipt,
    pub swap: TxReceipt,
    pub output_approval: TxReceipt,
    pub deposit: TxReceipt,
}

pub struct Pipeline<C> {
    client: C,
    deployment: Deployment,
    explorer: Explorer,
    stage: Stage,
    trail: Vec<Stage>,
    failed_at: Option<Stage>,
}

impl<C: ChainClient> Pipeline<C> {
    pub fn new(client: C, deployment: Deployment, explorer: Explorer) -> Self {
        Self {
            client,
            deployment,
            explorer,
            stage: Stage::Idle,
            trail: vec![Stage::Idle],
            failed_at: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage entered so far, starting with `Idle`.
    pub fn trail(&self) -> &[Stage] {
        &self.trail
    }

    /// The stage that was active when the run failed.
    pub fn failed_at(&self) -> Option<Stage> {
        self.failed_at
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run the whole sequence for `amount` display units of the input token.
    ///
    /// A pipeline runs once; later calls are rejected by the state check.
    pub async fn run(&mut self, amount: &BigDecimal) -> Result<PipelineReport> {
        if self.stage != Stage::Idle {
            return Err(AppError::AlreadyRan(self.stage.to_string()));
        }

        match self.execute(amount).await {
            Ok(report) => {
                self.enter(Stage::Complete);
                info!(
                    swap = ?report.swap.tx_hash,
                    deposit = ?report.deposit.tx_hash,
                    "[PIPELINE] complete"
                );
                Ok(report)
            }
            Err(err) => {
                self.failed_at = Some(self.stage);
                self.enter(Stage::Failed);
                Err(err)
            }
        }
    }

    async fn execute(&mut self, amount: &BigDecimal) -> Result<PipelineReport> {
        let deployment = self.deployment.clone();
        let wallet = self.client.address();
        let input = &deployment.input_token;
        let output = &deployment.output_token;

        let amount_in = input.to_smallest_unit(amount)?;
        let deposit_amount = output.to_smallest_unit(amount)?;
        info!(
            %amount,
            %amount_in,
            %deposit_amount,
            wallet = ?wallet,
            "[PIPELINE] starting {} -> {} -> lending pool",
            input.symbol,
            output.symbol
        );

        self.enter(Stage::ApprovingInput);
        let input_approval = token::approve(&self.client, input, deployment.router, amount).await?;

        self.enter(Stage::ResolvingPool);
        let pool = dex::resolve_pool(
            &self.client,
            deployment.factory,
            input,
            output,
            deployment.fee_tier,
        )
        .await?;

        self.enter(Stage::Swapping);
        let params = SwapParameters::exact_input_single(
            input,
            output,
            &pool,
            wallet,
            amount_in,
            dex::deadline_from_now(deployment.swap_deadline()),
        );
        let swap = dex::swap(&self.client, deployment.router, &params, &self.explorer).await?;

        self.enter(Stage::ApprovingOutput);
        let output_approval =
            token::approve(&self.client, output, deployment.lending_pool, amount).await?;

        self.enter(Stage::Depositing);
        let deposit = lending::deposit(
            &self.client,
            deployment.lending_pool,
            output,
            deposit_amount,
            wallet,
            deployment.referral_code,
            &self.explorer,
        )
        .await?;

        Ok(PipelineReport {
            amount_in,
            deposit_amount,
            pool,
            input_approval,
            swap,
            output_approval,
            deposit,
        })
    }

    fn enter(&mut self, next: Stage) {
        debug!(from = %self.stage, to = %next, "[PIPELINE] transition");
        self.stage = next;
        self.trail.push(next);
    }
}
