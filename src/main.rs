use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use swap_supply_pipeline::{
    chain::EthersChain, config::AppConfig, pipeline::Pipeline, units, utils, utils::Explorer,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    utils::init_logging();

    // Swap amount in display units of the input token (e.g. `1` = 1 USDC)
    let raw_amount = std::env::args().nth(1).unwrap_or_else(|| "1".into());
    let amount = BigDecimal::from_str(&raw_amount)
        .with_context(|| format!("swap amount {raw_amount:?} is not a number"))?;

    let config = AppConfig::from_env()?;
    let deployment = config.deployment.clone();
    tracing::info!(
        rpc = %config.rpc_url,
        input = %deployment.input_token.symbol,
        output = %deployment.output_token.symbol,
        fee_tier = deployment.fee_tier,
        confirmations = config.confirmations,
        "[INIT] swap-supply-pipeline starting"
    );

    let explorer = Explorer::from_url(config.explorer_url.clone());
    let client = EthersChain::connect(
        config.rpc_url.as_str(),
        config.private_key(),
        config.confirmations,
    )
    .await?;
    let mut pipeline = Pipeline::new(client, deployment.clone(), explorer);

    // Pipeline failures are reported and swallowed; confirmed steps stay on chain.
    match pipeline.run(&amount).await {
        Ok(report) => {
            tracing::info!(
                swapped = %units::from_smallest_unit(report.amount_in, deployment.input_token.decimals),
                deposited = %units::from_smallest_unit(report.deposit_amount, deployment.output_token.decimals),
                pool = ?report.pool.address,
                "[PIPELINE] done"
            );
        }
        Err(e) => {
            let stage = pipeline
                .failed_at()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unknown".into());
            tracing::error!(%stage, "Error: {e}");
        }
    }
    Ok(())
}
