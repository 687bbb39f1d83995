//! Shared functionality used across commands.
use log::*;
use std::path::Path;

use crate::{
    cli,
    config::{self, Config},
    error::Result,
    forge::{github::Github, traits::Forge},
    gate::{self, BatchInfo},
};

/// Build the GitHub forge client from CLI arguments.
pub fn get_forge(args: &cli::Args) -> Result<Box<dyn Forge>> {
    let remote = args.get_remote()?;
    let forge = Github::new(remote)?;

    Ok(Box::new(forge))
}

/// Load project configuration from the working directory, applying CLI
/// overrides.
pub fn load_configuration(args: &cli::Args) -> Result<Config> {
    let mut config = config::load_config(Path::new("."))?;

    if let Some(strategy) = args.versioning_strategy {
        config.versioning_strategy = strategy;
    }

    Ok(config)
}

/// Fetch batch info and enforce the gate. Warnings are logged; the first
/// failure aborts the workflow.
pub async fn preflight(
    forge: &dyn Forge,
    config: &Config,
) -> Result<BatchInfo> {
    let batch = gate::fetch_batch_info(forge, config).await?;
    let report = gate::evaluate(config, &batch);

    for warning in &report.warnings {
        warn!("{warning}");
    }

    if let Some(failure) = report.failures.first() {
        return Err(failure.clone().into());
    }

    Ok(batch)
}
