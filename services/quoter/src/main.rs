//! RAMM quoter entry point
//!
//! Prices one trade, deposit or withdrawal against a pool snapshot and prints
//! the result as JSON on stdout. Logs go to stderr.

mod cli;
mod commands;
mod snapshot;

use anyhow::{Context, Result};
use clap::Parser;
use ramm_config::RammConfig;
use ramm_engine::Pool;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::commands::Quoter;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = RammConfig::load(Some(&args.config), args.environment.as_deref())
        .context("Failed to load configuration")?;
    config.expand_env_vars()?;

    init_logging(
        args.log_level.as_deref(),
        &config.global.log_level,
        args.json_logs,
    )?;

    info!("Config file: {:?}", args.config);
    info!("Environment: {}", args.environment.as_deref().unwrap_or("default"));

    let pool_config = match &args.pool {
        Some(name) => config
            .pool(name)
            .with_context(|| format!("Pool '{}' not configured", name))?,
        None => config.default_pool().context("No pools configured")?,
    };

    let snapshot_path = match (&args.snapshot, &pool_config.snapshot) {
        (Some(path), _) => path.clone(),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => anyhow::bail!("No snapshot given for pool '{}'", pool_config.name),
    };

    let state = snapshot::load_snapshot(&snapshot_path, pool_config, args.raw)?;
    let pool = Pool::new(pool_config.params()?, state);
    info!(pool = %pool_config.name, tokens = pool_config.n(), "Pool loaded");

    let output = Quoter::new(pool_config, pool, args.base_units).run(&args.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// `--log-level` wins, then RUST_LOG, then the configured level
fn init_logging(explicit: Option<&str>, configured: &str, json: bool) -> Result<()> {
    let filter = match explicit {
        Some(level) => EnvFilter::try_new(level),
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured)),
    }
    .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
