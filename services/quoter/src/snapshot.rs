//! Pool snapshot loading
//!
//! A snapshot is a JSON object with `balances`, `lp_tokens_issued` and
//! `prices` arrays. Decimal snapshots hold human-readable amounts as strings.
//! Raw snapshots hold integer on-chain readings that are scaled with the
//! pool's configured decimals.

use anyhow::{Context, Result};
use ramm_config::PoolConfig;
use ramm_engine::{PoolState, RawPoolReading};
use std::fs;
use std::path::Path;
use tracing::debug;

pub fn load_snapshot(path: &Path, pool: &PoolConfig, raw: bool) -> Result<PoolState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {:?}", path))?;
    let state = parse_snapshot(&contents, pool, raw)
        .with_context(|| format!("Invalid snapshot {:?}", path))?;

    debug!(tokens = state.n(), raw, "Loaded snapshot {:?}", path);
    Ok(state)
}

pub fn parse_snapshot(contents: &str, pool: &PoolConfig, raw: bool) -> Result<PoolState> {
    let state = if raw {
        let reading: RawPoolReading = serde_json::from_str(contents)?;
        PoolState::from_base_units(&reading, &pool.unit_scales())?
    } else {
        serde_json::from_str::<PoolState>(contents)?
    };

    anyhow::ensure!(
        state.n() == pool.n(),
        "snapshot has {} tokens, pool '{}' has {}",
        state.n(),
        pool.name,
        pool.n()
    );
    Ok(state)
}
