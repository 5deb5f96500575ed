//! Pool Configuration Module
//!
//! Loads RAMM pool definitions from TOML files with environment-specific
//! overrides and turns them into engine parameters.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use ramm_engine::{PoolParams, UnitScales};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::defaults;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RammConfig {
    /// Global settings
    #[serde(default)]
    pub global: GlobalConfig,

    /// Configured pools, in file order
    #[serde(default)]
    pub pools: Vec<PoolConfig>,
}

/// Global configuration settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GlobalConfig {
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

/// A single pool: curve parameters plus its ordered token list
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PoolConfig {
    pub name: String,
    pub chain_id: Option<u64>,

    #[serde(default = "defaults::delta")]
    pub delta: Decimal,
    #[serde(default = "defaults::base_fee")]
    pub base_fee: Decimal,
    #[serde(default = "defaults::base_leverage")]
    pub base_leverage: Decimal,
    #[serde(default = "defaults::protocol_fee")]
    pub protocol_fee: Decimal,

    /// Default snapshot file, may contain `$VAR` references
    pub snapshot: Option<String>,

    /// Tokens in pool index order
    pub tokens: Vec<TokenConfig>,
}

/// Token metadata
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokenConfig {
    pub symbol: String,
    pub decimals: u32,
    pub lp_symbol: Option<String>,
    #[serde(default = "defaults::lp_decimals")]
    pub lp_decimals: u32,
    #[serde(default = "defaults::price_feed_decimals")]
    pub price_feed_decimals: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level(),
        }
    }
}

impl RammConfig {
    /// Load configuration from files with environment overrides
    ///
    /// The environment file is looked up in an `environments/` directory next
    /// to the base file.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(defaults::CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        if let Some(env) = environment {
            let env_file = environments_dir(base).join(format!("{}.toml", env));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // RAMM_GLOBAL__LOG_LEVEL=debug style overrides
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        let config: RammConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        for pool in &config.pools {
            pool.validate()
                .with_context(|| format!("Invalid pool '{}'", pool.name))?;
        }
        debug!(pools = config.pools.len(), "Configuration loaded");

        Ok(config)
    }

    /// Get a pool by name
    pub fn pool(&self, name: &str) -> Option<&PoolConfig> {
        self.pools.iter().find(|p| p.name == name)
    }

    /// First configured pool, used when no name is given
    pub fn default_pool(&self) -> Option<&PoolConfig> {
        self.pools.first()
    }

    /// Expand environment variables in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        for pool in &mut self.pools {
            if let Some(snapshot) = &pool.snapshot {
                let expanded =
                    shellexpand::env(snapshot).context("Failed to expand snapshot path")?;
                pool.snapshot = Some(expanded.to_string());
            }
        }

        Ok(())
    }
}

impl PoolConfig {
    pub fn n(&self) -> usize {
        self.tokens.len()
    }

    /// Engine parameters, range checked
    pub fn params(&self) -> Result<PoolParams> {
        PoolParams::new(self.delta, self.base_fee, self.base_leverage, self.protocol_fee)
            .with_context(|| format!("Invalid parameters for pool '{}'", self.name))
    }

    /// Index of a token by asset symbol (case-insensitive)
    pub fn token_index(&self, symbol: &str) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| t.symbol.eq_ignore_ascii_case(symbol))
    }

    /// Resolve a CLI token argument: a plain index or a symbol
    pub fn resolve_token(&self, token: &str) -> Result<usize> {
        if let Ok(index) = token.parse::<usize>() {
            if index < self.n() {
                return Ok(index);
            }
            bail!("Token index {} out of range for {} tokens", index, self.n());
        }
        self.token_index(token)
            .with_context(|| format!("Unknown token '{}' in pool '{}'", token, self.name))
    }

    /// Decimal places used to scale on-chain integer readings
    pub fn unit_scales(&self) -> UnitScales {
        UnitScales {
            assets: self.tokens.iter().map(|t| t.decimals).collect(),
            lp_tokens: self.tokens.iter().map(|t| t.lp_decimals).collect(),
            price_feeds: self.tokens.iter().map(|t| t.price_feed_decimals).collect(),
        }
    }

    /// Structural checks the engine cannot make on its own
    pub fn validate(&self) -> Result<()> {
        if self.tokens.len() < 2 {
            bail!("Pool needs at least 2 tokens, got {}", self.tokens.len());
        }

        let mut seen = HashSet::new();
        for token in &self.tokens {
            if !seen.insert(token.symbol.to_ascii_uppercase()) {
                bail!("Duplicate token symbol '{}'", token.symbol);
            }
        }

        self.params()?;
        Ok(())
    }
}

fn environments_dir(base: &Path) -> PathBuf {
    match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join("environments"),
        _ => PathBuf::from(defaults::ENVIRONMENTS_DIR),
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<RammConfig> {
    let mut config = RammConfig::load(None, environment)?;
    config.expand_env_vars()?;
    Ok(config)
}
