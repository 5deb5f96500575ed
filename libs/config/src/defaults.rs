//! Default values shared by the configuration loader
//!
//! Curve parameters come from [`PoolParams::default`], the values of the RAMM
//! contracts deployed on Polygon.

use ramm_engine::PoolParams;
use rust_decimal::Decimal;

/// Base configuration file, relative to the working directory
pub const CONFIG_PATH: &str = "config/pools.toml";

/// Directory holding `<environment>.toml` overrides
pub const ENVIRONMENTS_DIR: &str = "config/environments";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "RAMM";

pub const LOG_LEVEL: &str = "info";

pub fn delta() -> Decimal {
    PoolParams::default().delta
}

pub fn base_fee() -> Decimal {
    PoolParams::default().base_fee
}

pub fn base_leverage() -> Decimal {
    PoolParams::default().base_leverage
}

pub fn protocol_fee() -> Decimal {
    PoolParams::default().protocol_fee
}

pub fn log_level() -> String {
    LOG_LEVEL.to_string()
}

/// Decimal places of an LP token
pub fn lp_decimals() -> u32 {
    18
}

/// Decimal places of a price feed answer
pub fn price_feed_decimals() -> u32 {
    8
}
