//! Conversion between human-readable amounts and on-chain integer units
//!
//! Tokens, LP tokens and price feeds each carry their own number of decimal
//! places (18 for WETH, 6 for USDC, 8 for most feeds).

use crate::error::{EngineError, Result};
use crate::state::PoolState;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Most decimal places a `Decimal` can carry
pub const MAX_DECIMALS: u32 = 28;

/// `floor(amount · 10^decimals)` as an integer amount of smallest units
pub fn to_base_units(amount: Decimal, decimals: u32) -> Result<u128> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::NegativeAmount(amount));
    }
    let scaled = amount
        .checked_mul(pow10(decimals)?)
        .ok_or_else(|| EngineError::Conversion(format!("{amount} × 10^{decimals} overflows")))?;

    scaled
        .floor()
        .to_u128()
        .ok_or_else(|| EngineError::Conversion(format!("{scaled} is not a valid unit amount")))
}

/// `raw / 10^decimals`
pub fn from_base_units(raw: u128, decimals: u32) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(EngineError::Conversion(format!(
            "{decimals} decimals exceeds the supported {MAX_DECIMALS}"
        )));
    }
    let raw = i128::try_from(raw)
        .map_err(|_| EngineError::Conversion(format!("{raw} does not fit a decimal")))?;
    Decimal::try_from_i128_with_scale(raw, decimals)
        .map_err(|e| EngineError::Conversion(e.to_string()))
}

fn pow10(decimals: u32) -> Result<Decimal> {
    if decimals > MAX_DECIMALS {
        return Err(EngineError::Conversion(format!(
            "{decimals} decimals exceeds the supported {MAX_DECIMALS}"
        )));
    }
    Ok(Decimal::from_i128_with_scale(10_i128.pow(decimals), 0))
}

/// Raw on-chain reading of a pool, in smallest units
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPoolReading {
    pub balances: Vec<u128>,
    pub lp_tokens_issued: Vec<u128>,
    /// Price feed answers
    pub prices: Vec<u128>,
}

/// Decimal places used to scale a [`RawPoolReading`], one entry per token
#[derive(Debug, Clone, Default)]
pub struct UnitScales {
    pub assets: Vec<u32>,
    pub lp_tokens: Vec<u32>,
    pub price_feeds: Vec<u32>,
}

impl PoolState {
    /// Build a snapshot from raw integer readings and per-token decimals
    pub fn from_base_units(reading: &RawPoolReading, scales: &UnitScales) -> Result<Self> {
        Self::new(
            scale_all(&reading.balances, &scales.assets)?,
            scale_all(&reading.lp_tokens_issued, &scales.lp_tokens)?,
            scale_all(&reading.prices, &scales.price_feeds)?,
        )
    }
}

fn scale_all(raw: &[u128], decimals: &[u32]) -> Result<Vec<Decimal>> {
    if raw.len() != decimals.len() {
        return Err(EngineError::Conversion(format!(
            "{} values but {} decimal settings",
            raw.len(),
            decimals.len()
        )));
    }
    raw.iter()
        .zip(decimals)
        .map(|(value, places)| from_base_units(*value, *places))
        .collect()
}
