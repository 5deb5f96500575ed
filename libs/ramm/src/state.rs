//! Pool snapshot and pool parameters
//!
//! Both are immutable value objects, validated once at construction and then
//! passed by reference into every pricing function.

use crate::error::{EngineError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a RAMM pool
///
/// Slot `j` of each sequence refers to the same token. Prices are oracle
/// answers already scaled to a common unit.
///
/// The engine assumes the three sequences were read at the same ledger
/// height. A reader that fetches them concurrently can assemble a snapshot
/// that never existed on chain; previews are only as consistent as the
/// snapshot they are given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoolState")]
pub struct PoolState {
    balances: Vec<Decimal>,
    lp_tokens_issued: Vec<Decimal>,
    prices: Vec<Decimal>,
}

#[derive(Deserialize)]
struct RawPoolState {
    balances: Vec<Decimal>,
    lp_tokens_issued: Vec<Decimal>,
    prices: Vec<Decimal>,
}

impl TryFrom<RawPoolState> for PoolState {
    type Error = EngineError;

    fn try_from(raw: RawPoolState) -> Result<Self> {
        Self::new(raw.balances, raw.lp_tokens_issued, raw.prices)
    }
}

impl PoolState {
    pub fn new(
        balances: Vec<Decimal>,
        lp_tokens_issued: Vec<Decimal>,
        prices: Vec<Decimal>,
    ) -> Result<Self> {
        if balances.len() != lp_tokens_issued.len() || balances.len() != prices.len() {
            return Err(EngineError::LengthMismatch {
                balances: balances.len(),
                lp_tokens: lp_tokens_issued.len(),
                prices: prices.len(),
            });
        }
        if balances.len() < 2 {
            return Err(EngineError::TooFewTokens(balances.len()));
        }

        for (index, value) in balances.iter().enumerate() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::NegativeValue {
                    field: "balance",
                    index,
                    value: *value,
                });
            }
        }
        for (index, value) in lp_tokens_issued.iter().enumerate() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(EngineError::NegativeValue {
                    field: "LP tokens issued",
                    index,
                    value: *value,
                });
            }
        }
        for (index, value) in prices.iter().enumerate() {
            if *value <= Decimal::ZERO {
                return Err(EngineError::NonPositivePrice {
                    index,
                    value: *value,
                });
            }
        }

        Ok(Self {
            balances,
            lp_tokens_issued,
            prices,
        })
    }

    /// Number of tokens in the pool
    pub fn n(&self) -> usize {
        self.balances.len()
    }

    pub fn balances(&self) -> &[Decimal] {
        &self.balances
    }

    pub fn lp_tokens_issued(&self) -> &[Decimal] {
        &self.lp_tokens_issued
    }

    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Copy of this snapshot with replaced balances, used to evaluate
    /// hypothetical post-trade states
    pub(crate) fn with_balances(&self, balances: Vec<Decimal>) -> Self {
        Self {
            balances,
            lp_tokens_issued: self.lp_tokens_issued.clone(),
            prices: self.prices.clone(),
        }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.n() {
            return Err(EngineError::TokenIndexOutOfRange { index, n: self.n() });
        }
        Ok(())
    }

    /// Validates an (in, out) token pair
    pub(crate) fn check_pair(&self, i: usize, o: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(o)?;
        if i == o {
            return Err(EngineError::SameToken(i));
        }
        Ok(())
    }
}

pub(crate) fn check_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(EngineError::NegativeAmount(amount));
    }
    Ok(())
}

/// Immutable curve parameters of a pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoolParams")]
pub struct PoolParams {
    /// Tolerance band around a balanced imbalance ratio, in (0, 1)
    pub delta: Decimal,
    /// Nominal swap fee fraction, in [0, 1)
    pub base_fee: Decimal,
    /// Nominal leverage of the invariant curve, > 0
    pub base_leverage: Decimal,
    /// Share of the swap fee kept by the protocol, in [0, 1]
    pub protocol_fee: Decimal,
}

#[derive(Deserialize)]
struct RawPoolParams {
    delta: Decimal,
    base_fee: Decimal,
    base_leverage: Decimal,
    protocol_fee: Decimal,
}

impl TryFrom<RawPoolParams> for PoolParams {
    type Error = EngineError;

    fn try_from(raw: RawPoolParams) -> Result<Self> {
        Self::new(raw.delta, raw.base_fee, raw.base_leverage, raw.protocol_fee)
    }
}

impl Default for PoolParams {
    fn default() -> Self {
        Self {
            delta: dec!(0.25),
            base_fee: dec!(0.001),
            base_leverage: dec!(100),
            protocol_fee: dec!(0.5),
        }
    }
}

impl PoolParams {
    pub fn new(
        delta: Decimal,
        base_fee: Decimal,
        base_leverage: Decimal,
        protocol_fee: Decimal,
    ) -> Result<Self> {
        if delta <= Decimal::ZERO || delta >= Decimal::ONE {
            return Err(EngineError::InvalidParameter {
                name: "delta",
                value: delta,
                expected: "0 < delta < 1",
            });
        }
        if base_fee < Decimal::ZERO || base_fee >= Decimal::ONE {
            return Err(EngineError::InvalidParameter {
                name: "base_fee",
                value: base_fee,
                expected: "0 <= base_fee < 1",
            });
        }
        if base_leverage <= Decimal::ZERO {
            return Err(EngineError::InvalidParameter {
                name: "base_leverage",
                value: base_leverage,
                expected: "base_leverage > 0",
            });
        }
        if protocol_fee < Decimal::ZERO || protocol_fee > Decimal::ONE {
            return Err(EngineError::InvalidParameter {
                name: "protocol_fee",
                value: protocol_fee,
                expected: "0 <= protocol_fee <= 1",
            });
        }

        Ok(Self {
            delta,
            base_fee,
            base_leverage,
            protocol_fee,
        })
    }
}
