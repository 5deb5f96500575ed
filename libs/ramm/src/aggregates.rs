//! Pool-wide aggregates derived from a snapshot
//!
//! Recomputed on every call: a cached B or L would misprice the next trade.

use crate::checked::{add, div, fraction, mul};
use crate::error::{EngineError, Result};
use crate::state::PoolState;
use rust_decimal::Decimal;

/// Pool value `B` and LP value `L`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Σ balance × price
    pub b: Decimal,
    /// Σ LP issued × price
    pub l: Decimal,
}

pub fn totals(state: &PoolState) -> Result<Totals> {
    let mut b = Decimal::ZERO;
    let mut l = Decimal::ZERO;
    for j in 0..state.n() {
        let price = state.prices()[j];
        b = add(b, mul(state.balances()[j], price)?)?;
        l = add(l, mul(state.lp_tokens_issued()[j], price)?)?;
    }
    Ok(Totals { b, l })
}

/// Share of pool value held in each token
pub fn weights(state: &PoolState) -> Result<Vec<Decimal>> {
    let b = totals(state)?.b;
    if b.is_zero() {
        return Err(EngineError::ZeroPoolValue);
    }

    state
        .balances()
        .iter()
        .zip(state.prices())
        .map(|(balance, price)| -> Result<Decimal> { Ok(div(mul(*balance, *price)?, b)?) })
        .collect()
}

/// Per-token imbalance ratios `L·b_j / (B·lp_j)`
///
/// 1 means the token's share of pool value matches its share of LP claims,
/// below 1 it is scarce, above 1 it is abundant. Tokens without LP tokens in
/// circulation, and every token of a pool holding no value, get 0.
pub fn imbalance_ratios(state: &PoolState) -> Result<Vec<Decimal>> {
    let Totals { b, l } = totals(state)?;

    state
        .balances()
        .iter()
        .zip(state.lp_tokens_issued())
        .map(|(balance, lp)| -> Result<Decimal> {
            if lp.is_zero() || b.is_zero() {
                Ok(Decimal::ZERO)
            } else {
                Ok(fraction(l, *balance, b, *lp)?)
            }
        })
        .collect()
}
