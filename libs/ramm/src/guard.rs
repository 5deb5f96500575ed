//! Imbalance guard and imbalance-scaled curve parameters

use crate::aggregates::imbalance_ratios;
use crate::checked::{add, mul, mul_div, sub};
use crate::error::{MathError, Result};
use crate::state::{PoolParams, PoolState};
use rust_decimal::Decimal;
use tracing::trace;

/// Hypothetical trade checked by [`allows`]
#[derive(Debug, Clone, Copy)]
pub struct TradeLegs {
    pub token_in: usize,
    pub token_out: usize,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    /// Part of the fee that leaves the pool instead of staying in balances
    pub protocol_fee: Decimal,
}

/// Whether the pool accepts a trade given its imbalance ratios
///
/// A trade is refused only when it pushes a token further outside the
/// `1 ± delta` band: the out-token below `1 - delta` and lower than before,
/// or the in-token above `1 + delta` and higher than before. Trades that move
/// an out-of-band token back towards balance always pass.
pub fn allows(state: &PoolState, legs: &TradeLegs, delta: Decimal) -> Result<bool> {
    let (i, o) = (legs.token_in, legs.token_out);

    let mut balances_after = state.balances().to_vec();
    balances_after[i] = sub(add(balances_after[i], legs.amount_in)?, legs.protocol_fee)?;
    balances_after[o] = sub(balances_after[o], legs.amount_out)?;

    let before = imbalance_ratios(state)?;
    let after = imbalance_ratios(&state.with_balances(balances_after))?;

    let out_too_scarce = after[o] < Decimal::ONE - delta && after[o] < before[o];
    let in_too_abundant = Decimal::ONE + delta < after[i] && before[i] < after[i];

    trace!(
        token_in = i,
        token_out = o,
        ratio_in_before = %before[i],
        ratio_in_after = %after[i],
        ratio_out_before = %before[o],
        ratio_out_after = %after[o],
        "imbalance check"
    );

    Ok(!(out_too_scarce || in_too_abundant))
}

/// Fee and leverage scaled by the cubed imbalance ratios of the pair
///
/// Returns `(r_i³·base_fee / r_o³, r_o³·base_leverage / r_i³)`. Fails when
/// either ratio is zero or a cube leaves the decimal range.
pub fn scaled_fee_and_leverage(
    state: &PoolState,
    i: usize,
    o: usize,
    params: &PoolParams,
) -> Result<(Decimal, Decimal)> {
    let ratios = imbalance_ratios(state)?;
    let adjust_i = cube(ratios[i])?;
    let adjust_o = cube(ratios[o])?;

    let fee = mul_div(adjust_i, params.base_fee, adjust_o)?;
    let leverage = mul_div(adjust_o, params.base_leverage, adjust_i)?;
    Ok((fee, leverage))
}

fn cube(x: Decimal) -> std::result::Result<Decimal, MathError> {
    mul(mul(x, x)?, x)
}
