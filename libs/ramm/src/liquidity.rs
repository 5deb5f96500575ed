//! Single-asset deposits and withdrawals
//!
//! Withdrawals pay out in the requested token as far as the imbalance floor
//! allows, then cascade through the most overweight remaining tokens. Whatever
//! the pool still cannot cover is reported as `remaining_amount`.

use crate::aggregates::{imbalance_ratios, totals, Totals};
use crate::checked::{add, div, fraction, mul, mul_div, sub};
use crate::error::{EngineError, Result};
use crate::state::{check_amount, PoolParams, PoolState};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, trace};

/// Amount of one token paid to the liquidity provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenPayout {
    pub token_index: usize,
    pub amount: Decimal,
}

/// Result of a single-asset withdrawal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalOutcome {
    /// One entry per pool token, in slot order
    pub amounts_per_token: Vec<TokenPayout>,
    /// Requested payout value, in units of the out-token
    pub total_amount: Decimal,
    /// Value the pool could not pay without breaching the imbalance floor
    pub remaining_amount: Decimal,
}

impl WithdrawalOutcome {
    fn new(amounts: Vec<Decimal>, total_amount: Decimal, remaining_amount: Decimal) -> Self {
        let amounts_per_token = amounts
            .into_iter()
            .enumerate()
            .map(|(token_index, amount)| TokenPayout {
                token_index,
                amount,
            })
            .collect();

        Self {
            amounts_per_token,
            total_amount,
            remaining_amount,
        }
    }

    /// Whether part of the request was left unpaid
    pub fn is_partial(&self) -> bool {
        self.remaining_amount > Decimal::ZERO
    }
}

/// LP tokens minted for depositing `amount_in` of token `i`
pub fn deposit_mint_amount(i: usize, amount_in: Decimal, state: &PoolState) -> Result<Decimal> {
    state.check_index(i)?;
    check_amount(amount_in)?;

    let balance = state.balances()[i];
    let lp = state.lp_tokens_issued()[i];

    if lp.is_zero() || balance.is_zero() {
        let Totals { b, l } = totals(state)?;
        if b.is_zero() {
            // first deposit into an empty pool mints 1:1
            return Ok(amount_in);
        }
        return Ok(mul_div(amount_in, l, b)?);
    }

    let ratio = imbalance_ratios(state)?[i];
    Ok(mul(mul(div(amount_in, balance)?, ratio)?, lp)?)
}

/// Value of `lpt_amount` LP tokens, ignoring imbalance
pub fn redeem_amount(lpt_amount: Decimal, state: &PoolState) -> Result<Decimal> {
    check_amount(lpt_amount)?;
    let Totals { b, l } = totals(state)?;
    if l.is_zero() {
        return Err(EngineError::ZeroLpValue);
    }
    Ok(mul_div(lpt_amount, b, l)?)
}

/// Redeem `lpt_amount` LP tokens of type `o`, preferably paid in token `o`
///
/// Fails with [`EngineError::Math`] when the pool values leave the decimal
/// range.
pub fn single_asset_withdrawal(
    o: usize,
    lpt_amount: Decimal,
    state: &PoolState,
    params: &PoolParams,
) -> Result<WithdrawalOutcome> {
    state.check_index(o)?;
    check_amount(lpt_amount)?;

    let Totals { b, l } = totals(state)?;
    if l.is_zero() {
        return Err(EngineError::ZeroLpValue);
    }

    let balances = state.balances();
    let lp = state.lp_tokens_issued();
    let floor = Decimal::ONE - params.delta;
    // balance a token must keep for the LP claims left on it
    let reserve = |claims: Decimal| -> Result<Decimal> { Ok(mul(mul_div(claims, b, l)?, floor)?) };

    let mut amounts = vec![Decimal::ZERO; state.n()];
    let mut ratios = imbalance_ratios(state)?;
    let balance_o = balances[o];

    let (total, mut remaining) = if balance_o.is_zero() {
        // nothing of token o to pay, the whole value goes to the cascade
        let value = mul_div(lpt_amount, b, l)?;
        (value, value)
    } else {
        let ratio_o = ratios[o];
        let lp_o = lp[o];
        if lp_o.is_zero() {
            return Err(EngineError::NoLpTokens(o));
        }

        if lpt_amount < lp_o {
            let ao = fraction(lpt_amount, balance_o, lp_o, ratio_o)?;
            let max_out = if floor < ratio_o {
                sub(balance_o, reserve(lp_o - lpt_amount)?)?
            } else {
                mul_div(lpt_amount, balance_o, lp_o)?
            };

            if ao <= max_out {
                amounts[o] = ao;
                return Ok(WithdrawalOutcome::new(amounts, ao, Decimal::ZERO));
            }
            amounts[o] = max_out;
            (ao, sub(ao, max_out)?)
        } else {
            // redeeming the whole LP supply of token o
            let ao = div(balance_o, ratio_o)?;
            if ao <= balance_o {
                amounts[o] = ao;
                return Ok(WithdrawalOutcome::new(amounts, ao, Decimal::ZERO));
            }
            amounts[o] = balance_o;
            (ao, ao - balance_o)
        }
    };

    debug!(
        token = o,
        lpt = %lpt_amount,
        paid = %amounts[o],
        remaining = %remaining,
        "out-token cannot cover withdrawal, cascading"
    );

    ratios[o] = Decimal::ZERO;
    let prices = state.prices();
    for _ in 0..state.n() {
        let Some((k, max_ratio)) = most_overweight(&ratios) else {
            break;
        };
        if remaining.is_zero() || max_ratio <= Decimal::ZERO {
            break;
        }
        ratios[k] = Decimal::ZERO;

        let ak = mul_div(remaining, prices[o], prices[k])?;
        let cap = sub(balances[k], reserve(lp[k])?)?.max(Decimal::ZERO);

        if ak <= cap {
            amounts[k] = add(amounts[k], ak)?;
            remaining = Decimal::ZERO;
        } else {
            amounts[k] = add(amounts[k], cap)?;
            remaining -= mul_div(cap, prices[k], prices[o])?;
        }
        trace!(token = k, paid = %amounts[k], remaining = %remaining, "cascade step");
    }

    if remaining > Decimal::ZERO {
        debug!(token = o, remaining = %remaining, "withdrawal only partially covered");
    }

    Ok(WithdrawalOutcome::new(amounts, total, remaining))
}

/// Largest ratio and its slot; ties go to the lowest slot
fn most_overweight(ratios: &[Decimal]) -> Option<(usize, Decimal)> {
    ratios
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (k, ratio)| match best {
            Some((_, top)) if ratio <= top => best,
            _ => Some((k, ratio)),
        })
}
