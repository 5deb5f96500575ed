//! Trade pricing for RAMM pools
//!
//! Both entry points dispatch on the state of the traded pair:
//!
//! - [`TradeCase::Linear`]: the in-token balance is empty, the trade is priced
//!   at the oracle rate minus the base fee.
//! - [`TradeCase::Nominal`]: no LP tokens of the out-token exist, the weighted
//!   constant-power curve runs with the nominal fee and leverage.
//! - [`TradeCase::Scaled`]: the general case, fee and leverage are scaled by
//!   the pair's imbalance ratios.
//!
//! Every priced trade then goes through the imbalance guard.

use crate::aggregates::{imbalance_ratios, weights};
use crate::checked::{add, div, fraction, mul, mul_div, sub};
use crate::error::{EngineError, MathError, Result};
use crate::guard::{allows, scaled_fee_and_leverage, TradeLegs};
use crate::power::power;
use crate::state::{check_amount, PoolParams, PoolState};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// Why a trade was, or was not, executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Executed,
    NoLpTokensIn,
    NoOutTokenLeft,
    OutTokenImbalanceTooLow,
    InsufficientOutBalance,
    PoolImbalance,
    MathError,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            TradeStatus::Executed => "Trade executed.",
            TradeStatus::NoLpTokensIn => {
                "The trade is not allowed because there are no LP tokens of the in-token type in circulation."
            }
            TradeStatus::NoOutTokenLeft => {
                "The trade is not possible because there is currently no out-token left in the pool."
            }
            TradeStatus::OutTokenImbalanceTooLow => {
                "The trade will not be executed because the imbalance ratio of the out-token is too low."
            }
            TradeStatus::InsufficientOutBalance => {
                "The trade will not be executed because there is not enough balance of the out-token."
            }
            TradeStatus::PoolImbalance => {
                "The trade was not executed because of pool imbalance."
            }
            TradeStatus::MathError => "Math error.",
        };
        f.write_str(message)
    }
}

/// Result of pricing one trade
///
/// `amount` is the counter leg: tokens out for [`trade_given_in`], tokens in
/// for [`trade_given_out`]. When `execute` is false every amount is zero and
/// `message` says why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeOutcome {
    pub amount: Decimal,
    pub swap_fee: Decimal,
    /// Part of `swap_fee` retained by the protocol
    pub protocol_fee: Decimal,
    /// Relative deviation of the effective price from the oracle price
    pub price_impact: Decimal,
    pub execute: bool,
    pub message: String,
    pub status: TradeStatus,
}

impl TradeOutcome {
    fn rejected(status: TradeStatus) -> Self {
        Self {
            amount: Decimal::ZERO,
            swap_fee: Decimal::ZERO,
            protocol_fee: Decimal::ZERO,
            price_impact: Decimal::ZERO,
            execute: false,
            message: status.to_string(),
            status,
        }
    }
}

/// Pricing branch selected from the pair's balances and LP totals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeCase {
    Linear,
    Nominal,
    Scaled,
}

impl TradeCase {
    pub fn classify(state: &PoolState, i: usize, o: usize) -> Self {
        if state.balances()[i].is_zero() {
            TradeCase::Linear
        } else if state.lp_tokens_issued()[o].is_zero() {
            TradeCase::Nominal
        } else {
            TradeCase::Scaled
        }
    }
}

/// Known amount and direction of a trade request
#[derive(Debug, Clone, Copy)]
enum Side {
    GivenIn(Decimal),
    GivenOut(Decimal),
}

/// Price a trade of `amount_in` of token `i` for token `o`
pub fn trade_given_in(
    i: usize,
    o: usize,
    amount_in: Decimal,
    state: &PoolState,
    params: &PoolParams,
) -> Result<TradeOutcome> {
    state.check_pair(i, o)?;
    check_amount(amount_in)?;

    if state.lp_tokens_issued()[i].is_zero() {
        return Ok(reject(TradeStatus::NoLpTokensIn, i, o));
    }
    if state.balances()[o].is_zero() {
        return Ok(reject(TradeStatus::NoOutTokenLeft, i, o));
    }

    price(Side::GivenIn(amount_in), i, o, state, params)
}

/// Price the amount of token `i` needed to take `amount_out` of token `o`
pub fn trade_given_out(
    i: usize,
    o: usize,
    amount_out: Decimal,
    state: &PoolState,
    params: &PoolParams,
) -> Result<TradeOutcome> {
    state.check_pair(i, o)?;
    check_amount(amount_out)?;

    if state.lp_tokens_issued()[i].is_zero() {
        return Ok(reject(TradeStatus::NoLpTokensIn, i, o));
    }
    if state.balances()[o] <= amount_out {
        return Ok(reject(TradeStatus::InsufficientOutBalance, i, o));
    }

    price(Side::GivenOut(amount_out), i, o, state, params)
}

/// Arithmetic that leaves the decimal range is a "Math error." refusal
fn price(
    side: Side,
    i: usize,
    o: usize,
    state: &PoolState,
    params: &PoolParams,
) -> Result<TradeOutcome> {
    match evaluate(side, i, o, state, params) {
        Err(EngineError::Math(err)) => {
            debug!(token_in = i, token_out = o, error = %err, "trade arithmetic failed");
            Ok(reject(TradeStatus::MathError, i, o))
        }
        outcome => outcome,
    }
}

fn evaluate(
    side: Side,
    i: usize,
    o: usize,
    state: &PoolState,
    params: &PoolParams,
) -> Result<TradeOutcome> {
    let w = weights(state)?;
    let prices = state.prices();

    let case = TradeCase::classify(state, i, o);
    trace!(token_in = i, token_out = o, ?case, ?side, "pricing trade");

    let (fee, leverage) = match case {
        TradeCase::Linear | TradeCase::Nominal => (params.base_fee, params.base_leverage),
        TradeCase::Scaled => {
            let ratio_out = imbalance_ratios(state)?[o];
            if ratio_out < Decimal::ONE - params.delta {
                return Ok(reject(TradeStatus::OutTokenImbalanceTooLow, i, o));
            }
            scaled_fee_and_leverage(state, i, o, params)?
        }
    };

    let (amount_in, amount_out) = match (case, side) {
        (TradeCase::Linear, Side::GivenIn(amount_in)) => (
            amount_in,
            mul_div(mul(amount_in, Decimal::ONE - fee)?, prices[i], prices[o])?,
        ),
        (TradeCase::Linear, Side::GivenOut(amount_out)) => (
            fraction(amount_out, prices[o], prices[i], Decimal::ONE - fee)?,
            amount_out,
        ),
        (_, side) => {
            let curve = Curve::new(state, i, o, &w, fee, leverage)?;
            match side {
                Side::GivenIn(amount_in) => (amount_in, curve.out_given_in(amount_in)?),
                Side::GivenOut(amount_out) => (curve.in_given_out(amount_out)?, amount_out),
            }
        }
    };

    if case == TradeCase::Scaled
        && matches!(side, Side::GivenIn(_))
        && amount_out >= state.balances()[o]
    {
        return Ok(reject(TradeStatus::InsufficientOutBalance, i, o));
    }

    let protocol_fee = mul(amount_in, mul(params.protocol_fee, fee)?)?;
    let legs = TradeLegs {
        token_in: i,
        token_out: o,
        amount_in,
        amount_out,
        protocol_fee,
    };
    if !allows(state, &legs, params.delta)? {
        return Ok(reject(TradeStatus::PoolImbalance, i, o));
    }

    let amount = match side {
        Side::GivenIn(_) => amount_out,
        Side::GivenOut(_) => amount_in,
    };
    Ok(TradeOutcome {
        amount,
        swap_fee: mul(amount_in, fee)?,
        protocol_fee,
        price_impact: price_impact(amount_in, amount_out, prices[i], prices[o])?,
        execute: true,
        message: TradeStatus::Executed.to_string(),
        status: TradeStatus::Executed,
    })
}

fn reject(status: TradeStatus, i: usize, o: usize) -> TradeOutcome {
    debug!(token_in = i, token_out = o, ?status, "trade rejected");
    TradeOutcome::rejected(status)
}

/// Weighted constant-power curve over leveraged balances
struct Curve {
    balance_in: Decimal,
    balance_out: Decimal,
    weight_in: Decimal,
    weight_out: Decimal,
    fee: Decimal,
}

impl Curve {
    fn new(
        state: &PoolState,
        i: usize,
        o: usize,
        weights: &[Decimal],
        fee: Decimal,
        leverage: Decimal,
    ) -> std::result::Result<Self, MathError> {
        Ok(Self {
            balance_in: mul(state.balances()[i], leverage)?,
            balance_out: mul(state.balances()[o], leverage)?,
            weight_in: weights[i],
            weight_out: weights[o],
            fee,
        })
    }

    /// `bo·(1 - (bi / (bi + ai·(1-fee)))^(wi/wo))`
    fn out_given_in(&self, amount_in: Decimal) -> std::result::Result<Decimal, MathError> {
        let net_in = mul(amount_in, Decimal::ONE - self.fee)?;
        let base = div(self.balance_in, add(self.balance_in, net_in)?)?;
        let exponent = div(self.weight_in, self.weight_out)?;
        mul(self.balance_out, Decimal::ONE - power(base, exponent)?)
    }

    /// `bi·((bo / (bo - ao))^(wo/wi) - 1) / (1-fee)`
    fn in_given_out(&self, amount_out: Decimal) -> std::result::Result<Decimal, MathError> {
        let base = div(self.balance_out, sub(self.balance_out, amount_out)?)?;
        let exponent = div(self.weight_out, self.weight_in)?;
        let grown = mul(self.balance_in, power(base, exponent)? - Decimal::ONE)?;
        div(grown, Decimal::ONE - self.fee)
    }
}

/// Relative deviation of the paid price from the oracle price
///
/// `(amount_in/amount_out - price_o/price_i) / (price_o/price_i)`, or zero
/// when either price or the out amount is zero.
pub fn price_impact(
    amount_in: Decimal,
    amount_out: Decimal,
    price_in: Decimal,
    price_out: Decimal,
) -> std::result::Result<Decimal, MathError> {
    if price_in.is_zero() || price_out.is_zero() || amount_out.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let effective_price = div(amount_in, amount_out)?;
    let market_price = div(price_out, price_in)?;
    div(sub(effective_price, market_price)?, market_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pool(balances: [Decimal; 2], lp: [Decimal; 2]) -> PoolState {
        PoolState::new(balances.to_vec(), lp.to_vec(), vec![dec!(1), dec!(1)]).unwrap()
    }

    #[test]
    fn test_classify() {
        let linear = pool([dec!(0), dec!(100)], [dec!(50), dec!(50)]);
        assert_eq!(TradeCase::classify(&linear, 0, 1), TradeCase::Linear);

        let nominal = pool([dec!(100), dec!(100)], [dec!(100), dec!(0)]);
        assert_eq!(TradeCase::classify(&nominal, 0, 1), TradeCase::Nominal);

        let scaled = pool([dec!(100), dec!(100)], [dec!(100), dec!(100)]);
        assert_eq!(TradeCase::classify(&scaled, 0, 1), TradeCase::Scaled);
    }

    #[test]
    fn test_rejection_messages() {
        let outcome = TradeOutcome::rejected(TradeStatus::MathError);
        assert_eq!(outcome.message, "Math error.");
        assert!(!outcome.execute);
        assert_eq!(outcome.amount, Decimal::ZERO);
    }

    #[test]
    fn test_price_impact_sign() {
        // paying 1.1 for 1 at a 1:1 market
        assert_eq!(price_impact(dec!(1.1), dec!(1), dec!(1), dec!(1)).unwrap(), dec!(0.1));
        // paying 0.9 for 1
        assert_eq!(price_impact(dec!(0.9), dec!(1), dec!(1), dec!(1)).unwrap(), dec!(-0.1));
        // market price 2: paying 2 per unit is no impact
        assert_eq!(price_impact(dec!(4), dec!(2), dec!(1), dec!(2)).unwrap(), dec!(0));
    }

    #[test]
    fn test_price_impact_undefined_is_zero() {
        assert_eq!(price_impact(dec!(1), dec!(0), dec!(1), dec!(1)).unwrap(), Decimal::ZERO);
        assert_eq!(price_impact(dec!(1), dec!(1), dec!(0), dec!(1)).unwrap(), Decimal::ZERO);
        assert_eq!(price_impact(dec!(1), dec!(1), dec!(1), dec!(0)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_curve_round_trip() {
        let curve = Curve {
            balance_in: dec!(10000),
            balance_out: dec!(10000),
            weight_in: dec!(0.5),
            weight_out: dec!(0.5),
            fee: dec!(0.001),
        };
        let out = curve.out_given_in(dec!(10)).unwrap();
        let back = curve.in_given_out(out).unwrap();
        assert!((back - dec!(10)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_curve_domain_error() {
        let curve = Curve {
            balance_in: dec!(100),
            balance_out: dec!(100),
            weight_in: dec!(0.5),
            weight_out: dec!(0.5),
            fee: dec!(0),
        };
        // base 100/160 is below 2/3
        assert!(matches!(curve.out_given_in(dec!(60)), Err(MathError::Domain(_))));
    }
}
