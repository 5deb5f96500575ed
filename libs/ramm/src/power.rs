//! Fractional powers on decimals
//!
//! The on-chain curve cannot exponentiate natively, so it evaluates
//! `base^exponent` with a binomial series truncated at a fixed number of
//! terms. Previews must use the same series and the same term count or they
//! drift from what the contract computes.

use crate::checked::{div, mul};
use crate::error::MathError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Terms summed by the series, fixed to match the contract
pub const SERIES_TERMS: u32 = 30;

/// Largest base accepted by [`power`]
pub const MAX_BASE: Decimal = dec!(1.5);

/// Approximates `base^exponent` for `base` in `[2/3, 1.5]`
///
/// The exponent is split into `floor(exponent)` and its fractional part `a`.
/// `base^a` is approximated by
/// `1 + a(x-1) + a(a-1)(x-1)^2/2! + ...` summed over [`SERIES_TERMS`] terms,
/// then multiplied by the exact integer power.
pub fn power(base: Decimal, exponent: Decimal) -> Result<Decimal, MathError> {
    if base > MAX_BASE || base * dec!(3) < dec!(2) {
        return Err(MathError::Domain(base));
    }

    let whole = exponent.floor();
    let fraction = exponent - whole;
    let x_minus_one = base - Decimal::ONE;

    // |x - 1| <= 1/2 and 0 <= a < 1, so the terms shrink and the sum stays near 1
    let mut term = Decimal::ONE;
    let mut sum = Decimal::ONE;
    for j in 1..=SERIES_TERMS {
        let j = Decimal::from(j);
        term = term * (fraction - (j - Decimal::ONE)) * x_minus_one / j;
        sum += term;
    }

    let whole = whole.to_i64().ok_or(MathError::Overflow)?;
    mul(integer_power(base, whole)?, sum)
}

/// `base^exponent` by repeated squaring
fn integer_power(base: Decimal, exponent: i64) -> Result<Decimal, MathError> {
    let mut result = Decimal::ONE;
    let mut factor = base;
    let mut remaining = exponent.unsigned_abs();

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul(result, factor)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            factor = mul(factor, factor)?;
        }
    }

    if exponent < 0 {
        return div(Decimal::ONE, result);
    }
    Ok(result)
}
