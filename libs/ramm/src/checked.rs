//! Checked decimal arithmetic for the pricing paths
//!
//! `Decimal` operators panic when a result leaves the 96-bit range. Every
//! product, sum and quotient fed by pool values goes through these helpers so
//! an out-of-range snapshot surfaces as a [`MathError`].

use crate::error::MathError;
use rust_decimal::Decimal;

pub(crate) fn add(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

pub(crate) fn sub(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_sub(b).ok_or(MathError::Overflow)
}

pub(crate) fn mul(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

pub(crate) fn div(a: Decimal, b: Decimal) -> Result<Decimal, MathError> {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    a.checked_div(b).ok_or(MathError::Overflow)
}

/// `a·b / c`, dividing first only when the product itself overflows
pub(crate) fn mul_div(a: Decimal, b: Decimal, c: Decimal) -> Result<Decimal, MathError> {
    match a.checked_mul(b) {
        Some(product) => div(product, c),
        None => mul(div(a, c)?, b),
    }
}

/// `(a·b) / (c·d)`, falling back to `(a/c)·(b/d)` when a product overflows
pub(crate) fn fraction(a: Decimal, b: Decimal, c: Decimal, d: Decimal) -> Result<Decimal, MathError> {
    match (a.checked_mul(b), c.checked_mul(d)) {
        (Some(numerator), Some(denominator)) if !denominator.is_zero() => div(numerator, denominator),
        _ => mul(div(a, c)?, div(b, d)?),
    }
}
