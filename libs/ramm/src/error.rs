//! Error kinds for the pricing engine
//!
//! Business rejections (pool imbalance, depleted tokens, math domain) are
//! never errors: they come back inside a [`TradeOutcome`](crate::TradeOutcome).
//! The variants here signal a caller contract violation, or arithmetic that
//! left the decimal range outside of trade pricing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Caller contract violations detected by the engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Balances, LP totals and prices must describe the same tokens
    #[error("Length mismatch: {balances} balances, {lp_tokens} LP totals, {prices} prices")]
    LengthMismatch {
        balances: usize,
        lp_tokens: usize,
        prices: usize,
    },

    /// A pool needs at least two tokens to trade
    #[error("Pool must hold at least 2 tokens, got {0}")]
    TooFewTokens(usize),

    /// Token slot outside `0..n`
    #[error("Token index {index} out of range for a pool of {n} tokens")]
    TokenIndexOutOfRange { index: usize, n: usize },

    /// In-token and out-token are the same slot
    #[error("In-token and out-token must differ (both {0})")]
    SameToken(usize),

    #[error("Negative {field} for token {index}: {value}")]
    NegativeValue {
        field: &'static str,
        index: usize,
        value: Decimal,
    },

    #[error("Price of token {index} must be positive, got {value}")]
    NonPositivePrice { index: usize, value: Decimal },

    #[error("Negative amount: {0}")]
    NegativeAmount(Decimal),

    /// Pool parameter outside its allowed range
    #[error("Invalid parameter {name} = {value}: expected {expected}")]
    InvalidParameter {
        name: &'static str,
        value: Decimal,
        expected: &'static str,
    },

    /// Total pool value is zero, weights are undefined
    #[error("Pool value is zero")]
    ZeroPoolValue,

    /// Total LP value is zero, nothing can be redeemed
    #[error("LP token value is zero")]
    ZeroLpValue,

    /// Withdrawal in a token that has no LP tokens in circulation
    #[error("No LP tokens of token {0} in circulation")]
    NoLpTokens(usize),

    #[error("Unit conversion failed: {0}")]
    Conversion(String),

    /// Pool values too large or too small for the decimal range
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Failures of the curve arithmetic, turned into "Math error." rejections
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    /// Power series base outside `[2/3, 1.5]`
    #[error("The base must be between 2/3 and 1.5, got {0}")]
    Domain(Decimal),

    #[error("Result overflows the decimal range")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

pub type Result<T> = std::result::Result<T, EngineError>;
