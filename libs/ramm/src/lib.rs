//! # RAMM Pricing Engine
//!
//! ## Purpose
//!
//! Off-chain replica of the RAMM bonding-curve math. Given a snapshot of a
//! pool it previews trade outputs, deposit mint amounts and withdrawal payouts
//! exactly as the contract would compute them, including whether the
//! contract's imbalance guard would let the operation through.
//!
//! ## Integration Points
//!
//! - **Input Sources**: [`PoolState`] snapshots assembled by a chain reader,
//!   [`PoolParams`] from pool configuration
//! - **Output Destinations**: transaction builders and user interfaces, via
//!   [`TradeOutcome`], [`WithdrawalOutcome`] and [`TradeQuote`]
//! - **Precision**: every amount, weight, ratio and price impact is a
//!   [`Decimal`]; no floating point anywhere in the pricing path
//!
//! ## Architecture Role
//!
//! ```text
//! PoolState ──► aggregates (B, L, weights, ratios)
//!                  │
//!                  ├──► trade ──► guard ──► TradeOutcome
//!                  └──► liquidity ───────► mint amount / WithdrawalOutcome
//! ```
//!
//! All functions are pure and synchronous. Nothing is cached between calls.
//!
//! ## Error Model
//!
//! Business rejections are values: a [`TradeOutcome`] with `execute == false`
//! or a [`WithdrawalOutcome`] with a non-zero `remaining_amount`. Caller
//! mistakes (bad indices, mismatched lengths, negative inputs) are
//! [`EngineError`]s.

pub mod aggregates;
mod checked;
pub mod error;
pub mod guard;
pub mod liquidity;
pub mod pool;
pub mod power;
pub mod quote;
pub mod state;
pub mod trade;
pub mod units;

pub use aggregates::{imbalance_ratios, totals, weights, Totals};
pub use error::{EngineError, MathError, Result};
pub use guard::{allows, scaled_fee_and_leverage, TradeLegs};
pub use liquidity::{
    deposit_mint_amount, redeem_amount, single_asset_withdrawal, TokenPayout, WithdrawalOutcome,
};
pub use pool::{Pool, RammPricing};
pub use power::power;
pub use quote::TradeQuote;
pub use state::{PoolParams, PoolState};
pub use trade::{price_impact, trade_given_in, trade_given_out, TradeCase, TradeOutcome, TradeStatus};
pub use units::{from_base_units, to_base_units, RawPoolReading, UnitScales};

/// Common types for pricing calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
