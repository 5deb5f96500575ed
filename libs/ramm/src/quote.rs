//! Display-ready trade quotes

use crate::trade::TradeOutcome;
use rust_decimal::Decimal;
use serde::Serialize;

/// Shown instead of an amount when the trade would not execute
pub const TRADE_NOT_ALLOWED: &str = "Trade not allowed.";

/// String form of a [`TradeOutcome`] for user interfaces
///
/// Price impact is expressed in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeQuote {
    pub amount: String,
    pub swap_fee: String,
    pub protocol_fee: String,
    pub price_impact: String,
    pub execute: bool,
    pub message: String,
}

impl From<&TradeOutcome> for TradeQuote {
    fn from(outcome: &TradeOutcome) -> Self {
        if !outcome.execute {
            return Self {
                amount: TRADE_NOT_ALLOWED.to_string(),
                swap_fee: "0".to_string(),
                protocol_fee: outcome.protocol_fee.normalize().to_string(),
                price_impact: "0".to_string(),
                execute: false,
                message: outcome.message.clone(),
            };
        }

        Self {
            amount: outcome.amount.normalize().to_string(),
            swap_fee: outcome.swap_fee.normalize().to_string(),
            protocol_fee: outcome.protocol_fee.normalize().to_string(),
            price_impact: outcome
                .price_impact
                .saturating_mul(Decimal::ONE_HUNDRED)
                .normalize()
                .to_string(),
            execute: true,
            message: outcome.message.clone(),
        }
    }
}
