//! Unified pricing interface over a pool snapshot

use crate::error::Result;
use crate::liquidity::{deposit_mint_amount, redeem_amount, single_asset_withdrawal, WithdrawalOutcome};
use crate::quote::TradeQuote;
use crate::state::{PoolParams, PoolState};
use crate::trade::{trade_given_in, trade_given_out, TradeOutcome};
use rust_decimal::Decimal;

/// Parameters and one snapshot of a RAMM pool
#[derive(Debug, Clone)]
pub struct Pool {
    pub params: PoolParams,
    pub state: PoolState,
}

impl Pool {
    pub fn new(params: PoolParams, state: PoolState) -> Self {
        Self { params, state }
    }
}

/// Pricing operations a pool previewer offers
pub trait RammPricing {
    /// Trade outcome for `amount_in` of `token_in`
    fn quote_given_in(&self, token_in: usize, token_out: usize, amount_in: Decimal)
        -> Result<TradeOutcome>;

    /// Trade outcome for receiving `amount_out` of `token_out`
    fn quote_given_out(
        &self,
        token_in: usize,
        token_out: usize,
        amount_out: Decimal,
    ) -> Result<TradeOutcome>;

    /// LP tokens minted for a deposit
    fn deposit_quote(&self, token_in: usize, amount_in: Decimal) -> Result<Decimal>;

    fn withdrawal_quote(&self, token_out: usize, lpt_amount: Decimal) -> Result<WithdrawalOutcome>;

    fn redeem_quote(&self, lpt_amount: Decimal) -> Result<Decimal>;

    /// Display form of [`RammPricing::quote_given_in`]
    fn trade_in_quote(&self, token_in: usize, token_out: usize, amount_in: Decimal) -> Result<TradeQuote> {
        self.quote_given_in(token_in, token_out, amount_in)
            .map(|outcome| TradeQuote::from(&outcome))
    }

    /// Display form of [`RammPricing::quote_given_out`]
    fn trade_out_quote(&self, token_in: usize, token_out: usize, amount_out: Decimal) -> Result<TradeQuote> {
        self.quote_given_out(token_in, token_out, amount_out)
            .map(|outcome| TradeQuote::from(&outcome))
    }
}

impl RammPricing for Pool {
    fn quote_given_in(
        &self,
        token_in: usize,
        token_out: usize,
        amount_in: Decimal,
    ) -> Result<TradeOutcome> {
        trade_given_in(token_in, token_out, amount_in, &self.state, &self.params)
    }

    fn quote_given_out(
        &self,
        token_in: usize,
        token_out: usize,
        amount_out: Decimal,
    ) -> Result<TradeOutcome> {
        trade_given_out(token_in, token_out, amount_out, &self.state, &self.params)
    }

    fn deposit_quote(&self, token_in: usize, amount_in: Decimal) -> Result<Decimal> {
        deposit_mint_amount(token_in, amount_in, &self.state)
    }

    fn withdrawal_quote(&self, token_out: usize, lpt_amount: Decimal) -> Result<WithdrawalOutcome> {
        single_asset_withdrawal(token_out, lpt_amount, &self.state, &self.params)
    }

    fn redeem_quote(&self, lpt_amount: Decimal) -> Result<Decimal> {
        redeem_amount(lpt_amount, &self.state)
    }
}
