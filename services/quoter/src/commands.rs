//! Command execution against a loaded pool

use crate::cli::Command;
use anyhow::Result;
use ramm_config::PoolConfig;
use ramm_engine::{to_base_units, Decimal, Pool, RammPricing, TradeOutcome, TradeQuote};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Pool plus the metadata needed to name tokens in the output
pub struct Quoter<'a> {
    pub config: &'a PoolConfig,
    pub pool: Pool,
    pub base_units: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Payout {
    token: String,
    amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    base_units: Option<String>,
}

impl<'a> Quoter<'a> {
    pub fn new(config: &'a PoolConfig, pool: Pool, base_units: bool) -> Self {
        Self {
            config,
            pool,
            base_units,
        }
    }

    pub fn run(&self, command: &Command) -> Result<Value> {
        match command {
            Command::TradeIn { from, to, amount } => {
                let (i, o) = (self.token(from)?, self.token(to)?);
                let outcome = self.pool.quote_given_in(i, o, *amount)?;
                self.log_trade(i, o, &outcome);
                self.trade_output(&outcome, o)
            }
            Command::TradeOut { from, to, amount } => {
                let (i, o) = (self.token(from)?, self.token(to)?);
                let outcome = self.pool.quote_given_out(i, o, *amount)?;
                self.log_trade(i, o, &outcome);
                self.trade_output(&outcome, i)
            }
            Command::Deposit { token, amount } => {
                let i = self.token(token)?;
                let minted = self.pool.deposit_quote(i, *amount)?;
                info!(token = %self.symbol(i), %amount, %minted, "Deposit quoted");

                let mut output = json!({
                    "token": self.symbol(i),
                    "lpTokens": minted.normalize().to_string(),
                });
                if self.base_units {
                    let decimals = self.config.tokens[i].lp_decimals;
                    output["lpTokensBaseUnits"] = json!(to_base_units(minted, decimals)?.to_string());
                }
                Ok(output)
            }
            Command::Withdraw { token, lpt } => {
                let o = self.token(token)?;
                let outcome = self.pool.withdrawal_quote(o, *lpt)?;
                if outcome.is_partial() {
                    warn!(
                        token = %self.symbol(o),
                        remaining = %outcome.remaining_amount,
                        "Withdrawal only partially covered"
                    );
                }

                let payouts = outcome
                    .amounts_per_token
                    .iter()
                    .map(|payout| self.payout(payout.token_index, payout.amount))
                    .collect::<Result<Vec<_>>>()?;

                Ok(json!({
                    "token": self.symbol(o),
                    "totalAmount": outcome.total_amount.normalize().to_string(),
                    "remainingAmount": outcome.remaining_amount.normalize().to_string(),
                    "partial": outcome.is_partial(),
                    "payouts": payouts,
                }))
            }
            Command::Redeem { lpt } => {
                let value = self.pool.redeem_quote(*lpt)?;
                Ok(json!({ "amount": value.normalize().to_string() }))
            }
        }
    }

    fn token(&self, token: &str) -> Result<usize> {
        self.config.resolve_token(token)
    }

    fn symbol(&self, index: usize) -> &str {
        self.config
            .tokens
            .get(index)
            .map(|t| t.symbol.as_str())
            .unwrap_or("?")
    }

    fn log_trade(&self, i: usize, o: usize, outcome: &TradeOutcome) {
        if outcome.execute {
            info!(from = %self.symbol(i), to = %self.symbol(o), amount = %outcome.amount, "Trade quoted");
        } else {
            warn!(from = %self.symbol(i), to = %self.symbol(o), reason = %outcome.message, "Trade refused");
        }
    }

    /// `amount_token` is the token the quoted amount is denominated in
    fn trade_output(&self, outcome: &TradeOutcome, amount_token: usize) -> Result<Value> {
        let base_units = if self.base_units && outcome.execute {
            let decimals = self.config.tokens[amount_token].decimals;
            Some(to_base_units(outcome.amount, decimals)?.to_string())
        } else {
            None
        };

        let mut output = serde_json::to_value(TradeQuote::from(outcome))?;
        if let Some(units) = base_units {
            output["amountBaseUnits"] = json!(units);
        }
        Ok(output)
    }

    fn payout(&self, index: usize, amount: Decimal) -> Result<Payout> {
        let base_units = if self.base_units {
            Some(to_base_units(amount, self.config.tokens[index].decimals)?.to_string())
        } else {
            None
        };

        Ok(Payout {
            token: self.symbol(index).to_string(),
            amount: amount.normalize().to_string(),
            base_units,
        })
    }
}
