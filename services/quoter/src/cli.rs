//! Command-line arguments

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pool configuration file
    #[arg(short, long, default_value = "config/pools.toml")]
    pub config: PathBuf,

    /// Environment override (loads environments/<name>.toml next to the config)
    #[arg(short, long)]
    pub environment: Option<String>,

    /// Pool name, defaults to the first configured pool
    #[arg(short, long)]
    pub pool: Option<String>,

    /// Snapshot JSON file, defaults to the pool's configured snapshot
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// Snapshot values are integer on-chain units
    #[arg(long)]
    pub raw: bool,

    /// Also report amounts in the token's smallest units
    #[arg(long)]
    pub base_units: bool,

    /// Log level, overrides the configured one
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Tokens are given by pool index or symbol
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sell an exact amount of one token
    TradeIn {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Buy an exact amount of one token
    TradeOut {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// LP tokens minted for a deposit
    Deposit {
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Payout for burning LP tokens of one token
    Withdraw {
        #[arg(long)]
        token: String,
        #[arg(long)]
        lpt: Decimal,
    },
    /// Value of an LP token amount at the current pool ratio
    Redeem {
        #[arg(long)]
        lpt: Decimal,
    },
}
