//! # RAMM Pool Configuration
//!
//! Loads the curve parameters and token metadata of RAMM pools so previews
//! run with the same constants as the deployed contracts.
//!
//! ## Features
//!
//! - **Pool Parameters**: delta, base fee, base leverage and protocol fee per
//!   pool, defaulting to the deployed values
//! - **Token Metadata**: symbols and decimal places of assets, LP tokens and
//!   price feeds, used to convert on-chain integer readings
//! - **Layered Loading**: base TOML file, optional environment file,
//!   `RAMM_`-prefixed environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ramm_config::RammConfig;
//!
//! let config = RammConfig::load(None, Some("staging"))?;
//! let pool = config.pool("RAMM Pool - Polygon Mainnet").expect("pool configured");
//! let params = pool.params()?;
//! let weth = pool.token_index("WETH");
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod defaults;
pub mod pool_config;

pub use pool_config::{load_config, GlobalConfig, PoolConfig, RammConfig, TokenConfig};
