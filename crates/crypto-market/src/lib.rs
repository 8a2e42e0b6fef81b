//! # crypto-market
//!
//! Point-in-time market snapshots for a single ticker, the sentiment bucket
//! derived from the 24h move, and the chat report built from both.
//!
//! ## Flow
//!
//! ```text
//!  "BTC" ──► symbols::coin_id ──► MarketDataClient::snapshot ──► report::render
//!             ("bitcoin")          (CoinGecko /coins/markets)     (HTML text)
//! ```

pub mod error;
pub mod exchange;
pub mod model;
pub mod report;
pub mod symbols;

pub use error::{MarketError, Result};
pub use exchange::{CoinGeckoClient, MarketDataClient, MockMarketClient};
pub use model::{MarketSnapshot, Sentiment};
pub use report::{NOT_FOUND_MESSAGE, render_report};
pub use symbols::coin_id;
