//! Market Data Integration
//!
//! Abstraction over the market-data provider plus the live and mock clients.

mod coingecko;
mod mock;

pub use coingecko::{CoinGeckoClient, CoinGeckoConfig};
pub use mock::MockMarketClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MarketSnapshot;

/// Market data client trait (Strategy pattern)
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Snapshot for a user-typed ticker, in USD.
    ///
    /// `Ok(None)` means the provider does not know the symbol.
    async fn snapshot(&self, symbol: &str) -> Result<Option<MarketSnapshot>>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}
