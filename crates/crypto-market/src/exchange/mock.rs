//! Mock Market Client
//!
//! For tests and offline demos. Returns static snapshots keyed by provider id.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::Mutex;

use super::MarketDataClient;
use crate::error::{MarketError, Result};
use crate::model::MarketSnapshot;
use crate::symbols::coin_id;

/// Mock market client with static prices
pub struct MockMarketClient {
    offline: bool,
    queried: Mutex<Vec<String>>,
}

impl Default for MockMarketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketClient {
    pub fn new() -> Self {
        Self {
            offline: false,
            queried: Mutex::new(Vec::new()),
        }
    }

    /// Every lookup fails as if the network were down
    pub fn offline() -> Self {
        Self {
            offline: true,
            queried: Mutex::new(Vec::new()),
        }
    }

    /// Provider ids looked up so far
    pub async fn queried(&self) -> Vec<String> {
        self.queried.lock().await.clone()
    }

    fn row(id: &str) -> Option<(&'static str, &'static str, Decimal, Decimal, Decimal, u32)> {
        // (name, symbol, price, 24h change, market cap, rank)
        match id {
            "bitcoin" => Some(("Bitcoin", "btc", dec!(97500), dec!(2.5), dec!(1930000000000), 1)),
            "ethereum" => Some(("Ethereum", "eth", dec!(3450), dec!(-1.8), dec!(415000000000), 2)),
            "solana" => Some(("Solana", "sol", dec!(195), dec!(6.2), dec!(92000000000), 5)),
            "dogecoin" => Some(("Dogecoin", "doge", dec!(0.38), dec!(0), dec!(56000000000), 8)),
            "cardano" => Some(("Cardano", "ada", dec!(0.95), dec!(-7.5), dec!(33000000000), 9)),
            _ => None,
        }
    }
}

#[async_trait]
impl MarketDataClient for MockMarketClient {
    async fn snapshot(&self, symbol: &str) -> Result<Option<MarketSnapshot>> {
        let id = coin_id(symbol);
        self.queried.lock().await.push(id.clone());

        if self.offline {
            return Err(MarketError::Provider("mock market offline".into()));
        }

        Ok(Self::row(&id).map(|(name, ticker, price, change, cap, rank)| {
            let mut snapshot = MarketSnapshot::new(name, ticker, price).with_change(change);
            snapshot.market_cap = cap;
            snapshot.total_volume = cap / dec!(40);
            snapshot.high_24h = price * dec!(1.02);
            snapshot.low_24h = price * dec!(0.97);
            snapshot.market_cap_rank = Some(rank);
            snapshot
        }))
    }

    async fn health_check(&self) -> bool {
        !self.offline
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentiment;

    #[tokio::test]
    async fn test_mock_lookup_by_ticker() {
        let market = MockMarketClient::new();

        let btc = market.snapshot("BTC").await.unwrap().unwrap();
        assert_eq!(btc.symbol, "BTC");
        assert_eq!(btc.sentiment, Sentiment::Bullish);
        assert_eq!(market.queried().await, vec!["bitcoin".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_none() {
        let market = MockMarketClient::new();
        assert!(market.snapshot("ZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_offline_is_error() {
        let market = MockMarketClient::offline();
        assert!(market.snapshot("btc").await.is_err());
        assert!(!market.health_check().await);
    }
}
