//! CoinGecko Client
//!
//! Live snapshots from the public `/coins/markets` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::MarketDataClient;
use crate::error::{MarketError, Result};
use crate::model::{MarketSnapshot, Sentiment};
use crate::symbols::coin_id;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

#[derive(Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,

    /// Optional demo API key, sent as `x-cg-demo-api-key`
    pub api_key: Option<String>,

    pub timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for CoinGeckoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinGeckoConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

pub struct CoinGeckoClient {
    client: Client,
    config: CoinGeckoConfig,
}

impl CoinGeckoClient {
    pub fn new(config: CoinGeckoConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sentient-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MarketError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.header("x-cg-demo-api-key", key),
            None => builder,
        }
    }

    /// Convert the first market row to a snapshot
    fn convert(rows: Vec<CoinMarket>) -> Option<MarketSnapshot> {
        let row = rows.into_iter().next()?;
        let change_24h = row.price_change_percentage_24h.unwrap_or_default();

        Some(MarketSnapshot {
            name: row.name.unwrap_or_else(|| "Unknown".into()),
            symbol: row.symbol.unwrap_or_default().to_uppercase(),
            current_price: row.current_price.unwrap_or_default(),
            change_24h,
            market_cap: row.market_cap.unwrap_or_default(),
            total_volume: row.total_volume.unwrap_or_default(),
            high_24h: row.high_24h.unwrap_or_default(),
            low_24h: row.low_24h.unwrap_or_default(),
            market_cap_rank: row.market_cap_rank,
            sentiment: Sentiment::from_change(change_24h),
            analysis: None,
        })
    }
}

#[async_trait]
impl MarketDataClient for CoinGeckoClient {
    async fn snapshot(&self, symbol: &str) -> Result<Option<MarketSnapshot>> {
        let id = coin_id(symbol);
        if id.is_empty() {
            return Ok(None);
        }

        let response = self
            .request(self.client.get(self.url("coins/markets")))
            .query(&[
                ("vs_currency", "usd"),
                ("ids", id.as_str()),
                ("order", "market_cap_desc"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h,7d"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MarketError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let rows: Vec<CoinMarket> = serde_json::from_str(&body)?;
        tracing::debug!(coin_id = %id, rows = rows.len(), "coingecko markets response");
        Ok(Self::convert(rows))
    }

    async fn health_check(&self) -> bool {
        match self.request(self.client.get(self.url("ping"))).send().await {
            Ok(r) => r.status().is_success(),
            Err(e) => {
                tracing::warn!("CoinGecko health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

/// One row of `/coins/markets`. Any numeric field can be `null`.
#[derive(Debug, Deserialize)]
struct CoinMarket {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    current_price: Option<Decimal>,
    #[serde(default)]
    price_change_percentage_24h: Option<Decimal>,
    #[serde(default)]
    market_cap: Option<Decimal>,
    #[serde(default)]
    total_volume: Option<Decimal>,
    #[serde(default)]
    high_24h: Option<Decimal>,
    #[serde(default)]
    low_24h: Option<Decimal>,
    #[serde(default)]
    market_cap_rank: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BITCOIN_ROW: &str = r#"[{
        "id": "bitcoin",
        "symbol": "btc",
        "name": "Bitcoin",
        "current_price": 97512.5,
        "market_cap": 1930000000000,
        "market_cap_rank": 1,
        "total_volume": 25400000000,
        "high_24h": 98123.0,
        "low_24h": 94001.25,
        "price_change_percentage_24h": -1.25,
        "price_change_percentage_7d_in_currency": 4.1
    }]"#;

    #[test]
    fn test_convert_first_row() {
        let rows: Vec<CoinMarket> = serde_json::from_str(BITCOIN_ROW).unwrap();
        let snapshot = CoinGeckoClient::convert(rows).unwrap();

        assert_eq!(snapshot.name, "Bitcoin");
        assert_eq!(snapshot.symbol, "BTC");
        assert_eq!(snapshot.current_price, dec!(97512.5));
        assert_eq!(snapshot.change_24h, dec!(-1.25));
        assert_eq!(snapshot.market_cap, dec!(1930000000000));
        assert_eq!(snapshot.market_cap_rank, Some(1));
        assert_eq!(snapshot.sentiment, Sentiment::SlightlyBearish);
        assert!(snapshot.analysis.is_none());
    }

    #[test]
    fn test_convert_nulls_default_to_zero() {
        let raw = r#"[{"symbol": "new", "current_price": null, "market_cap_rank": null,
                       "price_change_percentage_24h": null}]"#;
        let rows: Vec<CoinMarket> = serde_json::from_str(raw).unwrap();
        let snapshot = CoinGeckoClient::convert(rows).unwrap();

        assert_eq!(snapshot.name, "Unknown");
        assert_eq!(snapshot.symbol, "NEW");
        assert_eq!(snapshot.current_price, Decimal::ZERO);
        assert_eq!(snapshot.market_cap_rank, None);
    }

    #[test]
    fn test_convert_empty_is_none() {
        assert!(CoinGeckoClient::convert(Vec::new()).is_none());
    }

    #[test]
    fn test_url_join() {
        let client = CoinGeckoClient::new(CoinGeckoConfig {
            base_url: "http://localhost:9999/api/v3/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.url("coins/markets"), "http://localhost:9999/api/v3/coins/markets");
    }
}
