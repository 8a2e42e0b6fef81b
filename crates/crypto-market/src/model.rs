//! Domain Models
//!
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Discrete bucket derived from the 24h percent change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    VeryBullish,
    Bullish,
    SlightlyBullish,
    SlightlyBearish,
    Bearish,
    VeryBearish,
}

/// Strict lower bounds, checked top to bottom; first match wins.
const SENTIMENT_TABLE: [(Decimal, Sentiment); 5] = [
    (dec!(5), Sentiment::VeryBullish),
    (dec!(2), Sentiment::Bullish),
    (dec!(0), Sentiment::SlightlyBullish),
    (dec!(-2), Sentiment::SlightlyBearish),
    (dec!(-5), Sentiment::Bearish),
];

impl Sentiment {
    pub fn from_change(change_24h: Decimal) -> Self {
        SENTIMENT_TABLE
            .iter()
            .find(|(floor, _)| change_24h > *floor)
            .map_or(Self::VeryBearish, |(_, sentiment)| *sentiment)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryBullish => "Very Bullish",
            Self::Bullish => "Bullish",
            Self::SlightlyBullish => "Slightly Bullish",
            Self::SlightlyBearish => "Slightly Bearish",
            Self::Bearish => "Bearish",
            Self::VeryBearish => "Very Bearish",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::VeryBullish => "🚀",
            Self::Bullish => "📈",
            Self::SlightlyBullish => "➕",
            Self::SlightlyBearish => "➖",
            Self::Bearish => "📉",
            Self::VeryBearish => "🔻",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

/// Single point-in-time market record for one asset. Built per request, never cached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Full name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker, upper-cased (e.g., "BTC")
    pub symbol: String,

    pub current_price: Decimal,

    /// 24-hour price change percentage
    pub change_24h: Decimal,

    pub market_cap: Decimal,
    pub total_volume: Decimal,
    pub high_24h: Decimal,
    pub low_24h: Decimal,

    /// Position by market cap; the provider leaves it empty for tiny assets
    pub market_cap_rank: Option<u32>,

    pub sentiment: Sentiment,

    /// Model commentary attached after the fetch
    pub analysis: Option<String>,
}

impl MarketSnapshot {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, current_price: Decimal) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into().to_uppercase(),
            current_price,
            change_24h: Decimal::ZERO,
            market_cap: Decimal::ZERO,
            total_volume: Decimal::ZERO,
            high_24h: Decimal::ZERO,
            low_24h: Decimal::ZERO,
            market_cap_rank: None,
            sentiment: Sentiment::from_change(Decimal::ZERO),
            analysis: None,
        }
    }

    /// Set the 24h change and re-derive the sentiment from it
    #[must_use]
    pub fn with_change(mut self, change_24h: Decimal) -> Self {
        self.change_24h = change_24h;
        self.sentiment = Sentiment::from_change(change_24h);
        self
    }

    #[must_use]
    pub fn with_analysis(mut self, analysis: impl Into<String>) -> Self {
        self.analysis = Some(analysis.into());
        self
    }
}
