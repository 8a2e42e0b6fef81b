//! Ticker → provider id mapping

/// Short tickers the provider only knows by their canonical id
const KNOWN_TICKERS: [(&str, &str); 12] = [
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("bnb", "binancecoin"),
    ("doge", "dogecoin"),
    ("ada", "cardano"),
    ("dot", "polkadot"),
    ("matic", "matic-network"),
    ("sol", "solana"),
    ("avax", "avalanche-2"),
    ("link", "chainlink"),
    ("atom", "cosmos"),
    ("xrp", "ripple"),
];

/// Resolve a user-typed symbol to the provider id.
///
/// Case-insensitive; anything not in the table passes through lower-cased.
pub fn coin_id(symbol: &str) -> String {
    let lower = symbol.trim().to_lowercase();
    KNOWN_TICKERS
        .iter()
        .find(|(ticker, _)| *ticker == lower)
        .map_or(lower, |(_, id)| (*id).to_string())
}
