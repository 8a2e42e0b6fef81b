//! Process configuration, read once from the environment at startup

use std::net::SocketAddr;
use std::path::PathBuf;

use crypto_market::exchange::CoinGeckoConfig;
use sentient_runtime::huggingface::{self, HuggingFaceConfig};
use thiserror::Error;
use url::Url;

pub const DEFAULT_FORM_LINK: &str = "https://forms.gle/PoFCvvGboz4E9dJv6";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SESSION_TTL_SECS: i64 = 30 * 60;

/// Bot token variables, checked in order
const TOKEN_VARS: [&str; 3] = ["TOKEN", "BOT_TOKEN", "TELOXIDE_TOKEN"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("bot token missing: set one of TOKEN, BOT_TOKEN or TELOXIDE_TOKEN")]
    MissingBotToken,

    #[error("invalid {var}='{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub model: String,
    pub inference: HuggingFaceConfig,
    pub market: CoinGeckoConfig,
    pub bind_addr: SocketAddr,
    pub session_ttl: chrono::Duration,
    pub form_link: Url,
    pub faq_path: Option<PathBuf>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &sentient_runtime::mask_token(&self.bot_token))
            .field("model", &self.model)
            .field("inference", &self.inference)
            .field("market", &self.market)
            .field("bind_addr", &self.bind_addr)
            .field("session_ttl", &self.session_ttl)
            .field("form_link", &self.form_link.as_str())
            .field("faq_path", &self.faq_path)
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = TOKEN_VARS
            .iter()
            .find_map(|&var| get(var))
            .ok_or(ConfigError::MissingBotToken)?;

        let inference = HuggingFaceConfig {
            base_url: get("HF_BASE_URL").unwrap_or_else(|| huggingface::DEFAULT_BASE_URL.into()),
            token: get("HF_TOKEN"),
            timeout_secs: parse_or("HF_TIMEOUT_SECS", get("HF_TIMEOUT_SECS"), 120)?,
        };

        let market_defaults = CoinGeckoConfig::default();
        let market = CoinGeckoConfig {
            base_url: get("COINGECKO_BASE_URL").unwrap_or(market_defaults.base_url),
            api_key: get("COINGECKO_API_KEY"),
            timeout_secs: market_defaults.timeout_secs,
        };

        let ttl_secs: i64 = parse_or("SESSION_TTL_SECS", get("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS)?;
        if ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                var: "SESSION_TTL_SECS",
                value: ttl_secs.to_string(),
                reason: "must be positive".into(),
            });
        }

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            var: "BIND_ADDR",
            value: bind_raw.clone(),
            reason: e.to_string(),
        })?;

        let form_raw = get("FORM_LINK").unwrap_or_else(|| DEFAULT_FORM_LINK.into());
        let form_link = Url::parse(&form_raw).map_err(|e| ConfigError::Invalid {
            var: "FORM_LINK",
            value: form_raw.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            bot_token,
            model: get("HF_MODEL").unwrap_or_else(|| huggingface::DEFAULT_MODEL.into()),
            inference,
            market,
            bind_addr,
            session_ttl: chrono::Duration::seconds(ttl_secs),
            form_link,
            faq_path: get("FAQ_PATH").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
