use crate::models::NumberLocale;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub market: MarketConfig,

    /// Instruments to scrape, in submission order.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<SymbolConfig>,
}

/// Outbound HTTP behaviour shared by the scraper and the API client.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Remote persistence API endpoint and credentials.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base_url: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Exchange operating hours, expressed against a fixed UTC offset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketConfig {
    /// Offset of the exchange's clock from UTC, in whole hours.
    /// Paris standard time is +1; this does not track DST.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,

    /// Last hour-of-day (inclusive) during which the exchange counts as open.
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
}

/// One tracked instrument: where to scrape it and how its numbers are written.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SymbolConfig {
    pub name: String,
    pub url: String,

    #[serde(default)]
    pub locale: NumberLocale,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    "bourse-etl/0.1 (quote collection)".to_string()
}
fn default_api_base() -> String {
    "http://localhost:8000".to_string()
}
fn default_utc_offset_hours() -> i32 {
    1
}
fn default_close_hour() -> u32 {
    18
}

/// Default instrument table, built from the historical environment contract
/// (`CAC_DATA` / `LVC_DATA` scrape URLs). A `symbols` array in the config
/// file replaces this entirely.
fn default_symbols() -> Vec<SymbolConfig> {
    let mut symbols = Vec::new();

    if let Ok(url) = std::env::var("CAC_DATA") {
        symbols.push(SymbolConfig {
            name: "cac".to_string(),
            url,
            locale: NumberLocale::EuropeanDecimalComma,
        });
    }
    if let Ok(url) = std::env::var("LVC_DATA") {
        symbols.push(SymbolConfig {
            name: "lvc".to_string(),
            url,
            locale: NumberLocale::StandardDecimalPoint,
        });
    }

    symbols
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("BOURSE").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            api: ApiConfig::default(),
            market: MarketConfig::default(),
            symbols: default_symbols(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
            close_hour: default_close_hour(),
        }
    }
}
