pub mod cleaner;
pub mod http_client;
pub mod parsers;

use crate::config::{HttpConfig, SymbolConfig};
use crate::error::EtlError;
use crate::models::StockSeries;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use self::cleaner::assemble_records;
use self::http_client::HttpClient;
use self::parsers::extract_cells;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable quote source abstraction.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch and normalize the full published series for one instrument,
    /// newest record first, exactly as the source page orders it.
    async fn fetch_series(&self, symbol: &SymbolConfig) -> Result<StockSeries, EtlError>;
}

// ── HTML table scraper ────────────────────────────────────────────────────────

/// Scrapes the quote table from each instrument's configured page.
pub struct SiteScraper {
    client: HttpClient,
}

impl SiteScraper {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl QuoteSource for SiteScraper {
    async fn fetch_series(&self, symbol: &SymbolConfig) -> Result<StockSeries, EtlError> {
        debug!("Fetching quote page for {}: {}", symbol.name, symbol.url);

        let html = self.client.get_text(&symbol.url).await?;
        let cells = extract_cells(&html, &symbol.url)?;

        if cells.is_empty() {
            warn!("{}: quote table present but carries no cells", symbol.name);
        }

        let records = assemble_records(&cells, symbol.locale);
        debug!("{}: {} usable rows out of {} cells", symbol.name, records.len(), cells.len());

        Ok(records)
    }
}
