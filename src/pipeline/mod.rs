//! Pipeline orchestrator: ties scraper → gate → API submission together.
//!
//! One run, invoked periodically by an external scheduler:
//!   1. Log in once; the bearer token lives for the whole run.
//!   2. Decide once, from the configured exchange clock, whether the market
//!      is still open (today's newest row is then provisional).
//!   3. For each configured symbol, sequentially: scrape, assemble, gate,
//!      submit, interpret.
//!
//! Failure isolation is per symbol: a symbol whose scrape fails or yields
//! nothing is logged and counted, and the loop moves on. Submission
//! non-success statuses are reported outcomes, never errors.

use crate::api::{outcome, ApiClient};
use crate::config::AppConfig;
use crate::error::EtlError;
use crate::market::MarketHours;
use crate::models::{Severity, SubmissionOutcome};
use crate::scraper::{QuoteSource, SiteScraper};
use crate::utils::truncate_for_log;
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{error, info, warn};

const LOG_BODY_MAX: usize = 200;

pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<RunReport> {
        anyhow::ensure!(
            !self.config.symbols.is_empty(),
            "No symbols configured — set CAC_DATA/LVC_DATA or a [[symbols]] table"
        );

        let scraper = SiteScraper::new(&self.config.http).context("Failed to build scraper")?;
        let api = ApiClient::new(&self.config.http, &self.config.api)
            .context("Failed to build API client")?;

        // ── 1. Authenticate once ──────────────────────────────────────────────
        let token = api
            .login(&self.config.api.username, &self.config.api.password)
            .await
            .context("Login failed — nothing can be submitted")?;
        info!("Authenticated against {}", self.config.api.base_url);

        // ── 2. Market-hours gate, decided once per run ────────────────────────
        let gate = MarketHours::new(&self.config.market)?;
        let drop_newest = gate.is_open(Utc::now());
        if drop_newest {
            info!("Market still open — today's provisional row will be dropped");
        }

        // ── 3. Sequential per-symbol loop ─────────────────────────────────────
        let mut report = RunReport::default();

        for symbol in &self.config.symbols {
            info!("=== Scraping {} ===", symbol.name.to_uppercase());

            let mut series = match scraper.fetch_series(symbol).await {
                Ok(series) => series,
                Err(e) => {
                    error!("{}: {}", symbol.name, e);
                    report.errors += 1;
                    continue;
                }
            };

            if drop_newest && !series.is_empty() {
                let dropped = series.remove(0);
                info!("{}: dropped open-day row dated {}", symbol.name, dropped.date);
            }

            if series.is_empty() {
                let e = EtlError::Validation {
                    symbol: symbol.name.clone(),
                };
                error!("{}", e);
                report.errors += 1;
                continue;
            }

            let (status, body) = match api.submit(&symbol.name, &series, &token).await {
                Ok(answer) => answer,
                Err(e) => {
                    error!("{}: {}", symbol.name, e);
                    report.errors += 1;
                    continue;
                }
            };

            report.records_submitted += series.len();
            let outcome = outcome::interpret(&symbol.name, status, &body);
            log_outcome(&outcome);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }
}

fn log_outcome(outcome: &SubmissionOutcome) {
    let message = truncate_for_log(&outcome.message, LOG_BODY_MAX);
    match outcome.severity {
        Severity::Success => info!("{} [{}]: {}", outcome.symbol, outcome.status, message),
        Severity::Warning => warn!("{} [{}]: {}", outcome.symbol, outcome.status, message),
        Severity::Failure => error!(
            "{} [{}]: submission rejected: {}",
            outcome.symbol, outcome.status, message
        ),
    }
}

/// What one run did, for reporting and the exit code.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records_submitted: usize,
    pub outcomes: Vec<SubmissionOutcome>,
    /// Symbols that never reached interpretation: transport or parse
    /// failure, zero usable rows, or an unreachable API.
    pub errors: usize,
}

impl RunReport {
    /// Exit-code contract: pipeline-stage failures make the run fail;
    /// submission warnings/failures are reported outcomes only.
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}
