mod api;
mod config;
mod error;
mod market;
mod models;
mod pipeline;
mod scraper;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;
use crate::pipeline::Pipeline;
use crate::scraper::{QuoteSource, SiteScraper};

#[derive(Parser)]
#[command(name = "bourse-etl", about = "Stock quote scrape-and-submit ETL", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape every configured symbol and submit quotes to the API
    Run,

    /// Scrape one symbol and print its normalized records, without submitting
    Scrape {
        /// Symbol name as configured (e.g. cac, lvc)
        symbol: String,
    },

    /// Show the resolved configuration (credentials redacted)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "bourse_etl=info,warn",
        1 => "bourse_etl=debug,info",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Run => {
            let _t = utils::Timer::start("Quote collection run");
            let report = Pipeline::new(config).run().await?;

            info!(
                "Done: {} records submitted across {} symbols, {} errors",
                report.records_submitted,
                report.outcomes.len(),
                report.errors
            );

            if !report.is_success() {
                error!("{} symbol(s) yielded no submittable data", report.errors);
                std::process::exit(1);
            }
        }

        Command::Scrape { symbol } => {
            let Some(entry) = config.symbols.iter().find(|s| s.name == symbol) else {
                error!(
                    "Unknown symbol {:?} — configured: {:?}",
                    symbol,
                    config.symbols.iter().map(|s| &s.name).collect::<Vec<_>>()
                );
                std::process::exit(1);
            };

            let scraper = SiteScraper::new(&config.http)?;
            let series = scraper.fetch_series(entry).await?;

            if series.is_empty() {
                error!("{}: page fetched but no usable rows", symbol);
                std::process::exit(1);
            }

            println!("{} — {} records (newest first):", symbol, series.len());
            for record in &series {
                println!(
                    "  {}  close {:>10.2}  open {:>10.2}  high {:>10.2}  low {:>10.2}",
                    record.date.format("%d/%m/%Y"),
                    record.closing,
                    record.opening,
                    record.higher,
                    record.lower
                );
            }
        }

        Command::Config => {
            println!("API base   : {}", config.api.base_url);
            println!("API user   : {}", config.api.username);
            println!("API pass   : {}", if config.api.password.is_empty() { "(unset)" } else { "***" });
            println!(
                "Market     : UTC{:+}h, open until {}h inclusive (Mon–Fri)",
                config.market.utc_offset_hours, config.market.close_hour
            );
            println!("Symbols    :");
            for s in &config.symbols {
                println!("  {:6} {:?}  {}", s.name, s.locale, s.url);
            }
            if config.symbols.is_empty() {
                println!("  (none — set CAC_DATA/LVC_DATA or a [[symbols]] table)");
            }
        }
    }

    Ok(())
}
