use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

use exhibit_scraper::apis::{create_date_normalizer, create_source, HttpFetcher, PlacesClient};
use exhibit_scraper::config::Config;
use exhibit_scraper::export::{write_directory, write_report, ExportFormat};
use exhibit_scraper::logging;
use exhibit_scraper::normalize::DateNormalizer;
use exhibit_scraper::pipeline::Pipeline;
use exhibit_scraper::types::{ExhibitionSource, Museum};

#[derive(Parser)]
#[command(name = "exhibit_scraper")]
#[command(about = "Current exhibitions from Taipei museums and cultural parks")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $EXHIBIT_SCRAPER_CONFIG, then config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the museums and write the report
    Run {
        /// Museums to scrape (comma-separated). Default: all
        #[arg(long)]
        museums: Option<String>,
        /// Report path (overrides the config file)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Report format; inferred from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
    /// Resolve one raw date string the way a museum's adapter would
    ParseDate {
        /// Museum key, e.g. huashan
        #[arg(long)]
        museum: String,
        /// Reference date for year inference (YYYY-MM-DD). Default: today
        #[arg(long)]
        reference: Option<NaiveDate>,
        /// Raw date text
        raw: String,
    },
    /// Build a directory of Taipei museums and galleries from Google Places
    /// (needs GOOGLE_PLACES_API_KEY)
    Directory {
        /// Directory path (overrides the config file)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format; inferred from the output extension when omitted
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },
    /// List supported museums
    List,
}

/// Parse a comma-separated museum list, warning about and skipping unknown keys
fn select_museums(list: Option<&str>) -> Vec<Museum> {
    let Some(list) = list else {
        return Museum::ALL.to_vec();
    };
    list.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .filter_map(|key| match key.parse::<Museum>() {
            Ok(museum) => Some(museum),
            Err(e) => {
                warn!("{}", e);
                println!("⚠️  {}", e);
                None
            }
        })
        .collect()
}

async fn run(
    config: Config,
    museums: Option<String>,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> Result<()> {
    let museums = select_museums(museums.as_deref());
    if museums.is_empty() {
        anyhow::bail!("no known museums selected");
    }

    let fetcher = HttpFetcher::new(&config.http).context("building HTTP client")?;
    let reference = Local::now().date_naive();
    let sources: Vec<Box<dyn ExhibitionSource>> = museums
        .into_iter()
        .map(|museum| create_source(museum, fetcher.clone(), reference))
        .collect();

    info!("Starting run over {} museums", sources.len());
    let summary = Pipeline::run(sources).await;

    let path = output.unwrap_or(config.output.path);
    let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
    write_report(&path, &summary.records, format)
        .with_context(|| format!("writing report to {}", path.display()))?;

    println!("\n📊 Run results:");
    for outcome in &summary.outcomes {
        match &outcome.error {
            None => println!("   {:<10} {:>4} exhibitions", outcome.museum.key(), outcome.records),
            Some(e) => println!("   {:<10} failed: {}", outcome.museum.key(), e),
        }
    }
    println!("   Total: {}", summary.total_records());
    println!("   Unresolved dates: {}", summary.unresolved_dates());
    println!("💾 Saved report to {}", path.display());
    Ok(())
}

async fn directory(config: Config, output: Option<PathBuf>, format: Option<ExportFormat>) -> Result<()> {
    let fetcher = HttpFetcher::new(&config.http).context("building HTTP client")?;
    let path = output.unwrap_or_else(|| config.directory.path.clone());
    let client = PlacesClient::from_env(fetcher, config.directory)?;

    let entries = client.collect_directory().await?;
    let format = format.unwrap_or_else(|| ExportFormat::from_path(&path));
    write_directory(&path, &entries, format)
        .with_context(|| format!("writing directory to {}", path.display()))?;
    println!("📁 Saved directory to {}", path.display());
    Ok(())
}

fn parse_date(museum: &str, reference: Option<NaiveDate>, raw: &str) -> Result<()> {
    let museum: Museum = museum.parse()?;
    let reference = reference.unwrap_or_else(|| Local::now().date_naive());
    let resolution = create_date_normalizer(museum, reference).normalize(raw);
    println!("{}", serde_json::to_string(&resolution)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            museums,
            output,
            format,
        } => {
            let config = Config::load(cli.config.as_deref()).context("loading config")?;
            println!("🔄 Scraping current exhibitions...");
            run(config, museums, output, format).await?;
        }
        Commands::ParseDate {
            museum,
            reference,
            raw,
        } => parse_date(&museum, reference, &raw)?,
        Commands::Directory { output, format } => {
            let config = Config::load(cli.config.as_deref()).context("loading config")?;
            directory(config, output, format).await?;
        }
        Commands::List => {
            for museum in Museum::ALL {
                println!("{:<10} {}", museum.key(), museum.display_name());
            }
        }
    }
    Ok(())
}
