//! CLI entry point for the flight continent report.
//!
//! Fetches a year of schedules for each configured airport from aviationstack,
//! resolves destination continents through REST Countries, and prints an
//! airport × continent flight count table.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use flight_continents::{
    config::{Config, DEFAULT_COUNTRIES_BASE_URL},
    error::ReportError,
    fetch::BasicClient,
    infra::{aviationstack::AviationstackClient, restcountries::RestCountriesClient},
    output::{print_json, print_table, write_csv},
    report::{ReportOptions, run_report},
    services::{
        flight_source::Direction,
        geo_resolver::{CachingResolver, GeoResolver},
    },
    window::ReportWindow,
};
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "flight_continents")]
#[command(about = "Counts flights per destination continent for a set of airports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the airport × continent flight count table
    Report {
        /// Comma-separated IATA codes (overrides REPORT_AIRPORTS)
        #[arg(short, long, value_delimiter = ',')]
        airports: Option<Vec<String>>,

        /// Length of the trailing window in days (overrides REPORT_WINDOW_DAYS)
        #[arg(short, long)]
        days: Option<u64>,

        /// Which fetched direction to aggregate
        #[arg(long, value_enum, default_value_t = Direction::Arrival)]
        direction: Direction,

        /// How to emit the table
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// CSV file to write when --format csv is used
        #[arg(short, long, default_value = "continent_counts.csv")]
        output: String,

        /// Look every record's country up again instead of memoizing per code
        #[arg(long, default_value_t = false)]
        no_cache: bool,
    },
    /// Resolve a single country code to its continent
    Continent {
        /// ISO 3166-1 alpha-2 or alpha-3 code
        #[arg(value_name = "COUNTRY_CODE")]
        code: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = match init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {e}");
            None
        }
    };

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<ReportError>().is_some_and(ReportError::is_empty_result) => {
            println!("No data available for one or both airports.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Report run failed");
            eprintln!("An error occurred: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/flight_continents.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("flight_continents.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(file_guard)
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            airports,
            days,
            direction,
            format,
            output,
            no_cache,
        } => {
            let config = Config::from_env()?.with_overrides(airports, days)?;
            let options = ReportOptions {
                airports: config.airports.clone(),
                window: ReportWindow::ending_today(config.window_days),
                direction,
            };
            info!(
                airports = ?options.airports,
                start = %options.window.start,
                end = %options.window.end,
                "Starting continent report"
            );

            let source = AviationstackClient::new(
                BasicClient::new()?,
                config.api_key.clone(),
                config.flights_base_url.clone(),
            );
            let resolver = RestCountriesClient::new(BasicClient::new()?, config.countries_base_url.clone());

            let table = if no_cache {
                run_report(&source, &resolver, &options).await?
            } else {
                let cached = CachingResolver::new(resolver);
                let table = run_report(&source, &cached, &options).await?;
                info!(distinct_codes = cached.cached_len(), "Continent lookups complete");
                table
            };

            match format {
                OutputFormat::Table => print_table(&table),
                OutputFormat::Json => print_json(&table)?,
                OutputFormat::Csv => {
                    write_csv(&output, &table)?;
                    info!(path = %output, "CSV table written");
                }
            }
        }
        Commands::Continent { code } => {
            let base_url = std::env::var("RESTCOUNTRIES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_COUNTRIES_BASE_URL.to_string());
            let resolver = RestCountriesClient::new(BasicClient::new()?, base_url);
            let continent = resolver.resolve_continent(code.trim()).await?;
            println!("{code}: {continent}");
        }
    }

    Ok(())
}
