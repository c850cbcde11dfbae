//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for analysing one city/month/day selection,
//! previewing rows, sweeping every selection of a city, and listing the
//! configured city files.

use anyhow::{Context, Result};
use bikeshare_stats::{
    city::City,
    config::CitySources,
    loader::CsvTripLoader,
    output::{append_record, print_json, print_pretty, print_summary, write_json},
    pipeline::{AnalysisRequest, load_city},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::Instrument;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics on US bikeshare trip data", long_about = None)]
struct Cli {
    /// JSON file mapping city names to trip CSV files
    #[arg(long, global = true, value_name = "FILE")]
    city_config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Headline figures only
    Summary,
    /// Full report as JSON, including rankings and chart series
    Json,
    /// Full report in Rust debug format
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one city, optionally restricted to a month and/or weekday
    Analyze {
        /// Chicago, New York City or Washington
        #[arg(short, long, default_value = "Chicago")]
        city: String,

        /// All, or January through June
        #[arg(short, long, default_value = "All")]
        month: String,

        /// All, or Monday through Sunday
        #[arg(short, long, default_value = "All")]
        day: String,

        /// How the report is logged
        #[arg(short, long, value_enum, default_value_t = Format::Summary)]
        format: Format,

        /// Optional: write the full JSON report to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Optional: CSV file to append the summary row to
        #[arg(long)]
        append_csv: Option<String>,
    },
    /// Show the first rows of a selection with derived fields
    Preview {
        #[arg(short, long, default_value = "Chicago")]
        city: String,

        #[arg(short, long, default_value = "All")]
        month: String,

        #[arg(short, long, default_value = "All")]
        day: String,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },
    /// Analyse every month × day selection of a city and append summaries to CSV
    Sweep {
        #[arg(short, long, default_value = "Chicago")]
        city: String,

        /// CSV file to append results to
        #[arg(short, long, default_value = "summaries.csv")]
        output: String,

        /// Maximum number of selections analysed at once
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
    /// List configured city files
    Cities,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

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
        .init();

    let cli = Cli::parse();

    let sources = match &cli.city_config {
        Some(path) => CitySources::load(path)?,
        None => CitySources::from_env()?,
    };
    let loader = CsvTripLoader::new(sources);

    match cli.command {
        Commands::Analyze {
            city,
            month,
            day,
            format,
            output,
            append_csv,
        } => {
            let request = AnalysisRequest::parse(&city, &month, &day)?;
            let derived = load_city(&loader, request.city)?;
            let report = derived.analyze(request.month, request.day);

            match format {
                Format::Summary => print_summary(&report),
                Format::Json => print_json(&report)?,
                Format::Pretty => print_pretty(&report),
            }

            if let Some(path) = output {
                write_json(&path, &report)?;
                info!(path = %path, "Report written");
            }
            if let Some(path) = append_csv {
                append_record(&path, &report.summary())?;
            }
        }
        Commands::Preview {
            city,
            month,
            day,
            rows,
        } => {
            let request = AnalysisRequest::parse(&city, &month, &day)?;
            let derived = load_city(&loader, request.city)?;
            let preview = derived.preview(request.month, request.day, rows);

            info!(shown = preview.len(), requested = rows, "Preview");
            print_json(&preview)?;
        }
        Commands::Sweep {
            city,
            output,
            concurrency,
        } => {
            let city: City = city.parse()?;
            sweep(&loader, city, &output, concurrency).await?;
        }
        Commands::Cities => {
            for (city, path) in loader.sources().iter() {
                let exists = path.exists();
                if exists {
                    info!(city = %city, path = %path.display(), "City source");
                } else {
                    warn!(city = %city, path = %path.display(), "City source file not found");
                }
            }
            for city in City::ALL {
                if loader.sources().path_for(city).is_none() {
                    warn!(city = %city, "No source configured");
                }
            }
        }
    }

    Ok(())
}

/// Loads a city once, analyses every month × day selection concurrently,
/// then appends one summary row per selection in request order.
#[tracing::instrument(skip(loader))]
async fn sweep(
    loader: &CsvTripLoader,
    city: City,
    output: &str,
    concurrency: usize,
) -> Result<()> {
    let derived = Arc::new(load_city(loader, city)?);
    let requests = AnalysisRequest::sweep(city);

    info!(
        selections = requests.len(),
        trips = derived.dataset.len(),
        "Starting sweep"
    );

    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));
    let mut tasks = vec![];

    for request in requests {
        let sem = semaphore.clone();
        let derived = derived.clone();

        let span = tracing::info_span!(
            "analyze_selection",
            month = %request.month,
            day = %request.day,
        );

        let task = tokio::spawn(
            async move {
                let _permit = sem.acquire_owned().await?;
                let report = tokio::task::spawn_blocking(move || {
                    derived.analyze(request.month, request.day)
                })
                .await?;
                anyhow::Ok(report)
            }
            .instrument(span),
        );

        tasks.push(task);
    }

    let mut written = 0;
    for task in tasks {
        match task.await.context("sweep task panicked")? {
            Ok(report) => {
                append_record(output, &report.summary())?;
                written += 1;
            }
            Err(e) => error!(error = %e, "Selection failed"),
        }
    }

    info!(written, output, "Sweep finished");
    Ok(())
}
