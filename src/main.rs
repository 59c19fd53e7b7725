//! CLI entry point for the Play Store insights tool.
//!
//! Provides subcommands for building the full dashboard view from a dataset
//! and for logging a quick aggregate summary without writing anything.

use anyhow::Result;
use clap::{Parser, Subcommand};
use playstore_insights::{
    analyzers::view::DashboardView,
    config::{MAJOR_CATEGORY_MIN_APPS, PipelineConfig},
    output::{export_category_counts, print_json, write_dated_snapshot, write_view},
    pipeline,
    source::read_source,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "playstore_insights")]
#[command(about = "A tool to analyze Google Play Store app data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the dashboard view from a CSV file or URL
    Analyze {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file to write the view to
        #[arg(short, long, default_value = "view.json")]
        output: PathBuf,

        /// Print the view to stdout instead of writing a file
        #[arg(long, default_value_t = false)]
        stdout: bool,

        /// Optional: directory to write a date-partitioned snapshot into
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,

        /// Optional: CSV file to export the per-category tally to
        #[arg(long)]
        counts_csv: Option<PathBuf>,

        /// Minimum apps a category needs to count as major
        #[arg(long, default_value_t = MAJOR_CATEGORY_MIN_APPS)]
        min_category_size: usize,
    },
    /// Log aggregate figures for a dataset without writing anything
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Minimum apps a category needs to count as major
        #[arg(long, default_value_t = MAJOR_CATEGORY_MIN_APPS)]
        min_category_size: usize,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/playstore_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("playstore_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            stdout,
            snapshot_dir,
            counts_csv,
            min_category_size,
        } => {
            let view = build_view(&source, min_category_size)?;

            if stdout {
                print_json(&view)?;
            } else {
                write_view(&output, &view)?;
                info!(path = %output.display(), "view written");
            }

            if let Some(dir) = snapshot_dir {
                write_dated_snapshot(&dir, &view)?;
            }

            if let Some(path) = counts_csv {
                export_category_counts(&path, &view.category_counts)?;
            }

            log_summary(&view);
        }
        Commands::Summary {
            source,
            min_category_size,
        } => {
            let view = build_view(&source, min_category_size)?;
            log_summary(&view);
        }
    }

    Ok(())
}

/// Loads the dataset from a local path or over HTTP and runs the pipeline.
#[tracing::instrument(fields(source))]
fn build_view(source: &str, min_category_size: usize) -> Result<DashboardView> {
    let config = PipelineConfig {
        min_category_size,
        ..PipelineConfig::default()
    };
    let bytes = read_source(source)?;
    let view = pipeline::run(bytes.as_slice(), &config)?;
    Ok(view)
}

/// Logs the headline figures of a view.
fn log_summary(view: &DashboardView) {
    info!(total_apps = view.total_count, "dataset size");

    match view.global_rating_mean {
        Some(mean) => info!(mean, "global rating mean"),
        None => warn!("dataset has no ratings"),
    }

    // Counts are ascending, so the tally's ends are the extremes.
    if let (Some(smallest), Some(largest)) =
        (view.category_counts.first(), view.category_counts.last())
    {
        info!(
            category = %largest.category,
            count = largest.count,
            "largest category"
        );
        info!(
            category = %smallest.category,
            count = smallest.count,
            "smallest category"
        );
    }

    info!(
        count = view.major_categories.len(),
        mean = ?view.major_category_mean,
        "major categories"
    );
    info!(
        binned = view.rating_histogram.binned(),
        overflow = view.rating_histogram.overflow,
        "rating histogram coverage"
    );
}
