//! firn: a standalone tool for ingesting raw HTTP access logs into a
//! date-partitioned Parquet dataset.
//!
//! Reads one access-log text file per invocation, parses it with a tolerant
//! fixed grammar, validates batch invariants, and writes one Parquet file per
//! calendar date under the configured output root.

mod batch;
mod config;
mod error;
mod metrics;
mod pipeline;
mod record;
mod schema;
mod sink;
mod source;

use clap::Parser;
use snafu::prelude::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{ConfigSnafu, IngestError};
use pipeline::run_ingestion;

/// Access-log to partitioned Parquet ingestion tool.
#[derive(Parser, Debug)]
#[command(name = "firn")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Dry run - validate configuration without processing.
    #[arg(long)]
    dry_run: bool,
}

#[snafu::report]
#[tokio::main]
async fn main() -> Result<(), IngestError> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("firn starting");

    let config = Config::from_file(&args.config).context(ConfigSnafu)?;

    if args.dry_run {
        info!("Dry run mode - validating configuration");
        info!("Source: {}", config.source.path);
        info!("Sink: {}", config.sink.output_root);
        info!("Compression: {:?}", config.sink.compression);
        info!("Configuration is valid");
        return Ok(());
    }

    let summary = run_ingestion(&config).await?;

    if summary.partitions.is_empty() {
        info!("No partitions written (no valid rows parsed)");
    } else {
        info!("Ingestion completed successfully");
        info!("  Lines read: {}", summary.lines_read);
        info!("  Lines skipped: {}", summary.lines_skipped);
        info!("  Rows written: {}", summary.rows_written);
        info!("  Partitions written: {}", summary.partitions.len());
        for partition in &summary.partitions {
            info!(
                "  date={}: {} rows -> {}",
                partition.date, partition.rows, partition.path
            );
        }
    }

    Ok(())
}
