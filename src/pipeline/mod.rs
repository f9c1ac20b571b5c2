//! The ingestion driver.
//!
//! Owns the end-to-end sequence for one run: read the input file, parse and
//! enrich each line, validate the full batch, encode every date partition,
//! then persist the partition files. Validation is a barrier: no partition
//! write begins until the whole batch has been checked, and every partition
//! is encoded before any byte is persisted.

use futures::future::try_join_all;
use snafu::prelude::*;
use tracing::{info, warn};

use crate::batch;
use crate::config::Config;
use crate::error::{EncodeSnafu, IngestError, PartitionWriteSnafu, StorageSnafu, ValidationSnafu};
use crate::record::ParsedRecord;
use crate::sink::{ParquetEncoder, PartitionFile, StorageWriter, group_by_date};
use crate::source::read_log_file;

/// Per-partition outcome included in the run summary.
#[derive(Debug, Clone)]
pub struct PartitionSummary {
    /// The partition's date value (`YYYY-MM-DD`).
    pub date: String,
    /// Rows written to this partition.
    pub rows: usize,
    /// Path of the partition file relative to the output root.
    pub path: String,
}

/// Successful terminal state of an ingestion run.
///
/// A run that parses zero valid records completes with an empty partition
/// list; every fatal condition surfaces as [`IngestError`] instead.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Non-blank input lines seen.
    pub lines_read: usize,
    /// Lines dropped as malformed.
    pub lines_skipped: usize,
    /// Total rows written across all partitions.
    pub rows_written: usize,
    /// One entry per partition written, ordered by date.
    pub partitions: Vec<PartitionSummary>,
}

/// Run one ingestion pass: input file to partitioned Parquet dataset.
pub async fn run_ingestion(config: &Config) -> Result<RunSummary, IngestError> {
    // Reading
    let (parsed, stats) = read_log_file(&config.source.path).await?;
    let records: Vec<_> = parsed.into_iter().map(ParsedRecord::enrich).collect();

    if records.is_empty() {
        // Distinct from a validation abort: nothing matched the grammar, so
        // the run completes as a no-op with a surfaced diagnostic.
        warn!(
            path = %config.source.path,
            lines = stats.lines_read,
            "No valid rows parsed from input; nothing to write"
        );
        return Ok(RunSummary {
            lines_read: stats.lines_read,
            lines_skipped: stats.lines_skipped,
            ..RunSummary::default()
        });
    }

    // Validating
    batch::validate(&records).context(ValidationSnafu)?;

    // Writing: encode everything first so an encoding failure aborts the run
    // before any partition file exists on disk.
    let encoder = ParquetEncoder::new(config.sink.compression);
    let partitions = group_by_date(records);

    let mut files: Vec<PartitionFile> = Vec::with_capacity(partitions.len());
    for (date, group) in &partitions {
        let file = encoder
            .encode(date, group)
            .context(EncodeSnafu { date: date.clone() })?;
        files.push(file);
    }

    let writer = StorageWriter::for_root(&config.sink.output_root).context(StorageSnafu)?;
    try_join_all(files.iter().map(|file| {
        let writer = writer.clone();
        async move {
            writer
                .write_file(file)
                .await
                .context(PartitionWriteSnafu {
                    date: file.date.clone(),
                })
        }
    }))
    .await?;

    let rows_written = files.iter().map(|f| f.record_count).sum();
    let summary = RunSummary {
        lines_read: stats.lines_read,
        lines_skipped: stats.lines_skipped,
        rows_written,
        partitions: files
            .into_iter()
            .map(|f| PartitionSummary {
                date: f.date,
                rows: f.record_count,
                path: f.filename,
            })
            .collect(),
    };

    info!(
        partitions = summary.partitions.len(),
        rows = summary.rows_written,
        skipped = summary.lines_skipped,
        "Ingestion run completed"
    );

    Ok(summary)
}
