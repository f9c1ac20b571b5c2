//! Error types for firn using snafu.
//!
//! One error enum per concern, aggregated by the top-level [`IngestError`].
//! Malformed input lines are deliberately not represented here: the line
//! parser is total and drops them, so only batch- and run-level failures
//! surface as errors.

use snafu::prelude::*;

// ============ Config Errors ============

/// Errors that can occur during configuration parsing and validation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ConfigError {
    /// Input path is empty.
    #[snafu(display("Source path cannot be empty"))]
    EmptySourcePath,

    /// Output root is empty.
    #[snafu(display("Sink output root cannot be empty"))]
    EmptyOutputRoot,

    /// Environment variable interpolation failed.
    #[snafu(display("Environment variable interpolation failed:\n{message}"))]
    EnvInterpolation { message: String },

    /// Failed to parse YAML configuration.
    #[snafu(display("Failed to parse YAML configuration"))]
    YamlParse { source: serde_yaml::Error },

    /// Failed to read configuration file.
    #[snafu(display("Failed to read configuration file"))]
    ReadFile { source: std::io::Error },
}

// ============ Storage Errors ============

/// Errors that can occur while persisting partition files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StorageError {
    /// Failed to create the output root directory.
    #[snafu(display("Failed to create output root {path}"))]
    CreateRoot {
        path: String,
        source: std::io::Error,
    },

    /// Output root is not usable as an object store prefix.
    #[snafu(display("Invalid output root {path}"))]
    InvalidRoot {
        path: String,
        source: object_store::Error,
    },

    /// Object store operation failed.
    #[snafu(display("Storage operation failed"))]
    ObjectStore { source: object_store::Error },
}

impl StorageError {
    /// Check if this error represents a "not found" condition.
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::ObjectStore { source } => {
                matches!(source, object_store::Error::NotFound { .. })
            }
            _ => false,
        }
    }
}

// ============ Validation Errors ============

/// Batch-level invariant violations.
///
/// These are fatal by design: a structurally parsed record with an impossible
/// status indicates a grammar or data-integrity problem, not input noise.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ValidationError {
    /// The batch contains no records.
    #[snafu(display("Batch is empty: no records to validate"))]
    EmptyBatch,

    /// A record's status code is outside the valid HTTP range.
    #[snafu(display("Status code {status} outside valid range [100,599]"))]
    StatusOutOfRange { status: i32 },
}

// ============ Parquet Errors ============

/// Errors that can occur while encoding a partition to Parquet.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EncodeError {
    /// Failed to assemble the Arrow record batch.
    #[snafu(display("Failed to build record batch"))]
    BatchBuild { source: arrow::error::ArrowError },

    /// Failed to create the Parquet writer.
    #[snafu(display("Failed to create Parquet writer"))]
    WriterCreate {
        source: parquet::errors::ParquetError,
    },

    /// Parquet write error.
    #[snafu(display("Parquet write error"))]
    Write {
        source: parquet::errors::ParquetError,
    },
}

// ============ Ingest Error (top-level) ============

/// Top-level errors that abort an ingestion run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum IngestError {
    /// Configuration error.
    #[snafu(display("Configuration error"))]
    Config { source: ConfigError },

    /// The input log file does not exist.
    #[snafu(display("Input log file not found: {path}"))]
    MissingInput {
        path: String,
        source: std::io::Error,
    },

    /// The input log file exists but could not be read.
    #[snafu(display("Failed to read input log file {path}"))]
    ReadInput {
        path: String,
        source: std::io::Error,
    },

    /// Batch validation failed; nothing was written.
    #[snafu(display("Batch validation failed"))]
    Validation { source: ValidationError },

    /// Failed to encode a partition; nothing was written.
    #[snafu(display("Failed to encode partition date={date}"))]
    Encode { date: String, source: EncodeError },

    /// Failed to persist a partition file.
    #[snafu(display("Failed to write partition date={date}"))]
    PartitionWrite { date: String, source: StorageError },

    /// Failed to prepare the output root.
    #[snafu(display("Storage error"))]
    Storage { source: StorageError },
}
