//! firn: access-log ingestion into a date-partitioned Parquet dataset.
//!
//! This library provides components for parsing raw HTTP access logs with a
//! tolerant fixed grammar, normalizing timestamps, deriving partition and
//! analytics fields, validating batch invariants, and persisting one Parquet
//! file per calendar date.
//!
//! # Example
//!
//! ```ignore
//! use firn::{Config, run_ingestion};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), firn::error::IngestError> {
//!     let config = Config::from_file("firn.yaml")?;
//!     let summary = run_ingestion(&config).await?;
//!     println!("Wrote {} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod record;
pub mod schema;
pub mod sink;
pub mod source;

// Re-export main types
pub use config::Config;
pub use pipeline::{PartitionSummary, RunSummary, run_ingestion};
pub use record::{EnrichedRecord, ParsedRecord};
