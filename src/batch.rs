//! Batch-level validation.
//!
//! Runs after the whole input has been parsed and enriched, and before any
//! partition is written. Unlike per-line parsing, a violation here is fatal:
//! a structurally parsed record with an impossible status means the grammar
//! or the data is broken, and persisting it would corrupt the dataset
//! silently.

use snafu::prelude::*;

use crate::error::{EmptyBatchSnafu, StatusOutOfRangeSnafu, ValidationError};
use crate::record::EnrichedRecord;

/// Lowest valid HTTP status code.
pub const STATUS_MIN: i32 = 100;
/// Highest valid HTTP status code.
pub const STATUS_MAX: i32 = 599;

/// Validate the full batch before any write.
///
/// Checks that the batch is non-empty and that every record's status lies in
/// `[STATUS_MIN, STATUS_MAX]`. The first violation found is returned.
pub fn validate(records: &[EnrichedRecord]) -> Result<(), ValidationError> {
    ensure!(!records.is_empty(), EmptyBatchSnafu);

    for record in records {
        ensure!(
            (STATUS_MIN..=STATUS_MAX).contains(&record.status),
            StatusOutOfRangeSnafu {
                status: record.status
            }
        );
    }

    Ok(())
}
