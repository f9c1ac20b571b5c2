//! Internal events for metrics emission.
//!
//! Each event struct represents a measurable occurrence in the pipeline and
//! emits the corresponding counter or histogram when `emit!`-ed.

use metrics::{counter, histogram};
use std::time::Duration;
use tracing::trace;

/// Trait for internal events that can be emitted as metrics.
pub trait InternalEvent {
    /// Emit this event as a metric.
    fn emit(self);
}

/// Event emitted after the input file is scanned.
pub struct LinesRead {
    pub count: u64,
}

impl InternalEvent for LinesRead {
    fn emit(self) {
        trace!(count = self.count, "Lines read");
        counter!("firn_lines_read_total").increment(self.count);
    }
}

/// Event emitted for lines that failed the grammar match.
pub struct LinesSkipped {
    pub count: u64,
}

impl InternalEvent for LinesSkipped {
    fn emit(self) {
        trace!(count = self.count, "Lines skipped");
        counter!("firn_lines_skipped_total").increment(self.count);
    }
}

/// Event emitted when records are parsed from the input.
pub struct RecordsParsed {
    pub count: u64,
}

impl InternalEvent for RecordsParsed {
    fn emit(self) {
        trace!(count = self.count, "Records parsed");
        counter!("firn_records_parsed_total").increment(self.count);
    }
}

/// Event emitted when a partition file is persisted.
pub struct PartitionFileWritten {
    pub bytes: u64,
}

impl InternalEvent for PartitionFileWritten {
    fn emit(self) {
        trace!(bytes = self.bytes, "Partition file written");
        counter!("firn_partition_files_written_total").increment(1);
        counter!("firn_bytes_written_total").increment(self.bytes);
    }
}

/// Event emitted when a partition's Parquet encoding completes.
pub struct PartitionEncodeCompleted {
    pub duration: Duration,
}

impl InternalEvent for PartitionEncodeCompleted {
    fn emit(self) {
        trace!(
            duration_ms = self.duration.as_millis(),
            "Partition encode completed"
        );
        histogram!("firn_partition_encode_duration_seconds").record(self.duration.as_secs_f64());
    }
}
