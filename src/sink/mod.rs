//! Sink side of the pipeline: grouping validated records into date
//! partitions and persisting each partition as one Parquet file.

mod parquet;
mod storage;

pub use parquet::ParquetEncoder;
pub use storage::StorageWriter;

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::record::EnrichedRecord;

/// An encoded partition file, staged in memory before persistence.
#[derive(Debug, Clone)]
pub struct PartitionFile {
    /// Path relative to the output root, e.g.
    /// `date=2025-11-10/logs_20251110.parquet`.
    pub filename: String,
    /// The partition's date value (`YYYY-MM-DD`).
    pub date: String,
    /// Encoded size in bytes.
    pub size: usize,
    /// Number of rows in the file.
    pub record_count: usize,
    /// The Parquet file contents.
    pub bytes: Bytes,
}

/// Group a validated batch by date.
///
/// A `BTreeMap` keeps partition order deterministic across runs; ordering
/// within a partition follows input order, which downstream aggregation does
/// not depend on.
pub fn group_by_date(records: Vec<EnrichedRecord>) -> BTreeMap<String, Vec<EnrichedRecord>> {
    let mut partitions: BTreeMap<String, Vec<EnrichedRecord>> = BTreeMap::new();
    for record in records {
        partitions.entry(record.date.clone()).or_default().push(record);
    }
    partitions
}

/// Deterministic relative path for a date partition's file.
///
/// The directory keeps the ISO date; the filename strips the separators.
pub fn partition_path(date: &str) -> String {
    let compact: String = date.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("date={date}/logs_{compact}.parquet")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParsedRecord;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32) -> EnrichedRecord {
        ParsedRecord {
            client_ip: "10.0.0.1".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2025, 11, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            request_path: "/".to_string(),
            status: 200,
            bytes_sent: 1,
            user_agent: "test".to_string(),
        }
        .enrich()
    }

    #[test]
    fn test_partition_path_deterministic_naming() {
        assert_eq!(
            partition_path("2025-11-10"),
            "date=2025-11-10/logs_20251110.parquet"
        );
    }

    #[test]
    fn test_group_by_date_splits_partitions() {
        let records = vec![record(10, 1), record(11, 2), record(10, 3)];
        let partitions = group_by_date(records);

        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions["2025-11-10"].len(), 2);
        assert_eq!(partitions["2025-11-11"].len(), 1);

        // Every record lands in the partition matching its own date field
        for (date, group) in &partitions {
            assert!(group.iter().all(|r| &r.date == date));
        }
    }
}
