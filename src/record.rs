//! Record types flowing through the ingestion pipeline.
//!
//! A `ParsedRecord` is what the line grammar extracts; an `EnrichedRecord`
//! adds the derived partition and analytics fields and is the unit of
//! persistence. Neither is mutated after creation.

use chrono::{NaiveDateTime, Timelike};

/// A structurally parsed access-log record.
///
/// The timestamp is a civil datetime: the offset in the raw line is discarded
/// because downstream partitioning only needs calendar date and hour, never
/// absolute instants.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub client_ip: String,
    pub timestamp: NaiveDateTime,
    pub request_path: String,
    pub status: i32,
    pub bytes_sent: i64,
    pub user_agent: String,
}

/// A parsed record augmented with derived partition and analytics fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub client_ip: String,
    pub timestamp: NaiveDateTime,
    pub request_path: String,
    pub status: i32,
    pub bytes_sent: i64,
    pub user_agent: String,
    /// Partition key, ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    /// Sub-partition key, zero-padded hour of day (`HH`).
    pub hour: String,
    /// Request path with any query string removed.
    pub endpoint: String,
    /// 1 iff status >= 400, else 0.
    pub is_error: i32,
}

impl ParsedRecord {
    /// Derive the enriched record. Total function, no failure modes.
    pub fn enrich(self) -> EnrichedRecord {
        let date = self.timestamp.format("%Y-%m-%d").to_string();
        let hour = format!("{:02}", self.timestamp.hour());
        let endpoint = match self.request_path.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => self.request_path.clone(),
        };
        let is_error = i32::from(self.status >= 400);

        EnrichedRecord {
            client_ip: self.client_ip,
            timestamp: self.timestamp,
            request_path: self.request_path,
            status: self.status,
            bytes_sent: self.bytes_sent,
            user_agent: self.user_agent,
            date,
            hour,
            endpoint,
            is_error,
        }
    }
}
