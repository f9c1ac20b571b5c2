//! Fixed Arrow schema for the partitioned dataset.
//!
//! The column set and order are part of the external contract consumed by
//! the query layer, so they are defined in one place and never derived from
//! input data.

use std::sync::Arc;

use arrow::array::{
    ArrayRef, Int32Array, Int64Array, RecordBatch, StringArray, TimestampMicrosecondArray,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::error::ArrowError;

use crate::record::EnrichedRecord;

/// Dataset schema: client_ip, timestamp, request_path, status, bytes_sent,
/// user_agent, date, hour, endpoint, is_error.
///
/// The timestamp column carries no timezone: the source offset is discarded
/// during normalization, so values are civil datetimes.
pub fn dataset_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("client_ip", DataType::Utf8, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Microsecond, None),
            false,
        ),
        Field::new("request_path", DataType::Utf8, false),
        Field::new("status", DataType::Int32, false),
        Field::new("bytes_sent", DataType::Int64, false),
        Field::new("user_agent", DataType::Utf8, false),
        Field::new("date", DataType::Utf8, false),
        Field::new("hour", DataType::Utf8, false),
        Field::new("endpoint", DataType::Utf8, false),
        Field::new("is_error", DataType::Int32, false),
    ]))
}

/// Convert enriched records into one Arrow [`RecordBatch`] with the dataset
/// schema. Column order matches [`dataset_schema`].
pub fn to_record_batch(records: &[EnrichedRecord]) -> Result<RecordBatch, ArrowError> {
    let client_ips: Vec<&str> = records.iter().map(|r| r.client_ip.as_str()).collect();
    let timestamps: Vec<i64> = records
        .iter()
        .map(|r| r.timestamp.and_utc().timestamp_micros())
        .collect();
    let request_paths: Vec<&str> = records.iter().map(|r| r.request_path.as_str()).collect();
    let statuses: Vec<i32> = records.iter().map(|r| r.status).collect();
    let bytes_sent: Vec<i64> = records.iter().map(|r| r.bytes_sent).collect();
    let user_agents: Vec<&str> = records.iter().map(|r| r.user_agent.as_str()).collect();
    let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    let hours: Vec<&str> = records.iter().map(|r| r.hour.as_str()).collect();
    let endpoints: Vec<&str> = records.iter().map(|r| r.endpoint.as_str()).collect();
    let is_errors: Vec<i32> = records.iter().map(|r| r.is_error).collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(client_ips)),
        Arc::new(TimestampMicrosecondArray::from(timestamps)),
        Arc::new(StringArray::from(request_paths)),
        Arc::new(Int32Array::from(statuses)),
        Arc::new(Int64Array::from(bytes_sent)),
        Arc::new(StringArray::from(user_agents)),
        Arc::new(StringArray::from(dates)),
        Arc::new(StringArray::from(hours)),
        Arc::new(StringArray::from(endpoints)),
        Arc::new(Int32Array::from(is_errors)),
    ];

    RecordBatch::try_new(dataset_schema(), columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_line;

    const SAMPLE: &str = r#"127.0.0.1 - - [10/Nov/2025:10:21:34 +0530] "GET /api/v1/users?x=1 HTTP/1.1" 404 512 "-" "curl/8.0""#;

    #[test]
    fn test_schema_column_order() {
        let schema = dataset_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            vec![
                "client_ip",
                "timestamp",
                "request_path",
                "status",
                "bytes_sent",
                "user_agent",
                "date",
                "hour",
                "endpoint",
                "is_error",
            ]
        );
    }

    #[test]
    fn test_to_record_batch_values() {
        let record = parse_line(SAMPLE).unwrap().enrich();
        let batch = to_record_batch(std::slice::from_ref(&record)).unwrap();

        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 10);

        let ips = batch
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(ips.value(0), "127.0.0.1");

        let statuses = batch
            .column(3)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(statuses.value(0), 404);

        let bytes = batch
            .column(4)
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap();
        assert_eq!(bytes.value(0), 512);

        let dates = batch
            .column(6)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(dates.value(0), "2025-11-10");

        let endpoints = batch
            .column(8)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(endpoints.value(0), "/api/v1/users");

        let is_errors = batch
            .column(9)
            .as_any()
            .downcast_ref::<Int32Array>()
            .unwrap();
        assert_eq!(is_errors.value(0), 1);
    }

    #[test]
    fn test_timestamp_round_trips_as_micros() {
        let record = parse_line(SAMPLE).unwrap().enrich();
        let expected = record.timestamp.and_utc().timestamp_micros();

        let batch = to_record_batch(&[record]).unwrap();
        let ts = batch
            .column(1)
            .as_any()
            .downcast_ref::<TimestampMicrosecondArray>()
            .unwrap();
        assert_eq!(ts.value(0), expected);
    }
}
