//! Parquet partition encoding.
//!
//! Serializes one partition's records to an in-memory Parquet file. Encoding
//! is separated from persistence so the driver can encode every partition
//! before a single byte lands on disk.

use std::time::Instant;

use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use snafu::prelude::*;

use crate::config::ParquetCompression;
use crate::emit;
use crate::error::{BatchBuildSnafu, EncodeError, WriteSnafu, WriterCreateSnafu};
use crate::metrics::events::PartitionEncodeCompleted;
use crate::record::EnrichedRecord;
use crate::schema;
use crate::sink::{PartitionFile, partition_path};

/// Encodes date partitions to Parquet bytes.
#[derive(Debug, Clone)]
pub struct ParquetEncoder {
    compression: ParquetCompression,
}

impl ParquetEncoder {
    /// Create an encoder with the configured compression codec.
    pub fn new(compression: ParquetCompression) -> Self {
        Self { compression }
    }

    /// Encode one partition's records into a [`PartitionFile`].
    pub fn encode(
        &self,
        date: &str,
        records: &[EnrichedRecord],
    ) -> Result<PartitionFile, EncodeError> {
        let start = Instant::now();

        let batch = schema::to_record_batch(records).context(BatchBuildSnafu)?;

        let props = WriterProperties::builder()
            .set_compression(self.codec())
            .build();

        let mut writer = ArrowWriter::try_new(Vec::new(), schema::dataset_schema(), Some(props))
            .context(WriterCreateSnafu)?;
        writer.write(&batch).context(WriteSnafu)?;
        let buffer = writer.into_inner().context(WriteSnafu)?;

        emit!(PartitionEncodeCompleted {
            duration: start.elapsed()
        });

        Ok(PartitionFile {
            filename: partition_path(date),
            date: date.to_string(),
            size: buffer.len(),
            record_count: records.len(),
            bytes: Bytes::from(buffer),
        })
    }

    fn codec(&self) -> Compression {
        match self.compression {
            ParquetCompression::Uncompressed => Compression::UNCOMPRESSED,
            ParquetCompression::Snappy => Compression::SNAPPY,
            ParquetCompression::Gzip => Compression::GZIP(GzipLevel::default()),
            ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
            ParquetCompression::Lz4 => Compression::LZ4,
        }
    }
}
