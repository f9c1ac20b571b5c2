//! Configuration parsing and validation.
//!
//! Loads ingestion configuration from a YAML file. All paths the run touches
//! arrive here explicitly; nothing is read from process-wide mutable state.

mod vars;

use serde::{Deserialize, Serialize};
use snafu::prelude::*;
use std::path::Path;

use crate::error::{
    ConfigError, EmptyOutputRootSnafu, EmptySourcePathSnafu, EnvInterpolationSnafu, ReadFileSnafu,
    YamlParseSnafu,
};

/// Main configuration for an ingestion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub sink: SinkConfig,
}

/// Source configuration: where the raw access log lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the raw access-log text file.
    pub path: String,
}

/// Sink configuration: where partitioned Parquet files are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Root directory of the partitioned dataset. Partition files land at
    /// `<output_root>/date=<YYYY-MM-DD>/logs_<YYYYMMDD>.parquet`.
    pub output_root: String,

    /// Parquet compression codec.
    #[serde(default)]
    pub compression: ParquetCompression,
}

/// Parquet compression codec.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    Uncompressed,
    #[default]
    Snappy,
    Gzip,
    Zstd,
    Lz4,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).context(ReadFileSnafu)?;
        Self::parse(&content)
    }

    /// Parse configuration from a YAML string, interpolating environment
    /// variables first.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let result = vars::interpolate(content);
        if !result.is_ok() {
            let message = result.errors.join("\n");
            return EnvInterpolationSnafu { message }.fail();
        }

        let config: Config = serde_yaml::from_str(&result.text).context(YamlParseSnafu)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        ensure!(!self.source.path.is_empty(), EmptySourcePathSnafu);
        ensure!(!self.sink.output_root.is_empty(), EmptyOutputRootSnafu);
        Ok(())
    }
}
