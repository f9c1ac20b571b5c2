//! Storage writer for partition file output.
//!
//! Persists encoded partition files under the dataset root through
//! `object_store`. The local backend stages each put to a temporary file and
//! renames it into place, so a crash mid-write never leaves a truncated
//! partition visible to readers, and a re-run overwrites a prior partition
//! file wholesale.

use std::sync::Arc;

use object_store::local::LocalFileSystem;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};
use snafu::prelude::*;
use tracing::info;

use crate::emit;
use crate::error::{CreateRootSnafu, InvalidRootSnafu, ObjectStoreSnafu, StorageError};
use crate::metrics::events::PartitionFileWritten;
use crate::sink::PartitionFile;

/// Writer for persisting partition files under a dataset root directory.
#[derive(Debug, Clone)]
pub struct StorageWriter {
    store: Arc<dyn ObjectStore>,
}

impl StorageWriter {
    /// Create a writer rooted at `output_root`, creating the directory if
    /// needed.
    pub fn for_root(output_root: &str) -> Result<Self, StorageError> {
        std::fs::create_dir_all(output_root).context(CreateRootSnafu { path: output_root })?;

        let store = LocalFileSystem::new_with_prefix(output_root)
            .context(InvalidRootSnafu { path: output_root })?;

        Ok(Self {
            store: Arc::new(store),
        })
    }

    /// Persist one partition file at its relative path under the root.
    pub async fn write_file(&self, file: &PartitionFile) -> Result<(), StorageError> {
        self.store
            .put(
                &Path::from(file.filename.as_str()),
                PutPayload::from(file.bytes.clone()),
            )
            .await
            .context(ObjectStoreSnafu)?;

        emit!(PartitionFileWritten {
            bytes: file.size as u64
        });
        info!(
            path = %file.filename,
            size = file.size,
            records = file.record_count,
            "Wrote partition file"
        );

        Ok(())
    }
}
