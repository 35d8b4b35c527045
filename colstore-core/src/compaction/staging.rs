//! Staging locations for compaction output

use crate::config::{DEFAULT_STORE_PATH, IN_PROGRESS_SUFFIX};
use crate::metadata::MetadataRegistry;
use crate::path::PathBuilder;
use crate::properties::PropertyStore;
use crate::{ColstoreError, Result, TableIdentity};
use std::path::MAIN_SEPARATOR;
use std::sync::Arc;
use tracing::debug;

/// Computes where a compaction task writes its in-progress output
pub struct StagingPathBuilder {
    properties: Arc<dyn PropertyStore + Send + Sync>,
    metadata: Arc<dyn MetadataRegistry + Send + Sync>,
    paths: Arc<dyn PathBuilder + Send + Sync>,
}

impl StagingPathBuilder {
    pub fn new(
        properties: Arc<dyn PropertyStore + Send + Sync>,
        metadata: Arc<dyn MetadataRegistry + Send + Sync>,
        paths: Arc<dyn PathBuilder + Send + Sync>,
    ) -> Self {
        Self {
            properties,
            metadata,
            paths,
        }
    }

    /// `<segment data dir>/<task_no>.inprogress` for the given table
    ///
    /// The store location is the property named by the table key, falling
    /// back to [`DEFAULT_STORE_PATH`]. Nothing is created on disk.
    pub fn staging_path_for(
        &self,
        database: &str,
        table: &str,
        partition_id: &str,
        segment_id: &str,
        task_no: &str,
    ) -> Result<String> {
        let table_key = TableIdentity::new(database, table).table_key();
        let base_store_path = self.properties.get_or(&table_key, DEFAULT_STORE_PATH);

        let descriptor = self
            .metadata
            .lookup(&table_key)
            .ok_or_else(|| ColstoreError::UnknownTable(table_key.clone()))?;
        let identifier = descriptor
            .identifier
            .as_ref()
            .ok_or_else(|| ColstoreError::NoTableIdentifier(table_key.clone()))?;

        let data_dir =
            self.paths
                .data_directory_for(&base_store_path, identifier, partition_id, segment_id);

        let staging_path = format!(
            "{}{}{}{}",
            data_dir, MAIN_SEPARATOR, task_no, IN_PROGRESS_SUFFIX
        );
        debug!(table = %table_key, segment_id, task_no, path = %staging_path, "staging path");

        Ok(staging_path)
    }
}

/// Check whether `path` names an in-progress file
pub fn is_in_progress(path: &str) -> bool {
    path.ends_with(IN_PROGRESS_SUFFIX)
}

/// Path a staged file takes once committed
pub fn committed_path_for(staging_path: &str) -> Result<String> {
    staging_path
        .strip_suffix(IN_PROGRESS_SUFFIX)
        .filter(|path| !path.is_empty() && !path.ends_with(MAIN_SEPARATOR))
        .map(str::to_string)
        .ok_or_else(|| ColstoreError::MalformedPath(staging_path.to_string()))
}
