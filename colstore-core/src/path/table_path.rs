//! Table directory layout

use super::{DataFileName, PathBuilder};
use crate::config::{FACT_DIR, PARTITION_PREFIX, SEGMENT_PREFIX};
use crate::TableIdentifier;
use std::path::PathBuf;

/// Directory layout of one table inside a store
#[derive(Debug, Clone)]
pub struct TablePath {
    base_store_path: PathBuf,
    identifier: TableIdentifier,
}

impl TablePath {
    pub fn new(base_store_path: impl Into<PathBuf>, identifier: TableIdentifier) -> Self {
        Self {
            base_store_path: base_store_path.into(),
            identifier,
        }
    }

    pub fn identifier(&self) -> &TableIdentifier {
        &self.identifier
    }

    /// `<store>/<database>/<table>`
    pub fn table_dir(&self) -> PathBuf {
        self.base_store_path
            .join(&self.identifier.database_name)
            .join(&self.identifier.table_name)
    }

    /// `<store>/<database>/<table>/Fact/Part<partition>/Segment_<segment>`
    pub fn data_directory(&self, partition_id: &str, segment_id: &str) -> PathBuf {
        self.table_dir()
            .join(FACT_DIR)
            .join(format!("{}{}", PARTITION_PREFIX, partition_id))
            .join(format!("{}{}", SEGMENT_PREFIX, segment_id))
    }

    /// Full path of a committed data file
    pub fn data_file_path(
        &self,
        partition_id: &str,
        segment_id: &str,
        file_name: &DataFileName,
    ) -> PathBuf {
        self.data_directory(partition_id, segment_id)
            .join(file_name.file_name())
    }
}

/// [`PathBuilder`] backed by [`TablePath`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StorePathBuilder;

impl PathBuilder for StorePathBuilder {
    fn data_directory_for(
        &self,
        base_store_path: &str,
        identifier: &TableIdentifier,
        partition_id: &str,
        segment_id: &str,
    ) -> String {
        TablePath::new(base_store_path, identifier.clone())
            .data_directory(partition_id, segment_id)
            .to_string_lossy()
            .to_string()
    }
}
