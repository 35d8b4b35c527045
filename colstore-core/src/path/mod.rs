//! Table store path layout
//!
//! Data files live under `<store>/<database>/<table>/Fact/Part<p>/Segment_<s>/`
//! and are named `part-<partNo>-<taskNo>-<timestamp>.carbondata`.

mod data_file;
mod table_path;

pub use data_file::{DataFileName, DataFileNameParser};
pub use table_path::{StorePathBuilder, TablePath};

use crate::{Result, TableIdentifier, TaskNumber};

/// Extracts the task number encoded in a data file path
pub trait TaskNumberParser {
    fn task_number(&self, file_path: &str) -> Result<TaskNumber>;
}

/// Resolves the data directory of one segment of a table
pub trait PathBuilder {
    fn data_directory_for(
        &self,
        base_store_path: &str,
        identifier: &TableIdentifier,
        partition_id: &str,
        segment_id: &str,
    ) -> String;
}
