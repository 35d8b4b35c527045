//! Core types for Colstore

use crate::{ColstoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One physical data file block taking part in a compaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Absolute path of the data file; its name encodes the task number
    pub file_path: String,
    /// Offset of the footer inside the file
    pub block_offset: u64,
    /// Length of the footer in bytes
    pub block_length: u64,
    /// Segment the block belongs to
    pub segment_id: String,
}

impl BlockDescriptor {
    /// Create a new block descriptor
    pub fn new(
        file_path: impl Into<String>,
        block_offset: u64,
        block_length: u64,
        segment_id: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            block_offset,
            block_length,
            segment_id: segment_id.into(),
        }
    }

    /// Parse a JSON array of descriptors, as handed over by a planner
    pub fn list_from_json(json: &str) -> Result<Vec<BlockDescriptor>> {
        serde_json::from_str(json)
            .map_err(|e| ColstoreError::Config(format!("invalid block descriptor list: {}", e)))
    }
}

/// Task number parsed from a data file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskNumber(String);

impl TaskNumber {
    pub fn new(task_no: impl Into<String>) -> Self {
        Self(task_no.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Database and table name pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentity {
    pub database_name: String,
    pub table_name: String,
}

impl TableIdentity {
    pub fn new(database_name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
        }
    }

    /// Key shared by the property store and the metadata registry
    ///
    /// Names are joined with `_`, so `("a_b", "c")` and `("a", "b_c")` collide.
    pub fn table_key(&self) -> String {
        format!("{}_{}", self.database_name, self.table_name)
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.database_name, self.table_name)
    }
}

/// Canonical identifier of a registered table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableIdentifier {
    pub database_name: String,
    pub table_name: String,
    /// Store-wide unique table id
    pub table_id: String,
}

impl TableIdentifier {
    pub fn new(
        database_name: impl Into<String>,
        table_name: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            database_name: database_name.into(),
            table_name: table_name.into(),
            table_id: table_id.into(),
        }
    }

    pub fn identity(&self) -> TableIdentity {
        TableIdentity::new(self.database_name.clone(), self.table_name.clone())
    }
}
