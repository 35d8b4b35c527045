//! Data file naming

use super::TaskNumberParser;
use crate::config::{DATA_FILE_EXTENSION, DATA_FILE_PREFIX};
use crate::{ColstoreError, Result, TaskNumber};
use std::fmt;
use std::path::Path;

/// Parsed data file name `part-<partNo>-<taskNo>-<timestamp>.carbondata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileName {
    pub part_no: u32,
    pub task_no: TaskNumber,
    /// Fact update timestamp in milliseconds
    pub timestamp: u64,
}

impl DataFileName {
    pub fn new(part_no: u32, task_no: impl Into<TaskNumber>, timestamp: u64) -> Self {
        Self {
            part_no,
            task_no: task_no.into(),
            timestamp,
        }
    }

    /// Parse the last component of `file_path`
    pub fn parse(file_path: &str) -> Result<Self> {
        let malformed = || ColstoreError::MalformedPath(file_path.to_string());

        let file_name = Path::new(file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(malformed)?;
        let stem = file_name
            .strip_suffix(DATA_FILE_EXTENSION)
            .ok_or_else(malformed)?;

        let mut parts = stem.split('-');
        let (Some(prefix), Some(part_no), Some(task_no), Some(timestamp), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return Err(malformed());
        };

        if prefix != DATA_FILE_PREFIX || task_no.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            part_no: part_no.parse().map_err(|_| malformed())?,
            task_no: TaskNumber::new(task_no),
            timestamp: timestamp.parse().map_err(|_| malformed())?,
        })
    }

    /// File name without directory
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DataFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}{}",
            DATA_FILE_PREFIX, self.part_no, self.task_no, self.timestamp, DATA_FILE_EXTENSION
        )
    }
}

/// [`TaskNumberParser`] for the standard data file naming layout
#[derive(Debug, Clone, Copy, Default)]
pub struct DataFileNameParser;

impl TaskNumberParser for DataFileNameParser {
    fn task_number(&self, file_path: &str) -> Result<TaskNumber> {
        DataFileName::parse(file_path).map(|name| name.task_no)
    }
}
