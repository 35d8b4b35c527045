//! Data file footers
//!
//! Every data file carries a footer describing its rows, blocklets and
//! column schema. Compaction planning reads footers through the
//! [`FooterReader`] trait; [`FileFooterReader`] reads them from local files.
//!
//! Encoded layout (little endian):
//!
//! ```text
//! magic "CFTR" | version u32 | num_rows u64 | blocklet_count u32
//! | column_count u32 | (name_len u32, name)* | info_len u32 | segment_info
//! | crc32 u32
//! ```

mod codec;
mod reader;

pub use reader::FileFooterReader;

use thiserror::Error;

/// Metadata stored at the end of a data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFooter {
    /// Encoding version
    pub version: u32,
    /// Number of rows in the file
    pub num_rows: u64,
    /// Number of blocklets in the file
    pub blocklet_count: u32,
    /// Column names in schema order
    pub columns: Vec<String>,
    /// Writer supplied segment information
    pub segment_info: String,
}

impl FileFooter {
    /// Create a footer with the current encoding version
    pub fn new(num_rows: u64, blocklet_count: u32, columns: Vec<String>) -> Self {
        Self {
            version: crate::config::FOOTER_VERSION,
            num_rows,
            blocklet_count,
            columns,
            segment_info: String::new(),
        }
    }

    pub fn with_segment_info(mut self, info: impl Into<String>) -> Self {
        self.segment_info = info.into();
        self
    }
}

/// Footer read errors
#[derive(Error, Debug)]
pub enum FooterError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Footer bytes end before the layout does
    #[error("Footer truncated: needed {needed} more bytes")]
    Truncated { needed: usize },

    /// Invalid footer format
    #[error("Invalid footer format: {0}")]
    InvalidFormat(String),

    /// Checksum mismatch
    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Footer written by a newer encoder
    #[error("Unsupported footer version: {0}")]
    UnsupportedVersion(u32),
}

impl FooterError {
    /// Check if error indicates corruption
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            FooterError::Truncated { .. }
                | FooterError::InvalidFormat(_)
                | FooterError::ChecksumMismatch { .. }
        )
    }
}

/// Source of decoded footers
pub trait FooterReader {
    /// Read the footer stored at `offset..offset + length` of `file_path`
    fn read_footer(
        &self,
        file_path: &str,
        offset: u64,
        length: u64,
    ) -> std::result::Result<FileFooter, FooterError>;
}
