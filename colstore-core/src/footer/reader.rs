//! Footer reader for local data files

use super::{FileFooter, FooterError, FooterReader};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use tracing::trace;

/// Reads footers from files on the local filesystem
///
/// Each call opens the file, reads the footer range and closes it again.
#[derive(Debug, Clone, Default)]
pub struct FileFooterReader {
    /// Upper bound on a single footer read
    max_footer_size: Option<u64>,
}

impl FileFooterReader {
    /// Create a new footer reader
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject footers larger than `limit` bytes without reading them
    pub fn with_max_footer_size(mut self, limit: u64) -> Self {
        self.max_footer_size = Some(limit);
        self
    }
}

impl FooterReader for FileFooterReader {
    fn read_footer(
        &self,
        file_path: &str,
        offset: u64,
        length: u64,
    ) -> Result<FileFooter, FooterError> {
        if let Some(limit) = self.max_footer_size {
            if length > limit {
                return Err(FooterError::InvalidFormat(format!(
                    "footer length {} exceeds limit {}",
                    length, limit
                )));
            }
        }

        let mut file = File::open(file_path)?;
        let file_size = file.metadata()?.len();
        let end = offset.checked_add(length).ok_or_else(|| {
            FooterError::InvalidFormat(format!("footer range {}+{} overflows", offset, length))
        })?;
        if end > file_size {
            return Err(FooterError::Truncated {
                needed: (end - file_size) as usize,
            });
        }

        file.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; length as usize];
        file.read_exact(&mut data)?;

        trace!(path = file_path, offset, length, "read footer bytes");

        FileFooter::decode(&data)
    }
}
