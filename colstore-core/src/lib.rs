//! Colstore Core - compaction input preparation for a columnar table store
//!
//! Compaction merges the many small data files of a segment into fewer,
//! larger ones. This crate prepares the merger's inputs:
//!
//! - **Grouping**: re-bucket block descriptors by segment and task number
//! - **Footers**: read the footer of every block, bucketed by segment
//! - **Staging**: compute where a compaction task writes its in-progress output
//!
//! The table store collaborators (footer reader, task-number parser, property
//! store, metadata registry and path builder) are traits with in-process
//! implementations in [`footer`], [`path`], [`properties`] and [`metadata`].

pub mod compaction;
pub mod footer;
pub mod logging;
pub mod metadata;
pub mod path;
pub mod properties;

mod error;
mod types;

pub use error::{ColstoreError, Result};
pub use types::*;

/// Colstore version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod config {
    /// Initial capacity hint for per-task block lists
    pub const DEFAULT_COLLECTION_SIZE: usize = 16;

    /// Base store path used when no per-table location is configured
    pub const DEFAULT_STORE_PATH: &str = "../carbon.store";

    /// File name marker for compaction output that is still being written
    pub const IN_PROGRESS_SUFFIX: &str = ".inprogress";

    /// Extension of committed data files
    pub const DATA_FILE_EXTENSION: &str = ".carbondata";

    /// Prefix of every data file name
    pub const DATA_FILE_PREFIX: &str = "part";

    /// Directory holding fact data under a table directory
    pub const FACT_DIR: &str = "Fact";

    /// Prefix of partition directories
    pub const PARTITION_PREFIX: &str = "Part";

    /// Prefix of segment directories
    pub const SEGMENT_PREFIX: &str = "Segment_";

    /// Magic bytes opening every encoded footer
    pub const FOOTER_MAGIC: &[u8; 4] = b"CFTR";

    /// Footer encoding version
    pub const FOOTER_VERSION: u32 = 1;
}
