//! Segment and task grouping of compaction input

use super::{SegmentTaskMap, SegmentTaskView};
use crate::path::{DataFileNameParser, TaskNumberParser};
use crate::{BlockDescriptor, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Groups block descriptors into `segment -> task -> blocks`
pub struct SegmentTaskGrouper {
    parser: Arc<dyn TaskNumberParser + Send + Sync>,
}

impl Default for SegmentTaskGrouper {
    fn default() -> Self {
        Self::new(Arc::new(DataFileNameParser))
    }
}

impl SegmentTaskGrouper {
    /// Create a grouper using `parser` to read task numbers from paths
    pub fn new(parser: Arc<dyn TaskNumberParser + Send + Sync>) -> Self {
        Self { parser }
    }

    /// Bucket every block under its segment id and task number
    ///
    /// Blocks of one task keep their input order. Fails with
    /// [`MalformedPath`](crate::ColstoreError::MalformedPath) on the first
    /// path without a task number; nothing is returned in that case.
    pub fn group_by_segment_and_task(&self, blocks: &[BlockDescriptor]) -> Result<SegmentTaskMap> {
        let mut segments: SegmentTaskMap = HashMap::new();

        for block in blocks {
            let task_no = self.parser.task_number(&block.file_path)?;
            segments
                .entry(block.segment_id.clone())
                .or_insert_with(SegmentTaskView::new)
                .add(task_no, block.clone());
        }

        debug!(
            blocks = blocks.len(),
            segments = segments.len(),
            "grouped compaction blocks by segment and task"
        );

        Ok(segments)
    }
}
