//! Compaction input preparation
//!
//! The compaction driver hands over a flat list of [`BlockDescriptor`]s.
//! This module regroups them per segment and task ([`SegmentTaskGrouper`]),
//! loads the footer of every block ([`SegmentFooterLoader`]) and tells each
//! output task where to stage its in-progress file ([`StagingPathBuilder`]).
//!
//! Map key order is unspecified everywhere; only the order of blocks and
//! footers inside one bucket follows the input.

mod footers;
mod grouper;
mod staging;

pub use footers::SegmentFooterLoader;
pub use grouper::SegmentTaskGrouper;
pub use staging::{committed_path_for, is_in_progress, StagingPathBuilder};

use crate::footer::FileFooter;
use crate::{BlockDescriptor, TaskNumber};
use std::collections::HashMap;

/// Footers of each segment, in input order
pub type SegmentFooterMap = HashMap<String, Vec<FileFooter>>;

/// Task views of each segment
pub type SegmentTaskMap = HashMap<String, SegmentTaskView>;

/// Blocks of one segment grouped by task number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentTaskView {
    tasks: HashMap<TaskNumber, Vec<BlockDescriptor>>,
}

impl SegmentTaskView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the list of `task_no`
    pub fn add(&mut self, task_no: TaskNumber, block: BlockDescriptor) {
        self.tasks
            .entry(task_no)
            .or_insert_with(|| Vec::with_capacity(crate::config::DEFAULT_COLLECTION_SIZE))
            .push(block);
    }

    /// Blocks of one task, in input order
    pub fn blocks(&self, task_no: &TaskNumber) -> Option<&[BlockDescriptor]> {
        self.tasks.get(task_no).map(Vec::as_slice)
    }

    /// Task numbers present in this segment
    pub fn task_numbers(&self) -> impl Iterator<Item = &TaskNumber> {
        self.tasks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskNumber, &[BlockDescriptor])> {
        self.tasks.iter().map(|(task, blocks)| (task, blocks.as_slice()))
    }

    /// Number of tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of blocks across all tasks
    pub fn block_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All blocks of the segment, task by task
    pub fn into_blocks(self) -> impl Iterator<Item = BlockDescriptor> {
        self.tasks.into_values().flatten()
    }
}

/// Flatten a grouping back into a descriptor list
///
/// Blocks of one task stay in order; segment and task order is arbitrary.
pub fn flatten(groups: SegmentTaskMap) -> Vec<BlockDescriptor> {
    groups.into_values().flat_map(SegmentTaskView::into_blocks).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_task_view() {
        let mut view = SegmentTaskView::new();
        assert!(view.is_empty());

        let b0 = BlockDescriptor::new("/s/part-0-0-1.carbondata", 0, 10, "1");
        let b1 = BlockDescriptor::new("/s/part-0-1-1.carbondata", 0, 10, "1");
        let b2 = BlockDescriptor::new("/s/part-1-0-1.carbondata", 0, 10, "1");

        view.add(TaskNumber::new("0"), b0.clone());
        view.add(TaskNumber::new("1"), b1.clone());
        view.add(TaskNumber::new("0"), b2.clone());

        assert_eq!(view.task_count(), 2);
        assert_eq!(view.block_count(), 3);
        assert_eq!(view.blocks(&TaskNumber::new("0")).unwrap(), &[b0, b2][..]);
        assert_eq!(view.blocks(&TaskNumber::new("1")).unwrap(), &[b1][..]);
        assert!(view.blocks(&TaskNumber::new("2")).is_none());

        let mut tasks: Vec<_> = view.task_numbers().map(|t| t.to_string()).collect();
        tasks.sort();
        assert_eq!(tasks, vec!["0", "1"]);
        assert_eq!(view.into_blocks().count(), 3);
    }

    #[test]
    fn test_prepare_compaction_inputs() {
        use crate::metadata::{TableDescriptor, TableRegistry};
        use crate::path::{DataFileName, StorePathBuilder, TablePath};
        use crate::properties::Properties;
        use crate::TableIdentifier;
        use std::io::Write;
        use std::sync::Arc;
        use tempfile::TempDir;

        crate::logging::init_for_tests();
        let store = TempDir::new().unwrap();
        let identifier = TableIdentifier::new("sales", "orders", "17");
        let table_path = TablePath::new(store.path(), identifier.clone());

        // segment "0": tasks 0 and 1, segment "1": task 0
        let mut blocks = Vec::new();
        let layout = [("0", "0", 10u64), ("0", "1", 20), ("1", "0", 30), ("0", "0", 40)];
        for (segment, task, rows) in layout {
            let dir = table_path.data_directory("0", segment);
            std::fs::create_dir_all(&dir).unwrap();
            let name = DataFileName::new(0, task, rows);
            let path = table_path.data_file_path("0", segment, &name);

            let footer = FileFooter::new(rows, 1, vec!["order_id".into()]);
            let encoded = footer.encode().unwrap();
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(b"column data").unwrap();
            file.write_all(&encoded).unwrap();

            blocks.push(BlockDescriptor::new(
                path.to_string_lossy(),
                11,
                encoded.len() as u64,
                segment,
            ));
        }

        let grouped = SegmentTaskGrouper::default()
            .group_by_segment_and_task(&blocks)
            .unwrap();
        assert_eq!(grouped["0"].task_count(), 2);
        assert_eq!(grouped["0"].blocks(&TaskNumber::new("0")).unwrap().len(), 2);
        assert_eq!(grouped["1"].block_count(), 1);

        let footers = SegmentFooterLoader::default()
            .load_footers_by_segment(&blocks)
            .unwrap();
        let rows: Vec<u64> = footers["0"].iter().map(|f| f.num_rows).collect();
        assert_eq!(rows, vec![10, 20, 40]);

        let properties = Properties::new();
        properties.set("sales_orders", store.path().to_string_lossy());
        let registry = TableRegistry::new();
        registry.register(TableDescriptor::new(identifier));
        let staging = StagingPathBuilder::new(
            Arc::new(properties),
            Arc::new(registry),
            Arc::new(StorePathBuilder),
        );

        let path = staging
            .staging_path_for("sales", "orders", "0", "0", "0")
            .unwrap();
        let expected = table_path.data_directory("0", "0").join("0.inprogress");
        assert_eq!(path, expected.to_string_lossy());
        assert_eq!(
            committed_path_for(&path).unwrap(),
            table_path.data_directory("0", "0").join("0").to_string_lossy()
        );
    }
}
