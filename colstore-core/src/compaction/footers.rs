//! Footer loading for compaction planning

use super::SegmentFooterMap;
use crate::footer::{FileFooterReader, FooterReader};
use crate::{BlockDescriptor, ColstoreError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads the footer of every block and buckets them by segment
pub struct SegmentFooterLoader {
    reader: Arc<dyn FooterReader + Send + Sync>,
}

impl Default for SegmentFooterLoader {
    fn default() -> Self {
        Self::new(Arc::new(FileFooterReader::new()))
    }
}

impl SegmentFooterLoader {
    pub fn new(reader: Arc<dyn FooterReader + Send + Sync>) -> Self {
        Self { reader }
    }

    /// Load one footer per block, in input order within each segment
    ///
    /// Reads run sequentially. The first failed read aborts the whole call
    /// with [`ColstoreError::FooterRead`]; the merge must never plan on a
    /// partial view of a segment.
    pub fn load_footers_by_segment(&self, blocks: &[BlockDescriptor]) -> Result<SegmentFooterMap> {
        let mut segments: SegmentFooterMap = HashMap::new();

        for block in blocks {
            let footer = self
                .reader
                .read_footer(&block.file_path, block.block_offset, block.block_length)
                .map_err(|source| {
                    warn!(
                        "Failed to read footer of {} (segment {}): {}",
                        block.file_path, block.segment_id, source
                    );
                    ColstoreError::FooterRead {
                        path: block.file_path.clone(),
                        source,
                    }
                })?;

            segments
                .entry(block.segment_id.clone())
                .or_default()
                .push(footer);
        }

        debug!(
            blocks = blocks.len(),
            segments = segments.len(),
            "loaded footers for compaction"
        );

        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footer::{FileFooter, FooterError};
    use crate::logging;
    use parking_lot::Mutex;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    /// Answers every read with a footer built from the call, failing on one path
    struct ScriptedReader {
        calls: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl ScriptedReader {
        fn new(fail_on: Option<&str>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: fail_on.map(str::to_string),
            }
        }
    }

    impl FooterReader for ScriptedReader {
        fn read_footer(
            &self,
            file_path: &str,
            offset: u64,
            _length: u64,
        ) -> std::result::Result<FileFooter, FooterError> {
            self.calls.lock().push(file_path.to_string());
            if self.fail_on.as_deref() == Some(file_path) {
                return Err(FooterError::InvalidFormat("bad footer".into()));
            }
            Ok(FileFooter::new(offset, 1, vec![file_path.to_string()]))
        }
    }

    fn block(path: &str, offset: u64, segment: &str) -> BlockDescriptor {
        BlockDescriptor::new(path, offset, 32, segment)
    }

    #[test]
    fn test_empty_input() {
        let loader = SegmentFooterLoader::new(Arc::new(ScriptedReader::new(None)));
        assert!(loader.load_footers_by_segment(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_footers_follow_input_order() {
        logging::init_for_tests();
        let reader = Arc::new(ScriptedReader::new(None));
        let loader = SegmentFooterLoader::new(reader.clone());

        let blocks = vec![
            block("/a", 0, "s1"),
            block("/b", 1, "s2"),
            block("/c", 2, "s1"),
            block("/d", 3, "s1"),
        ];
        let footers = loader.load_footers_by_segment(&blocks).unwrap();

        assert_eq!(footers.values().map(Vec::len).sum::<usize>(), blocks.len());
        let s1: Vec<u64> = footers["s1"].iter().map(|f| f.num_rows).collect();
        assert_eq!(s1, vec![0, 2, 3]);
        assert_eq!(footers["s2"][0].columns, vec!["/b".to_string()]);
        assert_eq!(*reader.calls.lock(), vec!["/a", "/b", "/c", "/d"]);
    }

    #[test]
    fn test_random_footer_cardinality_and_order() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0xF007);

        for round in 0..50 {
            let blocks: Vec<BlockDescriptor> = (0..round * 3)
                .map(|i| {
                    let segment = rng.gen_range(0..4).to_string();
                    block(&format!("/data/{}", i), i as u64, &segment)
                })
                .collect();

            let loader = SegmentFooterLoader::new(Arc::new(ScriptedReader::new(None)));
            let footers = loader.load_footers_by_segment(&blocks).unwrap();

            assert_eq!(footers.values().map(Vec::len).sum::<usize>(), blocks.len());
            for (segment, bucket) in &footers {
                // footer i of a segment comes from the i-th block of that segment
                let expected: Vec<u64> = blocks
                    .iter()
                    .filter(|b| &b.segment_id == segment)
                    .map(|b| b.block_offset)
                    .collect();
                let rows: Vec<u64> = bucket.iter().map(|f| f.num_rows).collect();
                assert_eq!(rows, expected);
            }
        }
    }

    #[test]
    fn test_failure_halts_loading() {
        let reader = Arc::new(ScriptedReader::new(Some("/b")));
        let loader = SegmentFooterLoader::new(reader.clone());

        let blocks = vec![
            block("/a", 0, "s1"),
            block("/b", 1, "s1"),
            block("/c", 2, "s1"),
        ];
        let err = loader.load_footers_by_segment(&blocks).unwrap_err();

        match err {
            ColstoreError::FooterRead { ref path, ref source } => {
                assert_eq!(path, "/b");
                assert!(matches!(source, FooterError::InvalidFormat(_)));
            }
            ref other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.is_corruption());
        assert!(!err.is_retryable());
        // nothing after the failing block is read
        assert_eq!(*reader.calls.lock(), vec!["/a", "/b"]);
    }

    #[test]
    fn test_load_from_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut blocks = Vec::new();

        for (i, segment) in ["0", "1", "0"].iter().enumerate() {
            let path = temp_dir.path().join(format!("part-0-{}-100.carbondata", i));
            let footer = FileFooter::new(i as u64 * 10, 1, vec!["c".into()]);
            let encoded = footer.encode().unwrap();

            let mut file = File::create(&path).unwrap();
            file.write_all(&[0u8; 16]).unwrap();
            file.write_all(&encoded).unwrap();

            blocks.push(BlockDescriptor::new(
                path.to_string_lossy(),
                16,
                encoded.len() as u64,
                *segment,
            ));
        }

        let footers = SegmentFooterLoader::default()
            .load_footers_by_segment(&blocks)
            .unwrap();
        let rows: Vec<u64> = footers["0"].iter().map(|f| f.num_rows).collect();
        assert_eq!(rows, vec![0, 20]);
        assert_eq!(footers["1"][0].num_rows, 10);
    }

    #[test]
    fn test_missing_file_is_retryable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("part-0-0-1.carbondata");
        let blocks = vec![BlockDescriptor::new(path.to_string_lossy(), 0, 32, "0")];

        let err = SegmentFooterLoader::default()
            .load_footers_by_segment(&blocks)
            .unwrap_err();
        assert!(matches!(err, ColstoreError::FooterRead { .. }));
        assert!(err.is_retryable());
    }
}
