//! Compaction pipeline — parse, compact, checksum.

use crate::{block_level, checksum, whole_file};
use bp_core::Result;
use bp_parser::parse_disk_map;
use serde::Serialize;
use tracing::info;

/// Which compaction discipline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactionPolicy {
    /// Single-block greedy packing; files may fragment.
    BlockLevel,
    /// Whole-extent first-fit, highest file id first; files stay contiguous.
    WholeFile,
}

/// Full run report.
#[derive(Debug, Clone, Serialize)]
pub struct CompactionReport {
    pub checksum: u64,
    pub policy: CompactionPolicy,
    pub total_blocks: u64,
    pub free_blocks: u64,
    pub file_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_blocks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relocated_files: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unmoved_files: Option<u32>,
}

/// The main compaction pipeline.
pub struct CompactionPipeline {
    pub policy: CompactionPolicy,
}

impl CompactionPipeline {
    pub fn new(policy: CompactionPolicy) -> Self {
        Self { policy }
    }

    pub fn block_level() -> Self {
        Self::new(CompactionPolicy::BlockLevel)
    }

    pub fn whole_file() -> Self {
        Self::new(CompactionPolicy::WholeFile)
    }

    /// Run the full pipeline on one disk map: parse the layout, compact it
    /// in place under the selected policy, and reduce it to the checksum.
    pub fn run(&self, disk_map: &str) -> Result<CompactionReport> {
        let mut layout = parse_disk_map(disk_map)?;
        let file_count = layout.file_count();
        let total_blocks = layout.total_blocks();

        let (moved_blocks, relocated_files, unmoved_files) = match self.policy {
            CompactionPolicy::BlockLevel => {
                let stats = block_level::compact_blocks(&mut layout);
                (Some(stats.moved_blocks), None, None)
            }
            CompactionPolicy::WholeFile => {
                let stats = whole_file::compact_files(&mut layout)?;
                (None, Some(stats.relocated_files), Some(stats.unmoved_files))
            }
        };

        let checksum = checksum::checksum(&layout);
        info!(
            policy = ?self.policy,
            checksum,
            total_blocks,
            file_count,
            "compaction run complete"
        );
        Ok(CompactionReport {
            checksum,
            policy: self.policy,
            total_blocks,
            free_blocks: layout.free_blocks(),
            file_count,
            moved_blocks,
            relocated_files,
            unmoved_files,
        })
    }
}

impl Default for CompactionPipeline {
    fn default() -> Self {
        Self::new(CompactionPolicy::BlockLevel)
    }
}
