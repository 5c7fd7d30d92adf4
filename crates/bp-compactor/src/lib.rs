//! blockpack compaction engine — two in-place policies over one layout.
//!
//! Policies:
//! 1. Block-level — greedy single-block packing: rightmost occupied block
//!    into leftmost free slot until fully left-packed.
//! 2. Whole-file — first-fit relocation of entire file extents, highest
//!    file id first, one attempt per file.
//!
//! Both feed the positional checksum evaluator; the pipeline composes
//! parse → compact → checksum.

pub mod block_level;
pub mod checksum;
pub mod pipeline;
pub mod whole_file;

pub use block_level::{compact_blocks, BlockCompactStats};
pub use checksum::checksum;
pub use pipeline::{CompactionPipeline, CompactionPolicy, CompactionReport};
pub use whole_file::{compact_files, FileCompactStats};
