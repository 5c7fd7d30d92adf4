//! Block-level compaction — greedy single-block packing.
//!
//! Moves the rightmost occupied block into the leftmost free slot until
//! every free position lies after every occupied one. Runs over the extent
//! table with two converging cursors, transferring `min(gap, tail)` blocks
//! per step; block-for-block this produces the same layout as the
//! one-block-at-a-time loop, in a single pass.

use bp_core::{Extent, FileId, Layout, Owner};
use tracing::debug;

/// Outcome of a block-level compaction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockCompactStats {
    /// Total blocks whose position changed.
    pub moved_blocks: u64,
}

/// Left-pack `layout` in place. Files may end up split across
/// non-contiguous positions; per-file block counts are conserved.
///
/// A layout with no free space is already compact and comes back
/// untouched. Always terminates: each transfer strictly shrinks the free
/// capacity left of the rightmost occupied block.
pub fn compact_blocks(layout: &mut Layout) -> BlockCompactStats {
    let free_total = layout.free_blocks();
    if free_total == 0 {
        return BlockCompactStats { moved_blocks: 0 };
    }

    let extents = std::mem::take(layout.extents_mut());
    let mut packed: Vec<Extent> = Vec::with_capacity(extents.len());
    let mut moved = 0u64;

    let mut front = 0usize;
    let mut back = extents.len();
    // Partially drained occupied extent at the back: its unmoved blocks
    // stay in place once the cursors meet.
    let mut tail: Option<(FileId, u64)> = None;

    while front < back {
        match extents[front].owner {
            Owner::File(_) => {
                packed.push(extents[front]);
                front += 1;
            }
            Owner::Free => {
                let mut gap = extents[front].len;
                front += 1;
                while gap > 0 {
                    let (id, remaining) = match tail.take() {
                        Some(t) => t,
                        None => {
                            let mut next = None;
                            while back > front {
                                back -= 1;
                                if let Owner::File(id) = extents[back].owner {
                                    next = Some((id, extents[back].len));
                                    break;
                                }
                            }
                            match next {
                                Some(t) => t,
                                // Cursors crossed: the rest of this gap
                                // belongs to the trailing free run.
                                None => break,
                            }
                        }
                    };
                    let take = gap.min(remaining);
                    packed.push(Extent::new(0, take, Owner::File(id)));
                    moved += take;
                    gap -= take;
                    if remaining > take {
                        tail = Some((id, remaining - take));
                    }
                }
            }
        }
    }

    if let Some((id, remaining)) = tail {
        packed.push(Extent::new(0, remaining, Owner::File(id)));
    }
    packed.push(Extent::new(0, free_total, Owner::Free));

    *layout.extents_mut() = packed;
    layout.coalesce();
    debug!(moved_blocks = moved, "block-level compaction complete");
    debug_assert!(layout.is_left_packed());
    BlockCompactStats {
        moved_blocks: moved,
    }
}
