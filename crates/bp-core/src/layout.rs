//! Extent-table representation of a block layout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// File identifier, assigned in strictly increasing parse order from 0.
///
/// Stored as a first-class integer: ids routinely exceed 9, so they must
/// never be collapsed to single characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ownership state of a run of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Free,
    File(FileId),
}

impl Owner {
    pub fn is_free(&self) -> bool {
        matches!(self, Owner::Free)
    }

    pub fn file_id(&self) -> Option<FileId> {
        match self {
            Owner::Free => None,
            Owner::File(id) => Some(*id),
        }
    }
}

/// Maximal run of contiguous blocks sharing one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub start: u64,
    pub len: u64,
    pub owner: Owner,
}

impl Extent {
    pub fn new(start: u64, len: u64, owner: Owner) -> Self {
        Self { start, len, owner }
    }

    /// One past the last position covered by this extent.
    pub fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// Ordered extent table partitioning positions `0..total_blocks()` with no
/// gaps or overlaps.
///
/// `file_count` records how many file tokens the parser saw, including
/// zero-length files that own no extent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    extents: Vec<Extent>,
    file_count: u32,
}

impl Layout {
    /// Build a layout from raw extents. Starts are recomputed from the
    /// extent order; adjacent same-owner runs are merged and empty runs
    /// dropped.
    pub fn from_extents(extents: Vec<Extent>, file_count: u32) -> Self {
        let mut layout = Self {
            extents,
            file_count,
        };
        layout.coalesce();
        layout
    }

    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    /// Mutable access for the compaction policies. Callers must restore
    /// the partition invariant via [`Layout::coalesce`] or
    /// [`Layout::reindex`] before handing the layout on.
    pub fn extents_mut(&mut self) -> &mut Vec<Extent> {
        &mut self.extents
    }

    /// Number of file tokens parsed (ids `0..file_count`).
    pub fn file_count(&self) -> u32 {
        self.file_count
    }

    pub fn total_blocks(&self) -> u64 {
        self.extents.iter().map(|e| e.len).sum()
    }

    pub fn free_blocks(&self) -> u64 {
        self.extents
            .iter()
            .filter(|e| e.owner.is_free())
            .map(|e| e.len)
            .sum()
    }

    /// Index of the extent owned by `id`, if any. Whole-file compaction
    /// keeps each file in a single extent, so at most one can match.
    pub fn find_file(&self, id: FileId) -> Option<usize> {
        self.extents.iter().position(|e| e.owner == Owner::File(id))
    }

    /// Per-file block counts. Positions are irrelevant here, which makes
    /// this the conserved quantity under both compaction policies.
    pub fn file_lengths(&self) -> BTreeMap<FileId, u64> {
        let mut lengths = BTreeMap::new();
        for extent in &self.extents {
            if let Owner::File(id) = extent.owner {
                *lengths.entry(id).or_insert(0) += extent.len;
            }
        }
        lengths
    }

    /// Expand to one owner per position. Debug/test aid only; the
    /// compaction policies never materialize this.
    pub fn block_owners(&self) -> Vec<Owner> {
        let mut owners = Vec::with_capacity(self.total_blocks() as usize);
        for extent in &self.extents {
            for _ in 0..extent.len {
                owners.push(extent.owner);
            }
        }
        owners
    }

    /// True iff no occupied position lies to the right of a free one.
    pub fn is_left_packed(&self) -> bool {
        let mut seen_free = false;
        for extent in &self.extents {
            if extent.len == 0 {
                continue;
            }
            if extent.owner.is_free() {
                seen_free = true;
            } else if seen_free {
                return false;
            }
        }
        true
    }

    /// Recompute `start` fields from the extent order.
    pub fn reindex(&mut self) {
        let mut pos = 0u64;
        for extent in &mut self.extents {
            extent.start = pos;
            pos += extent.len;
        }
    }

    /// Drop empty extents, merge adjacent same-owner runs, and reindex.
    pub fn coalesce(&mut self) {
        let mut merged: Vec<Extent> = Vec::with_capacity(self.extents.len());
        for extent in self.extents.drain(..) {
            if extent.len == 0 {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.owner == extent.owner => last.len += extent.len,
                _ => merged.push(extent),
            }
        }
        self.extents = merged;
        self.reindex();
    }
}
