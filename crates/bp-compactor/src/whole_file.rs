//! Whole-file compaction — first-fit relocation, highest id first.
//!
//! Each file gets exactly one relocation attempt, in strictly descending
//! id order. The order is load-bearing: earlier attempts permanently
//! consume or preserve free capacity that later (lower-id) attempts see.
//! A file that finds no fit stays put for the rest of the run, even if
//! other relocations later open enough space left of it.

use bp_core::{BpError, Extent, FileId, Layout, Owner, Result};
use tracing::debug;

/// Outcome of a whole-file compaction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileCompactStats {
    /// Files relocated into an earlier free extent.
    pub relocated_files: u32,
    /// Files left in place because no free extent left of them could hold
    /// them. Not an error.
    pub unmoved_files: u32,
}

/// Compact `layout` by relocating whole file extents.
///
/// For each file, highest id to lowest: scan free extents strictly left of
/// the file's current start, left to right, and move the file into the
/// first one at least as long as the file (first-fit). Leftover capacity
/// stays as a smaller free extent at the later offset; the vacated extent
/// becomes free and merges with adjacent free space.
///
/// Zero-length files own no extent and are skipped. A file id that was
/// present after parsing but has vanished from the table is an internal
/// consistency failure, surfaced as [`BpError::FileNotFound`].
pub fn compact_files(layout: &mut Layout) -> Result<FileCompactStats> {
    // Snapshot of which ids actually own blocks. Ids absent here were
    // zero-length tokens in the disk map.
    let parsed = layout.file_lengths();
    let mut stats = FileCompactStats {
        relocated_files: 0,
        unmoved_files: 0,
    };

    for raw_id in (0..layout.file_count()).rev() {
        let id = FileId(raw_id);
        if !parsed.contains_key(&id) {
            continue;
        }
        let idx = layout
            .find_file(id)
            .ok_or(BpError::FileNotFound { id })?;
        let file = layout.extents()[idx];

        // Every extent before idx starts (and ends) left of the file, so
        // this is exactly the "strictly left of current start" scan.
        let fit = layout.extents()[..idx]
            .iter()
            .position(|e| e.owner.is_free() && e.len >= file.len);

        let Some(gap_idx) = fit else {
            stats.unmoved_files += 1;
            continue;
        };

        let extents = layout.extents_mut();
        let gap_len = extents[gap_idx].len;
        extents[idx].owner = Owner::Free;
        extents[gap_idx] = Extent::new(0, file.len, Owner::File(id));
        let leftover = gap_len - file.len;
        if leftover > 0 {
            extents.insert(gap_idx + 1, Extent::new(0, leftover, Owner::Free));
        }
        layout.coalesce();
        stats.relocated_files += 1;
        debug!(
            file = id.0,
            from = file.start,
            len = file.len,
            leftover,
            "relocated file"
        );
    }

    debug!(
        relocated = stats.relocated_files,
        unmoved = stats.unmoved_files,
        "whole-file compaction complete"
    );
    Ok(stats)
}
