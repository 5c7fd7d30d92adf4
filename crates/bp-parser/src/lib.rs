//! Disk-map parsing for blockpack.
//!
//! A disk map is one line of decimal digits read as alternating
//! (file-length, free-length) pairs, starting with a file length; the
//! trailing free-length may be absent. Each file token is assigned the
//! next sequential id starting at 0.

use bp_core::{BpError, Extent, FileId, Layout, Owner, Result};
use tracing::debug;

/// Decode a disk map into an extent-table layout.
///
/// Trailing ASCII whitespace (typically the newline of an input file) is
/// trimmed before validation. Fails with [`BpError::MalformedInput`] if
/// the trimmed input is empty or contains a non-digit byte.
///
/// A `0` digit produces no extent, but a zero-length file token still
/// consumes a file id, so ids stay aligned with token order.
pub fn parse_disk_map(input: &str) -> Result<Layout> {
    let trimmed = input.trim_end();
    if trimmed.is_empty() {
        return Err(BpError::MalformedInput {
            position: 0,
            reason: "empty input".into(),
        });
    }

    let mut extents = Vec::with_capacity(trimmed.len());
    let mut next_id = 0u32;

    for (position, byte) in trimmed.bytes().enumerate() {
        if !byte.is_ascii_digit() {
            return Err(BpError::MalformedInput {
                position,
                reason: format!("byte {:?} is not a decimal digit", byte as char),
            });
        }
        let len = u64::from(byte - b'0');
        // Even positions are file lengths, odd positions free lengths.
        let owner = if position % 2 == 0 {
            let id = FileId(next_id);
            next_id += 1;
            Owner::File(id)
        } else {
            Owner::Free
        };
        if len > 0 {
            extents.push(Extent::new(0, len, owner));
        }
    }

    let layout = Layout::from_extents(extents, next_id);
    debug!(
        files = layout.file_count(),
        blocks = layout.total_blocks(),
        free = layout.free_blocks(),
        "parsed disk map"
    );
    Ok(layout)
}
