//! Positional checksum over a finalized layout.

use bp_core::Layout;

/// Σ position × owner id over every occupied position. Free positions
/// contribute nothing.
///
/// Pure and idempotent; folds per extent in closed form instead of
/// expanding to one term per block: an extent of length `n` at `start`
/// covers positions summing to `n·start + n(n−1)/2`.
pub fn checksum(layout: &Layout) -> u64 {
    layout
        .extents()
        .iter()
        .filter(|e| e.len > 0)
        .filter_map(|e| {
            let id = e.owner.file_id()?;
            let positions = e.len * e.start + e.len * (e.len - 1) / 2;
            Some(u64::from(id.0) * positions)
        })
        .sum()
}
