use crate::layout::{Extent, FileId, Layout, Owner};

fn file(id: u32) -> Owner {
    Owner::File(FileId(id))
}

fn ext(len: u64, owner: Owner) -> Extent {
    // Start is recomputed by from_extents.
    Extent::new(0, len, owner)
}

// ========== Extent ==========

#[test]
fn test_extent_end() {
    let e = Extent::new(3, 4, Owner::Free);
    assert_eq!(e.end(), 7);
}

#[test]
fn test_owner_accessors() {
    assert!(Owner::Free.is_free());
    assert!(!file(3).is_free());
    assert_eq!(file(3).file_id(), Some(FileId(3)));
    assert_eq!(Owner::Free.file_id(), None);
}

// ========== Layout construction ==========

#[test]
fn test_from_extents_reindexes() {
    let layout = Layout::from_extents(vec![ext(1, file(0)), ext(2, Owner::Free), ext(3, file(1))], 2);
    let starts: Vec<u64> = layout.extents().iter().map(|e| e.start).collect();
    assert_eq!(starts, vec![0, 1, 3]);
    assert_eq!(layout.total_blocks(), 6);
}

#[test]
fn test_from_extents_drops_empty_runs() {
    let layout = Layout::from_extents(vec![ext(1, file(0)), ext(0, Owner::Free), ext(2, file(1))], 2);
    assert_eq!(layout.extents().len(), 2);
    assert_eq!(layout.free_blocks(), 0);
}

#[test]
fn test_from_extents_merges_adjacent_free() {
    let layout = Layout::from_extents(
        vec![ext(1, file(0)), ext(2, Owner::Free), ext(3, Owner::Free)],
        1,
    );
    assert_eq!(layout.extents().len(), 2);
    assert_eq!(layout.extents()[1].len, 5);
}

#[test]
fn test_from_extents_merges_split_file_runs() {
    // A file's blocks can sit in adjacent extents after block-level moves.
    let layout = Layout::from_extents(vec![ext(2, file(0)), ext(1, file(0))], 1);
    assert_eq!(layout.extents().len(), 1);
    assert_eq!(layout.extents()[0].len, 3);
}

// ========== Queries ==========

#[test]
fn test_file_lengths() {
    let layout = Layout::from_extents(
        vec![ext(2, file(0)), ext(1, Owner::Free), ext(4, file(1))],
        2,
    );
    let lengths = layout.file_lengths();
    assert_eq!(lengths[&FileId(0)], 2);
    assert_eq!(lengths[&FileId(1)], 4);
    assert_eq!(lengths.len(), 2);
}

#[test]
fn test_find_file() {
    let layout = Layout::from_extents(
        vec![ext(2, file(0)), ext(1, Owner::Free), ext(4, file(1))],
        2,
    );
    assert_eq!(layout.find_file(FileId(1)), Some(2));
    assert_eq!(layout.find_file(FileId(7)), None);
}

#[test]
fn test_block_owners_expansion() {
    let layout = Layout::from_extents(vec![ext(1, file(0)), ext(2, Owner::Free)], 1);
    assert_eq!(
        layout.block_owners(),
        vec![file(0), Owner::Free, Owner::Free]
    );
}

#[test]
fn test_is_left_packed() {
    let packed = Layout::from_extents(vec![ext(2, file(0)), ext(3, Owner::Free)], 1);
    assert!(packed.is_left_packed());

    let unpacked = Layout::from_extents(vec![ext(1, Owner::Free), ext(2, file(0))], 1);
    assert!(!unpacked.is_left_packed());

    let no_free = Layout::from_extents(vec![ext(2, file(0)), ext(1, file(1))], 2);
    assert!(no_free.is_left_packed());
}

#[test]
fn test_reindex_after_mutation() {
    let mut layout = Layout::from_extents(vec![ext(2, file(0)), ext(3, Owner::Free)], 1);
    layout.extents_mut()[0].len = 5;
    layout.reindex();
    assert_eq!(layout.extents()[1].start, 5);
}

#[test]
fn test_file_count_includes_zero_length_files() {
    // File 1 had length 0 in the disk map: no extent, but the id exists.
    let layout = Layout::from_extents(vec![ext(2, file(0)), ext(1, file(2))], 3);
    assert_eq!(layout.file_count(), 3);
    assert_eq!(layout.find_file(FileId(1)), None);
}
