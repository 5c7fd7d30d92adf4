//! Shared data model for the blockpack compaction engine.
//!
//! A disk map describes a linear run of fixed-size blocks, each either
//! free or owned by exactly one file. This crate defines the extent-table
//! representation of that layout plus the error taxonomy; parsing lives in
//! `bp-parser`, the compaction policies in `bp-compactor`.

pub mod error;
pub mod layout;

pub use error::{BpError, Result};
pub use layout::{Extent, FileId, Layout, Owner};

#[cfg(test)]
mod tests;
