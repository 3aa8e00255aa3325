//! Fragment sources.
//!
//! Only the filesystem source exists. In-memory callers go straight through
//! [`crate::validate_fragments`] and need no source at all.

pub mod fs;
