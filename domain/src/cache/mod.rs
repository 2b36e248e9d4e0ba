//! Latest-result cache entry.

pub mod entry;
