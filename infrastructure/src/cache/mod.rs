//! Latest-result cache adapters

mod latest_result;

pub use latest_result::InMemoryResultCache;
