//! Data structures for route matching.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Owned node hierarchies, no reference counting inside structures
//! - Safe for concurrent readers and writers

pub mod radix_tree;

// Re-export common data structures
pub use radix_tree::{RadixTree, TreeError, TreeResult};
