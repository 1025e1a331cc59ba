//! Route Tree Library
//!
//! A compressed prefix tree that maps URL-shaped templates such as
//! `/api/{resource}/get/{id}` to values, and matches request paths against
//! them with named parameter extraction.
//!
//! # Architecture
//!
//! - [`data_structures::radix_tree`] holds the tree itself and is usable on its own.
//! - [`routes`] builds a tree of named routes from configuration.
//! - [`config`] and [`error`] support the `rtree` command line tool.

pub mod config;
pub mod data_structures;
pub mod error;
pub mod routes;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use data_structures::radix_tree::{FoundNode, Leaf, MatchedParams, Node, RadixTree, TreeError};

/// Version information for the route tree.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
