//! Test modules for the route tree.
//!
//! This module contains crate-internal test suites:
//! - Configuration loading and validation
//! - Error reporting
//! - Property-based tests for the radix tree using proptest

pub mod radix_tree_property_tests;
