// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the radix tree.
//!
//! Lookups never fail: a miss is reported as `None`. Only insertion and the
//! nil-tree helpers produce these errors.

use thiserror::Error;

/// Result type for radix tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur in radix tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The operation was attempted without a tree.
    #[error("[rtree]: the tree is <nil>")]
    TreeIsNil,

    /// A read was attempted on a tree that holds no keys.
    #[error("[rtree]: the root of the tree is <nil>")]
    RootIsNil,

    /// The key was empty.
    #[error("[rtree]: key is empty")]
    KeyIsEmpty,

    /// The key does not start with `/`.
    #[error("[rtree]: urls must be started with a '/'")]
    MissingSlashPrefix,

    /// The key ends with `/` and is not the root key.
    #[error("[rtree]: urls must not be ended with a '/'")]
    PresentSlashSuffix,

    /// The braces of a wildcard segment are nested, unbalanced or contain a `/`.
    #[error("[rtree]: bad path param syntax")]
    BadPathParamSyntax,

    /// The exact key is already stored.
    #[error("[rtree]: key is already stored")]
    KeyIsAlreadyStored,
}
