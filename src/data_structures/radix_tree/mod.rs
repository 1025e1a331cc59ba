// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Radix tree for URL-shaped keys with named wildcard segments.
//!
//! Keys are `/`-delimited paths such as `/api/{resource}/get/{id}`. A segment
//! written as `{name}` matches exactly one segment of a search key, and the
//! matched text is returned under `name`.
//!
//! # Example
//!
//! ```
//! use route_tree::data_structures::radix_tree::RadixTree;
//!
//! let tree = RadixTree::new();
//! tree.insert("/api/{resource}/get/{id}", "get").unwrap();
//! tree.insert("/api/{resource}/delete/{id}", "delete").unwrap();
//!
//! let found = tree.find("/api/products/delete/1").unwrap();
//! assert_eq!(*found.value(), "delete");
//! assert_eq!(found.params()["resource"], "products");
//! assert_eq!(found.params()["id"], "1");
//!
//! assert!(tree.find("/api/products/insert/1").is_none());
//! ```
//!
//! # Ambiguous routes
//!
//! Children are tried in registration order and the first match wins, so
//! storing both `/api/{resource}/get` and `/api/products/get` resolves
//! `/api/products/get` to whichever branch was registered first.
//! `/api/{resource}/get` and `/api/products/get-all` do not collide.
//!
//! # Concurrency
//!
//! A single reader/writer lock guards the whole tree. Insertion holds it
//! exclusively for the full mutation; every read holds it shared for the full
//! traversal.

mod error;
mod key;
mod node;
mod scan;
mod search;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use tracing::{debug, trace};

pub use error::{TreeError, TreeResult};
pub use key::{longest_common_prefix, match_params, path_params, validate_key, MatchedParams, ParamInfo};
pub use node::{Node, NodeValue};
pub use scan::{scan_offsets, Offsets};

use node::Placement;

/// A configuration hook applied to a freshly constructed tree.
pub type TreeOption<T> = Box<dyn FnOnce(&mut RadixTree<T>)>;

/// The result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundNode<T> {
    value: T,
    params: MatchedParams,
}

impl<T> FoundNode<T> {
    /// The stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Wildcard bindings, keyed by parameter name.
    pub fn params(&self) -> &MatchedParams {
        &self.params
    }

    /// Consumes the result, returning the value and its bindings.
    pub fn into_parts(self) -> (T, MatchedParams) {
        (self.value, self.params)
    }
}

/// A detached snapshot of a stored key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<T> {
    key: String,
    value: T,
    params: Vec<ParamInfo>,
}

impl<T> Leaf<T> {
    /// The full key as it was inserted.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Wildcard parameters of the stored key.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }

    /// Consumes the snapshot, returning the stored value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// A compressed prefix tree mapping path-like keys to values.
#[derive(Debug)]
pub struct RadixTree<T> {
    root: RwLock<Option<Node<T>>>,
}

impl<T> RadixTree<T> {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self {
            root: RwLock::new(None),
        }
    }

    /// Creates a new empty tree and applies `options` to it in order.
    ///
    /// # Arguments
    ///
    /// * `options` - Hooks run once against the new tree.
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = TreeOption<T>>,
    {
        let mut tree = Self::new();
        for option in options {
            option(&mut tree);
        }
        tree
    }

    /// Stores `value` under `key`.
    ///
    /// The key is validated before the tree is locked; on any error the tree
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// * Any validation error from [`validate_key`].
    /// * `KeyIsAlreadyStored` - The exact key is already present.
    pub fn insert<K>(&self, key: K, value: T) -> TreeResult<()>
    where
        K: AsRef<str>,
    {
        let key = key.as_ref();

        if let Err(err) = validate_key(key) {
            debug!(key, error = %err, "rejected key");
            return Err(err);
        }

        let payload = NodeValue::new(value, path_params(key));
        let mut root = self.root.write();

        let result = match root.as_mut() {
            None => {
                *root = Some(Node::new(key, payload));
                Ok(())
            }
            Some(node) => match node.insert(key, payload) {
                Ok(Placement::Placed) => Ok(()),
                // Every validated key shares the leading slash with the root.
                Ok(Placement::NoCommonPrefix(_)) => unreachable!("key {key} diverges at the root"),
                Err(err) => Err(err),
            },
        };

        match &result {
            Ok(()) => debug!(key, "stored key"),
            Err(err) => debug!(key, error = %err, "rejected key"),
        }

        result
    }

    /// Looks up `key`, binding wildcard segments of the matching stored key.
    ///
    /// Returns `None` for an empty tree, an empty key, or when nothing matches.
    pub fn find(&self, key: &str) -> Option<FoundNode<T>>
    where
        T: Clone,
    {
        if key.is_empty() {
            return None;
        }

        let root = self.root.read();
        let node = search::find(checked_root(&root).ok()?, key, false);

        let Some(payload) = node.and_then(Node::node_value) else {
            trace!(key, "no match");
            return None;
        };

        Some(FoundNode {
            value: payload.value().clone(),
            params: match_params(payload.params(), key),
        })
    }

    /// Finds the value of the deepest stored key that is a literal prefix of `key`.
    ///
    /// Wildcard segments are compared literally and no parameters are bound.
    pub fn find_longest_match(&self, key: &str) -> Option<FoundNode<T>>
    where
        T: Clone,
    {
        if key.is_empty() {
            return None;
        }

        let root = self.root.read();
        let value = search::longest_match(checked_root(&root).ok()?, key)?.value()?;

        Some(FoundNode {
            value: value.clone(),
            params: MatchedParams::new(),
        })
    }

    /// Returns the first node, in depth-first pre-order, for which `predicate` holds.
    ///
    /// The returned guard keeps the tree read-locked until it is dropped.
    pub fn get_by_predicate<F>(&self, mut predicate: F) -> Option<MappedRwLockReadGuard<'_, Node<T>>>
    where
        F: FnMut(&Node<T>) -> bool,
    {
        let root = self.root.read();
        RwLockReadGuard::try_map(root, |root| {
            let node = checked_root(root).ok()?;
            search::find_by_predicate(node, &mut predicate)
        })
        .ok()
    }

    /// Returns a snapshot of every stored key, children before their parents.
    pub fn get_all_leaves(&self) -> Vec<Leaf<T>>
    where
        T: Clone,
    {
        let root = self.root.read();
        let mut leaves = Vec::new();

        if let Ok(node) = checked_root(&root) {
            search::visit_leaves(node, &mut String::new(), &mut |key, payload| {
                leaves.push(Leaf {
                    key: key.to_string(),
                    value: payload.value().clone(),
                    params: payload.params().to_vec(),
                });
            });
        }

        leaves
    }

    /// Returns the number of stored keys.
    ///
    /// This walks the entire tree, so it's an O(n) operation.
    pub fn len(&self) -> usize {
        let root = self.root.read();
        let mut count = 0;

        if let Ok(node) = checked_root(&root) {
            search::visit_leaves(node, &mut String::new(), &mut |_, _| count += 1);
        }

        count
    }

    /// Checks if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.read().is_none()
    }
}

impl<T> Default for RadixTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn checked_root<T>(root: &Option<Node<T>>) -> TreeResult<&Node<T>> {
    root.as_ref().ok_or(TreeError::RootIsNil)
}

/// Inserts into a tree that may be absent.
///
/// # Errors
///
/// * `TreeIsNil` - No tree was given.
/// * Any error from [`RadixTree::insert`].
pub fn insert_into<T>(tree: Option<&RadixTree<T>>, key: &str, value: T) -> TreeResult<()> {
    tree.ok_or(TreeError::TreeIsNil)?.insert(key, value)
}

/// Looks up a key in a tree that may be absent. An absent tree matches nothing.
pub fn find_in<T: Clone>(tree: Option<&RadixTree<T>>, key: &str) -> Option<FoundNode<T>> {
    tree?.find(key)
}
