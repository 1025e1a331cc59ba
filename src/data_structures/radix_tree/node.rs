// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the radix tree.
//!
//! Every node owns the fragment of the key it adds to its parent's path, an
//! optional terminal payload, and its children in insertion order. Parents own
//! their children outright, so the whole tree is a single ownership hierarchy.

use std::mem;

use tracing::trace;

use super::error::{TreeError, TreeResult};
use super::key::{longest_common_prefix, ParamInfo};

/// The payload attached to a node that represents a fully stored key.
#[derive(Debug)]
pub struct NodeValue<T> {
    value: T,
    params: Vec<ParamInfo>,
}

impl<T> NodeValue<T> {
    pub(crate) fn new(value: T, params: Vec<ParamInfo>) -> Self {
        Self { value, params }
    }

    /// The stored value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Wildcard parameters of the full stored key.
    pub fn params(&self) -> &[ParamInfo] {
        &self.params
    }
}

/// A node in the radix tree.
#[derive(Debug)]
pub struct Node<T> {
    key: String,
    value: Option<NodeValue<T>>,
    children: Vec<Node<T>>,
}

/// Outcome of trying to place a payload below a node.
///
/// A branch that shares no prefix with the key hands the payload back so the
/// caller can offer it to the next sibling.
pub(crate) enum Placement<T> {
    Placed,
    NoCommonPrefix(NodeValue<T>),
}

impl<T> Node<T> {
    pub(crate) fn new(key: impl Into<String>, value: NodeValue<T>) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// The fragment this node contributes to the path from its parent.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this node carries a stored value.
    pub fn is_leaf(&self) -> bool {
        self.value.is_some()
    }

    /// The stored value, if this node is a leaf.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref().map(NodeValue::value)
    }

    /// The full terminal payload, if this node is a leaf.
    pub fn node_value(&self) -> Option<&NodeValue<T>> {
        self.value.as_ref()
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Places `value` under `key`, which is relative to this node's parent.
    ///
    /// Nothing is mutated when the key is already stored.
    pub(crate) fn insert(&mut self, key: &str, value: NodeValue<T>) -> TreeResult<Placement<T>> {
        let lcp = longest_common_prefix(&self.key, key);

        if lcp == 0 {
            return Ok(Placement::NoCommonPrefix(value));
        }

        if lcp == self.key.len() && lcp == key.len() {
            if self.is_leaf() {
                return Err(TreeError::KeyIsAlreadyStored);
            }
            self.value = Some(value);
            return Ok(Placement::Placed);
        }

        if self.key.len() > lcp {
            self.split(lcp, &key[lcp..], value);
            return Ok(Placement::Placed);
        }

        let remainder = &key[lcp..];
        let mut value = value;

        for child in &mut self.children {
            match child.insert(remainder, value)? {
                Placement::Placed => return Ok(Placement::Placed),
                Placement::NoCommonPrefix(rejected) => value = rejected,
            }
        }

        self.children.push(Node::new(remainder, value));
        Ok(Placement::Placed)
    }

    /// Shortens this node's fragment to `at` bytes, moving the old tail, payload
    /// and children into a new child.
    fn split(&mut self, at: usize, remainder: &str, value: NodeValue<T>) {
        let tail = Node {
            key: self.key.split_off(at),
            value: self.value.take(),
            children: mem::take(&mut self.children),
        };

        trace!(prefix = %self.key, tail = %tail.key, "splitting node");

        if remainder.is_empty() {
            self.value = Some(value);
            self.children = vec![tail];
        } else {
            self.children = vec![tail, Node::new(remainder, value)];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(value: u32) -> NodeValue<u32> {
        NodeValue::new(value, Vec::new())
    }

    fn insert(root: &mut Node<u32>, key: &str, value: u32) -> TreeResult<()> {
        match root.insert(key, payload(value))? {
            Placement::Placed => Ok(()),
            Placement::NoCommonPrefix(_) => panic!("no common prefix for {key}"),
        }
    }

    fn fragments(node: &Node<u32>) -> Vec<&str> {
        node.children().iter().map(Node::key).collect()
    }

    #[test]
    fn test_split_into_two_children() {
        let mut root = Node::new("/foo/bar", payload(1));
        insert(&mut root, "/foo/baz", 2).unwrap();

        assert_eq!(root.key(), "/foo/ba");
        assert!(!root.is_leaf());
        assert_eq!(fragments(&root), vec!["r", "z"]);
        assert_eq!(root.children()[0].value(), Some(&1));
        assert_eq!(root.children()[1].value(), Some(&2));
    }

    #[test]
    fn test_split_where_key_ends() {
        let mut root = Node::new("/foo", payload(1));
        insert(&mut root, "/fo", 2).unwrap();

        assert_eq!(root.key(), "/fo");
        assert_eq!(root.value(), Some(&2));
        assert_eq!(fragments(&root), vec!["o"]);
        assert_eq!(root.children()[0].value(), Some(&1));
    }

    #[test]
    fn test_split_keeps_old_children() {
        let mut root = Node::new("/foo/bar", payload(1));
        insert(&mut root, "/foo/bar/baz", 2).unwrap();
        insert(&mut root, "/foo/qux", 3).unwrap();

        assert_eq!(root.key(), "/foo/");
        assert_eq!(fragments(&root), vec!["bar", "qux"]);

        let bar = &root.children()[0];
        assert_eq!(bar.value(), Some(&1));
        assert_eq!(fragments(bar), vec!["/baz"]);
    }

    #[test]
    fn test_payload_on_internal_node() {
        let mut root = Node::new("/foo/bar", payload(1));
        insert(&mut root, "/foo/baz", 2).unwrap();
        insert(&mut root, "/foo/ba", 3).unwrap();

        assert_eq!(root.value(), Some(&3));
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_siblings_appended_in_order() {
        let mut root = Node::new("/", payload(0));
        insert(&mut root, "/a", 1).unwrap();
        insert(&mut root, "/b", 2).unwrap();
        insert(&mut root, "/c", 3).unwrap();

        assert_eq!(fragments(&root), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_duplicate_key_rejected_without_mutation() {
        let mut root = Node::new("/foo/bar", payload(1));
        insert(&mut root, "/foo/baz", 2).unwrap();

        assert_eq!(insert(&mut root, "/foo/baz", 3), Err(TreeError::KeyIsAlreadyStored));
        assert_eq!(root.children()[1].value(), Some(&2));
        assert_eq!(fragments(&root), vec!["r", "z"]);
    }

    #[test]
    fn test_no_common_prefix_returns_payload() {
        let mut node = Node::new("foo", payload(1));
        match node.insert("bar", payload(7)).unwrap() {
            Placement::NoCommonPrefix(value) => assert_eq!(*value.value(), 7),
            Placement::Placed => panic!("expected the payload back"),
        }
        assert!(node.children().is_empty());
    }
}
