// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Read-only traversals over a tree of nodes.
//!
//! All functions here work on a borrowed root; locking is the caller's job.

use super::key::{longest_common_prefix, CURLY_END, CURLY_START};
use super::node::{Node, NodeValue};
use super::scan::scan_offsets;

/// Finds the leaf whose stored key matches `key`, honouring wildcard segments.
///
/// `in_wildcard` is the scan state inherited from the parent, set when the
/// parent's fragment ended inside an unterminated `{`. Children are tried in
/// insertion order and the first match wins.
pub(crate) fn find<'a, T>(node: &'a Node<T>, key: &str, in_wildcard: bool) -> Option<&'a Node<T>> {
    let fragment = node.key();
    let lcp = longest_common_prefix(fragment, key);

    if !in_wildcard && !fragment.contains(CURLY_START) {
        if lcp == 0 {
            return None;
        }

        if key == fragment {
            return node.is_leaf().then_some(node);
        }

        if lcp < fragment.len() {
            return None;
        }

        let rest = &key[lcp..];
        return node
            .children()
            .iter()
            .find_map(|child| find(child, rest, false));
    }

    let fragment_rest = &fragment[lcp..];
    let search_rest = &key[lcp..];

    let entry_state = wildcard_state_after(&fragment[..lcp], in_wildcard);
    let offsets = scan_offsets(fragment_rest, search_rest, entry_state);

    if offsets.fragment != fragment_rest.len() {
        return None;
    }

    let rest = search_rest.get(offsets.search..)?;

    if rest.is_empty() {
        return node.is_leaf().then_some(node);
    }

    node.children()
        .iter()
        .find_map(|child| find(child, rest, offsets.in_wildcard))
}

/// Tracks whether a literally matched prefix of a fragment leaves the scan
/// inside a `{...}` region.
fn wildcard_state_after(prefix: &str, mut in_wildcard: bool) -> bool {
    for c in prefix.chars() {
        match c {
            CURLY_START => in_wildcard = true,
            CURLY_END => in_wildcard = false,
            _ => {}
        }
    }
    in_wildcard
}

/// Finds the deepest leaf whose full key is a literal prefix of `key`.
///
/// Wildcards are not interpreted.
pub(crate) fn longest_match<'a, T>(node: &'a Node<T>, key: &str) -> Option<&'a Node<T>> {
    let lcp = longest_common_prefix(node.key(), key);

    if lcp == 0 || lcp != node.key().len() {
        return None;
    }

    let rest = &key[lcp..];

    node.children()
        .iter()
        .find_map(|child| longest_match(child, rest))
        .or_else(|| node.is_leaf().then_some(node))
}

/// Pre-order depth-first search for the first node satisfying `predicate`.
pub(crate) fn find_by_predicate<'a, T, F>(node: &'a Node<T>, predicate: &mut F) -> Option<&'a Node<T>>
where
    F: FnMut(&Node<T>) -> bool,
{
    if predicate(node) {
        return Some(node);
    }

    node.children()
        .iter()
        .find_map(|child| find_by_predicate(child, predicate))
}

/// Visits every leaf after its descendants, passing the full key it stores.
pub(crate) fn visit_leaves<'a, T, F>(node: &'a Node<T>, prefix: &mut String, visit: &mut F)
where
    F: FnMut(&str, &'a NodeValue<T>),
{
    let base = prefix.len();
    prefix.push_str(node.key());

    for child in node.children() {
        visit_leaves(child, prefix, visit);
    }

    if let Some(value) = node.node_value() {
        visit(prefix.as_str(), value);
    }

    prefix.truncate(base);
}
