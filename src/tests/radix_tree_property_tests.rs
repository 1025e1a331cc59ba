//! Property-based tests for the radix tree.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{HashMap, HashSet};

use super::test_utils::{
    fill_template, mixed_templates_strategy, render_template, segment_strategy,
    static_key_strategy, template_strategy, TemplateSegment,
};
use crate::data_structures::radix_tree::{Node, RadixTree, TreeError};

fn build(keys: &[String]) -> RadixTree<usize> {
    let tree = RadixTree::new();
    for (i, key) in keys.iter().enumerate() {
        tree.insert(key, i).unwrap();
    }
    tree
}

/// Registers templates in order, skipping ones that render to an already stored key.
/// Each stored template's value is its index in the returned list.
fn build_templates(
    templates: Vec<Vec<TemplateSegment>>,
) -> Result<(RadixTree<usize>, Vec<Vec<TemplateSegment>>), TestCaseError> {
    let tree = RadixTree::new();
    let mut stored = Vec::new();

    for template in templates {
        match tree.insert(render_template(&template), stored.len()) {
            Ok(()) => stored.push(template),
            Err(err) => prop_assert_eq!(err, TreeError::KeyIsAlreadyStored),
        }
    }

    Ok((tree, stored))
}

fn template_matches(template: &[TemplateSegment], path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').skip(1).collect();

    segments.len() == template.len()
        && template.iter().zip(&segments).all(|(part, segment)| match part {
            TemplateSegment::Literal(text) => text == segment,
            TemplateSegment::Param(_) => !segment.is_empty(),
        })
}

fn expected_params(template: &[TemplateSegment], path: &str) -> HashMap<String, String> {
    template
        .iter()
        .zip(path.split('/').skip(1))
        .filter_map(|(part, segment)| match part {
            TemplateSegment::Param(name) => Some((name.clone(), segment.to_string())),
            TemplateSegment::Literal(_) => None,
        })
        .collect()
}

/// Checks that no fragment below the root is empty and that siblings never
/// start with the same character.
fn check_structure(node: &Node<usize>) -> Result<(), TestCaseError> {
    let mut first_chars = HashSet::new();

    for child in node.children() {
        let first = child.key().chars().next();
        prop_assert!(first.is_some(), "empty fragment below {:?}", node.key());
        prop_assert!(
            first_chars.insert(first),
            "siblings below {:?} share {:?}",
            node.key(),
            first
        );
        check_structure(child)?;
    }

    Ok(())
}

/// Checks a lookup against every stored template that matches `path`.
fn check_lookup(
    tree: &RadixTree<usize>,
    stored: &[Vec<TemplateSegment>],
    path: &str,
) -> Result<(), TestCaseError> {
    let matching: Vec<usize> = stored
        .iter()
        .enumerate()
        .filter(|(_, template)| template_matches(template, path))
        .map(|(i, _)| i)
        .collect();

    match tree.find(path) {
        None => prop_assert!(matching.is_empty(), "{} missed {:?}", path, matching),
        Some(found) => {
            let (index, params) = found.into_parts();
            prop_assert!(matching.contains(&index), "{} wrongly matched {}", path, index);
            prop_assert_eq!(params, expected_params(&stored[index], path));
        }
    }

    Ok(())
}

proptest! {
    // Property: every stored static key finds its own value with no params
    #[test]
    fn prop_static_round_trip(keys in prop::collection::hash_set(static_key_strategy(), 1..40)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let tree = build(&keys);

        prop_assert_eq!(tree.len(), keys.len());

        for (i, key) in keys.iter().enumerate() {
            let found = tree.find(key);
            prop_assert!(found.is_some(), "missing key {}", key);
            let found = found.unwrap();
            prop_assert_eq!(*found.value(), i);
            prop_assert!(found.params().is_empty());
        }
    }

    // Property: without wildcards, lookup is exact membership
    #[test]
    fn prop_static_find_is_exact(
        keys in prop::collection::hash_set(static_key_strategy(), 1..30),
        probes in prop::collection::vec(static_key_strategy(), 1..30),
    ) {
        let stored: Vec<String> = keys.iter().cloned().collect();
        let tree = build(&stored);

        for probe in probes {
            prop_assert_eq!(tree.find(&probe).is_some(), keys.contains(&probe));
        }
    }

    // Property: a second insert of the same key fails and leaves the content unchanged
    #[test]
    fn prop_duplicate_keys_rejected(keys in prop::collection::hash_set(static_key_strategy(), 1..20)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let tree = build(&keys);
        let before = tree.get_all_leaves();

        for key in &keys {
            prop_assert_eq!(tree.insert(key, usize::MAX), Err(TreeError::KeyIsAlreadyStored));
        }

        prop_assert_eq!(tree.get_all_leaves(), before);
    }

    // Property: a template matches any path filling its wildcards, binding every name
    #[test]
    fn prop_wildcard_round_trip(
        template in template_strategy(),
        values in prop::collection::vec(segment_strategy(), 1..4),
    ) {
        let key = render_template(&template);
        let path = fill_template(&template, &values);

        let tree = RadixTree::new();
        tree.insert(&key, key.clone()).unwrap();

        let found = tree.find(&path);
        prop_assert!(found.is_some(), "{} did not match {}", path, key);
        let (value, params) = found.unwrap().into_parts();
        prop_assert_eq!(&value, &key);

        let segments: Vec<&str> = path.split('/').collect();
        let expected: HashMap<String, String> = key
            .split('/')
            .enumerate()
            .filter_map(|(pos, segment)| {
                let name = segment.strip_prefix('{')?.strip_suffix('}')?;
                Some((name.to_string(), segments[pos].to_string()))
            })
            .collect();
        prop_assert_eq!(params, expected);
    }

    // Property: the longest match is the longest stored key that prefixes the query
    #[test]
    fn prop_longest_match_is_longest_prefix(
        keys in prop::collection::hash_set(static_key_strategy(), 1..30),
        base in static_key_strategy(),
        suffix in static_key_strategy(),
    ) {
        let stored: Vec<String> = keys.into_iter().collect();
        let tree = build(&stored);

        for query in [base.clone(), format!("{base}{suffix}")] {
            let expected = stored
                .iter()
                .enumerate()
                .filter(|(_, key)| query.starts_with(key.as_str()))
                .max_by_key(|(_, key)| key.len())
                .map(|(i, _)| i);

            let found = tree.find_longest_match(&query).map(|found| *found.value());
            prop_assert_eq!(found, expected);
        }
    }

    // Property: reads never change what later reads observe
    #[test]
    fn prop_reads_are_idempotent(
        keys in prop::collection::hash_set(static_key_strategy(), 1..20),
        probe in static_key_strategy(),
    ) {
        let stored: Vec<String> = keys.into_iter().collect();
        let tree = build(&stored);

        let first = (tree.find(&probe), tree.find_longest_match(&probe));
        for _ in 0..3 {
            prop_assert_eq!(&(tree.find(&probe), tree.find_longest_match(&probe)), &first);
        }
        prop_assert_eq!(tree.len(), stored.len());
    }

    // Property: keys without a leading slash are rejected before anything is stored
    #[test]
    fn prop_missing_leading_slash(key in "[a-z{}][a-z/{}]{0,12}") {
        let tree = RadixTree::new();
        prop_assert_eq!(tree.insert(&key, 0), Err(TreeError::MissingSlashPrefix));
        prop_assert!(tree.is_empty());
    }

    // Property: keys ending in a slash are rejected
    #[test]
    fn prop_trailing_slash(key in static_key_strategy()) {
        let tree = RadixTree::new();
        prop_assert_eq!(tree.insert(format!("{key}/"), 0), Err(TreeError::PresentSlashSuffix));
    }

    // Property: whatever the registration order, no fragment below the root is
    // empty and sibling fragments start with distinct characters
    #[test]
    fn prop_tree_structure(templates in mixed_templates_strategy()) {
        let (tree, stored) = build_templates(templates)?;
        prop_assert_eq!(tree.len(), stored.len());

        let root = tree.get_by_predicate(|_| true);
        prop_assert!(root.is_some());
        if let Some(root) = root {
            prop_assert!(!root.key().is_empty());
            check_structure(&root)?;
        }
    }

    // Property: with templates and static keys mixed, a lookup finds a stored
    // key exactly when one matches, binding that key's wildcards
    #[test]
    fn prop_mixed_lookup_agrees_with_segment_matching(
        templates in mixed_templates_strategy(),
        values in prop::collection::vec(segment_strategy(), 1..4),
        extra in prop::collection::vec(static_key_strategy(), 0..10),
    ) {
        let (tree, stored) = build_templates(templates)?;

        for template in &stored {
            let path = fill_template(template, &values);
            prop_assert!(tree.find(&path).is_some(), "{} found nothing", path);
            check_lookup(&tree, &stored, &path)?;
        }

        for path in &extra {
            check_lookup(&tree, &stored, path)?;
        }
    }

    // Property: an unterminated wildcard is always malformed
    #[test]
    fn prop_unterminated_wildcard(key in static_key_strategy(), name in segment_strategy()) {
        let tree = RadixTree::new();
        prop_assert_eq!(
            tree.insert(format!("{key}/{{{name}"), 0),
            Err(TreeError::BadPathParamSyntax)
        );
    }
}

#[test]
fn test_distinct_static_keys_have_distinct_leaves() {
    let keys: Vec<String> = ["/a", "/ab", "/abc", "/b", "/ba"]
        .iter()
        .map(|key| key.to_string())
        .collect();
    let tree = build(&keys);

    let leaves: HashSet<String> = tree
        .get_all_leaves()
        .iter()
        .map(|leaf| leaf.key().to_string())
        .collect();
    assert_eq!(leaves, keys.into_iter().collect());
}
