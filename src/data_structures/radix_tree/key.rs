// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Key utilities: validation, wildcard parameter extraction and binding,
//! and longest common prefix computation.

use std::collections::HashMap;

use super::error::{TreeError, TreeResult};

pub(crate) const SLASH: char = '/';
pub(crate) const CURLY_START: char = '{';
pub(crate) const CURLY_END: char = '}';

/// Parameter bindings produced by a successful match, keyed by parameter name.
pub type MatchedParams = HashMap<String, String>;

/// A named wildcard parameter and the index of the `/`-delimited segment it
/// occupies in the stored key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    name: String,
    pos: usize,
}

impl ParamInfo {
    /// Creates a new parameter descriptor.
    pub fn new<S: Into<String>>(name: S, pos: usize) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Name of the parameter, without braces.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based segment index within the key split on `/`.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

/// Checks a key before it is stored.
///
/// # Errors
///
/// * `KeyIsEmpty` - The key is empty.
/// * `MissingSlashPrefix` - The key does not start with `/`.
/// * `PresentSlashSuffix` - The key ends with `/` and is not `/` itself.
/// * `BadPathParamSyntax` - A wildcard segment is nested, unbalanced or contains `/`.
pub fn validate_key(key: &str) -> TreeResult<()> {
    if key.is_empty() {
        return Err(TreeError::KeyIsEmpty);
    }

    if !key.starts_with(SLASH) {
        return Err(TreeError::MissingSlashPrefix);
    }

    if key.ends_with(SLASH) && key != "/" {
        return Err(TreeError::PresentSlashSuffix);
    }

    check_path_params(key)
}

fn check_path_params(key: &str) -> TreeResult<()> {
    if !key.contains(CURLY_START) && !key.contains(CURLY_END) {
        return Ok(());
    }

    let mut inside_param = false;

    for c in key.chars() {
        match c {
            SLASH if inside_param => return Err(TreeError::BadPathParamSyntax),
            CURLY_START if inside_param => return Err(TreeError::BadPathParamSyntax),
            CURLY_START => inside_param = true,
            CURLY_END if !inside_param => return Err(TreeError::BadPathParamSyntax),
            CURLY_END => inside_param = false,
            _ => {}
        }
    }

    if inside_param {
        return Err(TreeError::BadPathParamSyntax);
    }

    Ok(())
}

/// Collects the wildcard parameters of a full, validated key in order of appearance.
///
/// Any segment holding a `{` is a parameter. Its name is the segment without its
/// first and last characters, so `x{id}` is named `{id`. A bare `{}` yields nothing.
pub fn path_params(key: &str) -> Vec<ParamInfo> {
    key.split(SLASH)
        .enumerate()
        .filter(|(_, segment)| segment.contains(CURLY_START))
        .filter_map(|(pos, segment)| {
            let mut chars = segment.chars();
            chars.next()?;
            chars.next_back()?;
            let name = chars.as_str();

            (!name.is_empty()).then(|| ParamInfo::new(name, pos))
        })
        .collect()
}

/// Binds parameter descriptors against the segments of a search key.
///
/// Positions past the last segment are skipped.
pub fn match_params(params: &[ParamInfo], key: &str) -> MatchedParams {
    if params.is_empty() {
        return MatchedParams::new();
    }

    let segments: Vec<&str> = key.split(SLASH).collect();

    params
        .iter()
        .filter_map(|param| {
            segments
                .get(param.pos)
                .map(|segment| (param.name.clone(), (*segment).to_string()))
        })
        .collect()
}

/// Returns the byte length of the longest common prefix of two strings.
///
/// The result always falls on a character boundary of both strings.
pub fn longest_common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((idx, _), _)| idx)
        .unwrap_or_else(|| a.len().min(b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/foo/bar/baz" => Ok(()); "no path params at all")]
    #[test_case("/foo/bar/{baz" => Err(TreeError::BadPathParamSyntax); "no closing of param")]
    #[test_case("/foo/bar/baz}" => Err(TreeError::BadPathParamSyntax); "no start of param")]
    #[test_case("/foo/bar/{{baz" => Err(TreeError::BadPathParamSyntax); "multiple start of param")]
    #[test_case("/foo/bar/baz}}" => Err(TreeError::BadPathParamSyntax); "multiple end of param")]
    #[test_case("/foo/bar{/baz}" => Err(TreeError::BadPathParamSyntax); "slash inside a param")]
    #[test_case("/foo/bar/{baz}" => Ok(()); "one path param")]
    #[test_case("/{foo}/bar/{baz}" => Ok(()); "multiple path params")]
    #[test_case("/{foo}/bar/baz}" => Err(TreeError::BadPathParamSyntax); "one good and one bad param")]
    fn test_check_path_params(key: &str) -> TreeResult<()> {
        check_path_params(key)
    }

    #[test_case("" => Err(TreeError::KeyIsEmpty); "empty key")]
    #[test_case("foo" => Err(TreeError::MissingSlashPrefix); "missing leading slash")]
    #[test_case("/foo/" => Err(TreeError::PresentSlashSuffix); "trailing slash")]
    #[test_case("/" => Ok(()); "root key")]
    #[test_case("/foo/{id}" => Ok(()); "valid wildcard key")]
    #[test_case("/foo/{id/x}" => Err(TreeError::BadPathParamSyntax); "malformed wildcard")]
    fn test_validate_key(key: &str) -> TreeResult<()> {
        validate_key(key)
    }

    #[test]
    fn test_path_params() {
        assert!(path_params("/foo/bar/baz").is_empty());
        assert_eq!(
            path_params("/foo/{bar}/baz/{id}"),
            vec![ParamInfo::new("bar", 2), ParamInfo::new("id", 4)]
        );
        assert!(path_params("/foo/{}").is_empty());
        assert_eq!(path_params("/foo/x{id}"), vec![ParamInfo::new("{id", 2)]);
        assert_eq!(path_params("/é{ñ}"), vec![ParamInfo::new("{ñ", 1)]);
    }

    #[test]
    fn test_match_params() {
        assert!(match_params(&[], "/foo/bar/baz").is_empty());

        let params = vec![ParamInfo::new("first-one", 2), ParamInfo::new("second-one", 3)];
        let matched = match_params(&params, "/foo/bar/baz");
        assert_eq!(matched.len(), 2);
        assert_eq!(matched["first-one"], "bar");
        assert_eq!(matched["second-one"], "baz");

        let params = vec![ParamInfo::new("missing", 7)];
        assert!(match_params(&params, "/foo").is_empty());
    }

    #[test_case("", "" => 0)]
    #[test_case("/foo", "/bar" => 1)]
    #[test_case("/foo/bar", "/foo" => 4)]
    #[test_case("abc", "xyz" => 0)]
    #[test_case("/café", "/cafè" => 4; "stops on a char boundary")]
    fn test_longest_common_prefix(a: &str, b: &str) -> usize {
        longest_common_prefix(a, b)
    }
}
