// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Offset scanner used by wildcard-aware lookup.
//!
//! Walks a stored fragment and a search key in lockstep. Literal bytes must
//! match exactly; a `{...}` region of the fragment consumes one whole
//! `/`-delimited token of the search key.

/// How far the scan advanced in each string, and whether it ended inside an
/// unterminated `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    /// Bytes consumed from the stored fragment.
    pub fragment: usize,
    /// Bytes consumed from the search key.
    pub search: usize,
    /// Whether the scan stopped inside a wildcard region.
    pub in_wildcard: bool,
}

/// Scans `fragment` against `search`, starting in wildcard mode if
/// `in_wildcard` is set.
///
/// The scan stops when the fragment is exhausted, when the search key is
/// exhausted outside a wildcard region, or on the first literal mismatch.
pub fn scan_offsets(fragment: &str, search: &str, mut in_wildcard: bool) -> Offsets {
    let stored = fragment.as_bytes();
    let searched = search.as_bytes();

    let mut i = 0;
    let mut j = 0;

    while i < stored.len() {
        if j >= searched.len() && !in_wildcard {
            break;
        }

        match stored[i] {
            b'{' => {
                in_wildcard = true;
                i += 1;
            }
            b'}' => {
                // Closing a parameter consumes the search token up to the next slash.
                in_wildcard = false;
                let rest = &searched[j..];
                j += rest.iter().position(|&b| b == b'/').unwrap_or(rest.len());
                i += 1;
            }
            _ if in_wildcard => i += 1,
            c if c == searched[j] => {
                i += 1;
                j += 1;
            }
            _ => break,
        }
    }

    Offsets {
        fragment: i,
        search: j,
        in_wildcard,
    }
}
