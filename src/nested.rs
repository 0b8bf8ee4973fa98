//! Nested-chain fixtures.
//!
//! A chain of depth `n` is `n` objects, each holding the next under the key
//! `"next"`, with the innermost holding `null`:
//!
//! ```text
//! depth 1: {"next":null}
//! depth 3: {"next":{"next":{"next":null}}}
//! ```
//!
//! Chains are built into a buffer sized up front, so construction is linear
//! in depth even at tens of millions of levels.

use alloc::format;
use alloc::string::String;

use crate::error::Error;

/// Key linking each level to the next.
pub const NEXT_KEY: &str = "next";

const OUTER_OPEN: &str = "{";
const LINK: &str = "\"next\":{";
const TERMINAL: &str = "\"next\":null";
const CLOSE: char = '}';

/// Exact byte length of a chain of `depth` levels.
///
/// Returns `None` for depth 0 or if the length overflows `usize`.
pub fn nested_len(depth: usize) -> Option<usize> {
    let links = depth.checked_sub(1)?.checked_mul(LINK.len())?;
    links
        .checked_add(depth)?
        .checked_add(OUTER_OPEN.len() + TERMINAL.len())
}

/// Build a nested chain `depth` levels deep.
pub fn nested_chain(depth: usize) -> Result<String, Error> {
    if depth == 0 {
        return Err(Error::ZeroDepth { label: None });
    }
    let len = nested_len(depth).ok_or(Error::DepthOverflow { depth })?;

    let mut out = String::with_capacity(len);
    out.push_str(OUTER_OPEN);
    for _ in 1..depth {
        out.push_str(LINK);
    }
    out.push_str(TERMINAL);
    out.extend(core::iter::repeat(CLOSE).take(depth));

    debug_assert_eq!(out.len(), len);
    Ok(out)
}

/// File name of the nested fixture labelled `label`, e.g. `10K_recursion.json`.
pub fn nested_file_name(label: &str) -> String {
    format!("{}_recursion.json", label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_one() {
        assert_eq!(nested_chain(1).unwrap(), r#"{"next":null}"#);
    }

    #[test]
    fn test_depth_three() {
        insta::assert_snapshot!(nested_chain(3).unwrap(), @r#"{"next":{"next":{"next":null}}}"#);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(matches!(
            nested_chain(0),
            Err(Error::ZeroDepth { label: None })
        ));
        assert_eq!(nested_len(0), None);
    }

    #[test]
    fn test_nested_len() {
        assert_eq!(nested_len(1), Some(13));
        assert_eq!(nested_len(3), Some(31));
        assert_eq!(nested_len(1000), Some(9004));
        assert_eq!(nested_len(usize::MAX), None);
    }

    #[test]
    fn test_len_matches_output() {
        for depth in [1, 2, 7, 128, 1000] {
            assert_eq!(nested_chain(depth).unwrap().len(), nested_len(depth).unwrap());
        }
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            nested_chain(usize::MAX),
            Err(Error::DepthOverflow { depth: usize::MAX })
        ));
    }

    #[test]
    fn test_parses_as_json() {
        let chain = nested_chain(64).unwrap();
        let parsed = serde_json::from_str::<serde_json::Value>(&chain).unwrap();
        let mut value = &parsed;
        let mut levels = 0;
        while let Some(next) = value.get(NEXT_KEY) {
            levels += 1;
            value = next;
        }
        assert_eq!(levels, 64);
        assert!(value.is_null());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(nested_chain(10_000).unwrap(), nested_chain(10_000).unwrap());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(nested_file_name("1K"), "1K_recursion.json");
        assert_eq!(nested_file_name("10M"), "10M_recursion.json");
    }
}
