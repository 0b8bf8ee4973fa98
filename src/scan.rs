//! Non-recursive nesting depth scanner.
//!
//! Nested-chain fixtures go tens of millions of levels deep, far past the
//! recursion limit of any recursive-descent parser. This scanner walks the
//! bytes once, tracking open containers in a bit stack (1 = object,
//! 0 = array), and reports the deepest nesting seen.
//!
//! It checks bracket balance and string termination only. Scalars,
//! separators and keys are not validated.
//!
//! # Example
//!
//! ```
//! use fixturegen::scan::{nesting_depth, ScanErrorKind};
//!
//! assert_eq!(nesting_depth(br#"{"next":{"next":null}}"#).unwrap(), 2);
//! assert_eq!(nesting_depth(b"[[], {}]").unwrap(), 2);
//!
//! let err = nesting_depth(b"{]").unwrap_err();
//! assert_eq!(err.kind, ScanErrorKind::MismatchedClose { expected: '}', found: ']' });
//! assert_eq!(err.offset, 1);
//! ```

use alloc::vec::Vec;
use core::fmt;

/// Kinds of scan errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A closing bracket with no open container.
    UnexpectedClose { found: char },
    /// A closing bracket that does not match the innermost open container.
    MismatchedClose { expected: char, found: char },
    /// Input ended with containers still open.
    UnclosedContainer { open: usize },
    /// Input ended inside a string.
    UnclosedString,
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedClose { found } => {
                write!(f, "unexpected {:?} with no open container", found)
            }
            Self::MismatchedClose { expected, found } => {
                write!(f, "expected {:?}, found {:?}", expected, found)
            }
            Self::UnclosedContainer { open } => {
                write!(f, "unexpected end of input with {} containers open", open)
            }
            Self::UnclosedString => write!(f, "unclosed string"),
        }
    }
}

/// A scan error with the byte offset where it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanError {
    /// The kind of error.
    pub kind: ScanErrorKind,
    /// Byte offset (0-indexed).
    pub offset: usize,
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.offset)
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for ScanError {}

/// Stack of open container kinds, one bit per level.
struct BitStack {
    words: Vec<u64>,
    len: usize,
}

impl BitStack {
    fn new() -> Self {
        Self {
            words: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, is_object: bool) {
        let (word, bit) = (self.len / 64, self.len % 64);
        if word == self.words.len() {
            self.words.push(0);
        }
        if is_object {
            self.words[word] |= 1 << bit;
        } else {
            self.words[word] &= !(1 << bit);
        }
        self.len += 1;
    }

    #[inline]
    fn pop(&mut self) -> Option<bool> {
        self.len = self.len.checked_sub(1)?;
        let (word, bit) = (self.len / 64, self.len % 64);
        Some(self.words[word] & (1 << bit) != 0)
    }
}

/// Maximum container nesting depth of `json`.
///
/// A bare scalar has depth 0, `{}` and `[]` have depth 1.
pub fn nesting_depth(json: &[u8]) -> Result<usize, ScanError> {
    let mut stack = BitStack::new();
    let mut max_depth = 0;
    let mut offset = 0;

    while offset < json.len() {
        match json[offset] {
            b'"' => {
                offset = skip_string(json, offset)?;
                continue;
            }
            open @ (b'{' | b'[') => {
                stack.push(open == b'{');
                max_depth = max_depth.max(stack.len);
            }
            close @ (b'}' | b']') => {
                let found = close as char;
                let is_object = stack.pop().ok_or(ScanError {
                    kind: ScanErrorKind::UnexpectedClose { found },
                    offset,
                })?;
                let expected = if is_object { '}' } else { ']' };
                if expected != found {
                    return Err(ScanError {
                        kind: ScanErrorKind::MismatchedClose { expected, found },
                        offset,
                    });
                }
            }
            _ => {}
        }
        offset += 1;
    }

    if stack.len > 0 {
        return Err(ScanError {
            kind: ScanErrorKind::UnclosedContainer { open: stack.len },
            offset: json.len(),
        });
    }

    Ok(max_depth)
}

/// Skip the string starting at `start` (a `"`), returning the offset after
/// its closing quote.
fn skip_string(json: &[u8], start: usize) -> Result<usize, ScanError> {
    let mut offset = start + 1;
    while offset < json.len() {
        match json[offset] {
            b'\\' => offset += 2,
            b'"' => return Ok(offset + 1),
            _ => offset += 1,
        }
    }
    Err(ScanError {
        kind: ScanErrorKind::UnclosedString,
        offset: start,
    })
}
