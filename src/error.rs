//! Errors raised while building or writing fixtures.

use alloc::string::String;
use core::fmt;

#[cfg(any(test, feature = "std"))]
use std::{io, path::PathBuf};

/// Error building or writing a fixture.
#[derive(Debug)]
pub enum Error {
    /// The target is smaller than one record, so the array would be empty.
    EmptyFlatFixture { size_bytes: u64 },
    /// The megabyte size does not fit in a byte count.
    SizeOverflow { size_mb: u64 },
    /// A nested chain of depth zero was requested.
    ZeroDepth { label: Option<String> },
    /// The nested chain length does not fit in memory.
    DepthOverflow { depth: usize },
    /// Creating or writing a fixture file failed.
    #[cfg(any(test, feature = "std"))]
    Io { path: PathBuf, source: io::Error },
    /// Writing a progress line failed.
    #[cfg(any(test, feature = "std"))]
    Progress(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFlatFixture { size_bytes } => write!(
                f,
                "{} bytes is smaller than one fixture record, refusing to write an empty array",
                size_bytes
            ),
            Self::SizeOverflow { size_mb } => {
                write!(f, "flat fixture size {}MB overflows a byte count", size_mb)
            }
            Self::ZeroDepth { label: Some(label) } => {
                write!(f, "nested fixture '{}' has depth 0, expected at least 1", label)
            }
            Self::ZeroDepth { label: None } => {
                write!(f, "nested fixture depth must be at least 1")
            }
            Self::DepthOverflow { depth } => {
                write!(f, "nested fixture depth {} is too large to build", depth)
            }
            #[cfg(any(test, feature = "std"))]
            Self::Io { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
            #[cfg(any(test, feature = "std"))]
            Self::Progress(source) => write!(f, "failed to report progress: {}", source),
        }
    }
}

#[cfg(any(test, feature = "std"))]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Progress(source) => Some(source),
            _ => None,
        }
    }
}
