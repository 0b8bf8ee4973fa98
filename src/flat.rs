//! Flat-array fixtures.
//!
//! A flat fixture is `[\n`, then copies of [`FIXTURE_RECORD`] joined by
//! `,\n`, then `\n]`. The record count comes from a megabyte target and a
//! [`Sizing`] mode, so the produced file size is approximate.

use alloc::format;
use alloc::string::String;
use core::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::record::{ARRAY_CLOSE, ARRAY_OPEN, FIXTURE_RECORD, RECORD_LEN, RECORD_SEPARATOR};

/// Bytes per megabyte (decimal).
pub const BYTES_PER_MB: u64 = 1_000_000;

/// Bytes each record adds to a file: the record plus its separator.
const RECORD_STRIDE: usize = RECORD_LEN + RECORD_SEPARATOR.len();

/// How a byte target becomes a record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Sizing {
    /// `floor(target / record length)`.
    ///
    /// Separators and brackets are not counted, so the file overshoots the
    /// target by about two bytes per record. This matches the historical
    /// fixture corpus byte for byte.
    #[default]
    PerRecord,
    /// Largest count whose finished file does not exceed the target.
    WholeFile,
}

/// Convert a megabyte size to bytes, or `None` on overflow.
#[inline]
pub fn megabytes_to_bytes(size_mb: u64) -> Option<u64> {
    size_mb.checked_mul(BYTES_PER_MB)
}

/// Number of records for a byte target.
pub fn record_count(size_bytes: u64, sizing: Sizing) -> u64 {
    match sizing {
        Sizing::PerRecord => size_bytes / RECORD_LEN as u64,
        Sizing::WholeFile => {
            let framing = (ARRAY_OPEN.len() + ARRAY_CLOSE.len() - RECORD_SEPARATOR.len()) as u64;
            size_bytes.saturating_sub(framing) / RECORD_STRIDE as u64
        }
    }
}

/// Exact byte length of a flat fixture holding `count` records.
///
/// Returns `None` if the length overflows `usize`.
pub fn flat_len(count: NonZeroUsize) -> Option<usize> {
    count
        .get()
        .checked_mul(RECORD_STRIDE)?
        .checked_add(ARRAY_OPEN.len() + ARRAY_CLOSE.len() - RECORD_SEPARATOR.len())
}

/// Build a flat fixture of `count` records.
///
/// # Panics
///
/// Panics if the fixture length overflows `usize` (see [`flat_len`]).
pub fn flat_array(count: NonZeroUsize) -> String {
    let len = flat_len(count).expect("flat fixture length overflows usize");
    let mut out = String::with_capacity(len);

    out.push_str(ARRAY_OPEN);
    out.push_str(FIXTURE_RECORD);
    for _ in 1..count.get() {
        out.push_str(RECORD_SEPARATOR);
        out.push_str(FIXTURE_RECORD);
    }
    out.push_str(ARRAY_CLOSE);

    debug_assert_eq!(out.len(), len);
    out
}

/// Build the flat fixture for a byte target.
///
/// Refuses targets that would produce an empty array, since `[\n\n]` is not
/// a useful fixture.
pub fn flat_fixture_for_bytes(size_bytes: u64, sizing: Sizing) -> Result<String, Error> {
    let count = record_count(size_bytes, sizing);
    if count == 0 {
        return Err(Error::EmptyFlatFixture { size_bytes });
    }

    let count = usize::try_from(count)
        .ok()
        .and_then(NonZeroUsize::new)
        .filter(|&count| flat_len(count).is_some())
        .ok_or(Error::SizeOverflow {
            size_mb: size_bytes / BYTES_PER_MB,
        })?;

    Ok(flat_array(count))
}

/// Build the flat fixture for a megabyte target.
pub fn flat_fixture(size_mb: u64, sizing: Sizing) -> Result<String, Error> {
    let size_bytes = megabytes_to_bytes(size_mb).ok_or(Error::SizeOverflow { size_mb })?;
    flat_fixture_for_bytes(size_bytes, sizing)
}

/// File name of the flat fixture for `size_mb`, e.g. `5MB.json`.
pub fn flat_file_name(size_mb: u64) -> String {
    format!("{}MB.json", size_mb)
}
