//! # fixturegen
//!
//! Deterministic synthetic JSON fixtures for parser benchmarks and
//! recursion-depth stress tests.
//!
//! Two kinds of fixture are produced, each a pure function of its
//! configuration so every run yields byte-identical files:
//!
//! - **Flat-array fixtures** (`{size}MB.json`): a JSON array of one repeated
//!   [`FIXTURE_RECORD`], sized to approximate a megabyte target.
//! - **Nested-chain fixtures** (`{label}_recursion.json`): a single object
//!   nested `depth` levels deep through a `"next"` key, ending in `null`.
//!
//! ## Module Organization
//!
//! - [`record`] - The fixed record template repeated by flat fixtures
//! - [`flat`] - Flat-array sizing and construction
//! - [`nested`] - Nested-chain construction
//! - [`scan`] - Non-recursive nesting depth scanner for verifying fixtures
//! - [`plan`] - Fixture tables, sizing mode and write policies
//! - [`write`] - Writing a plan to disk (requires `std`)
//!
//! ## Quick Start
//!
//! ```
//! use fixturegen::{nested_chain, scan::nesting_depth};
//!
//! let chain = nested_chain(3).unwrap();
//! assert_eq!(chain, r#"{"next":{"next":{"next":null}}}"#);
//! assert_eq!(nesting_depth(chain.as_bytes()).unwrap(), 3);
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Filesystem writer ([`write::Generator`])
//! - `serde` - Serialize/deserialize [`FixturePlan`]
//! - `cli` - The `fixturegen` binary

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

// =============================================================================
// Fixture builders
// =============================================================================

/// The fixed record template repeated by flat fixtures.
pub mod record;

/// Flat-array fixtures sized to a megabyte target.
pub mod flat;

/// Nested-chain fixtures for recursion-depth tests.
pub mod nested;

/// Nesting depth scanner.
pub mod scan;

// =============================================================================
// Configuration and output
// =============================================================================

/// Error type shared by the builders and the writer.
pub mod error;

/// Fixture tables, sizing mode and write policies.
pub mod plan;

/// Writing fixture plans to disk.
#[cfg(any(test, feature = "std"))]
pub mod write;

// =============================================================================
// Public re-exports
// =============================================================================

pub use error::Error;
pub use flat::{flat_array, flat_file_name, flat_fixture, record_count, Sizing};
pub use nested::{nested_chain, nested_file_name};
pub use plan::{FixturePlan, WritePolicy};
pub use record::FIXTURE_RECORD;

#[cfg(any(test, feature = "std"))]
pub use write::{Generator, Outcome, Report};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;
