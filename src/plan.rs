//! Fixture plans: which fixtures to build and how to treat existing files.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::flat::{megabytes_to_bytes, record_count, Sizing};
use crate::nested::nested_len;

/// What to do when a fixture file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WritePolicy {
    /// Leave the existing file untouched, without comparing contents.
    SkipExisting,
    /// Replace the existing file.
    Overwrite,
}

/// The fixtures to generate.
///
/// The default plan reproduces the historical corpus: `1MB`, `5MB` and
/// `10MB` flat fixtures that are never overwritten, and nested chains from
/// `1K` to `10M` levels that are always regenerated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FixturePlan {
    /// Flat fixture sizes in megabytes (default: 1, 5, 10)
    pub sizes_mb: Vec<u64>,
    /// Nested fixture depths by label, in generation order
    pub depths: IndexMap<String, usize>,
    /// How flat fixture sizes become record counts (default: per-record)
    pub sizing: Sizing,
    /// Policy for existing flat fixtures (default: skip-existing)
    pub flat_policy: WritePolicy,
    /// Policy for existing nested fixtures (default: overwrite)
    pub nested_policy: WritePolicy,
}

impl Default for FixturePlan {
    fn default() -> Self {
        let depths = [
            ("1K", 1_000),
            ("10K", 10_000),
            ("100K", 100_000),
            ("1M", 1_000_000),
            ("10M", 10_000_000),
        ]
        .into_iter()
        .map(|(label, depth)| (label.to_string(), depth))
        .collect();

        Self {
            sizes_mb: vec![1, 5, 10],
            depths,
            sizing: Sizing::default(),
            flat_policy: WritePolicy::SkipExisting,
            nested_policy: WritePolicy::Overwrite,
        }
    }
}

impl FixturePlan {
    /// A plan with no fixtures, for building up with the `with_*` methods.
    pub fn empty() -> Self {
        Self {
            sizes_mb: Vec::new(),
            depths: IndexMap::new(),
            ..Self::default()
        }
    }

    /// Replace the flat fixture sizes.
    pub fn with_sizes(mut self, sizes_mb: impl IntoIterator<Item = u64>) -> Self {
        self.sizes_mb = sizes_mb.into_iter().collect();
        self
    }

    /// Add (or replace) one nested fixture.
    pub fn with_depth(mut self, label: impl Into<String>, depth: usize) -> Self {
        self.depths.insert(label.into(), depth);
        self
    }

    /// Replace the nested fixture table.
    pub fn with_depths<L: Into<String>>(
        mut self,
        depths: impl IntoIterator<Item = (L, usize)>,
    ) -> Self {
        self.depths = depths
            .into_iter()
            .map(|(label, depth)| (label.into(), depth))
            .collect();
        self
    }

    /// Set the sizing mode for flat fixtures.
    pub fn with_sizing(mut self, sizing: Sizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the policy for existing flat fixtures.
    pub fn with_flat_policy(mut self, policy: WritePolicy) -> Self {
        self.flat_policy = policy;
        self
    }

    /// Set the policy for existing nested fixtures.
    pub fn with_nested_policy(mut self, policy: WritePolicy) -> Self {
        self.nested_policy = policy;
        self
    }

    /// Check every entry can be built, so a bad entry fails the run before
    /// any file is written.
    pub fn validate(&self) -> Result<(), Error> {
        for &size_mb in &self.sizes_mb {
            let size_bytes = megabytes_to_bytes(size_mb).ok_or(Error::SizeOverflow { size_mb })?;
            if record_count(size_bytes, self.sizing) == 0 {
                return Err(Error::EmptyFlatFixture { size_bytes });
            }
        }

        for (label, &depth) in &self.depths {
            if depth == 0 {
                return Err(Error::ZeroDepth {
                    label: Some(label.clone()),
                });
            }
            if nested_len(depth).is_none() {
                return Err(Error::DepthOverflow { depth });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let plan = FixturePlan::default();
        assert_eq!(plan.sizes_mb, vec![1, 5, 10]);

        let depths: Vec<_> = plan.depths.iter().map(|(l, &d)| (l.as_str(), d)).collect();
        assert_eq!(
            depths,
            vec![
                ("1K", 1_000),
                ("10K", 10_000),
                ("100K", 100_000),
                ("1M", 1_000_000),
                ("10M", 10_000_000),
            ]
        );
        assert_eq!(plan.sizing, Sizing::PerRecord);
        assert_eq!(plan.flat_policy, WritePolicy::SkipExisting);
        assert_eq!(plan.nested_policy, WritePolicy::Overwrite);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let plan = FixturePlan::empty()
            .with_sizes([2])
            .with_depth("tiny", 3)
            .with_depth("small", 30)
            .with_nested_policy(WritePolicy::SkipExisting);

        assert_eq!(plan.sizes_mb, vec![2]);
        assert_eq!(plan.depths.keys().collect::<Vec<_>>(), vec!["tiny", "small"]);
        assert_eq!(plan.nested_policy, WritePolicy::SkipExisting);
    }

    #[test]
    fn test_with_depths_replaces() {
        let plan = FixturePlan::default().with_depths([("a", 1), ("b", 2)]);
        assert_eq!(plan.depths.len(), 2);
        assert_eq!(plan.depths["b"], 2);
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let plan = FixturePlan::empty().with_sizes([1, 0]);
        assert!(matches!(
            plan.validate(),
            Err(Error::EmptyFlatFixture { size_bytes: 0 })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let plan = FixturePlan::empty().with_depth("ok", 5).with_depth("bad", 0);
        match plan.validate() {
            Err(Error::ZeroDepth { label }) => assert_eq!(label.as_deref(), Some("bad")),
            other => panic!("expected ZeroDepth, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_overflow() {
        let plan = FixturePlan::empty().with_sizes([u64::MAX]);
        assert!(matches!(
            plan.validate(),
            Err(Error::SizeOverflow { .. })
        ));

        let plan = FixturePlan::empty().with_depth("huge", usize::MAX);
        assert!(matches!(
            plan.validate(),
            Err(Error::DepthOverflow { .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_plan() {
        let json = r#"{
            "sizes_mb": [2],
            "depths": {"deep": 50000, "shallow": 10},
            "nested_policy": "skip-existing"
        }"#;
        let plan: FixturePlan = serde_json::from_str(json).unwrap();

        assert_eq!(plan.sizes_mb, vec![2]);
        assert_eq!(plan.depths.keys().collect::<Vec<_>>(), vec!["deep", "shallow"]);
        assert_eq!(plan.sizing, Sizing::PerRecord);
        assert_eq!(plan.flat_policy, WritePolicy::SkipExisting);
        assert_eq!(plan.nested_policy, WritePolicy::SkipExisting);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_enums_kebab_case() {
        let plan = FixturePlan::empty().with_sizing(Sizing::WholeFile);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains(r#""sizing":"whole-file""#));
        assert!(json.contains(r#""flat_policy":"skip-existing""#));
    }
}
