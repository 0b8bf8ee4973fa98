//! Writing fixture plans to disk.
//!
//! Each fixture is built in memory and written with a single call. Flat
//! fixtures never print to the progress writer. Nested fixtures print two
//! lines each:
//!
//! ```text
//! Generating 1000 depth object
//! File for depth 1000 saved as 1K_recursion.json
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Error;
use crate::flat::{flat_file_name, flat_fixture};
use crate::nested::{nested_chain, nested_file_name};
use crate::plan::{FixturePlan, WritePolicy};

/// What happened to one fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The fixture was written.
    Written { path: PathBuf, bytes: usize },
    /// The file already existed and the policy was [`WritePolicy::SkipExisting`].
    Skipped { path: PathBuf },
}

impl Outcome {
    /// Path of the fixture file.
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path, .. } | Self::Skipped { path } => path,
        }
    }

    /// Returns true if the fixture was written.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written { .. })
    }
}

/// Outcomes of a full run, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub flat: Vec<Outcome>,
    pub nested: Vec<Outcome>,
}

impl Report {
    /// Number of fixtures written.
    pub fn written(&self) -> usize {
        self.outcomes().filter(|o| o.is_written()).count()
    }

    /// Number of fixtures skipped because they already existed.
    pub fn skipped(&self) -> usize {
        self.outcomes().filter(|o| !o.is_written()).count()
    }

    /// All outcomes, flat fixtures first.
    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.flat.iter().chain(self.nested.iter())
    }
}

/// Write `contents` to `path` under `policy`.
///
/// With [`WritePolicy::SkipExisting`] the file is opened with `create_new`,
/// so a file that appears between the check and the write is still left
/// alone.
pub fn write_fixture(path: &Path, contents: &str, policy: WritePolicy) -> Result<Outcome, Error> {
    let io_err = |source: io::Error| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    match policy {
        WritePolicy::Overwrite => fs::write(path, contents).map_err(io_err)?,
        WritePolicy::SkipExisting => {
            let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    return Ok(Outcome::Skipped {
                        path: path.to_path_buf(),
                    });
                }
                Err(e) => return Err(io_err(e)),
            };
            file.write_all(contents.as_bytes()).map_err(io_err)?;
        }
    }

    debug!("wrote {} bytes to {}", contents.len(), path.display());
    Ok(Outcome::Written {
        path: path.to_path_buf(),
        bytes: contents.len(),
    })
}

/// Runs a [`FixturePlan`] against output directories.
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    plan: &'a FixturePlan,
    flat_dir: PathBuf,
    nested_dir: PathBuf,
}

impl<'a> Generator<'a> {
    /// Create a generator writing both kinds of fixture to the current
    /// directory.
    pub fn new(plan: &'a FixturePlan) -> Self {
        Self {
            plan,
            flat_dir: PathBuf::from("."),
            nested_dir: PathBuf::from("."),
        }
    }

    /// Set the directory for flat fixtures.
    pub fn with_flat_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.flat_dir = dir.into();
        self
    }

    /// Set the directory for nested fixtures.
    pub fn with_nested_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.nested_dir = dir.into();
        self
    }

    /// The plan being run.
    pub fn plan(&self) -> &FixturePlan {
        self.plan
    }

    /// Path of the flat fixture for `size_mb`.
    pub fn flat_path(&self, size_mb: u64) -> PathBuf {
        self.flat_dir.join(flat_file_name(size_mb))
    }

    /// Path of the nested fixture labelled `label`.
    pub fn nested_path(&self, label: &str) -> PathBuf {
        self.nested_dir.join(nested_file_name(label))
    }

    /// Generate every flat fixture in the plan.
    ///
    /// Existing files are checked before building, so skipped fixtures cost
    /// nothing.
    pub fn generate_flat(&self) -> Result<Vec<Outcome>, Error> {
        let mut outcomes = Vec::with_capacity(self.plan.sizes_mb.len());

        for &size_mb in &self.plan.sizes_mb {
            let path = self.flat_path(size_mb);
            let outcome = if self.plan.flat_policy == WritePolicy::SkipExisting && path.exists() {
                Outcome::Skipped { path }
            } else {
                let json = flat_fixture(size_mb, self.plan.sizing)?;
                write_fixture(&path, &json, self.plan.flat_policy)?
            };

            if !outcome.is_written() {
                info!("{} already exists, skipped", outcome.path().display());
            }
            outcomes.push(outcome);
        }

        info!(
            "flat fixtures: {} of {} written",
            outcomes.iter().filter(|o| o.is_written()).count(),
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Generate every nested fixture in the plan, reporting progress to
    /// `progress`.
    pub fn generate_nested<W: Write>(&self, progress: &mut W) -> Result<Vec<Outcome>, Error> {
        let mut outcomes = Vec::with_capacity(self.plan.depths.len());

        for (label, &depth) in &self.plan.depths {
            writeln!(progress, "Generating {} depth object", depth).map_err(Error::Progress)?;

            let file_name = nested_file_name(label);
            let path = self.nested_dir.join(&file_name);
            let outcome = if self.plan.nested_policy == WritePolicy::SkipExisting && path.exists() {
                Outcome::Skipped { path }
            } else {
                let json = nested_chain(depth).map_err(|e| match e {
                    Error::ZeroDepth { .. } => Error::ZeroDepth {
                        label: Some(label.clone()),
                    },
                    other => other,
                })?;
                write_fixture(&path, &json, self.plan.nested_policy)?
            };

            let reported = if outcome.is_written() {
                writeln!(progress, "File for depth {} saved as {}", depth, file_name)
            } else {
                info!("{} already exists, skipped", outcome.path().display());
                writeln!(
                    progress,
                    "File for depth {} already exists as {}, skipped",
                    depth, file_name
                )
            };
            reported.map_err(Error::Progress)?;

            outcomes.push(outcome);
        }

        info!(
            "nested fixtures: {} of {} written",
            outcomes.iter().filter(|o| o.is_written()).count(),
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Validate the plan, then generate flat fixtures followed by nested
    /// fixtures. The first failure stops the run.
    pub fn run<W: Write>(&self, progress: &mut W) -> Result<Report, Error> {
        self.plan.validate()?;

        let flat = self.generate_flat()?;
        let nested = self.generate_nested(progress)?;
        Ok(Report { flat, nested })
    }
}
