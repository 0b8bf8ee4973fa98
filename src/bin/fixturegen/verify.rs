//! `--verify`: re-read generated fixtures and check their shape.

use anyhow::{bail, ensure, Context, Result};
use fixturegen::nested::nested_len;
use fixturegen::scan::nesting_depth;
use fixturegen::{Generator, FIXTURE_RECORD};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Check every fixture in the generator's plan, returning how many were checked.
pub fn verify_plan(generator: &Generator<'_>) -> Result<usize> {
    let plan = generator.plan();
    let record: Value =
        serde_json::from_str(FIXTURE_RECORD).context("fixture record is not valid JSON")?;

    for &size_mb in &plan.sizes_mb {
        let path = generator.flat_path(size_mb);
        let count = verify_flat(&path, &record)?;
        log::debug!("{}: {} records", path.display(), count);
    }

    for (label, &depth) in &plan.depths {
        verify_nested(&generator.nested_path(label), depth)?;
    }

    Ok(plan.sizes_mb.len() + plan.depths.len())
}

/// Parse a flat fixture and check every element equals the record.
fn verify_flat(path: &Path, record: &Value) -> Result<usize> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let Value::Array(elements) = value else {
        bail!("{} is not a JSON array", path.display());
    };
    ensure!(!elements.is_empty(), "{} is an empty array", path.display());

    if let Some(index) = elements.iter().position(|e| e != record) {
        bail!(
            "{}: element {} differs from the fixture record",
            path.display(),
            index
        );
    }

    Ok(elements.len())
}

/// Scan a nested fixture and check its depth.
fn verify_nested(path: &Path, depth: usize) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let actual =
        nesting_depth(&bytes).with_context(|| format!("{} is malformed", path.display()))?;
    ensure!(
        actual == depth,
        "{}: nesting depth {}, expected {}",
        path.display(),
        actual,
        depth
    );
    ensure!(
        nested_len(depth) == Some(bytes.len()),
        "{}: {} bytes, expected a {}-level chain",
        path.display(),
        bytes.len(),
        depth
    );

    Ok(())
}
