//! fixturegen CLI: write synthetic JSON fixtures for parser benchmarks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fixturegen::{FixturePlan, Generator, Report, Sizing, WritePolicy};
use std::io;
use std::path::{Path, PathBuf};

mod verify;

#[derive(Debug, Parser)]
#[command(name = "fixturegen")]
#[command(about = "Synthetic JSON fixture generator", long_about = None)]
#[command(version)]
struct Cli {
    /// What to generate (defaults to everything in the plan)
    #[command(subcommand)]
    command: Option<Command>,

    /// Load the fixture plan from a JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for flat fixtures
    #[arg(long, global = true, default_value = ".")]
    flat_dir: PathBuf,

    /// Directory for nested fixtures (default: directory of this executable)
    #[arg(long, global = true)]
    nested_dir: Option<PathBuf>,

    /// Re-read every fixture after generation and check its shape
    #[arg(long, global = true)]
    verify: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate flat and nested fixtures
    All,
    /// Generate flat-array fixtures ({size}MB.json)
    Flat(FlatArgs),
    /// Generate nested-chain fixtures ({label}_recursion.json)
    Nested(NestedArgs),
    /// Print the effective plan as JSON
    Plan,
}

#[derive(Debug, Parser)]
struct FlatArgs {
    /// Sizes in megabytes (e.g. 1, 5MB); defaults to the plan's sizes
    #[arg(value_parser = parse_megabytes)]
    sizes: Vec<u64>,

    /// Replace fixtures that already exist
    #[arg(long)]
    overwrite: bool,

    /// How a size becomes a record count
    #[arg(long)]
    sizing: Option<SizingArg>,
}

#[derive(Debug, Parser)]
struct NestedArgs {
    /// Depths as LABEL=COUNT or COUNT with optional K/M/G suffix (e.g. 10K);
    /// defaults to the plan's depths
    #[arg(value_parser = parse_depth_entry)]
    depths: Vec<(String, usize)>,

    /// Leave fixtures that already exist untouched
    #[arg(long)]
    skip_existing: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SizingArg {
    /// floor(size / record length), matching the historical corpus
    PerRecord,
    /// Largest record count whose file fits within the size
    WholeFile,
}

impl From<SizingArg> for Sizing {
    fn from(arg: SizingArg) -> Self {
        match arg {
            SizingArg::PerRecord => Sizing::PerRecord,
            SizingArg::WholeFile => Sizing::WholeFile,
        }
    }
}

/// Parse a megabyte size like "5", "5mb", "10MB" (case insensitive)
fn parse_megabytes(s: &str) -> Result<u64, String> {
    let s = s.trim().to_lowercase();
    let num_str = s.strip_suffix("mb").unwrap_or(&s);

    match num_str.trim().parse::<u64>() {
        Ok(0) => Err("Size must be at least 1MB".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!(
            "Invalid size format: '{}'. Use megabytes like '5' or '5MB'",
            s
        )),
    }
}

/// Parse a depth count like "1000", "10k", "1M" (decimal, case insensitive)
fn parse_depth(s: &str) -> Result<usize, String> {
    let lower = s.trim().to_lowercase();

    let (num_str, unit) = if let Some(n) = lower.strip_suffix('g') {
        (n, 1_000_000_000)
    } else if let Some(n) = lower.strip_suffix('m') {
        (n, 1_000_000)
    } else if let Some(n) = lower.strip_suffix('k') {
        (n, 1_000)
    } else {
        (lower.as_str(), 1)
    };

    let depth = num_str
        .trim()
        .replace('_', "")
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_mul(unit))
        .ok_or_else(|| format!("Invalid depth: '{}'. Use a count like '1000' or '10K'", s))?;

    if depth == 0 {
        return Err("Depth must be at least 1".to_string());
    }
    Ok(depth)
}

/// Parse "LABEL=COUNT", or a bare count that doubles as its own label
fn parse_depth_entry(s: &str) -> Result<(String, usize), String> {
    let s = s.trim();
    match s.split_once('=') {
        Some((label, count)) => {
            let label = label.trim();
            if label.is_empty() {
                return Err(format!("Missing label in '{}'", s));
            }
            Ok((label.to_string(), parse_depth(count)?))
        }
        None => Ok((s.to_string(), parse_depth(s)?)),
    }
}

/// Directory holding the running executable.
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the fixturegen executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn load_plan(config: Option<&Path>) -> Result<FixturePlan> {
    match config {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read plan {}", path.display()))?;
            let plan = serde_json::from_slice(&bytes)
                .with_context(|| format!("invalid plan {}", path.display()))?;
            log::info!("Loaded plan from {}", path.display());
            Ok(plan)
        }
        None => Ok(FixturePlan::default()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut plan = load_plan(cli.config.as_deref())?;

    let nested_dir = match &cli.nested_dir {
        Some(dir) => dir.clone(),
        None => executable_dir()?,
    };

    let mut stdout = io::stdout().lock();

    let report = match cli.command.unwrap_or(Command::All) {
        Command::All => {
            let generator = Generator::new(&plan)
                .with_flat_dir(&cli.flat_dir)
                .with_nested_dir(&nested_dir);
            generator.run(&mut stdout)?
        }
        Command::Flat(args) => {
            if !args.sizes.is_empty() {
                plan.sizes_mb = args.sizes;
            }
            if let Some(sizing) = args.sizing {
                plan.sizing = sizing.into();
            }
            if args.overwrite {
                plan.flat_policy = WritePolicy::Overwrite;
            }
            plan.depths.clear();
            plan.validate()?;

            let generator = Generator::new(&plan).with_flat_dir(&cli.flat_dir);
            Report {
                flat: generator.generate_flat()?,
                nested: Vec::new(),
            }
        }
        Command::Nested(args) => {
            if !args.depths.is_empty() {
                plan.depths = args.depths.into_iter().collect();
            }
            if args.skip_existing {
                plan.nested_policy = WritePolicy::SkipExisting;
            }
            plan.sizes_mb.clear();
            plan.validate()?;

            let generator = Generator::new(&plan).with_nested_dir(&nested_dir);
            Report {
                flat: Vec::new(),
                nested: generator.generate_nested(&mut stdout)?,
            }
        }
        Command::Plan => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
            return Ok(());
        }
    };

    log::info!(
        "{} fixtures written, {} skipped",
        report.written(),
        report.skipped()
    );

    if cli.verify {
        let generator = Generator::new(&plan)
            .with_flat_dir(&cli.flat_dir)
            .with_nested_dir(&nested_dir);
        let checked = verify::verify_plan(&generator)?;
        eprintln!("✓ {} fixtures verified", checked);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_megabytes() {
        assert_eq!(parse_megabytes("1").unwrap(), 1);
        assert_eq!(parse_megabytes("5mb").unwrap(), 5);
        assert_eq!(parse_megabytes("10MB").unwrap(), 10);
        assert_eq!(parse_megabytes(" 10Mb ").unwrap(), 10);

        assert!(parse_megabytes("0").is_err());
        assert!(parse_megabytes("1gb").is_err());
        assert!(parse_megabytes("abc").is_err());
        assert!(parse_megabytes("").is_err());
    }

    #[test]
    fn test_parse_depth() {
        assert_eq!(parse_depth("1000").unwrap(), 1_000);
        assert_eq!(parse_depth("1K").unwrap(), 1_000);
        assert_eq!(parse_depth("100k").unwrap(), 100_000);
        assert_eq!(parse_depth("10M").unwrap(), 10_000_000);
        assert_eq!(parse_depth("1_000").unwrap(), 1_000);

        assert!(parse_depth("0").is_err());
        assert!(parse_depth("0K").is_err());
        assert!(parse_depth("deep").is_err());
        assert!(parse_depth("-5").is_err());
    }

    #[test]
    fn test_parse_depth_entry() {
        assert_eq!(
            parse_depth_entry("10K").unwrap(),
            ("10K".to_string(), 10_000)
        );
        assert_eq!(
            parse_depth_entry("deep=2500").unwrap(),
            ("deep".to_string(), 2_500)
        );
        assert_eq!(
            parse_depth_entry("x = 1M").unwrap(),
            ("x".to_string(), 1_000_000)
        );

        assert!(parse_depth_entry("=5").is_err());
        assert!(parse_depth_entry("deep=").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["fixturegen"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verify);

        let cli = Cli::try_parse_from([
            "fixturegen",
            "nested",
            "1K",
            "deep=50",
            "--skip-existing",
            "--nested-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Nested(args)) => {
                assert_eq!(
                    args.depths,
                    vec![("1K".to_string(), 1_000), ("deep".to_string(), 50)]
                );
                assert!(args.skip_existing);
            }
            other => panic!("expected nested command, got {:?}", other),
        }
        assert_eq!(cli.nested_dir, Some(PathBuf::from("out")));
    }
}
