//! Command-line surface for the blockpack compaction engine.
//!
//! Reads a disk map (one line of digits) from a file or stdin, compacts
//! it under the selected policy, and prints the checksum. Normal output
//! is the integer and nothing else; `--json` prints the full report.
//! Diagnostics go to stderr via `RUST_LOG`.

use anyhow::{bail, Context, Result};
use bp_compactor::{CompactionPipeline, CompactionPolicy};
use std::env;
use std::fs;
use std::io::Read;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    init_tracing();
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Dev diagnostics only: silent unless `RUST_LOG` is set, so checksum
/// output stays a single integer on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn run() -> Result<()> {
    let mut input_path: Option<String> = None;
    let mut policy = CompactionPolicy::BlockLevel;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--policy" => {
                let Some(value) = args.next() else {
                    bail!("--policy requires a value (block|file)");
                };
                policy = match value.as_str() {
                    "block" => CompactionPolicy::BlockLevel,
                    "file" => CompactionPolicy::WholeFile,
                    other => bail!("unknown policy: {other} (expected block|file)"),
                };
            }
            "--json" => json = true,
            "--help" | "-h" | "help" => {
                print_usage();
                return Ok(());
            }
            other if other.starts_with("--") => {
                print_usage();
                bail!("unknown flag: {other}");
            }
            _ => {
                if input_path.is_some() {
                    bail!("expected exactly one input path");
                }
                input_path = Some(arg);
            }
        }
    }

    let Some(path) = input_path else {
        print_usage();
        bail!("missing disk-map path (use - for stdin)");
    };

    let disk_map = read_input(&path)?;
    let report = CompactionPipeline::new(policy)
        .run(&disk_map)
        .context("compaction failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.checksum);
    }
    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading disk map from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading disk map from {path}"))
    }
}

fn print_usage() {
    println!("bp-cli\n");
    println!("USAGE:");
    println!("  bp-cli <disk-map-path | -> [--policy block|file] [--json]");
    println!();
    println!("POLICIES:");
    println!("  block  move single blocks, rightmost first (default)");
    println!("  file   move whole files, highest id first, first-fit");
}
