// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! crudgen: generate CRUD service modules from annotated Rust sources.
//!
//! ```bash
//! # Generate Rust modules for every @tg record under src/models
//! crudgen src/models src/hooks.rs --output src/generated
//!
//! # Dump the resolved configurations instead
//! crudgen src/models --format json --output target/crudgen
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crudgen::{DEFAULT_WORKERS, Generator, GeneratorConfig, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "crudgen",
    author,
    version,
    about = "Generate CRUD service modules from annotated record types"
)]
struct Cli {
    /// Source files or directories to scan
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory receiving generated files
    #[arg(long, short, default_value = "generated")]
    output: PathBuf,

    /// Worker threads (clamped to the number of record types)
    #[arg(long, short, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// What to write for each record type
    #[arg(long, value_enum, default_value_t = Format::Rust)]
    format: Format,

    /// Verbose output (show dropped directives)
    #[arg(long, short)]
    verbose: bool,

    /// Log every scanned declaration
    #[arg(long)]
    debug: bool
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Rust module source
    Rust,
    /// Resolved configuration as JSON
    Json
}

impl From<Cli> for GeneratorConfig {
    fn from(cli: Cli) -> Self {
        Self {
            inputs:  cli.inputs,
            output:  cli.output,
            workers: cli.workers,
            format:  match cli.format {
                Format::Rust => OutputFormat::Rust,
                Format::Json => OutputFormat::Json
            },
            debug:   cli.debug
        }
    }
}

fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("crudgen=debug")
        } else {
            EnvFilter::new("crudgen=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose || cli.debug);

    let config = GeneratorConfig::from(cli);
    let output = config.output.clone();
    let summary = Generator::new(config)
        .run()
        .with_context(|| format!("generation into {} failed", output.display()))?;

    println!(
        "generated {} module(s) from {} record type(s) and {} hook registration(s)",
        summary.written.len(),
        summary.records,
        summary.hooks
    );
    Ok(())
}
