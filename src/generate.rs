// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation driver.
//!
//! # Pipeline
//!
//! ```text
//! inputs ──► scan ──► Declarations
//!                       ├─► procedures ──► HookRegistry (frozen)
//!                       │                        │ &
//!                       └─► records ──► par_iter ┴─► resolve ─► render ─► write
//!                                      (worker pool)
//! ```
//!
//! Scanning and registry construction are single-threaded. Once the registry
//! is frozen, each record is resolved, rendered and written by one worker;
//! workers share nothing but the registry. Output files are named after
//! [`ResolvedConfig::module_name`](crate::config::ResolvedConfig::module_name);
//! two records sharing a module name fail the run before anything is
//! written.

use std::{
    collections::{HashMap, hash_map::Entry},
    fs,
    path::{Path, PathBuf}
};

use rayon::{ThreadPoolBuilder, prelude::*};
use tracing::{debug, info};

use crate::{
    decl::{Declarations, RecordDecl},
    error::{Error, Result},
    registry::HookRegistry,
    render::render,
    resolve::{Resolver, module_name},
    scan::scan_paths
};

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 5;

/// What each generated file contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rust module source (`.rs`).
    #[default]
    Rust,

    /// Pretty-printed resolved configuration (`.json`).
    Json
}

impl OutputFormat {
    /// File extension of generated files.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Rust => "rs",
            Self::Json => "json"
        }
    }
}

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Source files or directories to scan.
    pub inputs: Vec<PathBuf>,

    /// Directory receiving generated files; created if missing.
    pub output: PathBuf,

    /// Requested worker count, clamped to `1..=records`.
    pub workers: usize,

    /// Output format.
    pub format: OutputFormat,

    /// Log every scanned declaration at `debug` level.
    pub debug: bool
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            inputs:  Vec::new(),
            output:  PathBuf::from("generated"),
            workers: DEFAULT_WORKERS,
            format:  OutputFormat::default(),
            debug:   false
        }
    }
}

/// Outcome of one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Record types found.
    pub records: usize,

    /// Hook registrations found.
    pub hooks: usize,

    /// Written files in record encounter order.
    pub written: Vec<PathBuf>
}

/// Runs the scan, resolve, render and write pipeline.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig
}

impl Generator {
    /// Create a generator.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Settings in use.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scan the configured inputs and generate every record type.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or unparsable inputs, on records sharing an
    /// output module, on write errors, and if the worker pool cannot start.
    pub fn run(&self) -> Result<Summary> {
        let decls = scan_paths(&self.config.inputs)?;
        self.generate(&decls)
    }

    /// Generate every record type of already-scanned declarations.
    ///
    /// # Errors
    ///
    /// See [`Generator::run`].
    pub fn generate(&self, decls: &Declarations) -> Result<Summary> {
        if self.config.debug {
            for procedure in &decls.procedures {
                debug!(?procedure, "scanned procedure");
            }
            for record in &decls.records {
                debug!(?record, "scanned record");
            }
        }

        let registry = HookRegistry::from_procedures(&decls.procedures);
        info!(
            records = decls.records.len(),
            hooks = registry.len(),
            "hook registry frozen"
        );

        let mut summary = Summary {
            records: decls.records.len(),
            hooks: registry.len(),
            written: Vec::new()
        };
        if decls.records.is_empty() {
            info!("no record types found, nothing to generate");
            return Ok(summary);
        }

        check_modules(&decls.records)?;

        let output = &self.config.output;
        fs::create_dir_all(output).map_err(|e| Error::io(output, e))?;

        let workers = worker_count(self.config.workers, decls.records.len());
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        debug!(workers, "worker pool started");

        let resolver = Resolver::new(&registry);
        summary.written = pool.install(|| {
            decls
                .records
                .par_iter()
                .map(|record| emit(resolver, record, output, self.config.format))
                .collect::<Result<Vec<_>>>()
        })?;

        info!(files = summary.written.len(), output = %output.display(), "generation finished");
        Ok(summary)
    }
}

/// Clamp a requested worker count to `1..=records`.
#[must_use]
pub fn worker_count(requested: usize, records: usize) -> usize {
    requested.clamp(1, records.max(1))
}

fn check_modules(records: &[RecordDecl]) -> Result<()> {
    let mut modules: HashMap<String, &str> = HashMap::new();
    for record in records {
        match modules.entry(module_name(&record.name)) {
            Entry::Occupied(entry) => {
                return Err(Error::DuplicateModule {
                    module:   entry.key().clone(),
                    existing: entry.get().to_string(),
                    record:   record.name.clone()
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(&record.name);
            }
        }
    }
    Ok(())
}

fn emit(resolver: Resolver<'_>, record: &RecordDecl, output: &Path, format: OutputFormat) -> Result<PathBuf> {
    let config = resolver.resolve(record);
    let contents = match format {
        OutputFormat::Rust => render(&config)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&config).map_err(|source| Error::Serialize {
                record: config.name.clone(),
                source
            })?;
            json.push('\n');
            json
        }
    };

    let path = output.join(format!("{}.{}", config.module_name, format.extension()));
    fs::write(&path, contents).map_err(|e| Error::io(&path, e))?;
    info!(record = %config.name, path = %path.display(), "generated");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{FieldDecl, ProcedureDecl};

    fn decls() -> Declarations {
        Declarations {
            records:    vec![
                RecordDecl::new("User")
                    .with_directive("@tg -Delete")
                    .with_field(FieldDecl::new("name", "String").tag("params", "CU")),
                RecordDecl::new("OrderLine").with_directive("@tg")
            ],
            procedures: vec![ProcedureDecl::new("audit", "@tg CreateAfter UpdateAfter")]
        }
    }

    fn generator(output: &Path, format: OutputFormat) -> Generator {
        Generator::new(GeneratorConfig {
            output: output.to_path_buf(),
            format,
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.workers, 5);
        assert_eq!(config.format, OutputFormat::Rust);
        assert!(!config.debug);
    }

    #[test]
    fn worker_count_is_clamped() {
        assert_eq!(worker_count(5, 2), 2);
        assert_eq!(worker_count(5, 12), 5);
        assert_eq!(worker_count(0, 3), 1);
        assert_eq!(worker_count(4, 0), 1);
    }

    #[test]
    fn writes_one_file_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generator(dir.path(), OutputFormat::Rust)
            .generate(&decls())
            .unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(summary.hooks, 2);
        assert_eq!(
            summary.written,
            vec![dir.path().join("users.rs"), dir.path().join("order_lines.rs")]
        );
        let users = fs::read_to_string(dir.path().join("users.rs")).unwrap();
        assert!(syn::parse_file(&users).is_ok());
    }

    #[test]
    fn json_output_is_byte_identical_across_runs() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        generator(first.path(), OutputFormat::Json)
            .generate(&decls())
            .unwrap();
        generator(second.path(), OutputFormat::Json)
            .generate(&decls())
            .unwrap();

        for name in ["users.json", "order_lines.json"] {
            let a = fs::read(first.path().join(name)).unwrap();
            let b = fs::read(second.path().join(name)).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn records_sharing_a_module_fail_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let decls = Declarations {
            records:    vec![
                RecordDecl::new("User").with_directive("@tg"),
                RecordDecl::new("OrderLine").with_directive("@tg"),
                RecordDecl::new("User").with_directive("@tg -Delete")
            ],
            procedures: Vec::new()
        };

        match generator(&output, OutputFormat::Json).generate(&decls) {
            Err(Error::DuplicateModule {
                module,
                existing,
                record
            }) => {
                assert_eq!(module, "users");
                assert_eq!(existing, "User");
                assert_eq!(record, "User");
            }
            other => panic!("expected duplicate module, got {other:?}")
        }
        assert!(!output.exists());
    }

    #[test]
    fn no_records_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let decls = Declarations {
            records:    Vec::new(),
            procedures: vec![ProcedureDecl::new("audit", "@tg CreateAfter")]
        };
        let summary = generator(&output, OutputFormat::Rust)
            .generate(&decls)
            .unwrap();
        assert_eq!(summary.hooks, 1);
        assert!(summary.written.is_empty());
        assert!(!output.exists());
    }
}
