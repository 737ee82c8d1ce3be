// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator error type.
//!
//! Only the collaborators fail: reading and parsing sources, writing
//! outputs, and starting the worker pool. Directive parsing and resolution
//! never return errors; malformed annotations are dropped and logged.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while scanning sources or writing generated modules.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path:   PathBuf,
        /// Underlying error.
        source: io::Error
    },

    /// A source file is not valid Rust.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Offending file.
        path:   PathBuf,
        /// Parser diagnostic.
        source: syn::Error
    },

    /// Serializing a resolved config failed.
    #[error("failed to serialize `{record}`: {source}")]
    Serialize {
        /// Record type being written.
        record: String,
        /// Underlying error.
        source: serde_json::Error
    },

    /// A record, field or procedure name cannot be used in generated code.
    #[error("`{name}` in `{record}` is not a valid Rust path")]
    InvalidName {
        /// Record type being rendered.
        record: String,
        /// Offending name.
        name:   String
    },

    /// Generated tokens do not form a Rust file.
    #[error("generated module for `{record}` is not valid Rust: {source}")]
    Render {
        /// Record type being rendered.
        record: String,
        /// Parser diagnostic.
        source: syn::Error
    },

    /// Two record types map to the same output module.
    #[error("`{record}` and `{existing}` both generate module `{module}`")]
    DuplicateModule {
        /// Module name both records resolve to.
        module:   String,
        /// Record encountered first.
        existing: String,
        /// Record encountered later.
        record:   String
    },

    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    Workers(#[from] rayon::ThreadPoolBuildError)
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source
        }
    }
}

/// Result alias for generator operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
