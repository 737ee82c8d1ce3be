// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # crudgen
//!
//! Build-time generator that turns annotated record types into CRUD
//! service modules.
//!
//! Record types opt in with a `@tg` doc line; their fields opt into
//! Create/Update with `#[tg(params = "...")]`; free functions register as
//! lifecycle hooks with their own `@tg` doc lines.
//!
//! ```rust,ignore
//! /// User accounts.
//! /// @tg -Delete Info:preload=Org security=admin
//! pub struct User {
//!     /// Login name.
//!     #[tg(params = "CU", maxlength = 64)]
//!     pub name: String,
//!
//!     #[tg(params = "cu", json = "years", min = 0)]
//!     pub age: i64,
//! }
//!
//! /// @tg CreateBefore:User@10 -DeleteAfter:Session
//! pub fn check_quota(ctx: &mut Context, record: &mut User) -> Result<()> { ... }
//! ```
//!
//! # Directive Quick Reference
//!
//! | Where | Syntax | Effect |
//! |-------|--------|--------|
//! | type | `-Create` .. `-Delete` | disable an operation |
//! | type | `nosave` | Create and Update do not persist |
//! | type | `desc="..."` | description |
//! | type | `preload=a,b>c` | eager loads for Info and List |
//! | type | `security=s1,s2` | scopes for all operations |
//! | type | `Op:save=..;preload=..;security=..` | per-operation override |
//! | field | `params = "CU"` | membership code, see [`Membership`] |
//! | field | `json`, `pt`, `enums`, `minlength`, `maxlength`, `min`, `max` | parameter metadata |
//! | field | `dbindex` | database index hint |
//! | hook | `Point[@w]` | run at `Point` for every type |
//! | hook | `Point[@w]:A[@w],B` | only for the listed types |
//! | hook | `-Point:A,B` | for every type except the listed ones |
//!
//! # Pipeline
//!
//! ```text
//! scan ──► decl ──► registry (frozen) ──► resolve ──► config ──► render / JSON
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Rust sources to [`Declarations`] |
//! | [`directive`] | type, field and hook grammars |
//! | [`registry`] | hook registrations per point |
//! | [`resolve`] | one [`ResolvedConfig`] per record type |
//! | [`render`] | Rust module text |
//! | [`generate`] | parallel driver |
//!
//! Directive parsing and resolution never fail: malformed input is dropped
//! and logged through `tracing`. Only file access, parsing of sources,
//! unusable names in generated code, records colliding on one output module
//! and worker pool start-up return [`Error`].

pub mod config;
pub mod decl;
pub mod directive;
pub mod error;
pub mod generate;
pub mod operation;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod utils;

pub use config::{HookEntry, HookList, OperationConfig, ResolvedConfig, ResolvedParam};
pub use decl::{Declarations, FieldDecl, ProcedureDecl, RecordDecl};
pub use directive::{ApiDirective, FieldMeta, HookDirective, Membership};
pub use error::{Error, Result};
pub use generate::{DEFAULT_WORKERS, Generator, GeneratorConfig, OutputFormat, Summary};
pub use operation::{HookPoint, Operation, Phase};
pub use registry::{HookRegistry, HookRegistryBuilder};
pub use resolve::Resolver;
