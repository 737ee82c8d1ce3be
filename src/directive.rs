// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Annotation parsing.
//!
//! Turns the three raw annotation forms into structured values:
//!
//! | Annotation | Attached to | Parsed into |
//! |------------|-------------|-------------|
//! | type directive (`@tg ...`) | record type | [`ApiDirective`] |
//! | field tags (`params`, `json`, ...) | record field | [`FieldMeta`] |
//! | hook directive (`@tg ...`) | free procedure | [`HookDirective`] |
//!
//! # Architecture
//!
//! ```text
//! directive.rs (coordinator)
//! ├── lexer.rs  - marker stripping, quote-aware word splitting
//! ├── api.rs    - type directive grammar
//! ├── field.rs  - field tag interpretation
//! └── hook.rs   - hook directive grammar
//! ```
//!
//! Every parser here is total: malformed input is dropped token by token
//! and logged at `debug`, never reported as an error.

pub mod api;
pub mod field;
pub mod hook;
pub mod lexer;

pub use api::{ApiDirective, OperationDirective};
pub use field::{Extractor, FieldKind, FieldMeta, Membership, Presence};
pub use hook::{HookDirective, HookScope};
