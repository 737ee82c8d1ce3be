// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved configuration handed to rendering.
//!
//! # Type Hierarchy
//!
//! ```text
//! ResolvedConfig
//! ├─► name, module_name, description, db_index
//! └─► create / update / list / info / delete: OperationConfig
//!     ├─► enabled, save, preload, security
//!     ├─► params: Vec<ResolvedParam>      (Create and Update only)
//!     └─► hooks: Vec<HookList>            (one per hook point of the op)
//!         └─► entries: Vec<HookEntry>     (descending weight, stable)
//! ```
//!
//! The schema is uniform: a disabled operation still carries its
//! `OperationConfig`, with empty `params` and empty hook entry lists.

use serde::Serialize;

use crate::{
    directive::FieldMeta,
    operation::{HookPoint, Operation}
};

/// Everything the renderer needs for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    /// Record type name.
    pub name: String,

    /// Output module name, e.g. `user_roles` for `UserRole`.
    pub module_name: String,

    /// Human-readable description.
    pub description: String,

    /// Database index hint from a `dbindex` field tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_index: Option<String>,

    /// Create settings.
    pub create: OperationConfig,

    /// Update settings.
    pub update: OperationConfig,

    /// List settings.
    pub list: OperationConfig,

    /// Info settings.
    pub info: OperationConfig,

    /// Delete settings.
    pub delete: OperationConfig
}

impl ResolvedConfig {
    /// Settings of one operation.
    #[must_use]
    pub fn op(&self, op: Operation) -> &OperationConfig {
        match op {
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::List => &self.list,
            Operation::Info => &self.info,
            Operation::Delete => &self.delete
        }
    }

    /// All five operation configs in canonical order.
    pub fn ops(&self) -> impl Iterator<Item = &OperationConfig> {
        [
            &self.create,
            &self.update,
            &self.list,
            &self.info,
            &self.delete
        ]
        .into_iter()
    }

    /// Resolved hook list of one hook point.
    #[must_use]
    pub fn hooks(&self, point: HookPoint) -> &[HookEntry] {
        self.op(point.operation()).hooks(point)
    }
}

/// Settings of one operation for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationConfig {
    /// Which operation this is.
    pub operation: Operation,

    /// Whether code is generated for it.
    pub enabled: bool,

    /// Whether the record is persisted; `false` for non-persisting ops.
    pub save: bool,

    /// Eager-load paths.
    pub preload: Vec<String>,

    /// Security scopes.
    pub security: Vec<String>,

    /// Input parameters in field declaration order.
    pub params: Vec<ResolvedParam>,

    /// One list per hook point of the operation, in invocation order.
    pub hooks: Vec<HookList>
}

impl OperationConfig {
    /// Whether any eager-load path is configured.
    #[must_use]
    pub fn has_preload(&self) -> bool {
        !self.preload.is_empty()
    }

    /// Resolved entries of one hook point; empty for foreign points.
    #[must_use]
    pub fn hooks(&self, point: HookPoint) -> &[HookEntry] {
        self.hooks
            .iter()
            .find(|list| list.point == point)
            .map(|list| list.entries.as_slice())
            .unwrap_or_default()
    }

    /// Rendered documentation lines of all parameters.
    pub fn param_docs(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.doc_line.as_str())
    }
}

/// One input parameter of Create or Update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedParam {
    /// Field metadata.
    pub field: FieldMeta,

    /// Whether the parameter must be supplied for this operation.
    pub required: bool,

    /// Rendered documentation line.
    pub doc_line: String
}

/// Resolved registrations of one hook point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookList {
    /// The hook point.
    pub point: HookPoint,

    /// Applicable procedures, highest weight first.
    pub entries: Vec<HookEntry>
}

/// One applicable procedure with its effective weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookEntry {
    /// Procedure to invoke.
    pub procedure: String,

    /// Effective weight for this record type.
    pub weight: i64
}
