// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type resolution.
//!
//! The [`Resolver`] turns one record declaration into one
//! [`ResolvedConfig`], consulting a frozen [`HookRegistry`].
//!
//! # Resolution Flow
//!
//! ```text
//! RecordDecl ─┬─► ApiDirective::parse ──► enabled / save / preload / security / desc
//!             ├─► FieldMeta::from_decl ─► params::resolve_params (Create, Update)
//!             └─► name ─────────────────► hooks::resolve_operation (16 points)
//!                                                   │
//!                                                   ▼
//!                                             ResolvedConfig
//! ```
//!
//! The five operations are computed independently. Resolution only reads
//! the registry, so any number of records may be resolved concurrently.

pub mod hooks;
pub mod params;

use convert_case::{Case, Casing};
use tracing::debug;

use crate::{
    config::{OperationConfig, ResolvedConfig},
    decl::RecordDecl,
    directive::{ApiDirective, FieldMeta},
    operation::Operation,
    registry::HookRegistry
};

/// Resolves record declarations against a frozen hook registry.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'r> {
    registry: &'r HookRegistry
}

impl<'r> Resolver<'r> {
    /// Create a resolver reading from `registry`.
    #[must_use]
    pub fn new(registry: &'r HookRegistry) -> Self {
        Self { registry }
    }

    /// Resolve one record declaration.
    #[must_use]
    pub fn resolve(&self, record: &RecordDecl) -> ResolvedConfig {
        let directive = match &record.directive {
            Some(raw) => ApiDirective::parse(&record.name, raw),
            None => ApiDirective::new(&record.name)
        };
        let fields: Vec<FieldMeta> = record
            .fields
            .iter()
            .filter_map(FieldMeta::from_decl)
            .collect();

        let mut config = self.resolve_parts(&record.name, &directive, &fields);
        config.db_index = record
            .fields
            .iter()
            .filter_map(|f| f.get("dbindex"))
            .next_back()
            .map(str::to_string);
        config
    }

    /// Resolve from an already-parsed directive and field list.
    #[must_use]
    pub fn resolve_parts(
        &self,
        name: &str,
        directive: &ApiDirective,
        fields: &[FieldMeta]
    ) -> ResolvedConfig {
        let op = |op: Operation| self.resolve_operation(name, directive, fields, op);

        let config = ResolvedConfig {
            name:        name.to_string(),
            module_name: module_name(name),
            description: directive.description().to_string(),
            db_index:    None,
            create:      op(Operation::Create),
            update:      op(Operation::Update),
            list:        op(Operation::List),
            info:        op(Operation::Info),
            delete:      op(Operation::Delete)
        };

        debug!(
            record = name,
            enabled = directive.enabled_ops().count(),
            params = fields.len(),
            "resolved record"
        );
        config
    }

    fn resolve_operation(
        &self,
        name: &str,
        directive: &ApiDirective,
        fields: &[FieldMeta],
        op: Operation
    ) -> OperationConfig {
        let settings = directive.op(op);
        let params = if settings.enabled && op.takes_params() {
            params::resolve_params(op, fields)
        } else {
            Vec::new()
        };

        OperationConfig {
            operation: op,
            enabled: settings.enabled,
            save: settings.save,
            preload: settings.preload.clone(),
            security: settings.security.clone(),
            params,
            hooks: hooks::resolve_operation(self.registry, name, op, settings.enabled)
        }
    }
}

/// Output module name of a record type: snake case plus `s`.
#[must_use]
pub fn module_name(type_name: &str) -> String {
    format!("{}s", type_name.to_case(Case::Snake))
}
