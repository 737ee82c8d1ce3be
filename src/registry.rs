// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hook registry.
//!
//! Maps each of the sixteen hook points to the registrations declared
//! against it, in encounter order.
//!
//! # Lifecycle
//!
//! ```text
//! scan phase (single-threaded)          resolution phase (parallel)
//!
//! HookRegistryBuilder                   &HookRegistry
//!   ├─► register("audit", "@tg ...")      ├─► hooks(CreateBefore)
//!   ├─► register(...)                     ├─► hooks(CreateAfter)
//!   └─► build() ───────────────────────►  └─► ...
//! ```
//!
//! The builder is the only writer. Once [`HookRegistryBuilder::build`] has
//! run the registry is immutable and can be shared across threads by plain
//! reference.

use tracing::debug;

use crate::{decl::ProcedureDecl, directive::HookDirective, operation::HookPoint};

/// Frozen table of hook registrations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookRegistry {
    points: [Vec<HookDirective>; HookPoint::COUNT]
}

impl HookRegistry {
    /// Start collecting registrations.
    #[must_use]
    pub fn builder() -> HookRegistryBuilder {
        HookRegistryBuilder::default()
    }

    /// Build a registry from declared procedures in encounter order.
    #[must_use]
    pub fn from_procedures<'a>(procedures: impl IntoIterator<Item = &'a ProcedureDecl>) -> Self {
        let mut builder = Self::builder();
        for procedure in procedures {
            for directive in &procedure.directives {
                builder.register(&procedure.name, directive);
            }
        }
        builder.build()
    }

    /// Registrations at `point`, in encounter order.
    #[must_use]
    pub fn hooks(&self, point: HookPoint) -> &[HookDirective] {
        &self.points[point.index()]
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.iter().map(Vec::len).sum()
    }

    /// Check whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Vec::is_empty)
    }
}

/// Write side of the registry, used during the scan phase only.
#[derive(Debug, Default)]
pub struct HookRegistryBuilder {
    registry: HookRegistry
}

impl HookRegistryBuilder {
    /// Parse a raw hook directive and append its registrations.
    pub fn register(&mut self, procedure: &str, raw: &str) -> &mut Self {
        for directive in HookDirective::parse(procedure, raw) {
            debug!(procedure, point = %directive.point, "registered hook");
            self.push(directive);
        }
        self
    }

    /// Append an already-parsed registration.
    pub fn push(&mut self, directive: HookDirective) -> &mut Self {
        self.registry.points[directive.point.index()].push(directive);
        self
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> HookRegistry {
        self.registry
    }
}
