// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration records handed to the resolution engine.
//!
//! These are the already-decoded inputs: whatever produced them (the
//! [`scan`](crate::scan) module for Rust sources, or a test) has done all
//! syntax work. Raw annotation strings are kept verbatim; interpreting them
//! is the job of the [`directive`](crate::directive) parsers.

use std::collections::BTreeMap;

/// A record type carrying a type directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDecl {
    /// Type name, e.g. `User`.
    pub name: String,

    /// Raw directive string; `None` means "all defaults".
    pub directive: Option<String>,

    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>
}

impl RecordDecl {
    /// Start a record declaration with no directive and no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach a raw directive.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Append a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }
}

/// A single record field and its raw metadata tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name as declared.
    pub name: String,

    /// Name of the underlying primitive type (`i64`, `bool`, `String`, ...).
    pub type_name: String,

    /// Documentation text, if the field has any.
    pub doc: Option<String>,

    /// Raw metadata key/value pairs (`params`, `json`, `pt`, ...).
    pub tags: BTreeMap<String, String>
}

impl FieldDecl {
    /// Start a field declaration with no doc and no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Add a metadata tag.
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Attach documentation text.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Look up a tag value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// A free procedure carrying hook directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcedureDecl {
    /// Procedure name as it will be referenced from generated code.
    pub name: String,

    /// Raw hook directive strings.
    pub directives: Vec<String>
}

impl ProcedureDecl {
    /// Declare a procedure with one raw directive.
    #[must_use]
    pub fn new(name: impl Into<String>, directive: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            directives: vec![directive.into()]
        }
    }
}

/// Everything collected from one input set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Record types in encounter order.
    pub records: Vec<RecordDecl>,

    /// Procedures in encounter order.
    pub procedures: Vec<ProcedureDecl>
}

impl Declarations {
    /// Append another set, preserving encounter order.
    pub fn extend(&mut self, other: Declarations) {
        self.records.extend(other.records);
        self.procedures.extend(other.procedures);
    }

    /// Check whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.procedures.is_empty()
    }
}
