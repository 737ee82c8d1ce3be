// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter resolution for Create and Update.
//!
//! Selects the participating fields per operation from their membership
//! codes and renders one documentation line per parameter:
//!
//! ```text
//! @Param name formData string true "Login name" maxLength(64) minLength(1)
//!        ^^^^          ^^^^^^ ^^^^  ^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^
//!        json key      kind   req.  doc          constraints, when set
//! ```
//!
//! Constraint clauses appear in a fixed order: `enums`, `maxLength`,
//! `minLength`, `maximum`, `minimum`.

use crate::{
    config::ResolvedParam,
    directive::{FieldMeta, Presence},
    operation::Operation
};

/// Presence of `field` in `op`, or `None` if it does not participate.
#[must_use]
pub fn presence(field: &FieldMeta, op: Operation) -> Option<Presence> {
    match op {
        Operation::Create => field.membership.create,
        Operation::Update => field.membership.update,
        Operation::List | Operation::Info | Operation::Delete => None
    }
}

/// Participating parameters of `op`, in field declaration order.
#[must_use]
pub fn resolve_params(op: Operation, fields: &[FieldMeta]) -> Vec<ResolvedParam> {
    fields
        .iter()
        .filter_map(|field| {
            let required = presence(field, op)? == Presence::Required;
            Some(ResolvedParam {
                field: field.clone(),
                required,
                doc_line: param_doc(field, required)
            })
        })
        .collect()
}

/// Render the documentation line of one parameter.
#[must_use]
pub fn param_doc(field: &FieldMeta, required: bool) -> String {
    let mut line = format!(
        "@Param {} formData {} {} \"{}\"",
        field.json_key, field.kind, required, field.doc
    );

    let clauses = [
        ("enums", &field.enums),
        ("maxLength", &field.max_length),
        ("minLength", &field.min_length),
        ("maximum", &field.max),
        ("minimum", &field.min)
    ];
    for (name, value) in clauses {
        if let Some(value) = value {
            line.push_str(&format!(" {name}({value})"));
        }
    }

    line
}
