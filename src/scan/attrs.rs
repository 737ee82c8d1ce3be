// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[tg(...)]` field attribute parsing.
//!
//! # Syntax
//!
//! ```rust,ignore
//! #[tg(params = "Cu", json = "login", maxlength = 64, min = -1, pt = "string:@parse_login")]
//! pub name: String,
//! ```
//!
//! Every value may be a string, integer, float or boolean literal; numbers
//! may be negated. Values are kept as raw strings for the field directive
//! parser.

use darling::{FromField, FromMeta};
use syn::{Expr, ExprLit, ExprUnary, Lit, UnOp};

/// A literal attribute value, carried as its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagValue(pub String);

impl TagValue {
    fn from_number(lit: &Lit, negative: bool) -> darling::Result<Self> {
        let digits = match lit {
            Lit::Int(int) => int.base10_digits(),
            Lit::Float(float) => float.base10_digits(),
            _ => return Err(darling::Error::unexpected_lit_type(lit))
        };
        let sign = if negative { "-" } else { "" };
        Ok(Self(format!("{sign}{digits}")))
    }
}

impl FromMeta for TagValue {
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        let value = match expr {
            Expr::Lit(ExprLit {
                lit, ..
            }) => Self::from_value(lit),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr: inner,
                ..
            }) => match inner.as_ref() {
                Expr::Lit(ExprLit {
                    lit, ..
                }) => Self::from_number(lit, true),
                _ => Err(darling::Error::unexpected_expr_type(expr))
            },
            Expr::Group(group) => Self::from_expr(&group.expr),
            _ => Err(darling::Error::unexpected_expr_type(expr))
        };
        value.map_err(|e| e.with_span(expr))
    }

    fn from_value(lit: &Lit) -> darling::Result<Self> {
        match lit {
            Lit::Str(s) => Ok(Self(s.value())),
            Lit::Bool(b) => Ok(Self(b.value.to_string())),
            Lit::Int(_) | Lit::Float(_) => Self::from_number(lit, false),
            _ => Err(darling::Error::unexpected_lit_type(lit))
        }
    }
}

/// Parsed `#[tg(...)]` attribute of one field.
///
/// Absent keys stay `None`; unknown keys are a darling error.
#[derive(Debug, Default, FromField)]
#[darling(attributes(tg))]
pub struct FieldAttrs {
    /// Membership code.
    pub params: Option<TagValue>,

    /// Parameter key.
    pub json: Option<TagValue>,

    /// Allowed values.
    pub enums: Option<TagValue>,

    /// Minimum string length.
    pub minlength: Option<TagValue>,

    /// Maximum string length.
    pub maxlength: Option<TagValue>,

    /// Minimum numeric value.
    pub min: Option<TagValue>,

    /// Maximum numeric value.
    pub max: Option<TagValue>,

    /// Kind and extractor override.
    pub pt: Option<TagValue>,

    /// Database index hint.
    pub dbindex: Option<TagValue>
}

impl FieldAttrs {
    /// Present tags as `(key, value)` pairs.
    pub fn tags(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("params", &self.params),
            ("json", &self.json),
            ("enums", &self.enums),
            ("minlength", &self.minlength),
            ("maxlength", &self.maxlength),
            ("min", &self.min),
            ("max", &self.max),
            ("pt", &self.pt),
            ("dbindex", &self.dbindex)
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| (key, v.0.as_str())))
    }
}
