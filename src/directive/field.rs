// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field metadata parsing.
//!
//! Each record field may carry metadata tags. Only fields with a `params`
//! membership code take part in generated operations; all others are
//! dropped without error.
//!
//! # Tags
//!
//! | Tag | Meaning | Default |
//! |-----|---------|---------|
//! | `params` | membership code, see [`Membership`] | field dropped |
//! | `json` | parameter key | lower-cased field name |
//! | `pt` | `<kind>[:<extractor>]` override | from primitive type |
//! | `enums` | allowed values | none |
//! | `minlength` / `maxlength` | string length bounds | none |
//! | `min` / `max` | numeric bounds | none |
//!
//! A `json` value of `-` counts as absent.
//!
//! # Kinds and Extractors
//!
//! | Primitive | Kind | Extractor |
//! |-----------|------|-----------|
//! | `bool` | `bool` | `Bool` |
//! | `i8`..`i128`, `u8`..`u128`, `isize`, `usize` | `integer` | `Int64` |
//! | `f32`, `f64` | `number` | `Float64` |
//! | anything else | `string` | `String` |
//!
//! The extractor always follows the primitive: `pt="number"` on an `i64`
//! changes the documented kind but still reads with `Int64`. Only the full
//! `<kind>:<extractor>` form replaces the extractor. An extractor written as
//! `@name` is [`Extractor::Indirect`]: the value is read as a string and
//! passed through the conversion `name`.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::decl::FieldDecl;

/// Coarse value category of a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// Any integer width.
    Integer,
    /// Any float width.
    Number,
    /// Strings and everything unrecognized.
    String,
    /// Explicit `pt` kind outside the four built-ins.
    Other(String)
}

impl FieldKind {
    /// Category of a primitive Rust type name.
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "bool" => Self::Bool,
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            "f32" | "f64" => Self::Number,
            _ => Self::String
        }
    }

    /// Kind named in a `pt` override.
    #[must_use]
    pub fn from_pt(name: &str) -> Self {
        match name {
            "bool" => Self::Bool,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "string" => Self::String,
            other => Self::Other(other.to_string())
        }
    }

    /// Name used in parameter documentation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Other(name) => name
        }
    }

    /// Default context reader for this kind.
    #[must_use]
    pub fn default_extractor(&self) -> Extractor {
        let name = match self {
            Self::Bool => "Bool",
            Self::Integer => "Int64",
            Self::Number => "Float64",
            Self::String | Self::Other(_) => "String"
        };
        Extractor::Direct(name.to_string())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// How generated code obtains a parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "mode", content = "name", rename_all = "lowercase")]
pub enum Extractor {
    /// Read directly with the named context reader (`Int64`, `String`, ...).
    Direct(String),
    /// Read as a string and convert through the named external function.
    Indirect(String)
}

/// Whether a parameter must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    /// Must be present.
    Required,
    /// May be omitted.
    Optional
}

/// Parsed `params` membership code.
///
/// Letters `C`/`c` place the field in Create, `U`/`u` in Update; upper case
/// means required, lower case optional.
///
/// | Code | Create | Update |
/// |------|--------|--------|
/// | `CU` | required | required |
/// | `Cu` | required | optional |
/// | `cU` | optional | required |
/// | `cu` | optional | optional |
/// | `C` / `c` | required / optional | - |
/// | `U` / `u` | - | required / optional |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Membership {
    /// Participation in Create.
    pub create: Option<Presence>,
    /// Participation in Update.
    pub update: Option<Presence>
}

impl Membership {
    /// Parse a membership code; `None` for anything outside the table above.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let letter = |c: char| {
            if c.is_ascii_uppercase() {
                Presence::Required
            } else {
                Presence::Optional
            }
        };

        let mut chars = code.chars();
        let (first, second) = (chars.next(), chars.next());
        if chars.next().is_some() {
            return None;
        }

        match (first, second) {
            (Some(c @ ('C' | 'c')), None) => Some(Self {
                create: Some(letter(c)),
                update: None
            }),
            (Some(u @ ('U' | 'u')), None) => Some(Self {
                create: None,
                update: Some(letter(u))
            }),
            (Some(c @ ('C' | 'c')), Some(u @ ('U' | 'u'))) => Some(Self {
                create: Some(letter(c)),
                update: Some(letter(u))
            }),
            _ => None
        }
    }
}

/// Resolved metadata of one participating field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    /// Field name as declared.
    pub name: String,

    /// Parameter key.
    pub json_key: String,

    /// Value category.
    pub kind: FieldKind,

    /// Context reader or conversion.
    pub extractor: Extractor,

    /// Raw membership code, e.g. `Cu`.
    pub code: String,

    /// Parsed membership.
    pub membership: Membership,

    /// Allowed values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enums: Option<String>,

    /// Minimum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<String>,

    /// Maximum string length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,

    /// Minimum numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,

    /// Maximum numeric value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,

    /// Description; the field name when undocumented.
    pub doc: String
}

impl FieldMeta {
    /// Build metadata from a declared field.
    ///
    /// Returns `None` when the field has no usable membership code.
    #[must_use]
    pub fn from_decl(field: &FieldDecl) -> Option<Self> {
        let code = field.get("params").map(str::trim).unwrap_or_default();
        if code.is_empty() {
            debug!(field = %field.name, "no params code, skipping field");
            return None;
        }
        let Some(membership) = Membership::parse(code) else {
            debug!(field = %field.name, code, "unknown params code, skipping field");
            return None;
        };

        let json_key = match field.get("json").map(str::trim) {
            None | Some("" | "-") => field.name.to_lowercase(),
            Some(key) => key.to_string()
        };

        let primitive = FieldKind::from_type_name(&field.type_name);
        let mut extractor = primitive.default_extractor();
        let mut kind = primitive;
        if let Some(pt) = field.get("pt") {
            let (kind_part, extractor_part) = match pt.split_once(':') {
                Some((k, e)) => (k.trim(), Some(e.trim())),
                None => (pt.trim(), None)
            };
            if !kind_part.is_empty() {
                kind = FieldKind::from_pt(kind_part);
            }
            if let Some(raw) = extractor_part {
                match parse_extractor(raw) {
                    Some(parsed) => extractor = parsed,
                    None => debug!(field = %field.name, pt, "malformed pt extractor, using default")
                }
            }
        }

        let doc = field
            .doc
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(field.name.as_str())
            .to_string();

        let attr = |key: &str| {
            field
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            name: field.name.clone(),
            json_key,
            kind,
            extractor,
            code: code.to_string(),
            membership,
            enums: attr("enums"),
            min_length: attr("minlength"),
            max_length: attr("maxlength"),
            min: attr("min"),
            max: attr("max"),
            doc
        })
    }
}

fn parse_extractor(raw: &str) -> Option<Extractor> {
    match raw.strip_prefix('@') {
        Some("") => None,
        Some(conversion) => Some(Extractor::Indirect(conversion.to_string())),
        None if raw.is_empty() => None,
        None => Some(Extractor::Direct(raw.to_string()))
    }
}

#[cfg(test)]
mod tests;
