// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Source scanning.
//!
//! Turns Rust source files into [`Declarations`]. Only annotated items are
//! collected:
//!
//! | Item | Requirement | Collected as |
//! |------|-------------|--------------|
//! | `struct` | a `/// @tg ...` doc line | [`RecordDecl`] |
//! | free `fn` | one or more `/// @tg ...` doc lines | [`ProcedureDecl`] |
//! | inline `mod { ... }` | none | its items, recursively |
//!
//! Procedures inside inline modules are named by their module path
//! (`hooks::audit`) so generated code can call them from the crate root.
//!
//! Directories are walked recursively and files visited in sorted path
//! order, which keeps hook registration order stable between runs.

pub mod attrs;

use std::{
    fs,
    path::{Path, PathBuf}
};

use darling::FromField;
use quote::ToTokens;
use syn::{Fields, GenericArgument, Item, ItemFn, ItemStruct, PathArguments, Type};
use tracing::{debug, warn};

use self::attrs::FieldAttrs;
use crate::{
    decl::{Declarations, FieldDecl, ProcedureDecl, RecordDecl},
    directive::lexer,
    error::{Error, Result},
    utils::docs::{directive_lines, extract_doc_comments}
};

/// Collect declarations from every `.rs` file under `inputs`.
///
/// Each input may be a file or a directory.
///
/// # Errors
///
/// Returns [`Error::Io`] if a path cannot be read and [`Error::Parse`] if a
/// file is not valid Rust.
pub fn scan_paths(inputs: &[PathBuf]) -> Result<Declarations> {
    let mut files = Vec::new();
    for input in inputs {
        collect_files(input, &mut files)?;
    }
    files.sort();
    files.dedup();

    let mut decls = Declarations::default();
    for file in &files {
        decls.extend(scan_path(file)?);
    }
    Ok(decls)
}

/// Collect declarations from one file.
///
/// # Errors
///
/// Returns [`Error::Io`] or [`Error::Parse`].
pub fn scan_path(path: &Path) -> Result<Declarations> {
    let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let decls = scan_source(&source).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source
    })?;
    debug!(
        path = %path.display(),
        records = decls.records.len(),
        procedures = decls.procedures.len(),
        "scanned file"
    );
    Ok(decls)
}

/// Collect declarations from source text.
///
/// # Errors
///
/// Returns the parser diagnostic if `source` is not valid Rust.
pub fn scan_source(source: &str) -> syn::Result<Declarations> {
    let file = syn::parse_file(source)?;
    Ok(scan_items(&file.items))
}

/// Collect declarations from already-parsed items.
#[must_use]
pub fn scan_items(items: &[Item]) -> Declarations {
    let mut decls = Declarations::default();
    visit(items, &[], &mut decls);
    decls
}

fn collect_files(path: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if meta.is_file() {
        files.push(path.to_path_buf());
        return Ok(());
    }

    let entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(path, e))?;
        let child = entry.path();
        if child.is_dir() {
            collect_files(&child, files)?;
        } else if child.extension().is_some_and(|ext| ext == "rs") {
            files.push(child);
        }
    }
    Ok(())
}

fn visit(items: &[Item], module_path: &[String], decls: &mut Declarations) {
    for item in items {
        match item {
            Item::Struct(item) => {
                if let Some(record) = record(item) {
                    decls.records.push(record);
                }
            }
            Item::Fn(item) => {
                if let Some(procedure) = procedure(item, module_path) {
                    decls.procedures.push(procedure);
                }
            }
            Item::Mod(module) => {
                if let Some((_, inner)) = &module.content {
                    let mut path = module_path.to_vec();
                    path.push(module.ident.to_string());
                    visit(inner, &path, decls);
                }
            }
            _ => {}
        }
    }
}

fn record(item: &ItemStruct) -> Option<RecordDecl> {
    let lines = directive_lines(&item.attrs);
    if lines.is_empty() {
        return None;
    }

    let directive = lines
        .iter()
        .map(|line| lexer::strip_marker(line))
        .filter(|body| !body.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut record = RecordDecl::new(item.ident.to_string()).with_directive(directive);

    match &item.fields {
        Fields::Named(named) => {
            for field in &named.named {
                record.fields.push(field_decl(&record.name, field));
            }
        }
        Fields::Unnamed(_) => {
            warn!(record = %item.ident, "tuple struct fields cannot carry metadata, ignoring them");
        }
        Fields::Unit => {}
    }

    Some(record)
}

fn field_decl(record: &str, field: &syn::Field) -> FieldDecl {
    let name = field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let mut decl = FieldDecl::new(name, type_name(&field.ty));
    decl.doc = extract_doc_comments(&field.attrs);

    match FieldAttrs::from_field(field) {
        Ok(attrs) => {
            for (key, value) in attrs.tags() {
                decl.tags.insert(key.to_string(), value.to_string());
            }
        }
        Err(err) => {
            warn!(record, field = %decl.name, error = %err, "invalid tg attribute, ignoring field tags");
        }
    }

    decl
}

fn procedure(item: &ItemFn, module_path: &[String]) -> Option<ProcedureDecl> {
    let directives = directive_lines(&item.attrs);
    if directives.is_empty() {
        return None;
    }

    let mut path = module_path.to_vec();
    path.push(item.sig.ident.to_string());
    Some(ProcedureDecl {
        name: path.join("::"),
        directives
    })
}

/// Name of the primitive behind a field type.
///
/// Uses the last path segment, looking through `Option<T>` and references,
/// so `Option<i64>` and `&'a str` give `i64` and `str`.
#[must_use]
pub fn type_name(ty: &Type) -> String {
    match ty {
        Type::Path(path) => {
            let Some(segment) = path.path.segments.last() else {
                return ty.to_token_stream().to_string();
            };
            if segment.ident == "Option"
                && let PathArguments::AngleBracketed(args) = &segment.arguments
                && let Some(GenericArgument::Type(inner)) = args.args.first()
            {
                return type_name(inner);
            }
            segment.ident.to_string()
        }
        Type::Reference(reference) => type_name(&reference.elem),
        Type::Group(group) => type_name(&group.elem),
        Type::Paren(paren) => type_name(&paren.elem),
        _ => ty.to_token_stream().to_string()
    }
}

#[cfg(test)]
mod tests;
