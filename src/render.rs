// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Module rendering.
//!
//! Turns one [`ResolvedConfig`] into the source of a Rust module with one
//! function per enabled operation.
//!
//! # Host Contract
//!
//! A generated module is meant to be declared next to its record type and
//! pulls everything it needs from the parent scope with `use super::*`:
//!
//! | Name | Used for |
//! |------|----------|
//! | the record type | `Default` construction, loading, responses |
//! | `Context` | parameter reads, authorization, loading, transactions |
//! | `Tx` | persistence inside `Context::transaction` |
//! | `Result` | error propagation from operations and hooks |
//!
//! `Context` provides one reader per extractor, named after it in snake case
//! without splitting digits: `ctx.string`, `ctx.bool`, `ctx.int64`,
//! `ctx.float64`. A `pt` extractor `Int32` calls `ctx.int32`.
//!
//! Hook procedures are called by their path from the crate root.
//!
//! # Generated Code
//!
//! For a `User` with Create enabled and one `CreateBefore` hook:
//!
//! ```rust,ignore
//! //! Generated by crudgen for `User`. Do not edit.
//! use super::*;
//!
//! /// Create a `User`.
//! ///
//! /// @Param name formData string true "Login name" maxLength(64)
//! pub fn create(ctx: &mut Context) -> Result<()> {
//!     let mut record = User::default();
//!     record.name = ctx.string("name")?;
//!     if ctx.has("active") {
//!         record.active = ctx.bool("active")?;
//!     }
//!     crate::hooks::check(ctx, &mut record)?;
//!     ctx.transaction(|tx| {
//!         tx.insert(&mut record)?;
//!         Ok(())
//!     })?;
//!     ctx.respond(&record)
//! }
//! ```
//!
//! Hooks of one point are emitted in their resolved order. `Tx` hooks
//! receive the transaction, all others the context.

use convert_case::{Boundary, Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

use crate::{
    config::{HookEntry, OperationConfig, ResolvedConfig, ResolvedParam},
    directive::Extractor,
    error::{Error, Result},
    operation::{HookPoint, Operation, Phase}
};

/// Render the module source for one record type.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the record, a field or a hook
/// procedure name is not a valid Rust path, and [`Error::Render`] if the
/// generated tokens do not form a Rust file.
pub fn render(config: &ResolvedConfig) -> Result<String> {
    let tokens = render_tokens(config)?;
    let file = syn::parse2::<syn::File>(tokens).map_err(|source| Error::Render {
        record: config.name.clone(),
        source
    })?;
    Ok(prettyplease::unparse(&file))
}

/// Render the module as an unformatted token stream.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] under the same conditions as [`render`].
pub fn render_tokens(config: &ResolvedConfig) -> Result<TokenStream> {
    let names = Names::new(config);
    let record = names.ident(&config.name)?;

    let header = if config.description == config.name {
        format!(" Generated by crudgen for `{}`. Do not edit.", config.name)
    } else {
        format!(
            " Generated by crudgen for `{}`: {}. Do not edit.",
            config.name, config.description
        )
    };
    let operations = config
        .ops()
        .filter(|op| op.enabled)
        .map(|op| operation(&names, &record, op))
        .collect::<Result<Vec<_>>>()?;

    Ok(quote! {
        #![doc = #header]
        use super::*;

        #(#operations)*
    })
}

/// Name validation bound to the record being rendered.
struct Names<'a> {
    config: &'a ResolvedConfig
}

impl<'a> Names<'a> {
    fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    fn invalid(&self, name: &str) -> Error {
        Error::InvalidName {
            record: self.config.name.clone(),
            name:   name.to_string()
        }
    }

    fn ident(&self, name: &str) -> Result<Ident> {
        syn::parse_str::<Ident>(name)
            .or_else(|_| syn::parse_str::<Ident>(&format!("r#{name}")))
            .map_err(|_| self.invalid(name))
    }

    fn path(&self, name: &str) -> Result<syn::Path> {
        syn::parse_str::<syn::Path>(name).map_err(|_| self.invalid(name))
    }
}

fn operation(names: &Names, record: &Ident, op: &OperationConfig) -> Result<TokenStream> {
    let docs = docs(names.config, op);
    let fn_name = format_ident!("{}", op.operation.as_str().to_case(Case::Snake));
    let guard = authorize(op);
    let hook = |point: HookPoint| hooks(names, op, point);

    let body = match op.operation {
        Operation::Create => {
            let reads = params(names, &op.params)?;
            let save = op.save.then(|| quote! { tx.insert(&mut record)?; });
            let before = hook(HookPoint::CreateBefore)?;
            let tx_before = hook(HookPoint::CreateTxBefore)?;
            let tx_after = hook(HookPoint::CreateTxAfter)?;
            let after = hook(HookPoint::CreateAfter)?;
            quote! {
                let mut record = #record::default();
                #reads
                #before
                ctx.transaction(|tx| {
                    #tx_before
                    #save
                    #tx_after
                    Ok(())
                })?;
                #after
                ctx.respond(&record)
            }
        }
        Operation::Update => {
            let load = load(names.config, record, &[]);
            let reads = params(names, &op.params)?;
            let save = op.save.then(|| quote! { tx.update(&mut record)?; });
            let before = hook(HookPoint::UpdateBefore)?;
            let tx_before = hook(HookPoint::UpdateTxBefore)?;
            let tx_after = hook(HookPoint::UpdateTxAfter)?;
            let after = hook(HookPoint::UpdateAfter)?;
            quote! {
                let mut record = #load;
                #reads
                #before
                ctx.transaction(|tx| {
                    #tx_before
                    #save
                    #tx_after
                    Ok(())
                })?;
                #after
                ctx.respond(&record)
            }
        }
        Operation::List => {
            let preload = &op.preload;
            let before = hook(HookPoint::ListBefore)?;
            let after = hook(HookPoint::ListAfter)?;
            quote! {
                #before
                let mut records = ctx.list::<#record>(&[#(#preload),*])?;
                #after
                ctx.respond(&records)
            }
        }
        Operation::Info => {
            let load = load(names.config, record, &op.preload);
            let before = hook(HookPoint::InfoBefore)?;
            let after = hook(HookPoint::InfoAfter)?;
            quote! {
                #before
                let mut record = #load;
                #after
                ctx.respond(&record)
            }
        }
        Operation::Delete => {
            let load = load(names.config, record, &[]);
            let before = hook(HookPoint::DeleteBefore)?;
            let tx_before = hook(HookPoint::DeleteTxBefore)?;
            let tx_after = hook(HookPoint::DeleteTxAfter)?;
            let after = hook(HookPoint::DeleteAfter)?;
            quote! {
                let mut record = #load;
                #before
                ctx.transaction(|tx| {
                    #tx_before
                    tx.delete(&record)?;
                    #tx_after
                    Ok(())
                })?;
                #after
                ctx.respond(&record)
            }
        }
    };

    Ok(quote! {
        #(#[doc = #docs])*
        pub fn #fn_name(ctx: &mut Context) -> Result<()> {
            #guard
            #body
        }
    })
}

/// Doc lines of one operation function.
fn docs(config: &ResolvedConfig, op: &OperationConfig) -> Vec<String> {
    let verb = match op.operation {
        Operation::Create => "Create a",
        Operation::Update => "Update a",
        Operation::List => "List every",
        Operation::Info => "Fetch one",
        Operation::Delete => "Delete a"
    };

    let mut lines = vec![format!(" {verb} `{}`.", config.name)];
    let extra: Vec<String> = op
        .security
        .iter()
        .map(|scope| format!(" @Security {scope}"))
        .chain(op.preload.iter().map(|path| format!(" @Preload {path}")))
        .chain(op.param_docs().map(|line| format!(" {line}")))
        .collect();
    if !extra.is_empty() {
        lines.push(String::new());
        lines.extend(extra);
    }
    lines
}

fn authorize(op: &OperationConfig) -> TokenStream {
    if op.security.is_empty() {
        return TokenStream::new();
    }
    let scopes = &op.security;
    quote! { ctx.authorize(&[#(#scopes),*])?; }
}

fn load(config: &ResolvedConfig, record: &Ident, preload: &[String]) -> TokenStream {
    let index = match &config.db_index {
        Some(index) => quote! { Some(#index) },
        None => quote! { None }
    };
    quote! { ctx.load::<#record>(#index, &[#(#preload),*])? }
}

fn params(names: &Names, params: &[ResolvedParam]) -> Result<TokenStream> {
    let reads = params
        .iter()
        .map(|param| {
            let field = names.ident(&param.field.name)?;
            let key = &param.field.json_key;
            let value = match &param.field.extractor {
                Extractor::Direct(reader) => {
                    let reader = names.ident(
                        &reader
                            .remove_boundaries(&Boundary::digits())
                            .to_case(Case::Snake)
                    )?;
                    quote! { ctx.#reader(#key)? }
                }
                Extractor::Indirect(conversion) => {
                    let conversion = names.path(conversion)?;
                    quote! { crate::#conversion(ctx.string(#key)?)? }
                }
            };
            Ok(if param.required {
                quote! { record.#field = #value; }
            } else {
                quote! {
                    if ctx.has(#key) {
                        record.#field = #value;
                    }
                }
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! { #(#reads)* })
}

fn hooks(names: &Names, op: &OperationConfig, point: HookPoint) -> Result<TokenStream> {
    let receiver = match point.phase() {
        Phase::TxBefore | Phase::TxAfter => quote! { tx },
        Phase::Before | Phase::After => quote! { ctx }
    };
    let subject = match point {
        HookPoint::ListBefore | HookPoint::InfoBefore => None,
        HookPoint::ListAfter => Some(quote! { &mut records }),
        _ => Some(quote! { &mut record })
    };

    let calls = op
        .hooks(point)
        .iter()
        .map(|HookEntry { procedure, .. }| {
            let path = names.path(procedure)?;
            Ok(match &subject {
                Some(subject) => quote! { crate::#path(#receiver, #subject)?; },
                None => quote! { crate::#path(#receiver)?; }
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(quote! { #(#calls)* })
}
