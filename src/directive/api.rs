// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-level directive parsing.
//!
//! The directive attached to a record type decides which operations are
//! generated and how each one behaves.
//!
//! # Syntax
//!
//! ```text
//! @tg                                  all five operations, all defaults
//! @tg -Delete -List                    disable operations
//! @tg nosave                           Create/Update do not persist
//! @tg desc="User accounts"             description (default: type name)
//! @tg preload=Org,Org>Owner            eager-load paths for Info and List
//! @tg security=admin,audit             scopes for all five operations
//! @tg Info:preload=Roles;security=ops  per-operation overrides
//! @tg Create:save=true                 per-operation persistence
//! ```
//!
//! # Precedence
//!
//! Tokens fall into two tiers. Every global token (`-Op`, `nosave`, `desc=`,
//! `preload=`, `security=`) is applied first, in appearance order; then every
//! per-operation override (`Op:...`) is applied, in appearance order. Within
//! a tier the later token wins. Thus `Create:save=true nosave` keeps Create
//! persisting while Update does not.
//!
//! # Option Reference
//!
//! | Per-operation option | Valid for |
//! |----------------------|-----------|
//! | `save=true\|false`, `nosave` | `Create`, `Update` |
//! | `preload=<paths>` | `Info`, `List` |
//! | `security=<scopes>` | all |
//!
//! Malformed tokens and options are dropped and logged at `debug`; the rest
//! of the directive still applies.

use tracing::debug;

use super::lexer;
use crate::operation::Operation;

/// Settings of one operation after directive evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDirective {
    /// Whether the operation is generated.
    pub enabled: bool,

    /// Whether the generated operation persists the record.
    ///
    /// Always `false` for operations that do not persist.
    pub save: bool,

    /// Eager-load paths, already rewritten for the renderer.
    pub preload: Vec<String>,

    /// Security scopes guarding the operation.
    pub security: Vec<String>
}

impl OperationDirective {
    fn new(op: Operation) -> Self {
        Self {
            enabled:  true,
            save:     op.persists(),
            preload:  Vec::new(),
            security: Vec::new()
        }
    }
}

/// Parsed type-level directive.
///
/// Immutable once built; construct with [`ApiDirective::parse`] or
/// [`ApiDirective::new`] for the all-defaults directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDirective {
    description: String,
    ops:         [OperationDirective; 5]
}

impl ApiDirective {
    /// All-defaults directive for `type_name`.
    #[must_use]
    pub fn new(type_name: &str) -> Self {
        Self {
            description: type_name.to_string(),
            ops:         Operation::ALL.map(OperationDirective::new)
        }
    }

    /// Parse a raw directive for `type_name`.
    ///
    /// The leading `@tg` marker is optional.
    #[must_use]
    pub fn parse(type_name: &str, raw: &str) -> Self {
        let mut directive = Self::new(type_name);

        let tokens: Vec<Token> = lexer::words(lexer::strip_marker(raw))
            .iter()
            .filter_map(|word| match Token::lex(word) {
                Ok(token) => Some(token),
                Err(reason) => {
                    debug!(record = type_name, token = %word, reason, "dropping directive token");
                    None
                }
            })
            .collect();

        let (overrides, globals): (Vec<Token>, Vec<Token>) =
            tokens.into_iter().partition(Token::is_override);

        for token in globals {
            directive.apply(token);
        }
        for token in overrides {
            directive.apply(token);
        }

        directive
    }

    fn apply(&mut self, token: Token) {
        match token {
            Token::Disable(op) => self.op_mut(op).enabled = false,
            Token::NoSave => {
                self.op_mut(Operation::Create).save = false;
                self.op_mut(Operation::Update).save = false;
            }
            Token::Description(text) => self.description = text,
            Token::Preload(paths) => {
                self.op_mut(Operation::Info).preload = paths.clone();
                self.op_mut(Operation::List).preload = paths;
            }
            Token::Security(scopes) => {
                for op in &mut self.ops {
                    op.security = scopes.clone();
                }
            }
            Token::Override(op, options) => {
                let target = self.op_mut(op);
                for option in options {
                    match option {
                        OpOption::Save(save) => target.save = save,
                        OpOption::Preload(paths) => target.preload = paths,
                        OpOption::Security(scopes) => target.security = scopes
                    }
                }
            }
        }
    }

    fn op_mut(&mut self, op: Operation) -> &mut OperationDirective {
        &mut self.ops[op as usize]
    }

    /// Settings of a single operation.
    #[must_use]
    pub fn op(&self, op: Operation) -> &OperationDirective {
        &self.ops[op as usize]
    }

    /// Check whether an operation is generated.
    #[must_use]
    pub fn is_enabled(&self, op: Operation) -> bool {
        self.op(op).enabled
    }

    /// Enabled operations in canonical order.
    pub fn enabled_ops(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL
            .into_iter()
            .filter(|op| self.is_enabled(*op))
    }

    /// Human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// One lexed directive word.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Disable(Operation),
    NoSave,
    Description(String),
    Preload(Vec<String>),
    Security(Vec<String>),
    Override(Operation, Vec<OpOption>)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OpOption {
    Save(bool),
    Preload(Vec<String>),
    Security(Vec<String>)
}

impl Token {
    fn is_override(&self) -> bool {
        matches!(self, Token::Override(..))
    }

    fn lex(word: &str) -> Result<Self, &'static str> {
        if let Some(name) = word.strip_prefix('-') {
            return Operation::parse(name)
                .map(Token::Disable)
                .ok_or("unknown operation");
        }

        if word == "nosave" {
            return Ok(Token::NoSave);
        }

        if let Some((key, value)) = word.split_once('=')
            && !key.contains(':')
        {
            return match key {
                "desc" if !value.is_empty() => Ok(Token::Description(value.to_string())),
                "desc" => Err("empty description"),
                "preload" => preload_paths(value).map(Token::Preload),
                "security" => scopes(value).map(Token::Security),
                _ => Err("unknown option")
            };
        }

        if let Some((name, options)) = word.split_once(':') {
            let op = Operation::parse(name).ok_or("unknown operation")?;
            let options = options
                .split(';')
                .filter(|s| !s.is_empty())
                .filter_map(|option| match OpOption::lex(op, option) {
                    Ok(option) => Some(option),
                    Err(reason) => {
                        debug!(operation = %op, option, reason, "dropping operation option");
                        None
                    }
                })
                .collect();
            return Ok(Token::Override(op, options));
        }

        Err("unrecognized token")
    }
}

impl OpOption {
    fn lex(op: Operation, option: &str) -> Result<Self, &'static str> {
        let (key, value) = match option.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (option, None)
        };

        match (key, value) {
            ("nosave", None) if op.persists() => Ok(OpOption::Save(false)),
            ("save", Some("true")) if op.persists() => Ok(OpOption::Save(true)),
            ("save", Some("false")) if op.persists() => Ok(OpOption::Save(false)),
            ("save" | "nosave", _) if !op.persists() => Err("operation does not persist"),
            ("save", _) => Err("save expects true or false"),
            ("preload", Some(paths)) if op.loads() => preload_paths(paths).map(OpOption::Preload),
            ("preload", _) if !op.loads() => Err("operation does not load"),
            ("security", Some(list)) => scopes(list).map(OpOption::Security),
            _ => Err("unknown option")
        }
    }
}

/// Rewrite nested `>` separators into the quoted-pair form.
///
/// `Org>Owner` becomes `Org":"Owner`.
#[must_use]
pub fn rewrite_preload(path: &str) -> String {
    path.replace('>', "\":\"")
}

fn preload_paths(value: &str) -> Result<Vec<String>, &'static str> {
    let paths: Vec<String> = lexer::comma_list(value)
        .iter()
        .map(|p| rewrite_preload(p))
        .collect();
    if paths.is_empty() {
        Err("empty preload list")
    } else {
        Ok(paths)
    }
}

fn scopes(value: &str) -> Result<Vec<String>, &'static str> {
    let scopes = lexer::comma_list(value);
    if scopes.is_empty() {
        Err("empty security list")
    } else {
        Ok(scopes)
    }
}
