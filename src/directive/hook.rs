// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hook directive parsing.
//!
//! A procedure registers itself at one or more hook points with a directive
//! on its doc comment. Each whitespace-separated word is an independent
//! registration:
//!
//! ```text
//! [-]<HookPoint>[@<weight>][:<Type>[@<weight>],...]
//! ```
//!
//! | Word | Applies to | Weight |
//! |------|------------|--------|
//! | `CreateBefore` | every type | 0 |
//! | `CreateBefore@3` | every type | 3 |
//! | `CreateBefore:User@5,Order` | `User`, `Order` | `User` 5, `Order` 0 |
//! | `CreateBefore@2:User@5,Order` | `User`, `Order` | `User` 5, `Order` 2 |
//! | `-CreateAfter:Audit` | every type except `Audit` | 0 |
//!
//! The weight after the hook point is the directive default; a per-type
//! weight overrides it for that type only. Higher weights run first.
//!
//! # Dropped Input
//!
//! - unknown hook point, or a hook-point weight that is not an integer
//! - `-Point` without a type list, or an empty type list
//! - a single list entry whose weight is not an integer (the rest of the
//!   list still applies)

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::lexer;
use crate::operation::HookPoint;

/// Which record types a hook applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    /// Every type.
    All,
    /// Only the listed types, each with an optional weight override.
    Include(BTreeMap<String, Option<i64>>),
    /// Every type except the listed ones.
    Exclude(BTreeSet<String>)
}

/// One `(procedure, hook point)` registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDirective {
    /// Procedure to invoke.
    pub procedure: String,

    /// Slot the procedure is registered at.
    pub point: HookPoint,

    /// Weight used when no per-type override applies.
    pub default_weight: i64,

    /// Type filter.
    pub scope: HookScope
}

impl HookDirective {
    /// Parse every registration in a raw hook directive.
    ///
    /// The leading `@tg` marker is optional. Malformed words are dropped.
    #[must_use]
    pub fn parse(procedure: &str, raw: &str) -> Vec<Self> {
        lexer::words(lexer::strip_marker(raw))
            .iter()
            .filter_map(|word| match Self::lex(procedure, word) {
                Ok(directive) => Some(directive),
                Err(reason) => {
                    debug!(procedure, token = %word, reason, "dropping hook directive");
                    None
                }
            })
            .collect()
    }

    fn lex(procedure: &str, word: &str) -> Result<Self, &'static str> {
        let (negated, rest) = match word.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, word)
        };
        let (head, list) = match rest.split_once(':') {
            Some((head, list)) => (head, Some(list)),
            None => (rest, None)
        };

        let (name, weight) = lexer::split_weight(head).ok_or("hook point weight is not an integer")?;
        let point = HookPoint::parse(name).ok_or("unknown hook point")?;

        let scope = match (negated, list) {
            (false, None) => HookScope::All,
            (true, None) => return Err("exclusion without type list"),
            (_, Some(list)) => {
                let entries = lexer::comma_list(list);
                if entries.is_empty() {
                    return Err("empty type list");
                }
                if negated {
                    let types: BTreeSet<String> = entries
                        .iter()
                        .map(|entry| match entry.split_once('@') {
                            Some((name, _)) => name.trim(),
                            None => entry.as_str()
                        })
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect();
                    if types.is_empty() {
                        return Err("no valid type entries");
                    }
                    HookScope::Exclude(types)
                } else {
                    let mut types = BTreeMap::new();
                    for entry in &entries {
                        match lexer::split_weight(entry) {
                            Some((name, weight)) if !name.is_empty() => {
                                types.insert(name.to_string(), weight);
                            }
                            _ => {
                                debug!(procedure, entry = %entry, "dropping hook type entry");
                            }
                        }
                    }
                    if types.is_empty() {
                        return Err("no valid type entries");
                    }
                    HookScope::Include(types)
                }
            }
        };

        Ok(Self {
            procedure: procedure.to_string(),
            point,
            default_weight: weight.unwrap_or(0),
            scope
        })
    }

    /// Check whether the hook applies to `type_name`.
    #[must_use]
    pub fn applies_to(&self, type_name: &str) -> bool {
        match &self.scope {
            HookScope::All => true,
            HookScope::Include(types) => types.contains_key(type_name),
            HookScope::Exclude(types) => !types.contains(type_name)
        }
    }

    /// Effective weight for `type_name`, or `None` if the hook does not apply.
    #[must_use]
    pub fn weight_for(&self, type_name: &str) -> Option<i64> {
        match &self.scope {
            HookScope::Include(types) => types
                .get(type_name)
                .map(|weight| weight.unwrap_or(self.default_weight)),
            _ if self.applies_to(type_name) => Some(self.default_weight),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(raw: &str) -> HookDirective {
        let mut parsed = HookDirective::parse("p", raw);
        assert_eq!(parsed.len(), 1, "{raw}");
        parsed.remove(0)
    }

    #[test]
    fn plain_hook_point_applies_everywhere() {
        let hook = single("@tg CreateBefore");
        assert_eq!(hook.point, HookPoint::CreateBefore);
        assert_eq!(hook.scope, HookScope::All);
        assert_eq!(hook.weight_for("Anything"), Some(0));
    }

    #[test]
    fn plain_hook_point_with_weight() {
        let hook = single("ListAfter@7");
        assert_eq!(hook.default_weight, 7);
        assert_eq!(hook.weight_for("User"), Some(7));
    }

    #[test]
    fn include_list_with_weights() {
        let hook = single("CreateBefore:TypeA@5,TypeB");
        assert_eq!(hook.weight_for("TypeA"), Some(5));
        assert_eq!(hook.weight_for("TypeB"), Some(0));
        assert_eq!(hook.weight_for("TypeC"), None);
        assert!(!hook.applies_to("TypeC"));
    }

    #[test]
    fn include_list_inherits_directive_default() {
        let hook = single("CreateBefore@2:TypeA@5,TypeB");
        assert_eq!(hook.weight_for("TypeA"), Some(5));
        assert_eq!(hook.weight_for("TypeB"), Some(2));
    }

    #[test]
    fn explicit_negative_weight_is_kept() {
        let hook = single("CreateBefore@2:TypeA@-1");
        assert_eq!(hook.weight_for("TypeA"), Some(-1));
    }

    #[test]
    fn exclude_list() {
        let hook = single("-CreateAfter:TypeA");
        assert_eq!(hook.point, HookPoint::CreateAfter);
        assert!(!hook.applies_to("TypeA"));
        assert!(hook.applies_to("TypeB"));
        assert_eq!(hook.weight_for("TypeB"), Some(0));
        assert_eq!(hook.weight_for("TypeA"), None);
    }

    #[test]
    fn multiple_registrations_in_one_directive() {
        let hooks = HookDirective::parse("audit", "@tg CreateAfter UpdateAfter:User -DeleteAfter:Log");
        let points: Vec<HookPoint> = hooks.iter().map(|h| h.point).collect();
        assert_eq!(
            points,
            vec![
                HookPoint::CreateAfter,
                HookPoint::UpdateAfter,
                HookPoint::DeleteAfter
            ]
        );
        assert!(hooks.iter().all(|h| h.procedure == "audit"));
    }

    #[test]
    fn malformed_words_are_dropped() {
        let hooks = HookDirective::parse(
            "p",
            "@tg Nope -CreateBefore CreateBefore: CreateBefore@x InfoBefore:@3 InfoAfter"
        );
        assert_eq!(hooks.len(), 1);
        assert_eq!(hooks[0].point, HookPoint::InfoAfter);
    }

    #[test]
    fn bad_entry_weight_drops_only_that_entry() {
        let hook = single("UpdateBefore:User@x,Order@4");
        assert!(!hook.applies_to("User"));
        assert_eq!(hook.weight_for("Order"), Some(4));
    }

    #[test]
    fn empty_directive_registers_nothing() {
        assert!(HookDirective::parse("p", "@tg").is_empty());
    }
}
