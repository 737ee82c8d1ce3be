// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! Doc comments (`///` and `/** */`) are stored as `#[doc = "..."]`
//! attributes. Directives live in those same comments, one per line:
//!
//! ```rust,ignore
//! /// User accounts.
//! ///
//! /// @tg -Delete Info:preload=Org
//! pub struct User { ... }
//! ```
//!
//! [`directive_lines`] picks out the `@tg` lines; [`extract_doc_comments`]
//! returns the remaining prose, used as field documentation.

use syn::Attribute;

use crate::directive::lexer;

/// Raw text of every `#[doc = "..."]` attribute, split into lines.
fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .flat_map(|value| {
            value
                .lines()
                .map(|line| line.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Extract doc comments from attributes, without directive lines.
///
/// Lines are trimmed and joined with `\n`.
///
/// # Returns
///
/// Combined doc string, or `None` if nothing but directives (or nothing at
/// all) is documented.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let combined = doc_lines(attrs)
        .into_iter()
        .filter(|line| !lexer::has_marker(line))
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = combined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Every doc line carrying the `@tg` marker, in order, marker included.
pub fn directive_lines(attrs: &[Attribute]) -> Vec<String> {
    doc_lines(attrs)
        .into_iter()
        .filter(|line| lexer::has_marker(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attrs(input: &str) -> Vec<Attribute> {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        item.attrs
    }

    #[test]
    fn extract_multi_line_doc() {
        let attrs = parse_attrs(
            r#"
            /// First line.
            /// Second line.
            struct Foo;
        "#
        );
        assert_eq!(
            extract_doc_comments(&attrs),
            Some("First line.\nSecond line.".to_string())
        );
    }

    #[test]
    fn extract_no_docs() {
        let attrs = parse_attrs(
            r#"
            #[derive(Debug)]
            struct Foo;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), None);
        assert!(directive_lines(&attrs).is_empty());
    }

    #[test]
    fn directives_are_split_from_prose() {
        let attrs = parse_attrs(
            r#"
            /// User accounts.
            ///
            /// @tg -Delete
            /// @tg Info:preload=Org
            struct User;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), Some("User accounts.".to_string()));
        assert_eq!(
            directive_lines(&attrs),
            vec!["@tg -Delete", "@tg Info:preload=Org"]
        );
    }

    #[test]
    fn directive_only_doc_has_no_prose() {
        let attrs = parse_attrs(
            r#"
            /// @tg
            struct User;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), None);
        assert_eq!(directive_lines(&attrs), vec!["@tg"]);
    }

    #[test]
    fn marker_must_be_a_whole_word() {
        let attrs = parse_attrs(
            r#"
            /// @tgx not a directive
            struct User;
        "#
        );
        assert!(directive_lines(&attrs).is_empty());
    }

    #[test]
    fn block_doc_comments_are_split_into_lines() {
        let attrs = parse_attrs(
            "/** Users.\n @tg -List */\nstruct User;"
        );
        assert_eq!(directive_lines(&attrs), vec!["@tg -List"]);
        assert_eq!(extract_doc_comments(&attrs), Some("Users.".to_string()));
    }
}
