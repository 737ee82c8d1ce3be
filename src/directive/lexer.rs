// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tokenizer shared by the type and hook directive grammars.
//!
//! A directive is a marker followed by whitespace-separated words:
//!
//! ```text
//! @tg -Delete desc="User accounts" Info:preload=Org>Owner
//! ^^^ ^^^^^^^ ^^^^^^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^
//! marker word  word (quoted value)  word
//! ```
//!
//! Double quotes group whitespace into a single word and are removed from
//! the output. An unterminated quote extends to the end of the input.

/// Leading marker of every directive.
pub const MARKER: &str = "@tg";

/// Strip the leading [`MARKER`] if present.
///
/// Returns the remainder with surrounding whitespace trimmed. Input without
/// the marker is returned trimmed and otherwise untouched, so callers may
/// pass either the full annotation or just its body.
#[must_use]
pub fn strip_marker(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix(MARKER) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => trimmed
    }
}

/// Check whether an annotation carries the directive marker.
#[must_use]
pub fn has_marker(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    trimmed
        .strip_prefix(MARKER)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
}

/// Split a directive body into words.
#[must_use]
pub fn words(body: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for ch in body.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }

    words
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `name@weight` into its parts.
///
/// Returns `(name, None)` when there is no `@`, and `None` when the weight
/// is present but not a valid `i64`.
#[must_use]
pub fn split_weight(entry: &str) -> Option<(&str, Option<i64>)> {
    match entry.rsplit_once('@') {
        Some((name, weight)) => weight
            .trim()
            .parse::<i64>()
            .ok()
            .map(|w| (name.trim(), Some(w))),
        None => Some((entry.trim(), None))
    }
}
