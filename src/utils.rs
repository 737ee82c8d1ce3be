// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities for scanning.
//!
//! # Submodules
//!
//! - [`docs`]: doc comment extraction and directive line lookup

pub mod docs;
