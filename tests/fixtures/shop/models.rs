// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Registered customer.
/// @tg -Delete desc="Customer accounts" security=staff Info:preload=Orders>Lines
pub struct Customer {
    pub id: i64,

    /// Login name.
    #[tg(params = "CU", maxlength = 64, minlength = 3, dbindex = "customers_login")]
    pub login: String,

    /// Display name.
    #[tg(params = "Cu", json = "display")]
    pub name: Option<String>,

    #[tg(params = "c", min = 0, max = 150)]
    pub age: i32,

    pub password_hash: String
}

/// Purchase order.
/// @tg nosave Create:save=true
pub struct Order {
    #[tg(params = "C", pt = "string:@parse_status", enums = "open,paid,shipped")]
    pub status: String,

    #[tg(params = "CU", pt = "number")]
    pub total: i64
}

/// Not generated: no directive.
pub struct Draft {
    #[tg(params = "C")]
    pub body: String
}

pub mod audit {
    /// Append-only audit row.
    /// @tg -Create -Update -Delete
    pub struct AuditEntry {
        pub message: String
    }
}
