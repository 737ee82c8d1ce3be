// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Operations and hook points.
//!
//! Every generated module exposes up to five operations. Each operation owns
//! a fixed subset of the sixteen hook points:
//!
//! | Operation | Hook points |
//! |-----------|-------------|
//! | `Create` | `CreateBefore`, `CreateTxBefore`, `CreateTxAfter`, `CreateAfter` |
//! | `Update` | `UpdateBefore`, `UpdateTxBefore`, `UpdateTxAfter`, `UpdateAfter` |
//! | `List` | `ListBefore`, `ListAfter` |
//! | `Info` | `InfoBefore`, `InfoAfter` |
//! | `Delete` | `DeleteBefore`, `DeleteTxBefore`, `DeleteTxAfter`, `DeleteAfter` |
//!
//! Both enums are closed: parsing an unknown name yields `None`, never an
//! open-ended string.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// A name that is not one of the closed set of operations or hook points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownName {
    kind: &'static str,
    name: String
}

/// One of the five generated capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Operation {
    /// Insert a new record.
    Create,
    /// Modify an existing record.
    Update,
    /// Fetch a page of records.
    List,
    /// Fetch a single record.
    Info,
    /// Remove a record.
    Delete
}

impl Operation {
    /// All operations in canonical order.
    pub const ALL: [Operation; 5] = [
        Operation::Create,
        Operation::Update,
        Operation::List,
        Operation::Info,
        Operation::Delete
    ];

    /// Canonical name as written in directives.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::List => "List",
            Operation::Info => "Info",
            Operation::Delete => "Delete"
        }
    }

    /// Parse a directive operation name. Case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Whether the operation writes the record and therefore honours `save`.
    #[must_use]
    pub const fn persists(self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }

    /// Whether the operation reads records and therefore honours `preload`.
    #[must_use]
    pub const fn loads(self) -> bool {
        matches!(self, Operation::List | Operation::Info)
    }

    /// Whether the operation takes input parameters from record fields.
    #[must_use]
    pub const fn takes_params(self) -> bool {
        self.persists()
    }

    /// Hook points belonging to this operation, in invocation order.
    #[must_use]
    pub const fn hook_points(self) -> &'static [HookPoint] {
        match self {
            Operation::Create => &[
                HookPoint::CreateBefore,
                HookPoint::CreateTxBefore,
                HookPoint::CreateTxAfter,
                HookPoint::CreateAfter
            ],
            Operation::Update => &[
                HookPoint::UpdateBefore,
                HookPoint::UpdateTxBefore,
                HookPoint::UpdateTxAfter,
                HookPoint::UpdateAfter
            ],
            Operation::List => &[HookPoint::ListBefore, HookPoint::ListAfter],
            Operation::Info => &[HookPoint::InfoBefore, HookPoint::InfoAfter],
            Operation::Delete => &[
                HookPoint::DeleteBefore,
                HookPoint::DeleteTxBefore,
                HookPoint::DeleteTxAfter,
                HookPoint::DeleteAfter
            ]
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownName {
            kind: "operation",
            name: s.to_string()
        })
    }
}

/// When a hook runs relative to its operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Before anything else, outside any transaction.
    Before,
    /// Inside the transaction, before the write.
    TxBefore,
    /// Inside the transaction, after the write.
    TxAfter,
    /// After the operation completed.
    After
}

/// One of the sixteen fixed extension slots.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HookPoint {
    CreateBefore,
    CreateTxBefore,
    CreateTxAfter,
    CreateAfter,
    UpdateBefore,
    UpdateTxBefore,
    UpdateTxAfter,
    UpdateAfter,
    InfoBefore,
    InfoAfter,
    ListBefore,
    ListAfter,
    DeleteBefore,
    DeleteTxBefore,
    DeleteTxAfter,
    DeleteAfter
}

impl HookPoint {
    /// Number of hook points.
    pub const COUNT: usize = 16;

    /// All hook points; the position of each entry equals [`HookPoint::index`].
    pub const ALL: [HookPoint; Self::COUNT] = [
        HookPoint::CreateBefore,
        HookPoint::CreateTxBefore,
        HookPoint::CreateTxAfter,
        HookPoint::CreateAfter,
        HookPoint::UpdateBefore,
        HookPoint::UpdateTxBefore,
        HookPoint::UpdateTxAfter,
        HookPoint::UpdateAfter,
        HookPoint::InfoBefore,
        HookPoint::InfoAfter,
        HookPoint::ListBefore,
        HookPoint::ListAfter,
        HookPoint::DeleteBefore,
        HookPoint::DeleteTxBefore,
        HookPoint::DeleteTxAfter,
        HookPoint::DeleteAfter
    ];

    /// Dense index in `0..COUNT`, used for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name as written in hook directives.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HookPoint::CreateBefore => "CreateBefore",
            HookPoint::CreateTxBefore => "CreateTxBefore",
            HookPoint::CreateTxAfter => "CreateTxAfter",
            HookPoint::CreateAfter => "CreateAfter",
            HookPoint::UpdateBefore => "UpdateBefore",
            HookPoint::UpdateTxBefore => "UpdateTxBefore",
            HookPoint::UpdateTxAfter => "UpdateTxAfter",
            HookPoint::UpdateAfter => "UpdateAfter",
            HookPoint::InfoBefore => "InfoBefore",
            HookPoint::InfoAfter => "InfoAfter",
            HookPoint::ListBefore => "ListBefore",
            HookPoint::ListAfter => "ListAfter",
            HookPoint::DeleteBefore => "DeleteBefore",
            HookPoint::DeleteTxBefore => "DeleteTxBefore",
            HookPoint::DeleteTxAfter => "DeleteTxAfter",
            HookPoint::DeleteAfter => "DeleteAfter"
        }
    }

    /// Parse a hook point name. Case-sensitive.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|point| point.as_str() == name)
    }

    /// The operation this hook point belongs to.
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            HookPoint::CreateBefore
            | HookPoint::CreateTxBefore
            | HookPoint::CreateTxAfter
            | HookPoint::CreateAfter => Operation::Create,
            HookPoint::UpdateBefore
            | HookPoint::UpdateTxBefore
            | HookPoint::UpdateTxAfter
            | HookPoint::UpdateAfter => Operation::Update,
            HookPoint::InfoBefore | HookPoint::InfoAfter => Operation::Info,
            HookPoint::ListBefore | HookPoint::ListAfter => Operation::List,
            HookPoint::DeleteBefore
            | HookPoint::DeleteTxBefore
            | HookPoint::DeleteTxAfter
            | HookPoint::DeleteAfter => Operation::Delete
        }
    }

    /// The phase this hook point runs in.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            HookPoint::CreateBefore
            | HookPoint::UpdateBefore
            | HookPoint::InfoBefore
            | HookPoint::ListBefore
            | HookPoint::DeleteBefore => Phase::Before,
            HookPoint::CreateTxBefore | HookPoint::UpdateTxBefore | HookPoint::DeleteTxBefore => {
                Phase::TxBefore
            }
            HookPoint::CreateTxAfter | HookPoint::UpdateTxAfter | HookPoint::DeleteTxAfter => {
                Phase::TxAfter
            }
            HookPoint::CreateAfter
            | HookPoint::UpdateAfter
            | HookPoint::InfoAfter
            | HookPoint::ListAfter
            | HookPoint::DeleteAfter => Phase::After
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HookPoint {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownName {
            kind: "hook point",
            name: s.to_string()
        })
    }
}
