// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hook selection and ordering for one record type.

use crate::{
    config::{HookEntry, HookList},
    operation::{HookPoint, Operation},
    registry::HookRegistry
};

/// Applicable registrations of `point` for `type_name`.
///
/// Ordered by descending effective weight. The sort is stable, so ties keep
/// registration order.
#[must_use]
pub fn resolve_point(registry: &HookRegistry, type_name: &str, point: HookPoint) -> Vec<HookEntry> {
    let mut entries: Vec<HookEntry> = registry
        .hooks(point)
        .iter()
        .filter_map(|hook| {
            hook.weight_for(type_name).map(|weight| HookEntry {
                procedure: hook.procedure.clone(),
                weight
            })
        })
        .collect();

    entries.sort_by(|a, b| b.weight.cmp(&a.weight));
    entries
}

/// One list per hook point of `op`; lists stay empty when `enabled` is false.
#[must_use]
pub fn resolve_operation(
    registry: &HookRegistry,
    type_name: &str,
    op: Operation,
    enabled: bool
) -> Vec<HookList> {
    op.hook_points()
        .iter()
        .map(|&point| HookList {
            point,
            entries: if enabled {
                resolve_point(registry, type_name, point)
            } else {
                Vec::new()
            }
        })
        .collect()
}
