// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// @tg CreateBefore:Customer@10,Order
pub fn check_quota(ctx: &mut Context, record: &mut Customer) -> Result<()> {
    Ok(())
}

/// @tg CreateBefore@3
pub fn normalize(ctx: &mut Context, record: &mut Customer) -> Result<()> {
    Ok(())
}

/// Writes an audit row inside the transaction.
/// @tg -CreateTxAfter:AuditEntry UpdateTxAfter:Customer
pub fn record_change(tx: &mut Tx, record: &mut Customer) -> Result<()> {
    Ok(())
}

pub mod notify {
    /// @tg CreateAfter:Order ListAfter:AuditEntry
    pub fn send(ctx: &mut Context, record: &mut Order) -> Result<()> {
        Ok(())
    }
}

/// @tg NotAHookPoint -InfoAfter
pub fn broken(ctx: &mut Context) -> Result<()> {
    Ok(())
}

/// Helper without a directive.
pub fn helper() {}
