//! Internal helpers for validation and id allocation.
//!
//! These utilities are **not** part of the public API.

use crate::{EngineError, ResultEngine, Transaction};

/// Trim a required text field, rejecting blank input.
pub(crate) fn normalize_required_text(value: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}

/// Pick an id for a new record created at `now_millis`.
///
/// Ids are creation timestamps, but two records created within the same
/// millisecond (or after a clock step back) must still get distinct ids, so
/// the result is never below `max(existing) + 1`.
pub(crate) fn next_id(existing: &[Transaction], now_millis: i64) -> i64 {
    match existing.iter().map(|tx| tx.id).max() {
        Some(max) if now_millis <= max => max.saturating_add(1),
        _ => now_millis,
    }
}
