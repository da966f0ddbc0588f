//! Internal helpers for input validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so the engine enforces consistent invariants.

use crate::{EngineError, ResultEngine};

pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Reject ranges whose lower bound is after the upper bound.
pub(crate) fn ensure_ordered<T: PartialOrd + std::fmt::Display>(
    from: T,
    to: T,
    label: &str,
) -> ResultEngine<()> {
    if from > to {
        return Err(EngineError::InvalidRange(format!(
            "{label} range start {from} is after its end {to}"
        )));
    }
    Ok(())
}
