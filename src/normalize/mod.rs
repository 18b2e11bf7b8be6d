//! Field normalization.
//!
//! Turns raw `AwardRecord`s into `NormalizedAward`s:
//!
//! - obligation: strip `$` and thousands separators, then parse strictly
//! - description: lowercased
//! - composite label: `"<code> (<description>)"`, then the legacy touch-up

use tracing::debug;

use crate::domain::{AwardRecord, NormalizedAward};
use crate::error::PipelineError;
use crate::io::ingest::OBLIGATION_FIELD;

pub mod touch_up;

pub use touch_up::legacy_touch_up;

/// Normalize every record, preserving order. The first malformed amount aborts.
pub fn normalize_records(records: &[AwardRecord]) -> Result<Vec<NormalizedAward>, PipelineError> {
    let normalized = records
        .iter()
        .map(normalize_record)
        .collect::<Result<Vec<_>, _>>()?;

    let blanks = normalized.iter().filter(|r| r.obligation.is_none()).count();
    debug!(rows = normalized.len(), blank_amounts = blanks, "normalized award records");
    Ok(normalized)
}

pub fn normalize_record(record: &AwardRecord) -> Result<NormalizedAward, PipelineError> {
    let obligation = parse_amount(&record.obligation_amount).ok_or_else(|| PipelineError::MalformedAmount {
        line: record.line,
        field: OBLIGATION_FIELD,
        value: record.obligation_amount.clone(),
    })?;

    let category_description = record.category_description.to_lowercase();
    let composite_label = legacy_touch_up(&composite_label(&record.category_code, &category_description));

    Ok(NormalizedAward {
        line: record.line,
        obligation,
        category_code: record.category_code.clone(),
        category_description,
        composite_label,
    })
}

/// `"<code> (<description>)"` before any touch-up.
pub fn composite_label(code: &str, description: &str) -> String {
    format!("{code} ({description})")
}

/// Parse a currency-formatted amount.
///
/// - `Some(None)`: blank cell (absent value)
/// - `Some(Some(v))`: parsed value
/// - `None`: anything else left after removing `$` and `,` is not a finite number
pub fn parse_amount(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != '$' && *c != ',').collect();
    let v = cleaned.trim().parse::<f64>().ok()?;
    if v.is_finite() { Some(Some(v)) } else { None }
}
