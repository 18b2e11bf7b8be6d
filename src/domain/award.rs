//! Shared pipeline types.
//!
//! Each stage owns what it produces and hands the next stage a borrowed view:
//!
//! - `QueryParameters` (validated input) -> query URL
//! - `AwardRecord` (raw fetched row) -> `NormalizedAward`
//! - `NormalizedAward` -> `AggregateTable`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::Agency;
use crate::error::PipelineError;

/// Label of the synthetic grand-total row.
pub const GRAND_TOTAL_LABEL: &str = "All";

/// Number of per-category sentences in the narrative unless overridden.
pub const DEFAULT_TOP_N: usize = 5;

/// FPDS department ID used when neither flag nor environment provides one (GSA).
pub const DEFAULT_DEPARTMENT_ID: &str = "4700";

/// Fiscal year used when neither flag nor environment provides one.
pub const DEFAULT_FISCAL_YEAR: &str = "2019";

/// Validated query inputs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQueryParameters")]
pub struct QueryParameters {
    department_code: String,
    fiscal_year: String,
    category_prefix: String,
}

#[derive(Deserialize)]
struct RawQueryParameters {
    department_code: String,
    fiscal_year: String,
    category_prefix: String,
}

impl TryFrom<RawQueryParameters> for QueryParameters {
    type Error = PipelineError;

    fn try_from(raw: RawQueryParameters) -> Result<Self, Self::Error> {
        Self::new(&raw.department_code, &raw.fiscal_year, &raw.category_prefix)
    }
}

impl QueryParameters {
    /// Validate and build query parameters.
    ///
    /// - department code: non-empty, ASCII alphanumeric
    /// - fiscal year: exactly four ASCII digits
    /// - category prefix: exactly two ASCII alphanumeric characters
    ///
    /// Surrounding whitespace is ignored; the values are otherwise kept verbatim.
    pub fn new(department_code: &str, fiscal_year: &str, category_prefix: &str) -> Result<Self, PipelineError> {
        let department_code = department_code.trim();
        if department_code.is_empty() || !department_code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PipelineError::invalid_input(
                "department code",
                department_code,
                "expected a non-empty alphanumeric FPDS department ID (e.g. 4700)",
            ));
        }

        let fiscal_year = fiscal_year.trim();
        if fiscal_year.len() != 4 || !fiscal_year.chars().all(|c| c.is_ascii_digit()) {
            return Err(PipelineError::invalid_input(
                "fiscal year",
                fiscal_year,
                "expected a 4-digit year (e.g. 2019)",
            ));
        }

        let category_prefix = validate_category_prefix(category_prefix)?;

        Ok(Self {
            department_code: department_code.to_string(),
            fiscal_year: fiscal_year.to_string(),
            category_prefix,
        })
    }

    pub fn department_code(&self) -> &str {
        &self.department_code
    }

    pub fn fiscal_year(&self) -> &str {
        &self.fiscal_year
    }

    pub fn category_prefix(&self) -> &str {
        &self.category_prefix
    }
}

/// Check a PSC prefix: exactly two ASCII alphanumeric characters, whitespace trimmed.
pub fn validate_category_prefix(raw: &str) -> Result<String, PipelineError> {
    let prefix = raw.trim();
    if prefix.chars().count() != 2 || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PipelineError::invalid_input(
            "PSC prefix",
            prefix,
            "expected exactly 2 characters (e.g. D3)",
        ));
    }
    Ok(prefix.to_string())
}

/// One fetched award row, fields exactly as the data source emitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardRecord {
    /// 1-based line in the source table (header is line 1).
    pub line: usize,
    /// Currency-formatted amount, e.g. `$1,234.56`. Empty when the source left it blank.
    pub obligation_amount: String,
    pub category_code: String,
    pub category_description: String,
}

/// An award row after field normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAward {
    pub line: usize,
    /// `None` when the source cell was blank; aggregation counts it as zero.
    pub obligation: Option<f64>,
    pub category_code: String,
    /// Lowercased description.
    pub category_description: String,
    /// `"<code> (<description>)"` after the legacy touch-up.
    pub composite_label: String,
}

/// Whether an aggregate row is a real category or the synthetic grand total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    GrandTotal,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub label: String,
    pub total_obligation: f64,
    pub kind: RowKind,
}

impl AggregateRow {
    pub fn category(label: impl Into<String>, total_obligation: f64) -> Self {
        Self {
            label: label.into(),
            total_obligation,
            kind: RowKind::Category,
        }
    }

    pub fn grand_total(total_obligation: f64) -> Self {
        Self {
            label: GRAND_TOTAL_LABEL.to_string(),
            total_obligation,
            kind: RowKind::GrandTotal,
        }
    }

    pub fn is_grand_total(&self) -> bool {
        self.kind == RowKind::GrandTotal
    }
}

/// Ranked aggregate: the grand-total row followed by categories, descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable {
    pub rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// The grand-total row, located by kind rather than position.
    pub fn grand_total_row(&self) -> Option<&AggregateRow> {
        self.rows.iter().find(|r| r.is_grand_total())
    }

    /// Grand total obligation (zero if the table has no grand-total row).
    pub fn grand_total(&self) -> f64 {
        self.grand_total_row().map(|r| r.total_obligation).unwrap_or(0.0)
    }

    /// Category rows in ranked order, grand total excluded.
    pub fn categories(&self) -> impl Iterator<Item = &AggregateRow> {
        self.rows.iter().filter(|r| !r.is_grand_total())
    }

    pub fn category_count(&self) -> usize {
        self.categories().count()
    }

    /// Owned copy of the category rows, as the chart renderers consume them.
    pub fn without_grand_total(&self) -> Vec<AggregateRow> {
        self.categories().cloned().collect()
    }
}

/// Where award rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Live FPDS request.
    Fpds,
    /// A previously downloaded FPDS CSV export.
    File(PathBuf),
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub params: QueryParameters,
    pub agency: Agency,
    /// ezSearch endpoint the query URL is built against.
    pub base_url: String,
    pub source: SourceKind,
    /// Number of per-category narrative sentences.
    pub top_n: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parameters_accept_valid_input() {
        let p = QueryParameters::new("4700", "2019", " D3 ").unwrap();
        assert_eq!(p.department_code(), "4700");
        assert_eq!(p.fiscal_year(), "2019");
        assert_eq!(p.category_prefix(), "D3");
    }

    #[test]
    fn query_parameters_reject_bad_prefix() {
        for bad in ["D", "D3X", "", "D*"] {
            let err = QueryParameters::new("4700", "2019", bad).unwrap_err();
            assert!(
                matches!(err, PipelineError::InvalidInput { field: "PSC prefix", .. }),
                "prefix {bad:?} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn query_parameters_reject_bad_year_and_department() {
        assert!(matches!(
            QueryParameters::new("4700", "19", "D3"),
            Err(PipelineError::InvalidInput { field: "fiscal year", .. })
        ));
        assert!(matches!(
            QueryParameters::new("4700", "20a9", "D3"),
            Err(PipelineError::InvalidInput { field: "fiscal year", .. })
        ));
        assert!(matches!(
            QueryParameters::new("", "2019", "D3"),
            Err(PipelineError::InvalidInput { field: "department code", .. })
        ));
    }

    #[test]
    fn grand_total_is_found_by_kind_not_position() {
        let table = AggregateTable {
            rows: vec![
                AggregateRow::category("S201 (custodial janitorial services)", 50.0),
                AggregateRow::grand_total(30.0),
                AggregateRow::category("S299 (other housekeeping)", -20.0),
            ],
        };
        assert_eq!(table.grand_total(), 30.0);
        assert_eq!(table.category_count(), 2);
        assert!(table.without_grand_total().iter().all(|r| !r.is_grand_total()));
    }
}
