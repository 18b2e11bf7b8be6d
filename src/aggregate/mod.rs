//! Pivot of normalized awards by composite label.
//!
//! Output rows: the grand total first, then one row per distinct label sorted by
//! total obligation, descending. Ties keep the order in which the labels were
//! first encountered.
//!
//! The grand total is the sum of the category totals, so the rows always
//! reconcile. With credits (negative obligations) it can be smaller than a
//! category total; it still comes first and readers locate it by `RowKind`.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::domain::{AggregateRow, AggregateTable, NormalizedAward};
use crate::error::PipelineError;

/// Group, sum, and rank. Blank amounts count as zero.
pub fn aggregate(records: &[NormalizedAward]) -> Result<AggregateTable, PipelineError> {
    if records.is_empty() {
        return Err(PipelineError::EmptyDataset);
    }

    // Encounter-ordered groups.
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<AggregateRow> = Vec::new();
    for record in records {
        let amount = record.obligation.unwrap_or(0.0);
        match index.get(record.composite_label.as_str()) {
            Some(&i) => groups[i].total_obligation += amount,
            None => {
                index.insert(record.composite_label.as_str(), groups.len());
                groups.push(AggregateRow::category(record.composite_label.clone(), amount));
            }
        }
    }

    let grand_total: f64 = groups.iter().map(|g| g.total_obligation).sum();

    // `sort_by` is stable, which keeps encounter order for ties.
    groups.sort_by(|a, b| b.total_obligation.total_cmp(&a.total_obligation));

    if groups.first().is_some_and(|top| top.total_obligation > grand_total) {
        warn!(grand_total, "negative obligations pull the grand total below the top category");
    }
    debug!(categories = groups.len(), grand_total, "aggregated obligations");

    let mut rows = Vec::with_capacity(groups.len() + 1);
    rows.push(AggregateRow::grand_total(grand_total));
    rows.extend(groups);

    Ok(AggregateTable { rows })
}
