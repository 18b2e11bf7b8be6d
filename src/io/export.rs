//! Export the ranked aggregate to CSV.
//!
//! One row per aggregate row, grand total first. Amounts keep cents, unlike the
//! whole-dollar narrative.

use std::path::Path;

use tracing::info;

use crate::domain::AggregateTable;
use crate::error::AppError;

/// Write `label,kind,total_obligation` rows.
pub fn write_aggregate_csv(path: &Path, table: &AggregateTable) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["label", "kind", "total_obligation"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for row in &table.rows {
        let kind = if row.is_grand_total() { "grand_total" } else { "category" };
        let amount = format!("{:.2}", row.total_obligation);
        writer
            .write_record([row.label.as_str(), kind, amount.as_str()])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    info!(path = %path.display(), rows = table.rows.len(), "wrote aggregate CSV");
    Ok(())
}
