//! Read/write run summary JSON files.
//!
//! A summary is the portable record of one run: inputs, the ranked aggregate,
//! and the narrative. `psc plot --summary` re-renders charts from it without
//! touching the network.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Agency, AggregateTable, QueryParameters};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub params: QueryParameters,
    pub agency: Agency,
    pub query_url: String,
    pub records: usize,
    pub table: AggregateTable,
    pub narrative: String,
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, summary: &SummaryFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, summary)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;

    info!(path = %path.display(), "wrote summary JSON");
    Ok(())
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    let summary: SummaryFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AggregateRow;

    fn summary() -> SummaryFile {
        SummaryFile {
            tool: "psc".to_string(),
            generated_at: Utc::now(),
            params: QueryParameters::new("4700", "2019", "D3").unwrap(),
            agency: Agency::for_department("4700"),
            query_url: "https://www.fpds.gov/ezsearch/fpdsportal?q=x".to_string(),
            records: 3,
            table: AggregateTable {
                rows: vec![AggregateRow::grand_total(10.0), AggregateRow::category("D301 (IT services)", 10.0)],
            },
            narrative: "In total, GSA obligated $10 on contracts listed under PSC category D3.".to_string(),
        }
    }

    #[test]
    fn summary_survives_a_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let original = summary();

        write_summary_json(&path, &original).unwrap();
        let loaded = read_summary_json(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn invalid_params_in_file_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary_json(&path, &summary()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap().replace("\"D3\"", "\"D3X\"");
        std::fs::write(&path, text).unwrap();

        let err = read_summary_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid summary JSON"));
    }
}
