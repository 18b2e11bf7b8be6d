//! Shared pipeline logic used by both CLI and TUI front-ends.
//!
//! query URL -> fetch -> normalize -> aggregate -> narrative
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value; nothing is shared or mutated across stages. Front-ends focus on
//! presentation (printing vs widgets).

use chrono::Utc;
use reqwest::Url;
use tracing::info;

use crate::aggregate::aggregate;
use crate::data::{AwardSource, CsvFileSource, FpdsClient, build_query_url};
use crate::domain::{AggregateRow, AggregateTable, AwardRecord, RunSettings, SourceKind};
use crate::error::PipelineError;
use crate::io::summary::SummaryFile;
use crate::normalize::normalize_records;
use crate::plot::chart_title;
use crate::report::generate_narrative;

/// All computed outputs of one run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub query_url: Url,
    pub record_count: usize,
    pub table: AggregateTable,
    pub narrative: String,
}

impl RunOutput {
    /// Ranked categories for the chart (grand total removed).
    pub fn chart_bars(&self) -> Vec<AggregateRow> {
        self.table.without_grand_total()
    }

    pub fn chart_title(&self, settings: &RunSettings) -> String {
        chart_title(&settings.agency.short_name, &settings.params)
    }

    pub fn to_summary_file(&self, settings: &RunSettings) -> SummaryFile {
        SummaryFile {
            tool: "psc".to_string(),
            generated_at: Utc::now(),
            params: settings.params.clone(),
            agency: settings.agency.clone(),
            query_url: self.query_url.to_string(),
            records: self.record_count,
            table: self.table.clone(),
            narrative: self.narrative.clone(),
        }
    }
}

/// The request URL for these settings.
pub fn query_url(settings: &RunSettings) -> Result<Url, PipelineError> {
    build_query_url(&settings.base_url, &settings.params)
}

/// The award source selected by the settings.
pub fn award_source(settings: &RunSettings) -> Result<Box<dyn AwardSource>, PipelineError> {
    let source: Box<dyn AwardSource> = match &settings.source {
        SourceKind::Fpds => Box::new(FpdsClient::new()?),
        SourceKind::File(path) => Box::new(CsvFileSource::new(path)),
    };
    Ok(source)
}

/// Execute every stage against `source`.
pub fn run(settings: &RunSettings, source: &dyn AwardSource) -> Result<RunOutput, PipelineError> {
    let url = query_url(settings)?;
    run_query(settings, url, source)
}

/// Execute the pipeline for an already-built URL.
pub fn run_query(settings: &RunSettings, url: Url, source: &dyn AwardSource) -> Result<RunOutput, PipelineError> {
    let records = source.fetch(&url)?;
    run_with_records(settings, url, &records)
}

/// Execute the stages after the fetch.
pub fn run_with_records(
    settings: &RunSettings,
    query_url: Url,
    records: &[AwardRecord],
) -> Result<RunOutput, PipelineError> {
    let normalized = normalize_records(records)?;
    let table = aggregate(&normalized)?;
    let narrative = generate_narrative(&table, &settings.params, &settings.agency, settings.top_n);

    info!(
        records = records.len(),
        categories = table.category_count(),
        grand_total = table.grand_total(),
        "pipeline complete"
    );

    Ok(RunOutput {
        query_url,
        record_count: records.len(),
        table,
        narrative,
    })
}
