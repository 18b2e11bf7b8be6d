//! End-to-end pipeline runs against in-memory award sources.

use psc_obligations::app::pipeline;
use psc_obligations::app::resolve_settings;
use psc_obligations::cli::QueryArgs;
use psc_obligations::cli::prompt::FixedPrefix;
use psc_obligations::data::AwardSource;
use psc_obligations::domain::RunSettings;
use psc_obligations::error::PipelineError;
use psc_obligations::io::parse_award_table;
use reqwest::Url;

const CSV: &str = "\
Contract ID,Action Obligation ($),PSC,PSC Description
GS-1,\"$400,000.00\",D301,IT AND TELECOM- FACILITY OPERATION AND MAINTENANCE
GS-2,\"$200,000.00\",D301,IT AND TELECOM- FACILITY OPERATION AND MAINTENANCE
GS-3,\"$500,000.00\",D302,IT AND TELECOM- SYSTEMS DEVELOPMENT
GS-4,,D399,IT AND TELECOM- OTHER IT AND TELECOMMUNICATIONS
GS-5,\"$50,000.00\",D399,IT AND TELECOM- OTHER IT AND TELECOMMUNICATIONS
";

/// Serves a fixed CSV body and records the requested URL.
struct CannedCsv {
    body: &'static str,
    seen: std::cell::RefCell<Option<String>>,
}

impl CannedCsv {
    fn new(body: &'static str) -> Self {
        Self {
            body,
            seen: std::cell::RefCell::new(None),
        }
    }
}

impl AwardSource for CannedCsv {
    fn fetch(&self, url: &Url) -> Result<Vec<psc_obligations::domain::AwardRecord>, PipelineError> {
        *self.seen.borrow_mut() = Some(url.to_string());
        parse_award_table(self.body)
    }
}

fn settings(prefix: &str) -> RunSettings {
    let args = QueryArgs {
        psc: None,
        department: None,
        fiscal_year: None,
        agency: None,
        from_file: None,
        top: 5,
    };
    resolve_settings(&args, |_| None, &mut FixedPrefix(prefix.to_string())).unwrap()
}

#[test]
fn full_run_ranks_reconciles_and_narrates() {
    let source = CannedCsv::new(CSV);
    let run = pipeline::run(&settings("D3"), &source).unwrap();

    let requested = source.seen.borrow().clone().unwrap();
    assert!(requested.contains("PRODUCT_OR_SERVICE_CODE%3A%22D3*%22"));
    assert_eq!(run.record_count, 5);

    let labels: Vec<&str> = run.table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(
        labels,
        [
            "All",
            "D301 (IT and telecom facility operation and maintenance)",
            "D302 (IT and telecom systems development)",
            "D399 (IT and telecom other IT and telecommunications)",
        ]
    );

    let category_sum: f64 = run.table.categories().map(|r| r.total_obligation).sum();
    assert_eq!(run.table.grand_total(), 1_150_000.0);
    assert!((run.table.grand_total() - category_sum).abs() < 1e-6);

    assert!(run.narrative.starts_with(
        "The following data represents real-time information on US General Services Administration (GSA) \
         contract obligations for fiscal year 2019 in Product Service Code (PSC) category D3."
    ));
    assert!(run.narrative.contains(
        "GSA obligated $600,000 on contracts coded under PSC D301 (IT and telecom facility operation and maintenance)."
    ));
    assert!(run.narrative.ends_with(
        "In total, GSA obligated $1,150,000 on contracts listed under PSC category D3."
    ));

    let bars = run.chart_bars();
    assert_eq!(bars.len(), 3);
    assert!(bars.iter().all(|b| !b.is_grand_total()));
}

#[test]
fn empty_response_is_an_empty_dataset() {
    let source = CannedCsv::new("");
    let err = pipeline::run(&settings("Z9"), &source).unwrap_err();
    assert_eq!(err, PipelineError::EmptyDataset);
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn header_only_response_is_an_empty_dataset() {
    let source = CannedCsv::new("Action Obligation ($),PSC,PSC Description\n");
    let err = pipeline::run(&settings("D3"), &source).unwrap_err();
    assert_eq!(err, PipelineError::EmptyDataset);
}

#[test]
fn malformed_amount_stops_the_run() {
    let source = CannedCsv::new(
        "Action Obligation ($),PSC,PSC Description\n$10.00,D301,IT SERVICES\nN/A,D302,IT DEVELOPMENT\n",
    );
    let err = pipeline::run(&settings("D3"), &source).unwrap_err();
    assert_eq!(
        err,
        PipelineError::MalformedAmount {
            line: 3,
            field: psc_obligations::io::OBLIGATION_FIELD,
            value: "N/A".to_string(),
        }
    );
}

#[test]
fn missing_column_is_a_parse_error() {
    let source = CannedCsv::new("Amount,PSC\n$10.00,D301\n");
    let err = pipeline::run(&settings("D3"), &source).unwrap_err();
    assert!(matches!(err, PipelineError::Parse(_)));
}
