//! FPDS ezSearch query construction.
//!
//! The portal takes one free-text `q` parameter holding conjunctive
//! `FIELD:"value"` terms. The PSC term carries a trailing `*` so every code
//! sharing the 2-character prefix matches.

use reqwest::Url;

use crate::domain::QueryParameters;
use crate::error::PipelineError;

/// Public ezSearch endpoint.
pub const FPDS_BASE_URL: &str = "https://www.fpds.gov/ezsearch/fpdsportal";

/// FPDS wildcard marker.
pub const WILDCARD: char = '*';

/// Fixed portal parameters: full award index rendered as CSV.
const PORTAL_PARAMS: [(&str, &str); 3] = [("s", "FPDS"), ("indexName", "awardfull"), ("templateName", "CSV")];

/// The `q` expression for the given parameters (unescaped).
///
/// The two leading spaces match what the portal's own search form emits.
pub fn search_expression(params: &QueryParameters) -> String {
    format!(
        "  CONTRACT_FISCAL_YEAR:\"{}\" DEPARTMENT_ID:\"{}\" PRODUCT_OR_SERVICE_CODE:\"{}{WILDCARD}\"",
        params.fiscal_year(),
        params.department_code(),
        params.category_prefix(),
    )
}

/// Build the fully escaped request URL.
pub fn build_query_url(base_url: &str, params: &QueryParameters) -> Result<Url, PipelineError> {
    let q = search_expression(params);
    let mut pairs: Vec<(&str, &str)> = PORTAL_PARAMS.to_vec();
    pairs.push(("q", q.as_str()));

    Url::parse_with_params(base_url, &pairs)
        .map_err(|e| PipelineError::invalid_input("FPDS base URL", base_url, e.to_string()))
}
