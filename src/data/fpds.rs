//! FPDS award retrieval.
//!
//! One synchronous GET per run. There is no retry and no client timeout: a
//! failed request ends the run, and a stalled endpoint stalls it.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::domain::AwardRecord;
use crate::error::PipelineError;
use crate::io::ingest::{decode_latin1, parse_award_table};

/// Environment variable overriding the ezSearch endpoint.
pub const BASE_URL_ENV: &str = "FPDS_BASE_URL";

/// Anything that can turn a query URL into award records.
pub trait AwardSource {
    fn fetch(&self, url: &Url) -> Result<Vec<AwardRecord>, PipelineError>;
}

/// Live FPDS ezSearch client.
pub struct FpdsClient {
    client: Client,
}

impl FpdsClient {
    pub fn new() -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| PipelineError::Fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl AwardSource for FpdsClient {
    fn fetch(&self, url: &Url) -> Result<Vec<AwardRecord>, PipelineError> {
        info!(%url, "requesting FPDS award table");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| PipelineError::Fetch(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PipelineError::Fetch(format!("{url} returned status {}", resp.status())));
        }

        let body = resp
            .bytes()
            .map_err(|e| PipelineError::Fetch(format!("failed to read response body: {e}")))?;
        debug!(bytes = body.len(), "received FPDS response");

        let records = parse_award_table(&decode_latin1(&body))?;
        info!(rows = records.len(), "parsed FPDS award table");
        Ok(records)
    }
}

/// A previously downloaded FPDS CSV export. The query URL is ignored.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AwardSource for CsvFileSource {
    fn fetch(&self, _url: &Url) -> Result<Vec<AwardRecord>, PipelineError> {
        info!(path = %self.path.display(), "reading award table from file");
        let bytes = std::fs::read(&self.path)
            .map_err(|e| PipelineError::Fetch(format!("failed to read '{}': {e}", self.path.display())))?;
        let records = parse_award_table(&decode_latin1(&bytes))?;
        info!(rows = records.len(), "parsed award table");
        Ok(records)
    }
}
