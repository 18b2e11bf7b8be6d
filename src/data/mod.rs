//! Remote data access: query construction and award retrieval.

pub mod fpds;
pub mod query;

pub use fpds::{AwardSource, CsvFileSource, FpdsClient};
pub use query::{FPDS_BASE_URL, build_query_url};
