//! Reporting: the narrative paragraph and formatted terminal output.
//!
//! Formatting lives here so the aggregation code stays free of presentation
//! concerns and output changes stay localized.

pub mod format;
pub mod narrative;

pub use format::{format_table, format_usd, format_usd_compact};
pub use narrative::generate_narrative;
