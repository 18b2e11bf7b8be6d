//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - validated query inputs (`QueryParameters`) and run settings (`RunSettings`)
//! - fetched and normalized award rows (`AwardRecord`, `NormalizedAward`)
//! - the ranked aggregate (`AggregateRow`, `AggregateTable`)
//! - agency naming (`Agency`)

pub mod agency;
pub mod award;

pub use agency::*;
pub use award::*;
