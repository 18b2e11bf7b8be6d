//! Input/output helpers.
//!
//! - award table decode + parse (`ingest`)
//! - aggregate CSV export (`export`)
//! - run summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
