//! `psc-obligations` library crate.
//!
//! Summarizes federal contract obligations from the FPDS ezSearch portal by
//! Product Service Code (PSC). The binary (`psc`) is a thin wrapper around this
//! library so that:
//!
//! - core logic is testable without spawning processes or touching the network
//! - each pipeline stage can be driven on its own (query URL, parse, aggregate)

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod plot;
pub mod report;
pub mod tui;
