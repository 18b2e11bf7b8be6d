//! Command-line parsing for the FPDS obligation summarizer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline code.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::domain::DEFAULT_TOP_N;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "psc", version, about = "Summarize federal contract obligations by Product Service Code (FPDS)")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch awards, print the narrative and a chart, and optionally export.
    Summary(SummaryArgs),
    /// Print the FPDS query URL without fetching.
    Url(QueryArgs),
    /// Re-render the chart from a saved summary JSON.
    Plot(PlotArgs),
    /// Fetch awards and browse the narrative and chart in a terminal UI.
    Tui(QueryArgs),
}

/// Inputs that determine what gets fetched.
#[derive(Debug, Parser, Clone)]
pub struct QueryArgs {
    /// 2-character PSC prefix (e.g. D3). Prompted for when omitted.
    #[arg(short = 'p', long = "psc")]
    pub psc: Option<String>,

    /// FPDS department ID [env: FPDS_DEPARTMENT_ID] [default: 4700].
    #[arg(short = 'd', long)]
    pub department: Option<String>,

    /// Fiscal year, 4 digits [env: FPDS_FISCAL_YEAR] [default: 2019].
    #[arg(short = 'y', long)]
    pub fiscal_year: Option<String>,

    /// Agency name used in the narrative (defaults to the department's short name).
    #[arg(long)]
    pub agency: Option<String>,

    /// Read a previously downloaded FPDS CSV instead of querying FPDS.
    #[arg(long, value_name = "CSV")]
    pub from_file: Option<PathBuf>,

    /// Number of top categories described in the narrative.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,
}

/// Chart size and output options.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Skip the terminal bar chart.
    #[arg(long)]
    pub no_plot: bool,

    /// Terminal chart width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Terminal chart height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Also write the chart as an SVG image.
    #[arg(long, value_name = "SVG")]
    pub chart: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    #[command(flatten)]
    pub chart: ChartArgs,

    /// Also print the ranked aggregate table after the narrative.
    #[arg(long)]
    pub table: bool,

    /// Export the aggregate table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full run summary (inputs, table, narrative) to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,
}

/// Options for plotting a saved summary.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Summary JSON produced by `psc summary --export-summary`.
    #[arg(long, value_name = "JSON")]
    pub summary: PathBuf,

    #[command(flatten)]
    pub chart: ChartArgs,
}
