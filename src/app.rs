//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves settings (flag > environment > default)
//! - runs the pipeline
//! - writes optional files (SVG chart, exports)
//! - prints the narrative and chart

use std::io::{self, Write};

use clap::Parser;

use crate::app::pipeline::RunOutput;
use crate::cli::prompt::{PrefixSource, stdin_prompt};
use crate::cli::{ChartArgs, Command, PlotArgs, QueryArgs, SummaryArgs};
use crate::data::FPDS_BASE_URL;
use crate::data::fpds::BASE_URL_ENV;
use crate::domain::{
    Agency, AggregateRow, DEFAULT_DEPARTMENT_ID, DEFAULT_FISCAL_YEAR, QueryParameters, RunSettings, SourceKind,
};
use crate::error::AppError;
use crate::plot::{BarChartSpec, BarStyle, render_ascii_bars, write_svg_chart};
use crate::report::format_table;

pub mod logging;
pub mod pipeline;

/// Environment variable overriding the default department ID.
pub const DEPARTMENT_ENV: &str = "FPDS_DEPARTMENT_ID";
/// Environment variable overriding the default fiscal year.
pub const FISCAL_YEAR_ENV: &str = "FPDS_FISCAL_YEAR";

/// Entry point for the `psc` binary.
pub fn run() -> Result<(), AppError> {
    // `psc` and `psc --psc D3` behave like `psc summary ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    dotenvy::dotenv().ok();

    // The TUI owns the terminal; a stderr subscriber would draw over it.
    if !matches!(cli.command, Command::Tui(_)) {
        logging::init_logging(cli.verbose);
    }

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Url(args) => handle_url(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let settings = resolve_settings(&args.query, env_var, &mut stdin_prompt())?;

    let url = pipeline::query_url(&settings)?;
    if settings.source == SourceKind::Fpds {
        eprintln!("\nNow accessing:\n{url}\n");
    }

    let source = pipeline::award_source(&settings)?;
    let run = pipeline::run_query(&settings, url, source.as_ref())?;

    write_summary_outputs(&mut io::stdout().lock(), &run, &settings, &args)
}

/// Write file outputs, then the report.
///
/// Files go first so a failed `--chart`/`--export` write leaves `out` untouched.
fn write_summary_outputs<W: Write>(
    out: &mut W,
    run: &RunOutput,
    settings: &RunSettings,
    args: &SummaryArgs,
) -> Result<(), AppError> {
    let title = run.chart_title(settings);
    let bars = run.chart_bars();

    write_chart_file(&bars, &title, &args.chart)?;
    if let Some(path) = &args.export {
        crate::io::export::write_aggregate_csv(path, &run.table)?;
    }
    if let Some(path) = &args.export_summary {
        crate::io::summary::write_summary_json(path, &run.to_summary_file(settings))?;
    }

    writeln!(out, "{}", run.narrative).map_err(output_error)?;
    if args.table {
        write!(out, "\n{}", format_table(&run.table)).map_err(output_error)?;
    }
    write_ascii_chart(out, &bars, &title, &args.chart)
}

fn handle_url(args: QueryArgs) -> Result<(), AppError> {
    let settings = resolve_settings(&args, env_var, &mut stdin_prompt())?;
    println!("{}", pipeline::query_url(&settings)?);
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let summary = crate::io::summary::read_summary_json(&args.summary)?;
    let title = crate::plot::chart_title(&summary.agency.short_name, &summary.params);
    let bars = summary.table.without_grand_total();

    write_chart_file(&bars, &title, &args.chart)?;
    write_ascii_chart(&mut io::stdout().lock(), &bars, &title, &args.chart)
}

fn handle_tui(args: QueryArgs) -> Result<(), AppError> {
    // Resolve (and possibly prompt) before the TUI takes over the terminal.
    let settings = resolve_settings(&args, env_var, &mut stdin_prompt())?;
    crate::tui::run(settings)
}

fn write_chart_file(bars: &[AggregateRow], title: &str, chart: &ChartArgs) -> Result<(), AppError> {
    let Some(path) = &chart.chart else {
        return Ok(());
    };
    let spec = BarChartSpec {
        title,
        bars,
        selected: None,
        style: BarStyle::IMAGE,
    };
    write_svg_chart(path, &spec)
}

fn write_ascii_chart<W: Write>(out: &mut W, bars: &[AggregateRow], title: &str, chart: &ChartArgs) -> Result<(), AppError> {
    if chart.no_plot {
        return Ok(());
    }
    write!(out, "\n{}", render_ascii_bars(bars, title, chart.width, chart.height)).map_err(output_error)
}

fn output_error(e: io::Error) -> AppError {
    AppError::new(2, format!("Failed to write output: {e}"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve run settings from flags, then the environment, then defaults.
///
/// The PSC prefix comes from `--psc` or, when absent, from `prefixes`.
pub fn resolve_settings(
    args: &QueryArgs,
    env: impl Fn(&str) -> Option<String>,
    prefixes: &mut dyn PrefixSource,
) -> Result<RunSettings, AppError> {
    let lookup = |flag: &Option<String>, name: &str, default: &str| -> String {
        flag.clone()
            .or_else(|| env(name).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| default.to_string())
    };

    let department = lookup(&args.department, DEPARTMENT_ENV, DEFAULT_DEPARTMENT_ID);
    let fiscal_year = lookup(&args.fiscal_year, FISCAL_YEAR_ENV, DEFAULT_FISCAL_YEAR);
    let base_url = lookup(&None, BASE_URL_ENV, FPDS_BASE_URL);

    let agency = match &args.agency {
        Some(name) => Agency::named(name.trim()),
        None => Agency::for_department(&department),
    };

    let prefix = match &args.psc {
        Some(p) => p.clone(),
        None => prefixes.category_prefix(&agency)?,
    };

    let params = QueryParameters::new(&department, &fiscal_year, &prefix)?;

    let source = match &args.from_file {
        Some(path) => SourceKind::File(path.clone()),
        None => SourceKind::Fpds,
    };

    Ok(RunSettings {
        params,
        agency,
        base_url,
        source,
        top_n: args.top,
    })
}

/// Rewrite argv so `psc` defaults to `psc summary`.
///
/// Rules:
/// - `psc`                      -> `psc summary`
/// - `psc --psc D3 ...`         -> `psc summary --psc D3 ...`
/// - `psc --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("summary".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "url" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "summary flags".
    if arg1.starts_with('-') {
        argv.insert(1, "summary".to_string());
        return argv;
    }

    argv
}
