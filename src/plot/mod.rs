//! Chart rendering for the ranked categories.
//!
//! - `ascii`: fixed-grid terminal chart
//! - `bars`: Plotters drawing shared by the SVG file and the TUI
//! - `svg`: SVG file output

pub mod ascii;
pub mod bars;
pub mod svg;

pub use ascii::render_ascii_bars;
pub use bars::{BarChartSpec, BarStyle, chart_title};
pub use svg::write_svg_chart;
