//! SVG chart file output.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::AppError;
use crate::plot::bars::{BarChartSpec, draw_bar_chart};

/// Image size in pixels (10x6 inches at 100 dpi).
pub const SVG_SIZE: (u32, u32) = (1000, 600);

/// Write the bar chart to an SVG file.
pub fn write_svg_chart(path: &Path, spec: &BarChartSpec<'_>) -> Result<(), AppError> {
    let root = SVGBackend::new(path, SVG_SIZE).into_drawing_area();
    let fail = |e: &dyn std::fmt::Display| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display()));

    root.fill(&spec.style.background).map_err(|e| fail(&e))?;
    draw_bar_chart(&root, spec).map_err(|e| fail(&e))?;
    root.present().map_err(|e| fail(&e))?;

    info!(path = %path.display(), bars = spec.bars.len(), "wrote SVG chart");
    Ok(())
}
