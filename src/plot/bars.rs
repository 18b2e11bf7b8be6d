//! Backend-agnostic bar chart drawing with Plotters.
//!
//! The same drawing routine feeds the SVG writer and the TUI widget; only the
//! palette and sizes differ. Bars are drawn in the order given, so callers pass
//! the ranked categories (grand total already removed). Each bar sits in its
//! own x segment labeled with the full composite label.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::domain::{AggregateRow, QueryParameters};
use crate::report::format::{format_usd_compact, truncate};

/// Colors and sizes for one rendering target.
#[derive(Clone, Copy)]
pub struct BarStyle {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub bar: RGBColor,
    pub highlight: RGBColor,
    pub caption_size: u32,
    pub label_size: u32,
    pub margin: u32,
    pub y_label_area: u32,
    pub x_label_area: u32,
    /// Longest x label, in characters, before truncation.
    pub label_chars: usize,
    /// Draw x labels vertically (image output only; terminals cannot rotate text).
    pub rotate_labels: bool,
    /// Gap on each side of a bar, in backend pixels.
    pub bar_gap: u32,
    pub mesh: bool,
}

impl BarStyle {
    /// Light background, sized for a 1000x600 image.
    pub const IMAGE: BarStyle = BarStyle {
        background: WHITE,
        foreground: BLACK,
        bar: RGBColor(31, 119, 180),
        highlight: RGBColor(255, 127, 14),
        caption_size: 22,
        label_size: 13,
        margin: 16,
        y_label_area: 80,
        x_label_area: 230,
        label_chars: 36,
        rotate_labels: true,
        bar_gap: 6,
        mesh: true,
    };

    /// High-contrast, compact label areas for terminal cells.
    pub const TERMINAL: BarStyle = BarStyle {
        background: BLACK,
        foreground: WHITE,
        bar: RGBColor(0, 255, 255),
        highlight: RGBColor(255, 255, 0),
        caption_size: 10,
        label_size: 10,
        margin: 1,
        y_label_area: 8,
        x_label_area: 3,
        label_chars: 14,
        rotate_labels: false,
        bar_gap: 1,
        mesh: false,
    };
}

/// Render-only chart description.
pub struct BarChartSpec<'a> {
    pub title: &'a str,
    pub bars: &'a [AggregateRow],
    /// Index into `bars` drawn in the highlight color.
    pub selected: Option<usize>,
    pub style: BarStyle,
}

/// "GSA contract obligations in PSC category D3 for fiscal year 2019".
pub fn chart_title(agency_short_name: &str, params: &QueryParameters) -> String {
    format!(
        "{agency_short_name} contract obligations in PSC category {} for fiscal year {}",
        params.category_prefix(),
        params.fiscal_year()
    )
}

/// X label for a segment position: the bar's composite label at its center, nothing elsewhere.
pub fn segment_label(bars: &[AggregateRow], value: &SegmentValue<usize>, max_chars: usize) -> String {
    match value {
        SegmentValue::CenterOf(i) => bars
            .get(*i)
            .map(|row| truncate(&row.label, max_chars))
            .unwrap_or_default(),
        SegmentValue::Exact(_) | SegmentValue::Last => String::new(),
    }
}

/// Y range covering zero and every bar, with headroom above.
pub fn value_range(bars: &[AggregateRow]) -> (f64, f64) {
    let lo = bars.iter().map(|b| b.total_obligation).fold(0.0_f64, f64::min);
    let hi = bars.iter().map(|b| b.total_obligation).fold(0.0_f64, f64::max);
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return (0.0, 1.0);
    }
    let lo = if lo < 0.0 { lo - span * 0.05 } else { lo };
    (lo, hi + span * 0.05)
}

/// Draw the chart onto any Plotters drawing area.
pub fn draw_bar_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarChartSpec<'_>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = spec.bars.len().max(1);
    let (y0, y1) = value_range(spec.bars);
    // Integer ranges are inclusive, so `0..n` yields one trailing empty segment.
    // Asking for one label per segment keeps every bar labeled.
    let style = spec.style;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, ("sans-serif", style.caption_size).into_font().color(&style.foreground))
        .margin(style.margin)
        .set_label_area_size(LabelAreaPosition::Left, style.y_label_area)
        .set_label_area_size(LabelAreaPosition::Bottom, style.x_label_area)
        .build_cartesian_2d((0..n).into_segmented(), y0..y1)?;

    let x_label = |v: &SegmentValue<usize>| segment_label(spec.bars, v, style.label_chars);
    let y_label = |v: &f64| format_usd_compact(*v);

    let label_font = ("sans-serif", style.label_size).into_font().color(&style.foreground);
    let x_label_font = if style.rotate_labels {
        label_font.transform(FontTransform::Rotate90)
    } else {
        label_font.clone()
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n + 1)
        .y_labels(6)
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .y_desc("Obligations")
        .label_style(label_font)
        .x_label_style(x_label_font)
        .axis_style(&style.foreground);
    if !style.mesh {
        mesh.disable_y_mesh();
    }
    mesh.draw()?;

    chart.draw_series(spec.bars.iter().enumerate().map(|(i, row)| {
        let color = if spec.selected == Some(i) { style.highlight } else { style.bar };
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), row.total_obligation),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, style.bar_gap, style.bar_gap);
        bar
    }))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked() -> Vec<AggregateRow> {
        vec![
            AggregateRow::category("D301 (IT and telecom facility operation)", 600_000.0),
            AggregateRow::category("D302 (telecom)", 400_000.0),
        ]
    }

    #[test]
    fn segment_centers_carry_full_labels() {
        let bars = ranked();
        assert_eq!(segment_label(&bars, &SegmentValue::CenterOf(1), 40), "D302 (telecom)");
        assert_eq!(segment_label(&bars, &SegmentValue::CenterOf(0), 12), "D301 (IT an.");
        assert_eq!(segment_label(&bars, &SegmentValue::CenterOf(2), 40), "");
        assert_eq!(segment_label(&bars, &SegmentValue::Exact(0), 40), "");
        assert_eq!(segment_label(&bars, &SegmentValue::Last, 40), "");
    }

    #[test]
    fn draws_labeled_bars_on_an_svg_backend() {
        let bars = ranked();
        for (style, selected) in [(BarStyle::IMAGE, None), (BarStyle::TERMINAL, Some(1))] {
            let mut out = String::new();
            {
                let root = SVGBackend::with_string(&mut out, (800, 400)).into_drawing_area();
                let spec = BarChartSpec {
                    title: "GSA contract obligations",
                    bars: &bars,
                    selected,
                    style,
                };
                draw_bar_chart(&root, &spec).unwrap();
                root.present().unwrap();
            }
            assert!(out.contains("D302 (telecom)"));
            assert!(out.contains("<rect"));
        }
    }

    #[test]
    fn empty_bar_list_still_draws_axes() {
        let mut out = String::new();
        {
            let root = SVGBackend::with_string(&mut out, (400, 300)).into_drawing_area();
            let spec = BarChartSpec {
                title: "empty",
                bars: &[],
                selected: None,
                style: BarStyle::IMAGE,
            };
            draw_bar_chart(&root, &spec).unwrap();
            root.present().unwrap();
        }
        assert!(out.contains("empty"));
    }

    #[test]
    fn value_range_spans_zero_and_bars() {
        let bars = vec![AggregateRow::category("A (a)", 100.0), AggregateRow::category("B (b)", -50.0)];
        let (lo, hi) = value_range(&bars);
        assert!(lo < -50.0);
        assert!(hi > 100.0);

        let positive = vec![AggregateRow::category("A (a)", 100.0)];
        assert_eq!(value_range(&positive).0, 0.0);
        assert_eq!(value_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn title_names_prefix_and_year() {
        let params = QueryParameters::new("4700", "2019", "S2").unwrap();
        assert_eq!(
            chart_title("GSA", &params),
            "GSA contract obligations in PSC category S2 for fiscal year 2019"
        );
    }
}
