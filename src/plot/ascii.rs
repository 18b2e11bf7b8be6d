//! ASCII bar chart for terminal output.
//!
//! Deterministic fixed grid: one column group per bar, numbered underneath,
//! with a legend mapping numbers to full labels and amounts. Negative totals
//! hang below the zero line.

use crate::domain::AggregateRow;
use crate::report::format::{format_usd, format_usd_compact, truncate};

const BAR: char = '#';
const BAR_WIDTH: usize = 3;
const AXIS_WIDTH: usize = 10;

/// Render `bars` in the given order under `title`.
///
/// Bars that do not fit in `width` columns are left out of the grid and
/// counted in a trailing note; the legend still lists every bar.
pub fn render_ascii_bars(bars: &[AggregateRow], title: &str, width: usize, height: usize) -> String {
    let height = height.max(4);
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    if bars.is_empty() {
        out.push_str("(no categories to plot)\n");
        return out;
    }

    let slots = (width.saturating_sub(AXIS_WIDTH + 1) / (BAR_WIDTH + 1)).max(1);
    let shown = &bars[..bars.len().min(slots)];

    let lo = shown.iter().map(|b| b.total_obligation).fold(0.0_f64, f64::min);
    let hi = shown.iter().map(|b| b.total_obligation).fold(0.0_f64, f64::max);
    let span = if hi > lo { hi - lo } else { 1.0 };
    let step = span / height as f64;

    for row in 0..height {
        let top = hi - row as f64 * step;
        let mid = top - step / 2.0;

        let axis = if row == 0 {
            format_usd_compact(hi)
        } else if row + 1 == height {
            format_usd_compact(lo)
        } else {
            String::new()
        };
        let mut line = format!("{axis:>AXIS_WIDTH$}|");

        for bar in shown {
            let v = bar.total_obligation;
            let filled = (v > 0.0 && mid > 0.0 && mid <= v) || (v < 0.0 && mid < 0.0 && mid >= v);
            let cell = if filled { BAR } else { ' ' };
            line.push(' ');
            line.extend(std::iter::repeat_n(cell, BAR_WIDTH));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{:>AXIS_WIDTH$}+{}\n", "", "-".repeat(shown.len() * (BAR_WIDTH + 1))));
    let mut numbers = format!("{:>AXIS_WIDTH$} ", "");
    for i in 1..=shown.len() {
        numbers.push_str(&format!("{i:^BAR_WIDTH$} "));
    }
    out.push_str(numbers.trim_end());
    out.push('\n');

    if shown.len() < bars.len() {
        out.push_str(&format!("(+{} more not shown; widen the plot)\n", bars.len() - shown.len()));
    }

    out.push('\n');
    for (i, bar) in bars.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}) {:<60} {:>16}\n",
            i + 1,
            truncate(&bar.label, 60),
            format_usd(bar.total_obligation)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars() -> Vec<AggregateRow> {
        vec![
            AggregateRow::category("D301 (IT services)", 600_000.0),
            AggregateRow::category("D302 (telecom)", 400_000.0),
        ]
    }

    fn column_fill(chart: &str, bar: usize) -> usize {
        let start = AXIS_WIDTH + 2 + bar * (BAR_WIDTH + 1);
        chart
            .lines()
            .filter(|l| l.contains('|'))
            .filter(|l| l.chars().nth(start) == Some(BAR))
            .count()
    }

    #[test]
    fn taller_bar_fills_more_rows() {
        let chart = render_ascii_bars(&bars(), "title", 80, 10);
        assert!(chart.starts_with("title\n"));
        assert_eq!(column_fill(&chart, 0), 10);
        assert_eq!(column_fill(&chart, 1), 7);
    }

    #[test]
    fn legend_lists_labels_and_amounts() {
        let chart = render_ascii_bars(&bars(), "title", 80, 10);
        assert!(chart.contains("  1) D301 (IT services)"));
        assert!(chart.contains("$400,000"));
    }

    #[test]
    fn narrow_width_truncates_grid_but_not_legend() {
        let chart = render_ascii_bars(&bars(), "title", AXIS_WIDTH + 5, 6);
        assert!(chart.contains("(+1 more not shown"));
        assert!(chart.contains("  2) D302 (telecom)"));
    }

    #[test]
    fn negative_bars_hang_below_zero() {
        let bars = vec![AggregateRow::category("A (x)", 100.0), AggregateRow::category("B (y)", -100.0)];
        let chart = render_ascii_bars(&bars, "t", 80, 10);
        assert_eq!(column_fill(&chart, 0), 5);
        assert_eq!(column_fill(&chart, 1), 5);
    }

    #[test]
    fn empty_input_renders_note() {
        let chart = render_ascii_bars(&[], "t", 80, 10);
        assert!(chart.contains("no categories"));
    }
}
