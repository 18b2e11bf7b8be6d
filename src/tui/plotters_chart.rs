//! Plotters-powered obligation bar chart widget for Ratatui.
//!
//! Drawing is shared with the SVG export (`plot::bars::draw_bar_chart`); this
//! widget only adapts it to the Ratatui buffer via `plotters-ratatui-backend`.

use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::plot::bars::draw_bar_chart;
use crate::plot::BarChartSpec;

/// Render-only wrapper; all data is prepared by the caller.
pub struct ObligationChart<'a> {
    pub spec: BarChartSpec<'a>,
}

impl Widget for ObligationChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.spec.bars.is_empty() {
            buf.set_string(area.x, area.y, "No categories to chart.", Style::default().fg(Color::Yellow));
            return;
        }

        let spec = self.spec;
        let widget = widget_fn(move |root| {
            draw_bar_chart(&root, &spec)?;
            Ok(())
        });

        widget.render(area, buf);
    }
}
