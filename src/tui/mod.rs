//! Ratatui-based terminal UI.
//!
//! The TUI shows the narrative next to a Plotters bar chart of the ranked
//! categories. Left/Right moves the highlighted bar, `r` re-fetches, and
//! `q`/Esc quits.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::pipeline::{self, RunOutput};
use crate::data::AwardSource;
use crate::domain::{AggregateRow, RunSettings, SourceKind};
use crate::error::AppError;
use crate::plot::{BarChartSpec, BarStyle};
use crate::report::format_usd;

mod plotters_chart;

use plotters_chart::ObligationChart;

/// Start the TUI for already-resolved settings.
pub fn run(settings: RunSettings) -> Result<(), AppError> {
    let source = pipeline::award_source(&settings)?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(settings, source);
    terminal
        .draw(|f| app.draw(f))
        .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
    app.refresh();
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    settings: RunSettings,
    source: Box<dyn AwardSource>,
    run: Option<RunOutput>,
    bars: Vec<AggregateRow>,
    title: String,
    selected: usize,
    status: String,
}

impl App {
    fn new(settings: RunSettings, source: Box<dyn AwardSource>) -> Self {
        let status = match &settings.source {
            SourceKind::Fpds => "Fetching FPDS data...".to_string(),
            SourceKind::File(path) => format!("Reading {}...", path.display()),
        };
        Self {
            settings,
            source,
            run: None,
            bars: Vec::new(),
            title: String::new(),
            selected: 0,
            status,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.select(-1),
            KeyCode::Right => self.select(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.bars.len().saturating_sub(1),
            KeyCode::Char('r') => self.refresh(),
            _ => {}
        }
        false
    }

    fn select(&mut self, delta: isize) {
        if self.bars.is_empty() {
            return;
        }
        let last = self.bars.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Run the pipeline again; failures stay on screen instead of exiting.
    fn refresh(&mut self) {
        match pipeline::run(&self.settings, self.source.as_ref()) {
            Ok(run) => {
                self.bars = run.chart_bars();
                self.title = run.chart_title(&self.settings);
                self.selected = self.selected.min(self.bars.len().saturating_sub(1));
                self.status = format!("{} records, {} categories", run.record_count, run.table.category_count());
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let params = &self.settings.params;
        let source = match &self.settings.source {
            SourceKind::Fpds => "FPDS".to_string(),
            SourceKind::File(path) => path.display().to_string(),
        };
        let total = self
            .run
            .as_ref()
            .map(|r| format_usd(r.table.grand_total()))
            .unwrap_or_else(|| "-".to_string());

        let lines = vec![
            Line::from(vec![
                Span::styled("psc", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" - {} contract obligations", self.settings.agency.long_form())),
            ]),
            Line::from(Span::styled(
                format!(
                    "PSC: {} | FY: {} | dept: {} | source: {source} | total: {total}",
                    params.category_prefix(),
                    params.fiscal_year(),
                    params.department_code(),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);

        self.draw_narrative(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_narrative(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = self
            .run
            .as_ref()
            .map(|r| r.narrative.as_str())
            .unwrap_or("Waiting for data...");
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Obligations by PSC").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if self.run.is_none() {
            let msg = Paragraph::new("Waiting for data...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let widget = ObligationChart {
            spec: BarChartSpec {
                title: &self.title,
                bars: &self.bars,
                selected: Some(self.selected),
                style: BarStyle::TERMINAL,
            },
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "←/→ select  r refresh  q quit";
        let mut spans = vec![Span::styled(help, Style::default().fg(Color::Gray))];
        if let Some(row) = self.bars.get(self.selected) {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{}: {}", row.label, format_usd(row.total_obligation)),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(&self.status, Style::default().fg(Color::Yellow)));

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
