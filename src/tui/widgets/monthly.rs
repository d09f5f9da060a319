//! Monthly view widget - scrollable table of per-month totals with usage bars

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::overview::format_number;
use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::MonthlySummary;

/// Maximum content width (consistent with the other views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Visible rows for scrolling (excluding header)
pub const VISIBLE_ROWS: usize = 15;

/// Bar width for the usage column
const BAR_WIDTH: usize = 18;

/// Format a usage bar scaled against the largest month.
/// Example: rides=500, max=1000, width=8 → "▓▓▓▓░░░░"
pub fn format_usage_bar(rides: u64, max: u64, width: usize) -> String {
    if max == 0 || width == 0 {
        return "░".repeat(width);
    }
    let ratio = rides as f64 / max as f64;
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width.saturating_sub(filled);
    format!("{}{}", "▓".repeat(filled), "░".repeat(empty))
}

/// Maximum valid scroll offset for a row count.
pub fn max_scroll_offset(count: usize) -> usize {
    count.saturating_sub(VISIBLE_ROWS)
}

/// Monthly view widget
pub struct MonthlyView<'a> {
    rows: &'a [MonthlySummary],
    scroll_offset: usize,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> MonthlyView<'a> {
    pub fn new(rows: &'a [MonthlySummary], scroll_offset: usize, theme: Theme) -> Self {
        Self {
            rows,
            scroll_offset,
            selected_tab: Tab::Monthly,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for MonthlyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let visible_rows = self.rows.len().min(VISIBLE_ROWS) as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),            // Top padding
            Constraint::Length(1),            // Tabs
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Header
            Constraint::Length(visible_rows), // Month rows
            Constraint::Length(1),            // Separator
            Constraint::Length(1),            // Keybindings
            Constraint::Min(0),               // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_header(chunks[3], buf);
        self.render_rows(chunks[4], buf);
        self.render_separator(chunks[5], buf);
        self.render_keybindings(chunks[6], buf);
    }
}

impl MonthlyView<'_> {
    /// Table width: month(8) + 3×count(12) + bar + column gaps
    fn table_width() -> u16 {
        (8 + 12 + 12 + 12 + BAR_WIDTH + 4 * 2) as u16
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let x = area.x + area.width.saturating_sub(Self::table_width()) / 2;
        let header = format!(
            "{:<8}  {:>12}  {:>12}  {:>12}  {:<width$}",
            "Month",
            "Casual",
            "Registered",
            "Total",
            "Usage",
            width = BAR_WIDTH
        );
        buf.set_string(
            x,
            area.y,
            &header,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        if self.rows.is_empty() {
            let msg = "no rides in the selected range";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            buf.set_string(x, area.y, msg, Style::default().fg(self.theme.muted()));
            return;
        }

        let max_total = self.rows.iter().map(|r| r.total_rides).max().unwrap_or(0);
        let x = area.x + area.width.saturating_sub(Self::table_width()) / 2;

        let visible = self
            .rows
            .iter()
            .skip(self.scroll_offset)
            .take(VISIBLE_ROWS);

        for (i, row) in visible.enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let bar = format_usage_bar(row.total_rides, max_total, BAR_WIDTH);
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<8}", row.label()),
                    Style::default().fg(self.theme.date()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>12}", format_number(row.casual_rides)),
                    Style::default().fg(self.theme.casual()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>12}", format_number(row.registered_rides)),
                    Style::default().fg(self.theme.registered()),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:>12}", format_number(row.total_rides)),
                    Style::default().fg(self.theme.text()),
                ),
                Span::raw("  "),
                Span::styled(bar, Style::default().fg(self.theme.bar())),
            ]);
            buf.set_line(x, y, &line, area.width);
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("↑↓/jk", Style::default().fg(self.theme.accent())),
            Span::styled(": Scroll", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("[ ] { }", Style::default().fg(self.theme.accent())),
            Span::styled(": Adjust range", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("Tab", Style::default().fg(self.theme.accent())),
            Span::styled(": Switch view", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}
