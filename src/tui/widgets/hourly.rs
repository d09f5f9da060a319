//! Hourly view widget - table of per-hour totals with usage bars

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::monthly::format_usage_bar;
use super::overview::format_number;
use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::HourlySummary;

/// Maximum content width (consistent with the other views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Bar width for the usage column
const BAR_WIDTH: usize = 18;

/// Hourly view widget
pub struct HourlyView<'a> {
    rows: &'a [HourlySummary],
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> HourlyView<'a> {
    pub fn new(rows: &'a [HourlySummary], theme: Theme) -> Self {
        Self {
            rows,
            selected_tab: Tab::Hourly,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for HourlyView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        // At most 24 rows, one per hour of day
        let row_count = self.rows.len().max(1) as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),         // Top padding
            Constraint::Length(1),         // Tabs
            Constraint::Length(1),         // Separator
            Constraint::Length(1),         // Header
            Constraint::Length(row_count), // Hour rows
            Constraint::Length(1),         // Separator
            Constraint::Length(1),         // Keybindings
            Constraint::Min(0),            // Remaining space
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

impl HourlyView<'_> {
    /// Table width: hour(5) + 3×count(12) + bar + column gaps
    fn table_width() -> u16 {
        (5 + 12 + 12 + 12 + BAR_WIDTH + 4 * 2) as u16
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
            "{:<5}  {:>12}  {:>12}  {:>12}  {:<width$}",
            "Hour",
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

        for (i, row) in self.rows.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let bar = format_usage_bar(row.total_rides, max_total, BAR_WIDTH);
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>2}:00", row.hour),
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
            Span::styled("[ ] { }", Style::default().fg(self.theme.accent())),
            Span::styled(": Adjust range", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("r", Style::default().fg(self.theme.accent())),
            Span::styled(": Reset", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("Tab", Style::default().fg(self.theme.accent())),
            Span::styled(": Switch view", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}
