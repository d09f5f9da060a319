//! Breakdown widget - grouped casual/registered bars for long-form rollups
//!
//! Shared by the Seasonal and Weekday tabs: both render the same long-form
//! (category, ride type, count) rows, only the category labels differ.

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
use crate::types::{BreakdownRow, RideType};

/// Maximum content width (consistent with the other views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Bar width for the count column
const BAR_WIDTH: usize = 30;

/// Category label column width (fits "Wednesday")
const CATEGORY_WIDTH: usize = 10;

/// Breakdown view widget over long-form rollup rows
pub struct BreakdownView<'a, C> {
    title: &'static str,
    rows: &'a [BreakdownRow<C>],
    /// Category label formatter (chrono's Weekday displays as "Mon", not "Monday")
    label: fn(C) -> String,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a, C: Copy> BreakdownView<'a, C> {
    pub fn new(
        title: &'static str,
        rows: &'a [BreakdownRow<C>],
        label: fn(C) -> String,
        theme: Theme,
    ) -> Self {
        Self {
            title,
            rows,
            label,
            selected_tab: Tab::Seasonal,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl<C: Copy> Widget for BreakdownView<'_, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let row_count = self.rows.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),         // Top padding
            Constraint::Length(1),         // Tabs
            Constraint::Length(1),         // Separator
            Constraint::Length(1),         // Title
            Constraint::Length(1),         // Blank
            Constraint::Length(row_count), // Bars
            Constraint::Length(1),         // Separator
            Constraint::Length(1),         // Keybindings
            Constraint::Min(0),            // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_title(chunks[3], buf);
        self.render_bars(chunks[5], buf);
        self.render_separator(chunks[6], buf);
        self.render_keybindings(chunks[7], buf);
    }
}

impl<C: Copy> BreakdownView<'_, C> {
    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let title = Paragraph::new(Line::from(Span::styled(
            self.title,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(area, buf);
    }

    fn render_bars(&self, area: Rect, buf: &mut Buffer) {
        if self.rows.is_empty() {
            let msg = "no rides in the selected range";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            buf.set_string(x, area.y, msg, Style::default().fg(self.theme.muted()));
            return;
        }

        let max_count = self.rows.iter().map(|r| r.count_rides).max().unwrap_or(0);

        // category + gap + type(10) + gap + bar + gap + count(12)
        let line_width = (CATEGORY_WIDTH + 2 + 10 + 2 + BAR_WIDTH + 2 + 12) as u16;
        let x = area.x + area.width.saturating_sub(line_width) / 2;

        for (i, row) in self.rows.iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            // Category label only on the first row of each pair
            let category = if row.ride_type == RideType::Casual {
                format!("{:<width$}", (self.label)(row.category), width = CATEGORY_WIDTH)
            } else {
                " ".repeat(CATEGORY_WIDTH)
            };

            let series_color = match row.ride_type {
                RideType::Casual => self.theme.casual(),
                RideType::Registered => self.theme.registered(),
            };

            let bar = format_usage_bar(row.count_rides, max_count, BAR_WIDTH);
            let line = Line::from(vec![
                Span::styled(category, Style::default().fg(self.theme.text())),
                Span::raw("  "),
                Span::styled(
                    format!("{:<10}", row.ride_type.label()),
                    Style::default().fg(series_color),
                ),
                Span::raw("  "),
                Span::styled(bar, Style::default().fg(series_color)),
                Span::raw("  "),
                Span::styled(
                    format!("{:>12}", format_number(row.count_rides)),
                    Style::default().fg(self.theme.text()),
                ),
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
