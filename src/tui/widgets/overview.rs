//! Overview widget - summary metric cards and the active date range

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::{DateRange, RideTotals};

/// Format a number with thousand separators (e.g., 1234567 -> "1,234,567")
pub fn format_number(n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let s = n.to_string();
    let len = s.len();
    let mut result = String::with_capacity(len + len / 3);

    // Digits are ASCII, so byte indexing is safe
    for (i, ch) in s.bytes().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }

    result
}

/// Maximum content width (consistent with the other views)
const MAX_CONTENT_WIDTH: u16 = 170;

/// Card dimensions
const CARD_WIDTH: u16 = 28;
const CARD_HEIGHT: u16 = 5;

/// Overview widget
pub struct Overview<'a> {
    totals: &'a RideTotals,
    range: DateRange,
    bounds: DateRange,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> Overview<'a> {
    pub fn new(totals: &'a RideTotals, range: DateRange, bounds: DateRange, theme: Theme) -> Self {
        Self {
            totals,
            range,
            bounds,
            selected_tab: Tab::Overview,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for Overview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Apply max width constraint and center the content
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let chunks = Layout::vertical([
            Constraint::Length(1),           // Top padding
            Constraint::Length(1),           // Tabs
            Constraint::Length(1),           // Separator
            Constraint::Length(1),           // Title
            Constraint::Length(1),           // Active range
            Constraint::Length(1),           // Blank
            Constraint::Length(CARD_HEIGHT), // Metric cards
            Constraint::Length(1),           // Separator
            Constraint::Length(1),           // Keybindings
            Constraint::Min(0),              // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_title(chunks[3], buf);
        self.render_range(chunks[4], buf);
        self.render_cards(chunks[6], buf);
        self.render_separator(chunks[7], buf);
        self.render_keybindings(chunks[8], buf);
    }
}

impl Overview<'_> {
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
            "Bike-share Ride Summary",
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(area, buf);
    }

    fn render_range(&self, area: Rect, buf: &mut Buffer) {
        let filtered = self.range != self.bounds;
        let mut spans = vec![Span::styled(
            self.range.to_string(),
            Style::default().fg(self.theme.date()),
        )];
        if filtered {
            spans.push(Span::styled(
                "  (filtered)",
                Style::default().fg(self.theme.muted()),
            ));
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn build_cards(&self) -> Vec<MetricCard> {
        vec![
            MetricCard {
                title: "Total Rides",
                value: format_number(self.totals.total_rides),
                color: self.theme.accent(),
            },
            MetricCard {
                title: "Casual Rides",
                value: format_number(self.totals.casual_rides),
                color: self.theme.casual(),
            },
            MetricCard {
                title: "Registered Rides",
                value: format_number(self.totals.registered_rides),
                color: self.theme.registered(),
            },
        ]
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let cards = self.build_cards();
        let cols = cards.len() as u16;

        let total_cards_width = cols * CARD_WIDTH + (cols - 1) * 2; // 2 = spacing
        let start_x = area.x + (area.width.saturating_sub(total_cards_width)) / 2;

        for (i, card) in cards.iter().enumerate() {
            let card_area = Rect {
                x: start_x + (i as u16) * (CARD_WIDTH + 2),
                y: area.y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT.min(area.height),
            };
            if card_area.x + card_area.width > area.x + area.width {
                break;
            }
            self.render_card(card_area, buf, card);
        }
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer, card: &MetricCard) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(card.color));
        block.render(area, buf);

        // Title (centered, line 1 inside border)
        if area.height > 2 {
            let title_y = area.y + 1;
            let title_x = area.x + (area.width.saturating_sub(card.title.len() as u16)) / 2;
            buf.set_string(title_x, title_y, card.title, Style::default().fg(card.color));
        }

        // Value (centered, line 3 inside border)
        if area.height > 3 {
            let value_y = area.y + 3;
            let value_x = area.x + (area.width.saturating_sub(card.value.len() as u16)) / 2;
            buf.set_string(
                value_x,
                value_y,
                &card.value,
                Style::default()
                    .fg(card.color)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }

    fn render_keybindings(&self, area: Rect, buf: &mut Buffer) {
        let bindings = Paragraph::new(Line::from(vec![
            Span::styled("Tab", Style::default().fg(self.theme.accent())),
            Span::styled(": Switch view", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("[ ] { }", Style::default().fg(self.theme.accent())),
            Span::styled(": Adjust range", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("r", Style::default().fg(self.theme.accent())),
            Span::styled(": Reset", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("?", Style::default().fg(self.theme.accent())),
            Span::styled(": Help", Style::default().fg(self.theme.muted())),
            Span::raw("  "),
            Span::styled("q", Style::default().fg(self.theme.accent())),
            Span::styled(": Quit", Style::default().fg(self.theme.muted())),
        ]))
        .alignment(Alignment::Center);

        bindings.render(area, buf);
    }
}

/// Internal card representation
struct MetricCard {
    title: &'static str,
    value: String,
    color: Color,
}
