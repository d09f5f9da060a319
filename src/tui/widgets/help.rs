//! Help popup widget - displays keyboard shortcuts

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::tui::theme::Theme;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width and height of the help popup
const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 19;

/// Help popup widget showing keyboard shortcuts
pub struct HelpPopup {
    theme: Theme,
}

impl HelpPopup {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Calculate centered popup area
    pub fn centered_area(area: Rect) -> Rect {
        let x = area.x + (area.width.saturating_sub(POPUP_WIDTH)) / 2;
        let y = area.y + (area.height.saturating_sub(POPUP_HEIGHT)) / 2;
        Rect {
            x,
            y,
            width: POPUP_WIDTH.min(area.width),
            height: POPUP_HEIGHT.min(area.height),
        }
    }
}

impl Default for HelpPopup {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Clear the area first (for overlay effect)
        Clear.render(area, buf);

        let title = format!(" bikedash v{} ", VERSION);
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent()));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::vertical([
            Constraint::Length(1), // [0] Padding
            Constraint::Length(1), // [1] Navigation header
            Constraint::Length(1), // [2] Separator
            Constraint::Length(1), // [3] Tab/Shift+Tab
            Constraint::Length(1), // [4] 1-5
            Constraint::Length(1), // [5] Up/Down
            Constraint::Length(1), // [6] Padding
            Constraint::Length(1), // [7] Date range header
            Constraint::Length(1), // [8] Separator
            Constraint::Length(1), // [9] [ / ]
            Constraint::Length(1), // [10] { / }
            Constraint::Length(1), // [11] r
            Constraint::Length(1), // [12] Padding
            Constraint::Length(1), // [13] General header
            Constraint::Length(1), // [14] Separator
            Constraint::Length(1), // [15] q/Esc
            Constraint::Length(1), // [16] Close hint
            Constraint::Min(0),    // Remaining
        ])
        .split(inner);

        let sep = "─".repeat(inner.width as usize);

        render_section_header(chunks[1], buf, "Navigation", self.theme);
        buf.set_string(
            chunks[2].x,
            chunks[2].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );
        render_keybinding(chunks[3], buf, "Tab / Shift+Tab", "Switch view", self.theme);
        render_keybinding(chunks[4], buf, "1-5", "Jump to view", self.theme);
        render_keybinding(
            chunks[5],
            buf,
            "Up/Down or j/k",
            "Scroll (Monthly)",
            self.theme,
        );

        render_section_header(chunks[7], buf, "Date range", self.theme);
        buf.set_string(
            chunks[8].x,
            chunks[8].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );
        render_keybinding(chunks[9], buf, "[ / ]", "Shift start date", self.theme);
        render_keybinding(chunks[10], buf, "{ / }", "Shift end date", self.theme);
        render_keybinding(chunks[11], buf, "r", "Reset to full range", self.theme);

        render_section_header(chunks[13], buf, "General", self.theme);
        buf.set_string(
            chunks[14].x,
            chunks[14].y,
            &sep,
            Style::default().fg(self.theme.muted()),
        );
        render_keybinding(chunks[15], buf, "q / Esc", "Quit", self.theme);

        let hint = Line::from(vec![Span::styled(
            "Press ? to close",
            Style::default().fg(self.theme.muted()),
        )]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(chunks[16], buf);
    }
}

fn render_section_header(area: Rect, buf: &mut Buffer, label: &str, theme: Theme) {
    let header = Line::from(vec![Span::styled(
        label.to_string(),
        Style::default()
            .fg(theme.date())
            .add_modifier(Modifier::BOLD),
    )]);
    Paragraph::new(header)
        .alignment(Alignment::Left)
        .render(area, buf);
}

/// Render a single keybinding line
fn render_keybinding(area: Rect, buf: &mut Buffer, key: &str, desc: &str, theme: Theme) {
    let line = Line::from(vec![
        Span::styled(
            format!("  {:<18}", key),
            Style::default().fg(theme.accent()),
        ),
        Span::styled(desc, Style::default().fg(theme.text())),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Left)
        .render(area, buf);
}
