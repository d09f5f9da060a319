//! Application state and event loop

use std::time::Duration;

use chrono::{Days, Weekday};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};

use crate::services::{Aggregator, Dataset};
use crate::types::{
    weekday_label, BreakdownRow, DateRange, HourlySummary, MonthlySummary, RideTotals, Season,
};

use super::theme::Theme;
use super::widgets::{
    breakdown::BreakdownView,
    help::HelpPopup,
    hourly::HourlyView,
    monthly::{self, MonthlyView},
    overview::Overview,
    tabs::Tab,
};

/// All rollups for the active date range, recomputed on every filter change.
pub struct DashboardData {
    pub totals: RideTotals,
    pub monthly: Vec<MonthlySummary>,
    pub seasonal: Vec<BreakdownRow<Season>>,
    pub weekday: Vec<BreakdownRow<Weekday>>,
    pub hourly: Vec<HourlySummary>,
}

impl DashboardData {
    /// Filter both tables to the range and compute every rollup.
    pub fn compute(dataset: &Dataset, range: DateRange) -> Self {
        let daily = Aggregator::filter_daily(&dataset.daily, range);
        let hourly_records = Aggregator::filter_hourly(&dataset.hourly, range);

        Self {
            totals: Aggregator::totals(&daily),
            monthly: Aggregator::monthly(&daily),
            seasonal: Aggregator::seasonal(&daily),
            weekday: Aggregator::weekday(&daily),
            hourly: Aggregator::hourly(&hourly_records),
        }
    }
}

/// Main application
pub struct App {
    dataset: Dataset,
    /// Full span of the loaded data, the limits for range adjustment
    bounds: DateRange,
    /// Active filter range
    range: DateRange,
    data: DashboardData,
    current_tab: Tab,
    monthly_scroll: usize,
    show_help: bool,
    should_quit: bool,
    theme: Theme,
}

impl App {
    /// Create the app over a loaded dataset. Returns None when the daily
    /// table has no rows to derive date bounds from.
    pub fn new(dataset: Dataset, theme: Theme) -> Option<Self> {
        let bounds = dataset.full_range()?;
        let data = DashboardData::compute(&dataset, bounds);
        Some(Self {
            dataset,
            bounds,
            range: bounds,
            data,
            current_tab: Tab::default(),
            monthly_scroll: 0,
            show_help: false,
            should_quit: false,
            theme,
        })
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Tab => {
                        self.current_tab = self.current_tab.next();
                    }
                    KeyCode::BackTab => {
                        self.current_tab = self.current_tab.prev();
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.scroll_up();
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        self.scroll_down();
                    }
                    KeyCode::Char(c @ '1'..='5') => {
                        if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                            self.current_tab = tab;
                        }
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Char('[') => {
                        self.shift_start(-1);
                    }
                    KeyCode::Char(']') => {
                        self.shift_start(1);
                    }
                    KeyCode::Char('{') => {
                        self.shift_end(-1);
                    }
                    KeyCode::Char('}') => {
                        self.shift_end(1);
                    }
                    KeyCode::Char('r') => {
                        self.reset_range();
                    }
                    _ => {}
                }
            }
        }
    }

    /// Move the range start by one day, clamped to the data bounds and
    /// never past the range end.
    fn shift_start(&mut self, delta: i64) {
        let shifted = shift_date(self.range.start, delta);
        let clamped = shifted.clamp(self.bounds.start, self.range.end);
        if clamped != self.range.start {
            self.range.start = clamped;
            self.refresh();
        }
    }

    /// Move the range end by one day, clamped likewise.
    fn shift_end(&mut self, delta: i64) {
        let shifted = shift_date(self.range.end, delta);
        let clamped = shifted.clamp(self.range.start, self.bounds.end);
        if clamped != self.range.end {
            self.range.end = clamped;
            self.refresh();
        }
    }

    /// Reset the filter to the full data span.
    fn reset_range(&mut self) {
        if self.range != self.bounds {
            self.range = self.bounds;
            self.refresh();
        }
    }

    /// Recompute all rollups after a range change.
    fn refresh(&mut self) {
        self.data = DashboardData::compute(&self.dataset, self.range);
        self.monthly_scroll = self
            .monthly_scroll
            .min(monthly::max_scroll_offset(self.data.monthly.len()));
    }

    fn scroll_up(&mut self) {
        if self.current_tab == Tab::Monthly {
            self.monthly_scroll = self.monthly_scroll.saturating_sub(1);
        }
    }

    fn scroll_down(&mut self) {
        if self.current_tab == Tab::Monthly {
            let max = monthly::max_scroll_offset(self.data.monthly.len());
            self.monthly_scroll = (self.monthly_scroll + 1).min(max);
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

/// Shift a date by a signed number of days, saturating at the calendar limits.
fn shift_date(date: chrono::NaiveDate, delta: i64) -> chrono::NaiveDate {
    if delta >= 0 {
        date.checked_add_days(Days::new(delta as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new((-delta) as u64))
            .unwrap_or(date)
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.current_tab {
            Tab::Overview => {
                Overview::new(&self.data.totals, self.range, self.bounds, self.theme)
                    .with_tab(self.current_tab)
                    .render(area, buf);
            }
            Tab::Monthly => {
                MonthlyView::new(&self.data.monthly, self.monthly_scroll, self.theme)
                    .with_tab(self.current_tab)
                    .render(area, buf);
            }
            Tab::Seasonal => {
                BreakdownView::new(
                    "Rides by Season",
                    &self.data.seasonal,
                    |c| c.to_string(),
                    self.theme,
                )
                .with_tab(self.current_tab)
                .render(area, buf);
            }
            Tab::Weekday => {
                BreakdownView::new(
                    "Rides by Day of Week",
                    &self.data.weekday,
                    |c| weekday_label(c).to_string(),
                    self.theme,
                )
                .with_tab(self.current_tab)
                .render(area, buf);
            }
            Tab::Hourly => {
                HourlyView::new(&self.data.hourly, self.theme)
                    .with_tab(self.current_tab)
                    .render(area, buf);
            }
        }

        // Render help popup overlay if active
        if self.show_help {
            let popup_area = HelpPopup::centered_area(area);
            HelpPopup::new(self.theme).render(popup_area, buf);
        }
    }
}

/// Run the TUI application over a loaded dataset
pub fn run(dataset: Dataset) -> anyhow::Result<()> {
    // Background luma query must happen before ratatui takes the terminal
    let theme = Theme::detect();

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, dataset, theme);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, dataset: Dataset, theme: Theme) -> anyhow::Result<()> {
    let Some(mut app) = App::new(dataset, theme) else {
        anyhow::bail!("no daily records to display");
    };

    while !app.should_quit() {
        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
