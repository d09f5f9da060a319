use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use crate::services::{load_dataset, Aggregator, Dataset};
use crate::types::{
    weekday_label, BreakdownRow, DateRange, HourlySummary, MonthlySummary, RideTotals,
};

/// Terminal dashboard for bike-share ride data
#[derive(Parser)]
#[command(name = "bikedash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Daily ride data CSV
    #[arg(long, default_value = "day_data.csv")]
    day_file: PathBuf,

    /// Hourly ride data CSV
    #[arg(long, default_value = "hour_data.csv")]
    hour_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive dashboard (default)
    Tui,

    /// Print total, casual and registered ride counts
    Summary {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly ride rollup
    Monthly {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Seasonal ride rollup (long form)
    Seasonal {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Weekday ride rollup (long form)
    Weekday {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hour-of-day ride rollup
    Hourly {
        #[command(flatten)]
        range: RangeArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Optional inclusive date bounds shared by all report commands.
#[derive(Args)]
struct RangeArgs {
    /// Start date (YYYY-MM-DD), defaults to the first date on file
    #[arg(long)]
    from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), defaults to the last date on file
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    /// Resolve against the dataset's full span, rejecting swapped bounds.
    fn resolve(&self, dataset: &Dataset) -> anyhow::Result<DateRange> {
        let full = dataset
            .full_range()
            .context("daily table has no rows to derive a date range from")?;
        let start = self.from.unwrap_or(full.start);
        let end = self.to.unwrap_or(full.end);
        if start > end {
            bail!("--from {start} is after --to {end}");
        }
        Ok(DateRange::new(start, end))
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let dataset = load_dataset(&self.day_file, &self.hour_file).with_context(|| {
            format!(
                "loading ride data from {} and {}",
                self.day_file.display(),
                self.hour_file.display()
            )
        })?;

        match self.command {
            None | Some(Commands::Tui) => crate::tui::app::run(dataset),
            Some(Commands::Summary { range, json }) => {
                let range = range.resolve(&dataset)?;
                let daily = Aggregator::filter_daily(&dataset.daily, range);
                let totals = Aggregator::totals(&daily);
                if json {
                    println!("{}", serde_json::to_string_pretty(&totals)?);
                } else {
                    print!("{}", render_summary(range, &totals));
                }
                Ok(())
            }
            Some(Commands::Monthly { range, json }) => {
                let range = range.resolve(&dataset)?;
                let daily = Aggregator::filter_daily(&dataset.daily, range);
                let monthly = Aggregator::monthly(&daily);
                if json {
                    let rows: Vec<_> = monthly
                        .iter()
                        .map(|s| {
                            json!({
                                "year_month": s.label(),
                                "casual_rides": s.casual_rides,
                                "registered_rides": s.registered_rides,
                                "total_rides": s.total_rides,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    print!("{}", render_monthly(&monthly));
                }
                Ok(())
            }
            Some(Commands::Seasonal { range, json }) => {
                let range = range.resolve(&dataset)?;
                let daily = Aggregator::filter_daily(&dataset.daily, range);
                let rows = Aggregator::seasonal(&daily);
                if json {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|r| {
                            json!({
                                "season": r.category.to_string(),
                                "ride_type": r.ride_type.label(),
                                "count_rides": r.count_rides,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    print!(
                        "{}",
                        render_breakdown("Season", &rows, |c| c.to_string())
                    );
                }
                Ok(())
            }
            Some(Commands::Weekday { range, json }) => {
                let range = range.resolve(&dataset)?;
                let daily = Aggregator::filter_daily(&dataset.daily, range);
                let rows = Aggregator::weekday(&daily);
                if json {
                    let rows: Vec<_> = rows
                        .iter()
                        .map(|r| {
                            json!({
                                "day_of_week": weekday_label(r.category),
                                "ride_type": r.ride_type.label(),
                                "count_rides": r.count_rides,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&rows)?);
                } else {
                    print!(
                        "{}",
                        render_breakdown("Day", &rows, |c| weekday_label(*c).to_string())
                    );
                }
                Ok(())
            }
            Some(Commands::Hourly { range, json }) => {
                let range = range.resolve(&dataset)?;
                let hourly = Aggregator::filter_hourly(&dataset.hourly, range);
                let summaries = Aggregator::hourly(&hourly);
                if json {
                    println!("{}", serde_json::to_string_pretty(&summaries)?);
                } else {
                    print!("{}", render_hourly(&summaries));
                }
                Ok(())
            }
        }
    }
}

fn render_summary(range: DateRange, totals: &RideTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Range: {range}");
    let _ = writeln!(out, "Total rides:      {:>12}", totals.total_rides);
    let _ = writeln!(out, "Casual rides:     {:>12}", totals.casual_rides);
    let _ = writeln!(out, "Registered rides: {:>12}", totals.registered_rides);
    out
}

fn render_monthly(rows: &[MonthlySummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<8} {:>12} {:>12} {:>12}",
        "Month", "Casual", "Registered", "Total"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<8} {:>12} {:>12} {:>12}",
            row.label(),
            row.casual_rides,
            row.registered_rides,
            row.total_rides
        );
    }
    out
}

fn render_breakdown<C>(
    header: &str,
    rows: &[BreakdownRow<C>],
    label: impl Fn(&C) -> String,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:<12} {:>12}", header, "Type", "Rides");
    for row in rows {
        let _ = writeln!(
            out,
            "{:<10} {:<12} {:>12}",
            label(&row.category),
            row.ride_type.label(),
            row.count_rides
        );
    }
    out
}

fn render_hourly(rows: &[HourlySummary]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<5} {:>12} {:>12} {:>12}",
        "Hour", "Casual", "Registered", "Total"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<5} {:>12} {:>12} {:>12}",
            format!("{:02}", row.hour),
            row.casual_rides,
            row.registered_rides,
            row.total_rides
        );
    }
    out
}
