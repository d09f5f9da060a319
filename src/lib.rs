//! bikedash: terminal dashboard for bike-share ride data
//!
//! Loads two CSV tables (daily and hourly ride counts), filters them by an
//! inclusive date range, and rolls them up by month, season, weekday and
//! hour-of-day for display in a TUI or on the command line.

pub mod cli;
pub mod services;
pub mod tui;
pub mod types;
