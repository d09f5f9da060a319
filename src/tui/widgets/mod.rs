//! TUI widgets

pub mod breakdown;
pub mod help;
pub mod hourly;
pub mod monthly;
pub mod overview;
pub mod tabs;
