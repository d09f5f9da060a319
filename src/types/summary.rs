//! Derived summary tables produced by the aggregator
//!
//! All of these are pure functions of (input table, active date range):
//! recomputed on every filter change, never mutated in place.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Rider category for long-form rollup rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RideType {
    Casual,
    Registered,
}

impl RideType {
    /// Melt order: casual rows come before registered rows within a group.
    pub const BOTH: [RideType; 2] = [RideType::Casual, RideType::Registered];

    pub fn label(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Registered => "Registered",
        }
    }
}

impl fmt::Display for RideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summed counts for one group of a rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GroupTotals {
    pub casual_rides: u64,
    pub registered_rides: u64,
    pub total_rides: u64,
}

impl GroupTotals {
    pub fn add(&mut self, casual: u64, registered: u64, total: u64) {
        self.casual_rides = self.casual_rides.saturating_add(casual);
        self.registered_rides = self.registered_rides.saturating_add(registered);
        self.total_rides = self.total_rides.saturating_add(total);
    }
}

/// One calendar month of summed daily counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// First day of the month (rows belong to the month containing their date).
    pub month: NaiveDate,
    pub casual_rides: u64,
    pub registered_rides: u64,
    pub total_rides: u64,
}

impl MonthlySummary {
    /// Human-readable "Mon-YY" label, e.g. "Jan-24".
    pub fn label(&self) -> String {
        self.month.format("%b-%y").to_string()
    }
}

/// One long-form row of a seasonal or weekday rollup:
/// a (category, ride type) pair with its summed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownRow<C> {
    pub category: C,
    pub ride_type: RideType,
    pub count_rides: u64,
}

/// One hour-of-day of summed hourly counts (stays wide, no melt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlySummary {
    pub hour: u32,
    pub casual_rides: u64,
    pub registered_rides: u64,
    pub total_rides: u64,
}

/// Scalar totals over the filtered daily table, shown as summary metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RideTotals {
    pub casual_rides: u64,
    pub registered_rides: u64,
    pub total_rides: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_summary_label() {
        let summary = MonthlySummary {
            month: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            casual_rides: 10,
            registered_rides: 20,
            total_rides: 30,
        };
        assert_eq!(summary.label(), "Jan-24");
    }

    #[test]
    fn test_monthly_summary_label_two_digit_year() {
        let summary = MonthlySummary {
            month: NaiveDate::from_ymd_opt(2011, 12, 1).unwrap(),
            casual_rides: 0,
            registered_rides: 0,
            total_rides: 0,
        };
        assert_eq!(summary.label(), "Dec-11");
    }

    #[test]
    fn test_group_totals_add() {
        let mut totals = GroupTotals::default();
        totals.add(10, 20, 30);
        totals.add(5, 15, 20);
        assert_eq!(totals.casual_rides, 15);
        assert_eq!(totals.registered_rides, 35);
        assert_eq!(totals.total_rides, 50);
    }

    #[test]
    fn test_group_totals_add_saturates() {
        let mut totals = GroupTotals::default();
        totals.add(u64::MAX, 0, u64::MAX);
        totals.add(1, 0, 1);
        assert_eq!(totals.casual_rides, u64::MAX);
        assert_eq!(totals.total_rides, u64::MAX);
    }

    #[test]
    fn test_ride_type_melt_order() {
        assert_eq!(RideType::BOTH, [RideType::Casual, RideType::Registered]);
        assert_eq!(RideType::Casual.to_string(), "Casual");
        assert_eq!(RideType::Registered.label(), "Registered");
    }

    #[test]
    fn test_ride_totals_default_is_zero() {
        let totals = RideTotals::default();
        assert_eq!(totals.casual_rides, 0);
        assert_eq!(totals.registered_rides, 0);
        assert_eq!(totals.total_rides, 0);
    }
}
