//! Aggregator service for computing ride rollups
//!
//! Every operation is a pure function of a pre-filtered record slice:
//! deterministic, side-effect-free, and total on well-formed input
//! (an empty slice yields an empty result, never an error).

use crate::types::{
    BreakdownRow, DailyRecord, DateRange, GroupTotals, HourlyRecord, HourlySummary,
    MonthlySummary, RideTotals, RideType, Season, WEEK_ORDER,
};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashMap;

/// Aggregator for computing grouped ride summaries
pub struct Aggregator;

impl Aggregator {
    /// Select daily rows whose date falls within the inclusive range.
    pub fn filter_daily(records: &[DailyRecord], range: DateRange) -> Vec<DailyRecord> {
        records
            .iter()
            .filter(|r| range.contains(r.date))
            .cloned()
            .collect()
    }

    /// Select hourly rows whose date falls within the inclusive range.
    pub fn filter_hourly(records: &[HourlyRecord], range: DateRange) -> Vec<HourlyRecord> {
        records
            .iter()
            .filter(|r| range.contains(r.date))
            .cloned()
            .collect()
    }

    /// Group daily records by calendar month and sum the three count fields.
    /// Result is in chronological order; an empty input yields an empty vec.
    pub fn monthly(records: &[DailyRecord]) -> Vec<MonthlySummary> {
        let mut months: HashMap<NaiveDate, GroupTotals> = HashMap::new();

        for record in records {
            // A row belongs to the month containing its date.
            let month = NaiveDate::from_ymd_opt(record.date.year(), record.date.month(), 1)
                .expect("first of month is a valid date");
            months.entry(month).or_default().add(
                record.casual_count,
                record.registered_count,
                record.total_count,
            );
        }

        let mut result: Vec<MonthlySummary> = months
            .into_iter()
            .map(|(month, totals)| MonthlySummary {
                month,
                casual_rides: totals.casual_rides,
                registered_rides: totals.registered_rides,
                total_rides: totals.total_rides,
            })
            .collect();
        result.sort_by_key(|s| s.month);
        result
    }

    /// Group daily records by season, in canonical season order.
    /// Seasons absent from the input are omitted (no zero-filling).
    pub fn seasonal_wide(records: &[DailyRecord]) -> Vec<(Season, GroupTotals)> {
        let mut map: HashMap<Season, GroupTotals> = HashMap::new();
        for record in records {
            map.entry(record.season).or_default().add(
                record.casual_count,
                record.registered_count,
                record.total_count,
            );
        }
        Season::ORDER
            .iter()
            .filter_map(|season| map.remove(season).map(|totals| (*season, totals)))
            .collect()
    }

    /// Seasonal rollup in long form: one row per (season, ride type),
    /// ordered Spring, Summer, Fall, Winter.
    pub fn seasonal(records: &[DailyRecord]) -> Vec<BreakdownRow<Season>> {
        Self::melt(Self::seasonal_wide(records))
    }

    /// Group daily records by day of week, Monday through Sunday.
    /// Absent weekdays are omitted.
    pub fn weekday_wide(records: &[DailyRecord]) -> Vec<(Weekday, GroupTotals)> {
        let mut map: HashMap<Weekday, GroupTotals> = HashMap::new();
        for record in records {
            map.entry(record.day_of_week).or_default().add(
                record.casual_count,
                record.registered_count,
                record.total_count,
            );
        }
        WEEK_ORDER
            .iter()
            .filter_map(|day| map.remove(day).map(|totals| (*day, totals)))
            .collect()
    }

    /// Weekday rollup in long form: one row per (weekday, ride type),
    /// ordered Monday through Sunday.
    pub fn weekday(records: &[DailyRecord]) -> Vec<BreakdownRow<Weekday>> {
        Self::melt(Self::weekday_wide(records))
    }

    /// Group hourly records by hour of day and sum the three count fields.
    /// Result is ordered by hour ascending; stays wide (no melt).
    pub fn hourly(records: &[HourlyRecord]) -> Vec<HourlySummary> {
        let mut hours: HashMap<u32, GroupTotals> = HashMap::new();
        for record in records {
            hours.entry(record.hour).or_default().add(
                record.casual_count,
                record.registered_count,
                record.total_count,
            );
        }

        let mut result: Vec<HourlySummary> = hours
            .into_iter()
            .map(|(hour, totals)| HourlySummary {
                hour,
                casual_rides: totals.casual_rides,
                registered_rides: totals.registered_rides,
                total_rides: totals.total_rides,
            })
            .collect();
        result.sort_by_key(|s| s.hour);
        result
    }

    /// Scalar totals over the filtered daily table (summary metric cards).
    pub fn totals(records: &[DailyRecord]) -> RideTotals {
        let mut totals = RideTotals::default();
        for record in records {
            totals.casual_rides = totals.casual_rides.saturating_add(record.casual_count);
            totals.registered_rides = totals
                .registered_rides
                .saturating_add(record.registered_count);
            totals.total_rides = totals.total_rides.saturating_add(record.total_count);
        }
        totals
    }

    /// Reshape a wide grouping into long form: for each category in input
    /// order, a casual row followed by a registered row.
    fn melt<C: Copy>(wide: Vec<(C, GroupTotals)>) -> Vec<BreakdownRow<C>> {
        let mut rows = Vec::with_capacity(wide.len() * 2);
        for (category, totals) in wide {
            rows.push(BreakdownRow {
                category,
                ride_type: RideType::Casual,
                count_rides: totals.casual_rides,
            });
            rows.push(BreakdownRow {
                category,
                ride_type: RideType::Registered,
                count_rides: totals.registered_rides,
            });
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(
        y: i32,
        m: u32,
        d: u32,
        season: Season,
        casual: u64,
        registered: u64,
    ) -> DailyRecord {
        let day = date(y, m, d);
        DailyRecord {
            date: day,
            season,
            day_of_week: day.weekday(),
            casual_count: casual,
            registered_count: registered,
            total_count: casual + registered,
        }
    }

    fn hourly_rec(y: i32, m: u32, d: u32, hour: u32, casual: u64, registered: u64) -> HourlyRecord {
        HourlyRecord {
            date: date(y, m, d),
            hour,
            casual_count: casual,
            registered_count: registered,
            total_count: casual + registered,
        }
    }

    // ========== filter tests ==========

    #[test]
    fn test_filter_daily_inclusive_bounds() {
        let records = vec![
            daily(2024, 1, 9, Season::Winter, 1, 1),
            daily(2024, 1, 10, Season::Winter, 2, 2),
            daily(2024, 1, 20, Season::Winter, 3, 3),
            daily(2024, 1, 21, Season::Winter, 4, 4),
        ];
        let range = DateRange::new(date(2024, 1, 10), date(2024, 1, 20));

        let filtered = Aggregator::filter_daily(&records, range);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].date, date(2024, 1, 10));
        assert_eq!(filtered[1].date, date(2024, 1, 20));
    }

    #[test]
    fn test_filter_hourly_independent_of_daily() {
        let records = vec![
            hourly_rec(2024, 1, 9, 8, 1, 1),
            hourly_rec(2024, 1, 15, 8, 2, 2),
        ];
        let range = DateRange::new(date(2024, 1, 10), date(2024, 1, 20));

        let filtered = Aggregator::filter_hourly(&records, range);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, date(2024, 1, 15));
    }

    #[test]
    fn test_filter_single_date_range() {
        let records = vec![
            daily(2024, 1, 14, Season::Winter, 1, 1),
            daily(2024, 1, 15, Season::Winter, 5, 7),
            daily(2024, 1, 16, Season::Winter, 2, 2),
        ];
        let range = DateRange::single(date(2024, 1, 15));

        let filtered = Aggregator::filter_daily(&records, range);
        let totals = Aggregator::totals(&filtered);

        // Exactly that date's own contribution
        assert_eq!(totals.casual_rides, 5);
        assert_eq!(totals.registered_rides, 7);
        assert_eq!(totals.total_rides, 12);
    }

    // ========== monthly() tests ==========

    #[test]
    fn test_monthly_empty_input() {
        let result = Aggregator::monthly(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_monthly_groups_by_calendar_month() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 1, 31, Season::Winter, 1, 2),
            daily(2024, 2, 1, Season::Winter, 5, 15),
        ];

        let result = Aggregator::monthly(&records);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].month, date(2024, 1, 1));
        assert_eq!(result[0].casual_rides, 11);
        assert_eq!(result[0].registered_rides, 22);
        assert_eq!(result[0].total_rides, 33);
        assert_eq!(result[1].month, date(2024, 2, 1));
        assert_eq!(result[1].total_rides, 20);
    }

    #[test]
    fn test_monthly_chronological_order() {
        let records = vec![
            daily(2024, 3, 5, Season::Spring, 1, 1),
            daily(2023, 12, 5, Season::Winter, 1, 1),
            daily(2024, 1, 5, Season::Winter, 1, 1),
        ];

        let result = Aggregator::monthly(&records);

        let months: Vec<NaiveDate> = result.iter().map(|s| s.month).collect();
        assert_eq!(
            months,
            vec![date(2023, 12, 1), date(2024, 1, 1), date(2024, 3, 1)]
        );
    }

    #[test]
    fn test_monthly_labels() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 2, 1, Season::Winter, 5, 15),
        ];

        let result = Aggregator::monthly(&records);

        assert_eq!(result[0].label(), "Jan-24");
        assert_eq!(result[1].label(), "Feb-24");
    }

    #[test]
    fn test_monthly_total_matches_filtered_daily_sum() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 1, 15, Season::Winter, 3, 4),
            daily(2024, 2, 1, Season::Winter, 5, 15),
            daily(2024, 3, 1, Season::Spring, 7, 9),
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 28));
        let filtered = Aggregator::filter_daily(&records, range);

        let monthly = Aggregator::monthly(&filtered);
        let monthly_total: u64 = monthly.iter().map(|s| s.total_rides).sum();
        let daily_total: u64 = filtered.iter().map(|r| r.total_count).sum();

        assert_eq!(monthly_total, daily_total);
        assert_eq!(monthly_total, 57);
    }

    // ========== seasonal() tests ==========

    #[test]
    fn test_seasonal_empty_input() {
        assert!(Aggregator::seasonal(&[]).is_empty());
        assert!(Aggregator::seasonal_wide(&[]).is_empty());
    }

    #[test]
    fn test_seasonal_canonical_order_regardless_of_input_order() {
        // Input arrives Winter first, Spring last
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 1, 2),
            daily(2024, 10, 1, Season::Fall, 3, 4),
            daily(2024, 7, 1, Season::Summer, 5, 6),
            daily(2024, 4, 1, Season::Spring, 7, 8),
        ];

        let rows = Aggregator::seasonal(&records);

        let categories: Vec<Season> = rows.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                Season::Spring,
                Season::Spring,
                Season::Summer,
                Season::Summer,
                Season::Fall,
                Season::Fall,
                Season::Winter,
                Season::Winter,
            ]
        );
    }

    #[test]
    fn test_seasonal_long_form_casual_before_registered() {
        let records = vec![daily(2024, 7, 1, Season::Summer, 5, 6)];

        let rows = Aggregator::seasonal(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ride_type, RideType::Casual);
        assert_eq!(rows[0].count_rides, 5);
        assert_eq!(rows[1].ride_type, RideType::Registered);
        assert_eq!(rows[1].count_rides, 6);
    }

    #[test]
    fn test_seasonal_absent_seasons_omitted() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 1, 2),
            daily(2024, 7, 1, Season::Summer, 3, 4),
        ];

        let rows = Aggregator::seasonal(&records);

        // Two seasons × two ride types, no zero-filled Spring or Fall
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.category != Season::Spring));
        assert!(rows.iter().all(|r| r.category != Season::Fall));
        // Summer still sorts before Winter
        assert_eq!(rows[0].category, Season::Summer);
        assert_eq!(rows[2].category, Season::Winter);
    }

    #[test]
    fn test_seasonal_wide_sum_invariant() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 1, 2, Season::Winter, 5, 15),
        ];

        let wide = Aggregator::seasonal_wide(&records);

        assert_eq!(wide.len(), 1);
        let (season, totals) = wide[0];
        assert_eq!(season, Season::Winter);
        assert_eq!(
            totals.total_rides,
            totals.casual_rides + totals.registered_rides
        );
        assert_eq!(totals.total_rides, 50);
    }

    // ========== weekday() tests ==========

    #[test]
    fn test_weekday_canonical_order() {
        // 2024-01-07 is a Sunday, 2024-01-01 a Monday, 2024-01-03 a Wednesday
        let records = vec![
            daily(2024, 1, 7, Season::Winter, 1, 1),
            daily(2024, 1, 3, Season::Winter, 2, 2),
            daily(2024, 1, 1, Season::Winter, 3, 3),
        ];

        let rows = Aggregator::weekday(&records);

        let categories: Vec<Weekday> = rows.iter().map(|r| r.category).collect();
        assert_eq!(
            categories,
            vec![
                Weekday::Mon,
                Weekday::Mon,
                Weekday::Wed,
                Weekday::Wed,
                Weekday::Sun,
                Weekday::Sun,
            ]
        );
    }

    #[test]
    fn test_weekday_sums_across_weeks() {
        // Two Mondays
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 1, 8, Season::Winter, 1, 2),
        ];

        let rows = Aggregator::weekday(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, Weekday::Mon);
        assert_eq!(rows[0].count_rides, 11); // casual
        assert_eq!(rows[1].count_rides, 22); // registered
    }

    #[test]
    fn test_weekday_empty_input() {
        assert!(Aggregator::weekday(&[]).is_empty());
    }

    // ========== hourly() tests ==========

    #[test]
    fn test_hourly_empty_input() {
        assert!(Aggregator::hourly(&[]).is_empty());
    }

    #[test]
    fn test_hourly_ascending_order_and_sums() {
        let records = vec![
            hourly_rec(2024, 1, 2, 17, 4, 6),
            hourly_rec(2024, 1, 1, 8, 1, 2),
            hourly_rec(2024, 1, 2, 8, 10, 20),
        ];

        let result = Aggregator::hourly(&records);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].hour, 8);
        assert_eq!(result[0].casual_rides, 11);
        assert_eq!(result[0].registered_rides, 22);
        assert_eq!(result[0].total_rides, 33);
        assert_eq!(result[1].hour, 17);
        assert_eq!(result[1].total_rides, 10);
    }

    #[test]
    fn test_hourly_stays_wide() {
        let records = vec![hourly_rec(2024, 1, 1, 0, 3, 4)];
        let result = Aggregator::hourly(&records);
        // Wide row carries all three columns, invariant holds per row
        assert_eq!(
            result[0].total_rides,
            result[0].casual_rides + result[0].registered_rides
        );
    }

    // ========== totals() tests ==========

    #[test]
    fn test_totals_empty_input() {
        let totals = Aggregator::totals(&[]);
        assert_eq!(totals, RideTotals::default());
    }

    #[test]
    fn test_totals_sums_all_three_fields() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 2, 1, Season::Winter, 5, 15),
        ];

        let totals = Aggregator::totals(&records);

        assert_eq!(totals.casual_rides, 15);
        assert_eq!(totals.registered_rides, 35);
        assert_eq!(totals.total_rides, 50);
    }

    // ========== cross-cutting properties ==========

    #[test]
    fn test_worked_example_jan_feb() {
        // Jan 1 (casual=10, registered=20, Winter, Monday) and
        // Feb 1 (casual=5, registered=15, Winter, Friday). 2024 dates land
        // on those weekdays for Jan 1 (Mon); Feb 2 is the Friday.
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 2, 2, Season::Winter, 5, 15),
        ];
        let range = DateRange::new(date(2024, 1, 1), date(2024, 2, 2));
        let filtered = Aggregator::filter_daily(&records, range);

        let monthly = Aggregator::monthly(&filtered);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].label(), "Jan-24");
        assert_eq!(monthly[0].total_rides, 30);
        assert_eq!(monthly[1].label(), "Feb-24");
        assert_eq!(monthly[1].total_rides, 20);

        let seasonal = Aggregator::seasonal(&filtered);
        assert_eq!(seasonal.len(), 2);
        assert_eq!(seasonal[0].category, Season::Winter);
        assert_eq!(seasonal[0].count_rides, 15); // casual
        assert_eq!(seasonal[1].count_rides, 35); // registered

        let weekday = Aggregator::weekday(&filtered);
        let days: Vec<Weekday> = weekday.iter().map(|r| r.category).collect();
        assert_eq!(
            days,
            vec![Weekday::Mon, Weekday::Mon, Weekday::Fri, Weekday::Fri]
        );
    }

    #[test]
    fn test_sum_invariant_across_all_rollups() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 4, 1, Season::Spring, 3, 4),
            daily(2024, 4, 2, Season::Spring, 7, 8),
        ];

        for summary in Aggregator::monthly(&records) {
            assert_eq!(
                summary.total_rides,
                summary.casual_rides + summary.registered_rides
            );
        }
        for (_, totals) in Aggregator::seasonal_wide(&records) {
            assert_eq!(
                totals.total_rides,
                totals.casual_rides + totals.registered_rides
            );
        }
        for (_, totals) in Aggregator::weekday_wide(&records) {
            assert_eq!(
                totals.total_rides,
                totals.casual_rides + totals.registered_rides
            );
        }
        let t = Aggregator::totals(&records);
        assert_eq!(t.total_rides, t.casual_rides + t.registered_rides);
    }

    #[test]
    fn test_rollups_are_idempotent() {
        let records = vec![
            daily(2024, 1, 1, Season::Winter, 10, 20),
            daily(2024, 4, 1, Season::Spring, 3, 4),
        ];
        let hourly = vec![
            hourly_rec(2024, 1, 1, 8, 1, 2),
            hourly_rec(2024, 1, 1, 9, 3, 4),
        ];

        assert_eq!(Aggregator::monthly(&records), Aggregator::monthly(&records));
        assert_eq!(
            Aggregator::seasonal(&records),
            Aggregator::seasonal(&records)
        );
        assert_eq!(Aggregator::weekday(&records), Aggregator::weekday(&records));
        assert_eq!(Aggregator::hourly(&hourly), Aggregator::hourly(&hourly));
        assert_eq!(Aggregator::totals(&records), Aggregator::totals(&records));
    }

    #[test]
    fn test_empty_range_yields_empty_but_well_shaped_results() {
        let records = vec![daily(2024, 1, 1, Season::Winter, 10, 20)];
        let range = DateRange::new(date(2030, 1, 1), date(2030, 12, 31));

        let filtered = Aggregator::filter_daily(&records, range);

        assert!(filtered.is_empty());
        assert!(Aggregator::monthly(&filtered).is_empty());
        assert!(Aggregator::seasonal(&filtered).is_empty());
        assert!(Aggregator::weekday(&filtered).is_empty());
        assert_eq!(Aggregator::totals(&filtered), RideTotals::default());
    }
}
