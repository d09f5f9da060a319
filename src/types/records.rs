//! Input record types and the date-range filter

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Riding season as labeled in the input data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Canonical display order for seasonal rollups (not alphabetical).
    pub const ORDER: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical week order for weekday rollups (Monday first).
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English weekday name ("Monday".."Sunday").
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Deserialize a weekday from the full or abbreviated English name.
fn de_weekday<'de, D>(deserializer: D) -> Result<Weekday, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        other => Err(serde::de::Error::custom(format!(
            "unknown weekday name: {other:?}"
        ))),
    }
}

/// One row of the daily input table.
///
/// Invariant (checked at load time): `total_count == casual_count + registered_count`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    pub season: Season,
    #[serde(rename = "one_of_week", deserialize_with = "de_weekday")]
    pub day_of_week: Weekday,
    #[serde(rename = "casual")]
    pub casual_count: u64,
    #[serde(rename = "registered")]
    pub registered_count: u64,
    #[serde(rename = "count_cr")]
    pub total_count: u64,
}

/// One row of the hourly input table. Same sum invariant as [`DailyRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HourlyRecord {
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    #[serde(rename = "hours")]
    pub hour: u32,
    #[serde(rename = "casual")]
    pub casual_count: u64,
    #[serde(rename = "registered")]
    pub registered_count: u64,
    #[serde(rename = "count_cr")]
    pub total_count: u64,
}

/// Inclusive date range used to filter both input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range. Callers must ensure `start <= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "DateRange requires start <= end");
        Self { start, end }
    }

    /// Range covering a single date.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_season_order_is_not_alphabetical() {
        assert_eq!(
            Season::ORDER,
            [Season::Spring, Season::Summer, Season::Fall, Season::Winter]
        );
        // Alphabetical would put Fall first
        assert_ne!(Season::ORDER[0], Season::Fall);
    }

    #[test]
    fn test_season_labels() {
        assert_eq!(Season::Spring.to_string(), "Spring");
        assert_eq!(Season::Winter.label(), "Winter");
    }

    #[test]
    fn test_week_order_starts_monday_ends_sunday() {
        assert_eq!(WEEK_ORDER[0], Weekday::Mon);
        assert_eq!(WEEK_ORDER[6], Weekday::Sun);
        assert_eq!(WEEK_ORDER.len(), 7);
    }

    #[test]
    fn test_weekday_labels() {
        assert_eq!(weekday_label(Weekday::Mon), "Monday");
        assert_eq!(weekday_label(Weekday::Sun), "Sunday");
    }

    #[test]
    fn test_date_range_contains_inclusive_bounds() {
        let range = DateRange::new(date(2024, 1, 10), date(2024, 1, 20));
        assert!(range.contains(date(2024, 1, 10)));
        assert!(range.contains(date(2024, 1, 15)));
        assert!(range.contains(date(2024, 1, 20)));
        assert!(!range.contains(date(2024, 1, 9)));
        assert!(!range.contains(date(2024, 1, 21)));
    }

    #[test]
    fn test_date_range_single() {
        let range = DateRange::single(date(2024, 2, 1));
        assert!(range.contains(date(2024, 2, 1)));
        assert!(!range.contains(date(2024, 2, 2)));
    }

    #[test]
    fn test_daily_record_csv_column_mapping() {
        let csv_data = "\
dteday,season,one_of_week,casual,registered,count_cr
2024-01-15,Winter,Monday,10,20,30
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let record: DailyRecord = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(record.date, date(2024, 1, 15));
        assert_eq!(record.season, Season::Winter);
        assert_eq!(record.day_of_week, Weekday::Mon);
        assert_eq!(record.casual_count, 10);
        assert_eq!(record.registered_count, 20);
        assert_eq!(record.total_count, 30);
    }

    #[test]
    fn test_hourly_record_csv_column_mapping() {
        let csv_data = "\
dteday,hours,casual,registered,count_cr
2024-01-15,17,5,15,20
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let record: HourlyRecord = reader.deserialize().next().unwrap().unwrap();

        assert_eq!(record.date, date(2024, 1, 15));
        assert_eq!(record.hour, 17);
        assert_eq!(record.total_count, 20);
    }

    #[test]
    fn test_weekday_name_case_insensitive() {
        let csv_data = "\
dteday,season,one_of_week,casual,registered,count_cr
2024-01-16,Winter,TUESDAY,1,2,3
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let record: DailyRecord = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(record.day_of_week, Weekday::Tue);
    }

    #[test]
    fn test_unknown_weekday_name_rejected() {
        let csv_data = "\
dteday,season,one_of_week,casual,registered,count_cr
2024-01-16,Winter,Someday,1,2,3
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let result: Result<DailyRecord, _> = reader.deserialize().next().unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn test_unparsable_date_rejected() {
        let csv_data = "\
dteday,season,one_of_week,casual,registered,count_cr
15/01/2024,Winter,Monday,1,2,3
";
        let mut reader = csv::Reader::from_reader(csv_data.as_bytes());
        let result: Result<DailyRecord, _> = reader.deserialize().next().unwrap();
        assert!(result.is_err());
    }
}
