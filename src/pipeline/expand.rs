//! Expansion of scalar user inputs into aligned per-timestamp arrays.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};

use crate::domain::types::WeekStatus;

/// Hourly timestamps covering `total_days` days plus `total_hours` hours,
/// inclusive of both endpoints: `total_days*24 + total_hours + 1` entries,
/// strictly increasing by one hour.
pub fn expand_timestamps(
    start_date: NaiveDateTime,
    total_days: u32,
    total_hours: u32,
) -> Vec<NaiveDateTime> {
    let total_hours = u64::from(total_days) * 24 + u64::from(total_hours);
    (0..=total_hours)
        .map(|i| start_date + Duration::hours(i as i64))
        .collect()
}

/// Day-of-week (Monday = 1 .. Sunday = 7) and week status per timestamp.
pub fn expand_calendar(timestamps: &[NaiveDateTime]) -> (Vec<u8>, Vec<WeekStatus>) {
    let day_of_week = timestamps
        .iter()
        .map(|ts| ts.weekday().number_from_monday() as u8)
        .collect();
    let weekstatus = timestamps.iter().map(|ts| week_status(ts)).collect();
    (day_of_week, weekstatus)
}

fn week_status(timestamp: &NaiveDateTime) -> WeekStatus {
    match timestamp.weekday() {
        Weekday::Sat | Weekday::Sun => WeekStatus::Weekend,
        Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu | Weekday::Fri => {
            WeekStatus::Weekday
        }
    }
}

/// Seconds since midnight of each row's own day.
///
/// NSM resets at each day boundary, so every value lies in 0..=86399 no
/// matter how many days the simulation spans.
pub fn nsm_seconds(timestamps: &[NaiveDateTime]) -> Vec<u32> {
    timestamps
        .iter()
        .map(|ts| ts.num_seconds_from_midnight())
        .collect()
}

/// Replicate a scalar input across all timestamps.
pub fn broadcast_scalar<T: Copy>(value: T, total_entries: usize) -> Vec<T> {
    vec![value; total_entries]
}
