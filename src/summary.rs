//! Year-wide statistics and chart series derived from a [`YearTable`].

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

use crate::types::{YearRow, YearTable};

/// An extreme value and every date on which it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extreme<T> {
    pub value: T,
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub earliest_sunrise: Option<Extreme<NaiveTime>>,
    pub latest_sunrise: Option<Extreme<NaiveTime>>,
    pub earliest_sunset: Option<Extreme<NaiveTime>>,
    pub latest_sunset: Option<Extreme<NaiveTime>>,
    pub longest_day: Option<Extreme<i64>>,
    pub shortest_day: Option<Extreme<i64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayLengthDelta {
    pub date: NaiveDate,
    pub change: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub sun_rise: Option<f64>,
    pub sun_set: Option<f64>,
    pub other_rise: Option<f64>,
    pub other_set: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub label: String,
    pub rows: Vec<ComparisonRow>,
}

fn extreme<T, I>(values: I, wanted: Ordering) -> Option<Extreme<T>>
where
    T: Ord + Copy,
    I: IntoIterator<Item = (NaiveDate, Option<T>)>,
{
    let mut best: Option<Extreme<T>> = None;
    for (date, value) in values {
        let Some(value) = value else { continue };
        if let Some(current) = best.as_mut() {
            match value.cmp(&current.value) {
                Ordering::Equal => current.dates.push(date),
                o if o == wanted => {
                    current.value = value;
                    current.dates = vec![date];
                }
                _ => {}
            }
            continue;
        }
        best = Some(Extreme {
            value,
            dates: vec![date],
        });
    }
    best
}

fn time_of(instant: &Option<DateTime<Tz>>) -> Option<NaiveTime> {
    instant.as_ref().map(|t| t.time())
}

fn sunrise_times(rows: &[YearRow]) -> impl Iterator<Item = (NaiveDate, Option<NaiveTime>)> + '_ {
    rows.iter().map(|r| (r.date, time_of(&r.local.sunrise)))
}

fn sunset_times(rows: &[YearRow]) -> impl Iterator<Item = (NaiveDate, Option<NaiveTime>)> + '_ {
    rows.iter().map(|r| (r.date, time_of(&r.local.sunset)))
}

fn day_lengths(rows: &[YearRow]) -> impl Iterator<Item = (NaiveDate, Option<i64>)> + '_ {
    rows.iter().map(|r| (r.date, Some(r.day_length())))
}

impl Summary {
    pub fn of(table: &YearTable) -> Self {
        let rows = &table.rows;
        Self {
            earliest_sunrise: extreme(sunrise_times(rows), Ordering::Less),
            latest_sunrise: extreme(sunrise_times(rows), Ordering::Greater),
            earliest_sunset: extreme(sunset_times(rows), Ordering::Less),
            latest_sunset: extreme(sunset_times(rows), Ordering::Greater),
            longest_day: extreme(day_lengths(rows), Ordering::Greater),
            shortest_day: extreme(day_lengths(rows), Ordering::Less),
        }
    }
}

/// Day-over-day change in day length; the first date has no predecessor.
pub fn day_length_deltas(table: &YearTable) -> Vec<DayLengthDelta> {
    let mut previous: Option<i64> = None;
    table
        .rows
        .iter()
        .map(|r| {
            let change = previous.map(|p| r.day_length() - p);
            previous = Some(r.day_length());
            DayLengthDelta {
                date: r.date,
                change,
            }
        })
        .collect()
}

impl Comparison {
    /// Joins `other` onto the dates of `primary`; dates missing from `other` stay empty.
    pub fn merge(primary: &YearTable, other: &YearTable, label: &str) -> Self {
        let rows = primary
            .rows
            .iter()
            .map(|r| {
                let o = other.get(r.date);
                ComparisonRow {
                    date: r.date,
                    sun_rise: r.sun_rise,
                    sun_set: r.sun_set,
                    other_rise: o.and_then(|o| o.sun_rise),
                    other_set: o.and_then(|o| o.sun_set),
                }
            })
            .collect();
        Self {
            label: label.to_string(),
            rows,
        }
    }
}

/// Seconds as `H:MM:SS`.
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let seconds = seconds.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}
