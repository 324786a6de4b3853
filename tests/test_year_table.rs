use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, TimeZone, Timelike};
use chrono_tz::{Arctic, Asia, Australia, Europe, Tz};

use day_length::summary::*;
use day_length::types::*;
use day_length::year_table::*;

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

static LONDON_2023: LazyLock<YearTable> = LazyLock::new(|| {
    let london = Coordinate::new(51.5074, -0.1278).unwrap();
    build(london, 2023, Europe::London).unwrap()
});

static SYDNEY_2023: LazyLock<YearTable> = LazyLock::new(|| {
    let sydney = Coordinate::new(-33.8688, 151.2093).unwrap();
    build(sydney, 2023, Australia::Sydney).unwrap()
});

static SVALBARD_2023: LazyLock<YearTable> = LazyLock::new(|| {
    let svalbard = Coordinate::new(78.2232, 15.6267).unwrap();
    build(svalbard, 2023, Arctic::Longyearbyen).unwrap()
});

// ── Calendar ──

#[test]
fn test_dates_of_year() {
    let dates = dates_of_year(2023).unwrap();
    assert_eq!(dates.len(), 365);
    assert_eq!(dates[0], date(2023, 1, 1));
    assert_eq!(dates[364], date(2023, 12, 31));

    let leap = dates_of_year(2024).unwrap();
    assert_eq!(leap.len(), 366);
    assert!(leap.contains(&date(2024, 2, 29)));
}

#[test]
fn test_days_in_year() {
    assert_eq!(days_in_year(2023), 365);
    assert_eq!(days_in_year(2024), 366);
    assert_eq!(days_in_year(1900), 365);
    assert_eq!(days_in_year(2000), 366);
}

#[test]
fn test_invalid_year() {
    assert!(dates_of_year(i32::MAX).is_err());
}

// ── Time conversions ──

#[test]
fn test_time_to_number() {
    let t = chrono::NaiveTime::from_hms_opt(6, 30, 0).unwrap();
    assert_approx!(time_to_number(&t), 6.5, 1e-9);
    let t = chrono::NaiveTime::from_hms_opt(21, 15, 59).unwrap();
    assert_approx!(time_to_number(&t), 21.25, 1e-9);
}

#[test]
fn test_local_times_round_trip() {
    for row in &LONDON_2023.rows {
        for (local, utc) in [
            (&row.local.sunrise, row.info.sunrise),
            (&row.local.sunset, row.info.sunset),
            (&row.local.noon, row.info.noon),
        ] {
            let local = local.as_ref().unwrap();
            let rebuilt = Europe::London
                .from_local_datetime(&local.naive_local())
                .single()
                .unwrap();
            assert_eq!(Some(rebuilt.with_timezone(&chrono::Utc)), utc, "{}", row.date);
        }
    }
}

#[test]
fn test_local_conversion_applies_summer_time() {
    let row = LONDON_2023.get(date(2023, 7, 1)).unwrap();
    let utc = row.info.sunrise.unwrap();
    let local = row.local.sunrise.as_ref().unwrap();
    assert_eq!((local.hour() + 24 - utc.hour()) % 24, 1);
}

#[test]
fn test_derived_columns_follow_local_times() {
    for row in &LONDON_2023.rows {
        let rise = row.local.sunrise.as_ref().unwrap();
        let set = row.local.sunset.as_ref().unwrap();
        assert_eq!(row.sun_rise, Some(rise.hour() as f64 + rise.minute() as f64 / 60.0));
        assert_eq!(row.sun_set, Some(set.hour() as f64 + set.minute() as f64 / 60.0));
    }
}

// ── Building ──

#[test]
fn test_rows_ordered_and_complete() {
    let rows = &LONDON_2023.rows;
    assert_eq!(rows.len(), 365);
    assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
    assert!(rows.iter().all(|r| r.info.kind == DayKind::Regular));
    assert_eq!(LONDON_2023.timezone, Europe::London);
    assert_eq!(LONDON_2023.year, 2023);
}

#[test]
fn test_lookup_by_date() {
    let row = LONDON_2023.get(date(2023, 6, 21)).unwrap();
    assert_eq!(row.date, date(2023, 6, 21));
    assert!(LONDON_2023.get(date(2024, 1, 1)).is_none());
    assert!(!LONDON_2023.contains(date(2022, 12, 31)));
}

#[test]
fn test_leap_year_table() {
    let coordinate = Coordinate::new(35.6762, 139.6503).unwrap();
    let table = build(coordinate, 2024, Asia::Tokyo).unwrap();
    assert_eq!(table.len(), 366);
    assert!(table.contains(date(2024, 2, 29)));
    assert_eq!(table.rows.last().unwrap().date, date(2024, 12, 31));
}

#[test]
fn test_build_is_idempotent() {
    let london = Coordinate::new(51.5074, -0.1278).unwrap();
    let again = build(london, 2023, Europe::London).unwrap();
    assert_eq!(again, *LONDON_2023);
}

#[test]
fn test_progress_reported_per_date() {
    let coordinate = Coordinate::new(48.8566, 2.3522).unwrap();
    let mut seen = Vec::new();
    build_with_progress(coordinate, 2023, Europe::Paris, |p| seen.push(p)).unwrap();

    assert_eq!(seen.len(), 365);
    assert!(seen.iter().all(|p| p.total == 365));
    assert_eq!(seen[0].done, 1);
    assert_eq!(seen[0].date, date(2023, 1, 1));
    assert_eq!(seen[364].done, 365);
    assert_approx!(seen[364].fraction(), 1.0, 1e-12);
    assert!(seen.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_invalid_coordinate_fails_build() {
    let bad = Coordinate {
        latitude: 95.0,
        longitude: 0.0,
    };
    assert!(build(bad, 2023, Tz::UTC).is_err());
}

// ── Year shape ──

#[test]
fn test_london_longest_and_shortest_days() {
    let summary = Summary::of(&LONDON_2023);

    let longest = summary.longest_day.unwrap();
    assert_approx!(longest.value, 59_880.0, 180.0);
    for d in &longest.dates {
        assert!((date(2023, 6, 19)..=date(2023, 6, 23)).contains(d), "{}", d);
    }
    let june_21 = LONDON_2023.get(date(2023, 6, 21)).unwrap();
    assert_approx!(june_21.day_length(), longest.value, 10.0);

    let shortest = summary.shortest_day.unwrap();
    assert_approx!(shortest.value, 28_200.0, 180.0);
    for d in &shortest.dates {
        assert!((date(2023, 12, 19)..=date(2023, 12, 24)).contains(d), "{}", d);
    }
}

#[test]
fn test_mid_latitude_day_length_is_unimodal() {
    let weekly: Vec<(NaiveDate, i64)> = LONDON_2023
        .day_lengths()
        .into_iter()
        .step_by(7)
        .collect();
    for w in weekly.windows(2) {
        let (d0, l0) = w[0];
        let (d1, l1) = w[1];
        if d1 <= date(2023, 6, 18) {
            assert!(l1 > l0, "{} -> {}: {} -> {}", d0, d1, l0, l1);
        } else if d0 >= date(2023, 6, 25) && d1 <= date(2023, 12, 17) {
            assert!(l1 < l0, "{} -> {}: {} -> {}", d0, d1, l0, l1);
        }
    }
}

#[test]
fn test_southern_hemisphere_is_mirrored() {
    let june = SYDNEY_2023.get(date(2023, 6, 21)).unwrap().day_length();
    let december = SYDNEY_2023.get(date(2023, 12, 21)).unwrap().day_length();
    assert!(december > june);
}

#[test]
fn test_svalbard_has_polar_rows() {
    let june = SVALBARD_2023.get(date(2023, 6, 21)).unwrap();
    assert_eq!(june.info.kind, DayKind::PolarDay);
    assert_eq!(june.day_length(), POLAR_DAY_SECONDS);
    assert!(june.sun_rise.is_none() && june.sun_set.is_none());

    let december = SVALBARD_2023.get(date(2023, 12, 21)).unwrap();
    assert_eq!(december.info.kind, DayKind::PolarNight);
    assert_eq!(december.day_length(), 0);

    let march = SVALBARD_2023.get(date(2023, 3, 21)).unwrap();
    assert_eq!(march.info.kind, DayKind::Regular);
    assert!(march.sun_rise.is_some());
}

// ── Summary ──

#[test]
fn test_london_sunrise_and_sunset_extremes() {
    let summary = Summary::of(&LONDON_2023);

    let earliest_sunrise = summary.earliest_sunrise.unwrap();
    assert!(earliest_sunrise.dates.iter().all(|d| d.month() == 6));
    let latest_sunset = summary.latest_sunset.unwrap();
    assert!(latest_sunset.dates.iter().all(|d| d.month() == 6));
    let earliest_sunset = summary.earliest_sunset.unwrap();
    assert!(earliest_sunset.dates.iter().all(|d| d.month() == 12));
    assert!(earliest_sunset.value < latest_sunset.value);
}

#[test]
fn test_svalbard_summary_ignores_missing_times() {
    let summary = Summary::of(&SVALBARD_2023);
    assert!(summary.earliest_sunrise.is_some());
    assert_eq!(summary.longest_day.unwrap().value, POLAR_DAY_SECONDS);
    let shortest = summary.shortest_day.unwrap();
    assert_eq!(shortest.value, 0);
    assert!(shortest.dates.len() > 60);
}

#[test]
fn test_day_length_deltas() {
    let deltas = day_length_deltas(&LONDON_2023);
    assert_eq!(deltas.len(), 365);
    assert_eq!(deltas[0].change, None);
    assert!(deltas[1..].iter().all(|d| d.change.is_some()));

    let total: i64 = deltas.iter().filter_map(|d| d.change).sum();
    let rows = &LONDON_2023.rows;
    assert_eq!(total, rows[364].day_length() - rows[0].day_length());

    let march = deltas.iter().find(|d| d.date == date(2023, 3, 20)).unwrap();
    assert!(march.change.unwrap() > 0);
}

#[test]
fn test_comparison_merges_by_date() {
    let comparison = Comparison::merge(&LONDON_2023, &SYDNEY_2023, "Sydney");
    assert_eq!(comparison.label, "Sydney");
    assert_eq!(comparison.rows.len(), 365);

    let row = comparison
        .rows
        .iter()
        .find(|r| r.date == date(2023, 6, 21))
        .unwrap();
    let sydney = SYDNEY_2023.get(date(2023, 6, 21)).unwrap();
    assert_eq!(row.other_rise, sydney.sun_rise);
    assert_eq!(row.other_set, sydney.sun_set);
    assert_eq!(row.sun_rise, LONDON_2023.get(date(2023, 6, 21)).unwrap().sun_rise);
}

#[test]
fn test_comparison_with_missing_dates() {
    let tokyo = Coordinate::new(35.6762, 139.6503).unwrap();
    let leap = build(tokyo, 2024, Asia::Tokyo).unwrap();
    let comparison = Comparison::merge(&leap, &LONDON_2023, "London");
    assert_eq!(comparison.rows.len(), 366);
    assert!(comparison.rows.iter().all(|r| r.other_rise.is_none()));
}
