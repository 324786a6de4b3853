use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::info;

use crate::daylight;
use crate::error::{Error, Result};
use crate::types::{Coordinate, DayLightInfo, LocalTimes, Progress, YearRow, YearTable};

pub fn leap_year(year: i32) -> bool {
    (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
}

pub fn days_in_year(year: i32) -> usize {
    if leap_year(year) {
        366
    } else {
        365
    }
}

/// Every date of `year`, January 1 through December 31.
pub fn dates_of_year(year: i32) -> Result<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidYear(year))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(Error::InvalidYear(year))?;
    Ok(first.iter_days().take_while(|d| *d <= last).collect())
}

/// Local clock time as a fractional hour, 06:30 becomes 6.5.
pub fn time_to_number<T: Timelike>(time: &T) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

pub fn to_local(instant: Option<DateTime<Utc>>, tz: &Tz) -> Option<DateTime<Tz>> {
    instant.map(|t| t.with_timezone(tz))
}

pub fn local_times(info: &DayLightInfo, tz: &Tz) -> LocalTimes {
    LocalTimes {
        dawn: to_local(info.dawn, tz),
        sunrise: to_local(info.sunrise, tz),
        noon: to_local(info.noon, tz),
        sunset: to_local(info.sunset, tz),
        dusk: to_local(info.dusk, tz),
    }
}

pub fn make_row(date: NaiveDate, info: DayLightInfo, tz: &Tz) -> YearRow {
    let local = local_times(&info, tz);
    let sun_rise = local.sunrise.as_ref().map(time_to_number);
    let sun_set = local.sunset.as_ref().map(time_to_number);
    YearRow {
        date,
        info,
        local,
        sun_rise,
        sun_set,
    }
}

pub fn build(coordinate: Coordinate, year: i32, tz: Tz) -> Result<YearTable> {
    build_with_progress(coordinate, year, tz, |_| {})
}

/// Builds the table one date at a time, reporting to `on_progress` after each date.
pub fn build_with_progress<F>(
    coordinate: Coordinate,
    year: i32,
    tz: Tz,
    mut on_progress: F,
) -> Result<YearTable>
where
    F: FnMut(Progress),
{
    coordinate.validate()?;
    let dates = dates_of_year(year)?;
    let total = dates.len();
    let mut rows = Vec::with_capacity(total);

    for (i, date) in dates.into_iter().enumerate() {
        let info = daylight::day_light_info_at(coordinate, date)?;
        rows.push(make_row(date, info, &tz));
        on_progress(Progress {
            done: i + 1,
            total,
            date,
        });
    }

    info!(
        "Built {} rows for {} ({:.4}, {:.4}) in {}",
        rows.len(),
        year,
        coordinate.latitude,
        coordinate.longitude,
        tz
    );

    Ok(YearTable {
        coordinate,
        timezone: tz,
        year,
        rows,
    })
}

impl YearTable {
    pub fn get(&self, date: NaiveDate) -> Option<&YearRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.get(date).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn day_lengths(&self) -> Vec<(NaiveDate, i64)> {
        self.rows.iter().map(|r| (r.date, r.day_length())).collect()
    }
}
