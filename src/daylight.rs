//! Day length for a single date, with a fallback for dates on which the sun
//! does not rise or does not set.
//!
//! The fallback runs as an ordered chain:
//! 1. [`standard_times`]: all five events together.
//! 2. [`partial_times`]: sunrise and sunset attempted independently.
//! 3. [`polar_baseline`]: polar night for October to April, polar day otherwise.
//! 4. [`apply_partial`]: corrections from whatever partial events were found.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use tracing::debug;

use crate::error::Result;
use crate::sun::{self, SunTimes, CIVIL_DEPRESSION};
use crate::types::{
    Coordinate, DayKind, DayLightInfo, POLAR_DAY_SECONDS, POLAR_NIGHT_SECONDS, SECONDS_PER_DAY,
};

const POLAR_NIGHT_MONTHS: [u32; 7] = [10, 11, 12, 1, 2, 3, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialTimes {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Step 1. `Ok(None)` means the sun misses at least one of the events on this date.
pub fn standard_times(coordinate: Coordinate, date: NaiveDate) -> Result<Option<SunTimes>> {
    match sun::sun_times(coordinate.latitude, coordinate.longitude, date, CIVIL_DEPRESSION) {
        Ok(times) => Ok(Some(times)),
        Err(e) if e.is_polar_anomaly() => {
            debug!("{} on {}: {}", format_coordinate(coordinate), date, e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Step 2.
pub fn partial_times(coordinate: Coordinate, date: NaiveDate) -> PartialTimes {
    PartialTimes {
        sunrise: sun::sunrise(coordinate.latitude, coordinate.longitude, date).ok(),
        sunset: sun::sunset(coordinate.latitude, coordinate.longitude, date).ok(),
    }
}

/// Step 3.
pub fn polar_baseline(date: NaiveDate) -> DayLightInfo {
    let (kind, day_length) = if POLAR_NIGHT_MONTHS.contains(&date.month()) {
        (DayKind::PolarNight, POLAR_NIGHT_SECONDS)
    } else {
        (DayKind::PolarDay, POLAR_DAY_SECONDS)
    };
    DayLightInfo {
        dawn: None,
        sunrise: None,
        noon: None,
        sunset: None,
        dusk: None,
        day_length,
        kind,
    }
}

/// Step 4.
///
/// Both corrections only touch a non-zero day length. A recovered sunset
/// replaces the day length outright, discarding any sunrise correction.
pub fn apply_partial(mut info: DayLightInfo, partial: PartialTimes) -> DayLightInfo {
    info.sunrise = partial.sunrise;
    info.sunset = partial.sunset;

    if let Some(sunrise) = partial.sunrise {
        if info.day_length != 0 {
            info.day_length -= seconds_since_midnight(sunrise);
        }
    }
    if let Some(sunset) = partial.sunset {
        if info.day_length != 0 {
            info.day_length = seconds_since_midnight(sunset);
        }
    }
    info
}

pub fn day_light_info(latitude: f64, longitude: f64, date: NaiveDate) -> Result<DayLightInfo> {
    let coordinate = Coordinate::new(latitude, longitude)?;
    day_light_info_at(coordinate, date)
}

pub fn day_light_info_at(coordinate: Coordinate, date: NaiveDate) -> Result<DayLightInfo> {
    coordinate.validate()?;

    if let Some(times) = standard_times(coordinate, date)? {
        return Ok(from_sun_times(times));
    }

    let partial = partial_times(coordinate, date);
    let info = apply_partial(polar_baseline(date), partial);
    debug!(
        "{} on {}: {:?}, day length {}s",
        format_coordinate(coordinate),
        date,
        info.kind,
        info.day_length
    );
    Ok(info)
}

fn from_sun_times(times: SunTimes) -> DayLightInfo {
    let elapsed = (times.sunset - times.sunrise).num_seconds();
    DayLightInfo {
        dawn: Some(times.dawn),
        sunrise: Some(times.sunrise),
        noon: Some(times.noon),
        sunset: Some(times.sunset),
        dusk: Some(times.dusk),
        day_length: elapsed.rem_euclid(SECONDS_PER_DAY),
        kind: DayKind::Regular,
    }
}

fn seconds_since_midnight(instant: DateTime<Utc>) -> i64 {
    instant.num_seconds_from_midnight() as i64
}

fn format_coordinate(c: Coordinate) -> String {
    format!("({:.4}, {:.4})", c.latitude, c.longitude)
}
