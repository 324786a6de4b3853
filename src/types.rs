use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SECONDS_PER_DAY: i64 = 86_400;
/// Day length reported for a day on which the sun never sets (23:59:59).
pub const POLAR_DAY_SECONDS: i64 = SECONDS_PER_DAY - 1;
pub const POLAR_NIGHT_SECONDS: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self { latitude, longitude };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DayKind {
    Regular,
    PolarDay,
    PolarNight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLightInfo {
    pub dawn: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub noon: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
    pub day_length: i64,
    pub kind: DayKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalTimes {
    pub dawn: Option<DateTime<Tz>>,
    pub sunrise: Option<DateTime<Tz>>,
    pub noon: Option<DateTime<Tz>>,
    pub sunset: Option<DateTime<Tz>>,
    pub dusk: Option<DateTime<Tz>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub date: NaiveDate,
    pub info: DayLightInfo,
    pub local: LocalTimes,
    pub sun_rise: Option<f64>,
    pub sun_set: Option<f64>,
}

impl YearRow {
    pub fn day_length(&self) -> i64 {
        self.info.day_length
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearTable {
    pub coordinate: Coordinate,
    pub timezone: Tz,
    pub year: i32,
    pub rows: Vec<YearRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
    pub date: NaiveDate,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}
