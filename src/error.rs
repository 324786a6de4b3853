//! Errors for day length calculations
use chrono::NaiveDate;
use thiserror::Error;

use crate::sun::SolarEvent;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("City not found: {city}, please check spelling")]
    LocationNotFound { city: String },

    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Sun does not cross the horizon for {event:?}")]
    PolarAnomaly { event: SolarEvent },

    #[error("No timezone found at ({latitude}, {longitude})")]
    TimezoneNotFound { latitude: f64, longitude: f64 },

    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),

    #[error("Date {date} is not in year {year}")]
    DateOutsideYear { date: NaiveDate, year: i32 },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Serialization error")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn is_polar_anomaly(&self) -> bool {
        matches!(self, Error::PolarAnomaly { .. })
    }
}
