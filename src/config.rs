//! Application configuration

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geocoder::Place;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub timezone: TimezoneConfig,
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimezoneConfig {
    /// Zone used when the coordinate lookup finds nothing.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    "UTC".to_string()
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
        }
    }
}

impl AppConfig {
    /// Layers `config/default`, then `path` if given, then `DAYLENGTH__*` variables.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name("config/default").required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("DAYLENGTH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(year) = self.year {
            if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
                return Err(Error::InvalidYear(year));
            }
        }
        self.fallback_zone()?;
        for place in &self.places {
            place.coordinate().validate()?;
        }
        Ok(())
    }

    pub fn fallback_zone(&self) -> Result<Tz> {
        self.timezone.fallback.parse::<Tz>().map_err(|_| {
            Error::InvalidConfig(format!(
                "unknown fallback timezone {}",
                self.timezone.fallback
            ))
        })
    }

    pub fn year_or_current(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_file() {
        let file = write_config(
            r#"
year = 2023

[[places]]
name = "Kiruna"
latitude = 67.8558
longitude = 20.2253
"#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.year, Some(2023));
        assert_eq!(config.places.len(), 1);
        assert_eq!(config.places[0].name, "Kiruna");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_config_env() {
        env::set_var("DAYLENGTH__TIMEZONE__FALLBACK", "Europe/Oslo");
        let config = AppConfig::load(None).unwrap();
        env::remove_var("DAYLENGTH__TIMEZONE__FALLBACK");
        assert_eq!(config.fallback_zone().unwrap(), chrono_tz::Europe::Oslo);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let path = Path::new("/nonexistent/day_length.toml");
        assert!(AppConfig::load(Some(path)).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fallback() {
        let config = AppConfig {
            timezone: TimezoneConfig {
                fallback: "Mars/Olympus_Mons".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_place() {
        let config = AppConfig {
            places: vec![Place {
                name: "Nowhere".to_string(),
                latitude: 123.0,
                longitude: 0.0,
            }],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidCoordinate { .. })
        ));
    }
}
