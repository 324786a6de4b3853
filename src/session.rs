//! One user interaction: which cities, which year, which day to highlight.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::geocoder::{normalize_city, GeocodeCache, Geocoder};
use crate::summary::{day_length_deltas, format_duration, Comparison, DayLengthDelta, Summary};
use crate::timezone::{resolve_or, TimezoneResolver};
use crate::types::{Coordinate, DayKind, Progress, YearTable};
use crate::year_table;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    city: String,
    compare_with: Option<String>,
    date: Option<NaiveDate>,
    year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub coordinate: Coordinate,
    pub timezone: Tz,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub sunrise: Option<DateTime<Tz>>,
    pub sunset: Option<DateTime<Tz>>,
    pub day_length: i64,
    pub day_length_text: String,
    pub kind: DayKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedCity {
    pub location: Location,
    pub summary: Summary,
    pub series: Comparison,
}

/// Everything the presentation layer renders for a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub year: i32,
    pub location: Location,
    pub table: YearTable,
    pub summary: Summary,
    pub deltas: Vec<DayLengthDelta>,
    pub selected: Option<DaySnapshot>,
    pub comparison: Option<ComparedCity>,
}

impl Session {
    pub fn new(city: &str, year: i32) -> Self {
        Self {
            city: normalize_city(city),
            compare_with: None,
            date: None,
            year,
        }
    }

    /// A comparison needs a primary city; blank names are ignored.
    pub fn compare_with(mut self, city: &str) -> Self {
        let city = normalize_city(city);
        self.compare_with = if city.is_empty() || self.city.is_empty() {
            None
        } else {
            Some(city)
        };
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn comparison_city(&self) -> Option<&str> {
        self.compare_with.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn run<G, R, F>(
        &self,
        geocoder: &mut GeocodeCache<G>,
        resolver: &R,
        fallback: Tz,
        mut on_progress: F,
    ) -> Result<Report>
    where
        G: Geocoder,
        R: TimezoneResolver + ?Sized,
        F: FnMut(&str, Progress),
    {
        if self.city.is_empty() {
            return Err(Error::LocationNotFound {
                city: String::new(),
            });
        }
        if let Some(date) = self.date {
            if date.year() != self.year {
                return Err(Error::DateOutsideYear {
                    date,
                    year: self.year,
                });
            }
        }

        let location = locate(&self.city, geocoder, resolver, fallback)?;
        let other = match &self.compare_with {
            Some(name) => Some(locate(name, geocoder, resolver, fallback)?),
            None => None,
        };

        info!("Building {} table for {}", self.year, location.name);
        let table = year_table::build_with_progress(
            location.coordinate,
            self.year,
            location.timezone,
            |p| on_progress(&location.name, p),
        )?;
        let summary = Summary::of(&table);
        let deltas = day_length_deltas(&table);
        let selected = self.date.and_then(|d| snapshot(&table, d));

        let comparison = match other {
            Some(other) => {
                info!("Building {} table for {}", self.year, other.name);
                let other_table = year_table::build_with_progress(
                    other.coordinate,
                    self.year,
                    other.timezone,
                    |p| on_progress(&other.name, p),
                )?;
                Some(ComparedCity {
                    summary: Summary::of(&other_table),
                    series: Comparison::merge(&table, &other_table, &other.name),
                    location: other,
                })
            }
            None => None,
        };

        Ok(Report {
            year: self.year,
            location,
            table,
            summary,
            deltas,
            selected,
            comparison,
        })
    }
}

fn locate<G, R>(
    city: &str,
    geocoder: &mut GeocodeCache<G>,
    resolver: &R,
    fallback: Tz,
) -> Result<Location>
where
    G: Geocoder,
    R: TimezoneResolver + ?Sized,
{
    let coordinate = geocoder.locate(city)?;
    let timezone = resolve_or(resolver, coordinate, fallback);
    Ok(Location {
        name: normalize_city(city),
        coordinate,
        timezone,
    })
}

pub fn snapshot(table: &YearTable, date: NaiveDate) -> Option<DaySnapshot> {
    let row = table.get(date)?;
    Some(DaySnapshot {
        date,
        sunrise: row.local.sunrise.clone(),
        sunset: row.local.sunset.clone(),
        day_length: row.day_length(),
        day_length_text: format_duration(row.day_length()),
        kind: row.info.kind,
    })
}
