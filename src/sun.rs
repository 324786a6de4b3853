//! Sun event times from the NOAA solar equations.
//!
//! All instants are UTC, measured from UTC midnight of the requested date. Far
//! from the prime meridian an event can land on the previous or next UTC date
//! (Sydney's sunrise for a June date falls on the evening before in UTC), so
//! differences between events must be taken modulo a day. A zenith that the
//! sun never reaches on a date yields [`Error::PolarAnomaly`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Zenith of the sun's upper limb at sunrise/sunset, refraction included.
pub const SUNRISE_ZENITH: f64 = 90.833;
pub const CIVIL_DEPRESSION: f64 = 6.0;
pub const NAUTICAL_DEPRESSION: f64 = 12.0;
pub const ASTRONOMICAL_DEPRESSION: f64 = 18.0;

const MAX_LATITUDE: f64 = 89.8;
const J2000: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SolarEvent {
    Dawn,
    Sunrise,
    Noon,
    Sunset,
    Dusk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rising,
    Setting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub dawn: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
    pub noon: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub dusk: DateTime<Utc>,
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Julian day at 00:00 UT of `date`.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (mut y, mut m) = (date.year() as f64, date.month() as f64);
    if m <= 2.0 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + date.day() as f64 + b
        - 1524.5
}

pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000) / DAYS_PER_CENTURY
}

fn geom_mean_long_sun(jc: f64) -> f64 {
    normalize_angle(280.46646 + jc * (36000.76983 + 0.0003032 * jc))
}

fn geom_mean_anomaly_sun(jc: f64) -> f64 {
    357.52911 + jc * (35999.05029 - 0.0001537 * jc)
}

fn eccentricity_earth_orbit(jc: f64) -> f64 {
    0.016708634 - jc * (0.000042037 + 0.0000001267 * jc)
}

fn sun_eq_of_center(jc: f64) -> f64 {
    let m = deg_to_rad(geom_mean_anomaly_sun(jc));
    m.sin() * (1.914602 - jc * (0.004817 + 0.000014 * jc))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * jc)
        + (3.0 * m).sin() * 0.000289
}

fn sun_apparent_long(jc: f64) -> f64 {
    let true_long = geom_mean_long_sun(jc) + sun_eq_of_center(jc);
    let omega = 125.04 - 1934.136 * jc;
    true_long - 0.00569 - 0.00478 * deg_to_rad(omega).sin()
}

fn obliquity_correction(jc: f64) -> f64 {
    let seconds = 21.448 - jc * (46.815 + jc * (0.00059 - jc * 0.001813));
    let mean_obliquity = 23.0 + (26.0 + seconds / 60.0) / 60.0;
    let omega = 125.04 - 1934.136 * jc;
    mean_obliquity + 0.00256 * deg_to_rad(omega).cos()
}

pub fn solar_declination(jc: f64) -> f64 {
    let e = deg_to_rad(obliquity_correction(jc));
    let lambda = deg_to_rad(sun_apparent_long(jc));
    rad_to_deg((e.sin() * lambda.sin()).asin())
}

/// Equation of time in minutes.
pub fn equation_of_time(jc: f64) -> f64 {
    let epsilon = deg_to_rad(obliquity_correction(jc));
    let l0 = deg_to_rad(geom_mean_long_sun(jc));
    let e = eccentricity_earth_orbit(jc);
    let m = deg_to_rad(geom_mean_anomaly_sun(jc));
    let y = (epsilon / 2.0).tan().powi(2);

    let eq = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    4.0 * rad_to_deg(eq)
}

/// Hour angle in degrees at which the sun reaches `zenith`; `None` when it never does.
pub fn hour_angle(
    latitude: f64,
    declination: f64,
    zenith: f64,
    direction: Direction,
) -> Option<f64> {
    let lat = deg_to_rad(latitude);
    let dec = deg_to_rad(declination);
    let zen = deg_to_rad(zenith);
    let h = (zen.cos() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    if !(-1.0..=1.0).contains(&h) {
        return None;
    }
    let ha = rad_to_deg(h.acos());
    Some(match direction {
        Direction::Rising => ha,
        Direction::Setting => -ha,
    })
}

fn at_minutes(date: NaiveDate, minutes: f64) -> DateTime<Utc> {
    let midnight = date.and_time(chrono::NaiveTime::MIN).and_utc();
    midnight + Duration::seconds((minutes * 60.0).round() as i64)
}

/// UTC instant on `date` at which the sun crosses `zenith` going in `direction`.
///
/// Runs two passes: the first estimates the event time from the declination at
/// midnight, the second refines declination and equation of time at that estimate.
pub fn time_of_transit(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    zenith: f64,
    direction: Direction,
    event: SolarEvent,
) -> Result<DateTime<Utc>> {
    let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let jd = julian_day(date);

    let mut jc = julian_century(jd);
    let mut minutes = 0.0;
    for _ in 0..2 {
        let declination = solar_declination(jc);
        let ha = hour_angle(latitude, declination, zenith, direction)
            .ok_or(Error::PolarAnomaly { event })?;
        let delta = -longitude - ha;
        minutes = 720.0 + 4.0 * delta - equation_of_time(jc);
        jc = julian_century(jd + minutes / 1440.0);
    }

    Ok(at_minutes(date, minutes))
}

/// Solar noon never fails, the sun always transits the meridian.
pub fn noon(longitude: f64, date: NaiveDate) -> DateTime<Utc> {
    let jc = julian_century(julian_day(date));
    let minutes = 720.0 - 4.0 * longitude - equation_of_time(jc);
    at_minutes(date, minutes)
}

pub fn sunrise(latitude: f64, longitude: f64, date: NaiveDate) -> Result<DateTime<Utc>> {
    time_of_transit(
        latitude,
        longitude,
        date,
        SUNRISE_ZENITH,
        Direction::Rising,
        SolarEvent::Sunrise,
    )
}

pub fn sunset(latitude: f64, longitude: f64, date: NaiveDate) -> Result<DateTime<Utc>> {
    time_of_transit(
        latitude,
        longitude,
        date,
        SUNRISE_ZENITH,
        Direction::Setting,
        SolarEvent::Sunset,
    )
}

pub fn dawn(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    depression: f64,
) -> Result<DateTime<Utc>> {
    time_of_transit(
        latitude,
        longitude,
        date,
        90.0 + depression,
        Direction::Rising,
        SolarEvent::Dawn,
    )
}

pub fn dusk(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    depression: f64,
) -> Result<DateTime<Utc>> {
    time_of_transit(
        latitude,
        longitude,
        date,
        90.0 + depression,
        Direction::Setting,
        SolarEvent::Dusk,
    )
}

/// All five events of a day; fails on the first event the sun does not reach.
pub fn sun_times(
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
    depression: f64,
) -> Result<SunTimes> {
    Ok(SunTimes {
        dawn: dawn(latitude, longitude, date, depression)?,
        sunrise: sunrise(latitude, longitude, date)?,
        noon: noon(longitude, date),
        sunset: sunset(latitude, longitude, date)?,
        dusk: dusk(latitude, longitude, date, depression)?,
    })
}

/// Geometric elevation of the sun above the horizon in degrees.
pub fn solar_elevation(latitude: f64, longitude: f64, at: DateTime<Utc>) -> f64 {
    let seconds = at.num_seconds_from_midnight() as f64;
    let jc = julian_century(julian_day(at.date_naive()) + seconds / 86_400.0);
    let declination = deg_to_rad(solar_declination(jc));
    let true_solar_minutes =
        (seconds / 60.0 + equation_of_time(jc) + 4.0 * longitude).rem_euclid(1440.0);
    let ha = deg_to_rad(true_solar_minutes / 4.0 - 180.0);
    let lat = deg_to_rad(latitude);

    let cos_zenith = lat.sin() * declination.sin() + lat.cos() * declination.cos() * ha.cos();
    90.0 - rad_to_deg(cos_zenith.clamp(-1.0, 1.0).acos())
}
