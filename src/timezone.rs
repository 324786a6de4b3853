//! Coordinate to IANA timezone lookup.

use std::sync::OnceLock;

use chrono_tz::Tz;
use tracing::{debug, warn};
use tzf_rs::DefaultFinder;

use crate::error::{Error, Result};
use crate::types::Coordinate;

pub trait TimezoneResolver {
    fn timezone_at(&self, coordinate: Coordinate) -> Result<Tz>;
}

/// Looks the zone up in the bundled timezone boundary polygons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneBoundaries;

fn finder() -> &'static DefaultFinder {
    static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
    FINDER.get_or_init(DefaultFinder::new)
}

impl TimezoneResolver for ZoneBoundaries {
    fn timezone_at(&self, coordinate: Coordinate) -> Result<Tz> {
        // tzf-rs takes (longitude, latitude)
        let name = finder().get_tz_name(coordinate.longitude, coordinate.latitude);
        debug!(
            "Zone at ({}, {}) is {:?}",
            coordinate.latitude, coordinate.longitude, name
        );
        name.parse::<Tz>().map_err(|_| Error::TimezoneNotFound {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

/// Always answers with the same zone.
#[derive(Debug, Clone, Copy)]
pub struct FixedZone(pub Tz);

impl TimezoneResolver for FixedZone {
    fn timezone_at(&self, _coordinate: Coordinate) -> Result<Tz> {
        Ok(self.0)
    }
}

/// Resolves the zone for display, degrading to `fallback` when none is found.
pub fn resolve_or<R: TimezoneResolver + ?Sized>(
    resolver: &R,
    coordinate: Coordinate,
    fallback: Tz,
) -> Tz {
    match resolver.timezone_at(coordinate) {
        Ok(tz) => tz,
        Err(e) => {
            warn!("{}, showing times in {}", e, fallback);
            fallback
        }
    }
}
