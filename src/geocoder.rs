//! City name to coordinate lookup.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::Coordinate;

pub trait Geocoder {
    fn geocode(&self, city: &str) -> Option<Coordinate>;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

const KNOWN_PLACES: &[(&str, f64, f64)] = &[
    ("London", 51.5074, -0.1278),
    ("Paris", 48.8566, 2.3522),
    ("Berlin", 52.5200, 13.4050),
    ("Madrid", 40.4168, -3.7038),
    ("Rome", 41.9028, 12.4964),
    ("Lisbon", 38.7223, -9.1393),
    ("Amsterdam", 52.3676, 4.9041),
    ("Vienna", 48.2082, 16.3738),
    ("Warsaw", 52.2297, 21.0122),
    ("Kyiv", 50.4501, 30.5234),
    ("Athens", 37.9838, 23.7275),
    ("Istanbul", 41.0082, 28.9784),
    ("Moscow", 55.7558, 37.6173),
    ("Stockholm", 59.3293, 18.0686),
    ("Oslo", 59.9139, 10.7522),
    ("Helsinki", 60.1699, 24.9384),
    ("Trondheim", 63.4305, 10.3951),
    ("Reykjavik", 64.1466, -21.9426),
    ("Tromsø", 69.6492, 18.9553),
    ("Murmansk", 68.9585, 33.0827),
    ("Longyearbyen", 78.2232, 15.6267),
    ("Nuuk", 64.1814, -51.6941),
    ("Cairo", 30.0444, 31.2357),
    ("Lagos", 6.5244, 3.3792),
    ("Nairobi", -1.2921, 36.8219),
    ("Cape Town", -33.9249, 18.4241),
    ("Dubai", 25.2048, 55.2708),
    ("Mumbai", 19.0760, 72.8777),
    ("Delhi", 28.7041, 77.1025),
    ("Bangkok", 13.7563, 100.5018),
    ("Singapore", 1.3521, 103.8198),
    ("Beijing", 39.9042, 116.4074),
    ("Shanghai", 31.2304, 121.4737),
    ("Seoul", 37.5665, 126.9780),
    ("Tokyo", 35.6762, 139.6503),
    ("Sydney", -33.8688, 151.2093),
    ("Melbourne", -37.8136, 144.9631),
    ("Auckland", -36.8485, 174.7633),
    ("Honolulu", 21.3099, -157.8581),
    ("Anchorage", 61.2181, -149.9003),
    ("Utqiagvik", 71.2906, -156.7886),
    ("Vancouver", 49.2827, -123.1207),
    ("Los Angeles", 34.0522, -118.2437),
    ("Denver", 39.7392, -104.9903),
    ("Springfield", 39.8000, -89.6000),
    ("Chicago", 41.8781, -87.6298),
    ("Toronto", 43.6532, -79.3832),
    ("New York", 40.7128, -74.0060),
    ("Mexico City", 19.4326, -99.1332),
    ("Bogota", 4.7110, -74.0721),
    ("Lima", -12.0464, -77.0428),
    ("São Paulo", -23.5505, -46.6333),
    ("Buenos Aires", -34.6037, -58.3816),
    ("Ushuaia", -54.8019, -68.3030),
    ("McMurdo Station", -77.8460, 166.6760),
];

/// Title-cases a city name the way lookups key it: "new YORK " becomes "New York".
pub fn normalize_city(city: &str) -> String {
    let mut out = String::with_capacity(city.len());
    let mut prev_letter = false;
    for c in city.trim().chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

/// Offline geocoder over a fixed list of places.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    places: Vec<Place>,
}

impl Default for Gazetteer {
    fn default() -> Self {
        let places = KNOWN_PLACES
            .iter()
            .map(|&(name, latitude, longitude)| Place {
                name: name.to_string(),
                latitude,
                longitude,
            })
            .collect();
        Self { places }
    }
}

impl Gazetteer {
    /// Built-in places plus `extra`; an extra place replaces a built-in one of the same name.
    pub fn with_places(extra: Vec<Place>) -> Self {
        let mut gazetteer = Self::default();
        for place in extra {
            let key = normalize_city(&place.name);
            gazetteer.places.retain(|p| normalize_city(&p.name) != key);
            gazetteer.places.push(place);
        }
        gazetteer
    }

    pub fn find(&self, city: &str) -> Option<&Place> {
        let key = normalize_city(city);
        self.places.iter().find(|p| normalize_city(&p.name) == key)
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }
}

impl Geocoder for Gazetteer {
    fn geocode(&self, city: &str) -> Option<Coordinate> {
        self.find(city).map(Place::coordinate)
    }
}

/// Memoizes successful lookups by normalized name for as long as it lives.
/// Misses are not cached so a corrected spelling is looked up again.
pub struct GeocodeCache<G> {
    geocoder: G,
    entries: HashMap<String, Coordinate>,
}

impl<G: Geocoder> GeocodeCache<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            entries: HashMap::new(),
        }
    }

    pub fn locate(&mut self, city: &str) -> Result<Coordinate> {
        let key = normalize_city(city);
        if let Some(coordinate) = self.entries.get(&key) {
            debug!("Geocode cache hit for {}", key);
            return Ok(*coordinate);
        }

        let coordinate = self
            .geocoder
            .geocode(&key)
            .ok_or_else(|| Error::LocationNotFound { city: key.clone() })?;
        coordinate.validate()?;
        info!(
            "Located {} at ({:.4}, {:.4})",
            key, coordinate.latitude, coordinate.longitude
        );
        self.entries.insert(key, coordinate);
        Ok(coordinate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }
}
