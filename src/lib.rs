pub mod config;
pub mod daylight;
pub mod error;
pub mod geocoder;
pub mod session;
pub mod summary;
pub mod sun;
pub mod timezone;
pub mod types;
pub mod year_table;

pub use daylight::{
    apply_partial, day_light_info, day_light_info_at, partial_times, polar_baseline,
    standard_times, PartialTimes,
};

pub use error::{Error, Result};

pub use geocoder::{normalize_city, GeocodeCache, Gazetteer, Geocoder, Place};

pub use session::{ComparedCity, DaySnapshot, Location, Report, Session};

pub use summary::{
    day_length_deltas, format_duration, Comparison, ComparisonRow, DayLengthDelta, Extreme,
    Summary,
};

pub use sun::{SolarEvent, SunTimes};

pub use timezone::{resolve_or, FixedZone, TimezoneResolver, ZoneBoundaries};

pub use types::{
    Coordinate, DayKind, DayLightInfo, LocalTimes, Progress, YearRow, YearTable,
    POLAR_DAY_SECONDS, POLAR_NIGHT_SECONDS, SECONDS_PER_DAY,
};

pub use year_table::{build, build_with_progress, dates_of_year, time_to_number};
