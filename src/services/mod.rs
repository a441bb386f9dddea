// Service exports
pub mod geocoder;
pub mod roster;

pub use geocoder::{GeocodeError, HttpGeocoder, LocationResolver, StaticGeocoder, DEFAULT_FALLBACK};
pub use roster::{parse_roster, CsvRoster, SampleRoster, SitterSource, SourceError};
