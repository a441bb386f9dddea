use crate::core::error::FieldError;
use crate::models::Coordinates;

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3956.0;

/// Distance reported for candidates whose location cannot be interpreted.
/// Large enough to land in the lowest distance bucket.
pub const UNKNOWN_DISTANCE_MILES: f64 = 999_999.0;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Great-circle distance in miles
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Clamp guards against `a` drifting past 1.0 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_MILES * c
}

/// Distance from the owner to a sitter whose coordinates may be absent
/// or non-finite
pub fn distance_to(
    origin: Coordinates,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<f64, FieldError> {
    let lat = finite_coordinate("latitude", latitude)?;
    let lon = finite_coordinate("longitude", longitude)?;
    let origin_lat = finite_coordinate("origin latitude", Some(origin.latitude))?;
    let origin_lon = finite_coordinate("origin longitude", Some(origin.longitude))?;

    Ok(haversine_distance(origin_lat, origin_lon, lat, lon))
}

/// Like `distance_to`, but substitutes `UNKNOWN_DISTANCE_MILES` on bad input
pub fn distance_or_unknown(
    origin: Coordinates,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> f64 {
    distance_to(origin, latitude, longitude).unwrap_or(UNKNOWN_DISTANCE_MILES)
}

/// Round a distance for display
#[inline]
pub fn round_miles(miles: f64) -> f64 {
    (miles * 100.0).round() / 100.0
}

fn finite_coordinate(field: &'static str, value: Option<f64>) -> Result<f64, FieldError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(FieldError::InvalidCoordinate {
            field,
            value: v.to_string(),
        }),
        None => Err(FieldError::Missing { field }),
    }
}
