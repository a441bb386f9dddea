use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Coordinate used when a location cannot be resolved (Midtown Manhattan)
pub const DEFAULT_FALLBACK: Coordinates = Coordinates {
    latitude: 40.7589,
    longitude: -73.9851,
};

/// Postal codes known without any lookup
const BUILTIN_POSTAL_CODES: [(&str, f64, f64); 4] = [
    ("10001", 40.7506, -73.9971),
    ("10002", 40.7156, -73.9862),
    ("10003", 40.7318, -73.9873),
    ("90210", 34.0901, -118.4065),
];

/// Errors that can occur when calling a remote geocoder
///
/// These never leave the resolver; they trigger the fallback chain.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Geocoder returned status {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Resolves an owner's location identifier into coordinates
///
/// Resolution never fails: implementations degrade to a fallback coordinate.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, location: &str) -> Coordinates;
}

/// Table-driven resolver for postal codes
#[derive(Debug, Clone)]
pub struct StaticGeocoder {
    table: HashMap<String, Coordinates>,
    fallback: Coordinates,
}

impl StaticGeocoder {
    /// Built-in table plus `extra` entries, which take precedence
    pub fn new(extra: HashMap<String, Coordinates>, fallback: Coordinates) -> Self {
        let mut table: HashMap<String, Coordinates> = BUILTIN_POSTAL_CODES
            .iter()
            .map(|(zip, lat, lon)| (zip.to_string(), Coordinates::new(*lat, *lon)))
            .collect();
        table.extend(extra);

        Self { table, fallback }
    }

    /// Exact table lookup, without falling back
    pub fn find(&self, location: &str) -> Option<Coordinates> {
        self.table.get(location.trim()).copied()
    }

    pub fn lookup(&self, location: &str) -> Coordinates {
        self.find(location).unwrap_or_else(|| {
            tracing::debug!("Unknown location {:?}, using fallback coordinate", location);
            self.fallback
        })
    }
}

impl Default for StaticGeocoder {
    fn default() -> Self {
        Self::new(HashMap::new(), DEFAULT_FALLBACK)
    }
}

#[async_trait]
impl LocationResolver for StaticGeocoder {
    async fn resolve(&self, location: &str) -> Coordinates {
        self.lookup(location)
    }
}

/// Remote postal-code geocoder with an in-memory cache
///
/// Queries `{endpoint}/{location}` and expects a body shaped like
/// `{"places": [{"latitude": "40.75", "longitude": "-73.99"}]}`.
/// Failures fall through to the static table, then the fallback coordinate.
pub struct HttpGeocoder {
    endpoint: String,
    client: Client,
    cache: moka::future::Cache<String, Coordinates>,
    fallback: StaticGeocoder,
}

#[derive(Debug, Deserialize)]
struct PostalLookup {
    #[serde(default)]
    places: Vec<PostalPlace>,
}

#[derive(Debug, Deserialize)]
struct PostalPlace {
    latitude: String,
    longitude: String,
}

impl HttpGeocoder {
    pub fn new(
        endpoint: String,
        timeout: Duration,
        cache_size: u64,
        fallback: StaticGeocoder,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder().timeout(timeout).build()?;
        let cache = moka::future::CacheBuilder::new(cache_size).build();

        Ok(Self {
            endpoint,
            client,
            cache,
            fallback,
        })
    }

    /// Query the remote service, bypassing cache and fallback
    pub async fn lookup(&self, location: &str) -> Result<Coordinates, GeocodeError> {
        let url = format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            urlencoding::encode(location)
        );

        tracing::debug!("Geocoding location via {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body: PostalLookup = response.json().await?;
        let place = body
            .places
            .first()
            .ok_or_else(|| GeocodeError::InvalidResponse("Missing places array".into()))?;

        let latitude = parse_degrees(&place.latitude)?;
        let longitude = parse_degrees(&place.longitude)?;

        Ok(Coordinates::new(latitude, longitude))
    }
}

#[async_trait]
impl LocationResolver for HttpGeocoder {
    async fn resolve(&self, location: &str) -> Coordinates {
        let key = location.trim().to_string();

        if let Some(coordinates) = self.cache.get(&key).await {
            tracing::trace!("Geocode cache hit: {}", key);
            return coordinates;
        }

        match self.lookup(&key).await {
            Ok(coordinates) => {
                self.cache.insert(key, coordinates).await;
                coordinates
            }
            Err(e) => {
                tracing::warn!("Geocoding {:?} failed, using static table: {}", key, e);
                self.fallback.lookup(&key)
            }
        }
    }
}

fn parse_degrees(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| GeocodeError::InvalidResponse(format!("Invalid coordinate {:?}", raw)))
}
