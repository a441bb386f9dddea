use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Sitter record as supplied by a roster
///
/// Two schemas are observed in the wild: a date-range schema
/// (`availability_start` / `availability_end`) and a boolean-flag schema
/// (`accepting_bookings`). Every field except `name` may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SitterProfile {
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub zip_code: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub services: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub special_needs: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub availability_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub availability_end: Option<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub accepting_bookings: Option<String>,
}

impl SitterProfile {
    /// Location label shown to the owner, empty when unknown
    pub fn location_label(&self) -> String {
        self.zip_code.clone().unwrap_or_default()
    }

    /// Whether this record follows the date-range schema
    pub fn has_date_range(&self) -> bool {
        self.availability_start.is_some() || self.availability_end.is_some()
    }
}

/// Owner's matching request, immutable for one matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRequest {
    /// Location identifier resolved externally (postal code)
    pub location: String,
    pub service: String,
    pub start_date: String,
    pub end_date: Option<String>,
    /// Comma-delimited special-care needs
    pub needs: String,
}

/// How a candidate's availability is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityPolicy {
    DateRange { start: NaiveDate, end: NaiveDate },
    Flag { accepting: bool },
}

/// Inclusive calendar-date interval requested by the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Points awarded per factor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub distance: u32,
    pub availability: u32,
    pub service: u32,
    pub special_needs: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.distance + self.availability + self.service + self.special_needs
    }
}

/// Scored and ranked sitter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitterMatch {
    pub name: String,
    pub location: String,
    /// Miles, rounded to two decimals
    pub distance: f64,
    pub score: u32,
    pub availability: String,
    pub special_needs: String,
    pub breakdown: ScoreBreakdown,
}

/// Maximum points per factor
///
/// The distance factor follows a fixed step table and tops out at 40.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub availability: u32,
    pub service: u32,
    pub special_needs: u32,
    /// Reuse the booking flag as a service match when no services list exists
    pub flag_implies_service: bool,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            availability: 40,
            service: 20,
            special_needs: 20,
            flag_implies_service: true,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Bool(bool),
    Text(String),
}

/// Accepts numbers or numeric strings; anything else becomes `None`
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawScalar::Number(value)) => Some(value),
        Some(RawScalar::Text(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Accepts booleans, numbers or strings and keeps their textual form
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer).unwrap_or(None);
    Ok(match raw {
        Some(RawScalar::Bool(flag)) => Some(flag.to_string()),
        Some(RawScalar::Number(value)) => Some(value.to_string()),
        Some(RawScalar::Text(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    })
}
