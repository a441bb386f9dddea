use crate::models::SitterProfile;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading a sitter roster
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to open roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed roster row: {0}")]
    Csv(#[from] csv::Error),
}

/// Supplies the candidate sitters for a matching run
pub trait SitterSource: Send + Sync {
    fn load(&self) -> Result<Vec<SitterProfile>, SourceError>;
}

/// Built-in demonstration roster (five sitters around Manhattan)
#[derive(Debug, Clone, Default)]
pub struct SampleRoster;

impl SitterSource for SampleRoster {
    fn load(&self) -> Result<Vec<SitterProfile>, SourceError> {
        Ok(sample_sitters())
    }
}

/// Roster read from a CSV file on every load
///
/// Expected headers: `name, zip_code, latitude, longitude, services,
/// special_needs, availability_start, availability_end, accepting_bookings`.
/// Only `name` is required; blank cells are treated as absent.
#[derive(Debug, Clone)]
pub struct CsvRoster {
    path: PathBuf,
}

impl CsvRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SitterSource for CsvRoster {
    fn load(&self) -> Result<Vec<SitterProfile>, SourceError> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;

        let sitters = parse_roster(file)?;
        tracing::debug!("Loaded {} sitters from {}", sitters.len(), self.path.display());
        Ok(sitters)
    }
}

/// Parse roster rows from any CSV reader
///
/// Rows that fail to deserialize are logged and skipped. Only read failures
/// and an unreadable header abort the load.
pub fn parse_roster<R: std::io::Read>(reader: R) -> Result<Vec<SitterProfile>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader.headers()?;

    let mut sitters = Vec::new();
    for record in csv_reader.deserialize::<SitterProfile>() {
        match record {
            Ok(sitter) => sitters.push(sitter),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|pos| pos.line()).unwrap_or_default();
                tracing::warn!("Skipping malformed roster row at line {}: {}", line, e);
            }
        }
    }

    Ok(sitters)
}

fn sitter(
    name: &str,
    zip_code: &str,
    latitude: f64,
    longitude: f64,
    services: &str,
    special_needs: &str,
    availability: (&str, &str),
) -> SitterProfile {
    SitterProfile {
        name: name.to_string(),
        zip_code: Some(zip_code.to_string()),
        latitude: Some(latitude),
        longitude: Some(longitude),
        services: Some(services.to_string()),
        special_needs: Some(special_needs.to_string()),
        availability_start: Some(availability.0.to_string()),
        availability_end: Some(availability.1.to_string()),
        accepting_bookings: None,
    }
}

fn sample_sitters() -> Vec<SitterProfile> {
    vec![
        sitter(
            "Alice Johnson",
            "10001",
            40.7589,
            -73.9851,
            "catBoarding,inHomeVisits",
            "Medication (Daily), Anxiety, Senior Cats",
            ("2025-01-01", "2025-12-31"),
        ),
        sitter(
            "Bob Smith",
            "10002",
            40.7614,
            -73.9776,
            "catBoarding",
            "Kittens, Medication (Occasional)",
            ("2025-01-15", "2025-06-30"),
        ),
        sitter(
            "Carol Williams",
            "10003",
            40.7489,
            -73.9680,
            "inHomeVisits",
            "Anxiety, Blindness, Mobility Issues",
            ("2025-01-01", "2025-12-31"),
        ),
        sitter(
            "David Brown",
            "10004",
            40.7569,
            -73.9862,
            "catBoarding,inHomeVisits",
            "Diabetes, Senior Cats, Medication (Daily)",
            ("2025-01-20", "2025-12-31"),
        ),
        sitter(
            "Emma Davis",
            "10005",
            40.7639,
            -73.9723,
            "catBoarding",
            "Kittens, Deafness",
            ("2025-01-01", "2025-12-31"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_roster() {
        let sitters = SampleRoster.load().unwrap();
        assert_eq!(sitters.len(), 5);
        assert_eq!(sitters[0].name, "Alice Johnson");
        assert!(sitters.iter().all(|s| s.has_date_range()));
    }

    #[test]
    fn test_parse_roster_mixed_schemas() {
        let csv = "\
name,zip_code,latitude,longitude,services,special_needs,availability_start,availability_end,accepting_bookings
Alice Johnson,10001,40.7589,-73.9851,\"catBoarding,inHomeVisits\",Anxiety,2025-01-01,2025-12-31,
Frank Miller,10006,40.7090,-74.0130,,Kittens,,,yes
Broken Row,10007,not-a-number,-74.0,catBoarding,,,,
";

        let sitters = parse_roster(csv.as_bytes()).unwrap();

        assert_eq!(sitters.len(), 3);
        assert_eq!(sitters[0].services.as_deref(), Some("catBoarding,inHomeVisits"));
        assert!(sitters[0].has_date_range());

        assert!(!sitters[1].has_date_range());
        assert_eq!(sitters[1].accepting_bookings.as_deref(), Some("yes"));
        assert!(sitters[1].services.is_none());

        assert_eq!(sitters[2].latitude, None);
        assert_eq!(sitters[2].longitude, Some(-74.0));
    }

    #[test]
    fn test_parse_roster_without_optional_columns() {
        let csv = "name,latitude,longitude\nGrace Lee,40.7,-73.9\n";

        let sitters = parse_roster(csv.as_bytes()).unwrap();

        assert_eq!(sitters.len(), 1);
        assert!(sitters[0].zip_code.is_none());
        assert!(sitters[0].accepting_bookings.is_none());
    }

    #[test]
    fn test_parse_roster_skips_undecodable_row() {
        let mut csv = b"name,zip_code,services\nAlice Johnson,10001,catBoarding\n".to_vec();
        csv.extend_from_slice(b"Bad Bytes,10002,cat\xffBoarding\n");
        csv.extend_from_slice(b"Emma Davis,10005,catBoarding\n");

        let sitters = parse_roster(csv.as_slice()).unwrap();

        let names: Vec<_> = sitters.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alice Johnson", "Emma Davis"]);
    }

    #[test]
    fn test_csv_roster_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,zip_code,accepting_bookings").unwrap();
        writeln!(file, "Henry Ford,10010,1").unwrap();

        let roster = CsvRoster::new(file.path());
        let sitters = roster.load().unwrap();

        assert_eq!(sitters.len(), 1);
        assert_eq!(sitters[0].accepting_bookings.as_deref(), Some("1"));
    }

    #[test]
    fn test_csv_roster_missing_file() {
        let roster = CsvRoster::new("/nonexistent/sitters.csv");
        assert!(matches!(roster.load(), Err(SourceError::Io { .. })));
    }
}
