use crate::core::error::FieldError;
use crate::models::{AvailabilityPolicy, DateInterval, SitterProfile};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values of the booking flag that count as "accepting"
const TRUTHY_FLAGS: [&str; 3] = ["yes", "true", "1"];

/// Parse a calendar date in `YYYY-MM-DD` form
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| FieldError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

/// Build the owner's requested interval
///
/// An absent or blank end date means a single-day request.
pub fn requested_interval(start: &str, end: Option<&str>) -> Result<DateInterval, FieldError> {
    let start = parse_date("start_date", start)?;
    let end = match end.filter(|value| !value.trim().is_empty()) {
        Some(raw) => parse_date("end_date", raw)?,
        None => start,
    };

    Ok(DateInterval { start, end })
}

#[inline]
pub fn is_truthy_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    TRUTHY_FLAGS
        .iter()
        .any(|flag| trimmed.eq_ignore_ascii_case(flag))
}

/// Detect which availability schema a sitter record follows
///
/// A start/end pair selects the date-range policy, otherwise the booking
/// flag is used. A record carrying neither has no usable availability.
pub fn detect_policy(profile: &SitterProfile) -> Result<AvailabilityPolicy, FieldError> {
    if profile.has_date_range() {
        let start = profile
            .availability_start
            .as_deref()
            .ok_or(FieldError::Missing { field: "availability_start" })?;
        let end = profile
            .availability_end
            .as_deref()
            .ok_or(FieldError::Missing { field: "availability_end" })?;

        return Ok(AvailabilityPolicy::DateRange {
            start: parse_date("availability_start", start)?,
            end: parse_date("availability_end", end)?,
        });
    }

    match profile.accepting_bookings.as_deref() {
        Some(flag) => Ok(AvailabilityPolicy::Flag {
            accepting: is_truthy_flag(flag),
        }),
        None => Err(FieldError::Missing { field: "availability" }),
    }
}

/// True when the whole requested interval lies inside the sitter's window
#[inline]
pub fn window_covers(start: NaiveDate, end: NaiveDate, requested: &DateInterval) -> bool {
    start <= requested.start && requested.end <= end
}

/// Human-readable availability shown next to a match
pub fn describe_availability(profile: &SitterProfile) -> String {
    if profile.has_date_range() {
        return format!(
            "{} to {}",
            profile.availability_start.as_deref().unwrap_or("?"),
            profile.availability_end.as_deref().unwrap_or("?")
        );
    }

    match profile.accepting_bookings.as_deref() {
        Some(flag) if is_truthy_flag(flag) => "Accepting bookings".to_string(),
        Some(_) => "Not accepting bookings".to_string(),
        None => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap()
    }

    fn ranged(start: Option<&str>, end: Option<&str>) -> SitterProfile {
        SitterProfile {
            name: "Alice".to_string(),
            availability_start: start.map(str::to_string),
            availability_end: end.map(str::to_string),
            ..Default::default()
        }
    }

    fn flagged(flag: Option<&str>) -> SitterProfile {
        SitterProfile {
            name: "Bob".to_string(),
            accepting_bookings: flag.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_requested_interval_defaults_end_to_start() {
        let interval = requested_interval("2025-01-10", None).unwrap();
        assert_eq!(interval.start, interval.end);

        let interval = requested_interval("2025-01-10", Some("  ")).unwrap();
        assert_eq!(interval.end, date("2025-01-10"));
    }

    #[test]
    fn test_requested_interval_rejects_malformed_dates() {
        assert!(matches!(
            requested_interval("01/10/2025", None),
            Err(FieldError::InvalidDate { field: "start_date", .. })
        ));
        assert!(matches!(
            requested_interval("2025-01-10", Some("2025-02-30")),
            Err(FieldError::InvalidDate { field: "end_date", .. })
        ));
    }

    #[test]
    fn test_detect_date_range_policy() {
        let policy = detect_policy(&ranged(Some("2025-01-01"), Some("2025-01-31"))).unwrap();
        assert_eq!(
            policy,
            AvailabilityPolicy::DateRange {
                start: date("2025-01-01"),
                end: date("2025-01-31"),
            }
        );
    }

    #[test]
    fn test_half_open_range_is_a_defect() {
        assert_eq!(
            detect_policy(&ranged(Some("2025-01-01"), None)),
            Err(FieldError::Missing { field: "availability_end" })
        );
    }

    #[test]
    fn test_detect_flag_policy() {
        for truthy in ["yes", "TRUE", " 1 "] {
            assert_eq!(
                detect_policy(&flagged(Some(truthy))),
                Ok(AvailabilityPolicy::Flag { accepting: true })
            );
        }
        assert_eq!(
            detect_policy(&flagged(Some("no"))),
            Ok(AvailabilityPolicy::Flag { accepting: false })
        );
        assert_eq!(
            detect_policy(&flagged(None)),
            Err(FieldError::Missing { field: "availability" })
        );
    }

    #[test]
    fn test_window_covers_boundaries() {
        let requested = DateInterval {
            start: date("2025-01-01"),
            end: date("2025-01-31"),
        };
        assert!(window_covers(date("2025-01-01"), date("2025-01-31"), &requested));
        assert!(!window_covers(date("2025-01-02"), date("2025-01-31"), &requested));
        assert!(!window_covers(date("2025-01-01"), date("2025-01-30"), &requested));
    }

    #[test]
    fn test_describe_availability() {
        assert_eq!(
            describe_availability(&ranged(Some("2025-01-01"), Some("2025-12-31"))),
            "2025-01-01 to 2025-12-31"
        );
        assert_eq!(describe_availability(&flagged(Some("Yes"))), "Accepting bookings");
        assert_eq!(describe_availability(&flagged(Some("no"))), "Not accepting bookings");
        assert_eq!(describe_availability(&flagged(None)), "Unknown");
    }
}
