use crate::core::{
    availability::{detect_policy, requested_interval, window_covers},
    distance::distance_to,
    error::FieldError,
    tags::{is_blank_needs, normalize_tag, tag_set},
};
use crate::models::{
    AvailabilityPolicy, Coordinates, DateInterval, OwnerRequest, ScoringWeights, SitterProfile,
};

/// Distance step table: (upper bound in miles, inclusive; points)
const DISTANCE_TIERS: [(f64, u32); 6] = [
    (5.0, 40),
    (10.0, 35),
    (15.0, 30),
    (20.0, 25),
    (30.0, 20),
    (50.0, 15),
];

/// Points for anything beyond the last tier. Distance alone never zeroes a sitter.
const DISTANCE_FLOOR_POINTS: u32 = 10;

/// Highest value `calculate_distance_score` can return
pub const MAX_DISTANCE_POINTS: u32 = 40;

/// Owner-side inputs shared by every candidate in one matching run
#[derive(Debug, Clone)]
pub struct MatchContext {
    pub origin: Coordinates,
    pub service: String,
    pub interval: Result<DateInterval, FieldError>,
    pub needs: String,
}

impl MatchContext {
    pub fn new(request: &OwnerRequest, origin: Coordinates) -> Self {
        Self {
            origin,
            service: normalize_tag(&request.service),
            interval: requested_interval(&request.start_date, request.end_date.as_deref()),
            needs: request.needs.clone(),
        }
    }
}

/// Raw per-factor outcome for one sitter, before defaults are applied
#[derive(Debug, Clone, PartialEq)]
pub struct FactorScores {
    pub distance_miles: Result<f64, FieldError>,
    pub availability: Result<u32, FieldError>,
    pub service: u32,
    pub special_needs: u32,
}

/// Score every factor for a sitter
///
/// Scoring formula (nominal weights, max 120):
/// score = (
///     distance_points +        # 10-40, step table on miles
///     availability_points +    # 0 or 40
///     service_points +         # 0 or 20
///     special_needs_points     # 0-20, coverage of owner needs
/// )
///
/// Fallible factors are returned as `Result`; the matcher decides the default.
pub fn calculate_match_score(
    profile: &SitterProfile,
    context: &MatchContext,
    weights: &ScoringWeights,
) -> FactorScores {
    let distance_miles = distance_to(context.origin, profile.latitude, profile.longitude);

    let policy = detect_policy(profile);
    let availability = policy
        .as_ref()
        .map_err(Clone::clone)
        .and_then(|policy| {
            calculate_availability_score(policy, &context.interval, weights.availability)
        });

    let service = calculate_service_score(
        &context.service,
        profile.services.as_deref(),
        policy.as_ref().ok(),
        weights,
    );

    let special_needs = calculate_special_needs_score(
        &context.needs,
        profile.special_needs.as_deref().unwrap_or_default(),
        weights.special_needs,
    );

    FactorScores {
        distance_miles,
        availability,
        service,
        special_needs,
    }
}

/// Map a distance in miles to points on the step table
///
/// Boundaries belong to the nearer bucket: exactly 5 miles scores 40.
#[inline]
pub fn calculate_distance_score(distance_miles: f64) -> u32 {
    DISTANCE_TIERS
        .iter()
        .find(|(limit, _)| distance_miles <= *limit)
        .map(|(_, points)| *points)
        .unwrap_or(DISTANCE_FLOOR_POINTS)
}

/// Availability points under the sitter's policy
///
/// Date-range sitters must cover the whole requested interval. Flag sitters
/// score on the flag alone and ignore the requested dates.
pub fn calculate_availability_score(
    policy: &AvailabilityPolicy,
    requested: &Result<DateInterval, FieldError>,
    points: u32,
) -> Result<u32, FieldError> {
    match policy {
        AvailabilityPolicy::DateRange { start, end } => {
            let requested = requested.as_ref().map_err(Clone::clone)?;
            Ok(if window_covers(*start, *end, requested) { points } else { 0 })
        }
        AvailabilityPolicy::Flag { accepting } => Ok(if *accepting { points } else { 0 }),
    }
}

/// Service-match points
///
/// `requested` must already be normalized (trimmed, lowercased). A sitter
/// without a services list scores 0, unless it follows the flag schema and
/// `flag_implies_service` is set, in which case the flag stands in.
pub fn calculate_service_score(
    requested: &str,
    offered: Option<&str>,
    policy: Option<&AvailabilityPolicy>,
    weights: &ScoringWeights,
) -> u32 {
    let offered = offered.map(tag_set).unwrap_or_default();

    if !offered.is_empty() {
        return if offered.contains(requested) { weights.service } else { 0 };
    }

    match policy {
        Some(AvailabilityPolicy::Flag { accepting: true }) if weights.flag_implies_service => {
            weights.service
        }
        _ => 0,
    }
}

/// Special-needs coverage points
///
/// Coverage is asymmetric: the share of the owner's needs the sitter has
/// experience with. Extra sitter tags neither help nor hurt.
/// `points = ceil(max_points * |owner ∩ sitter| / |owner|)`
pub fn calculate_special_needs_score(owner_needs: &str, sitter_needs: &str, max_points: u32) -> u32 {
    if is_blank_needs(owner_needs) || is_blank_needs(sitter_needs) {
        return 0;
    }

    let owner_set = tag_set(owner_needs);
    let sitter_set = tag_set(sitter_needs);
    if owner_set.is_empty() || sitter_set.is_empty() {
        return 0;
    }

    let matches = owner_set.intersection(&sitter_set).count() as u32;
    let owner_count = owner_set.len() as u32;

    // Integer ceiling of max_points * matches / owner_count
    (max_points * matches).div_ceil(owner_count)
}
