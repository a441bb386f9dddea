// Core algorithm exports
pub mod availability;
pub mod distance;
pub mod error;
pub mod matcher;
pub mod scoring;
pub mod tags;

pub use availability::{describe_availability, detect_policy, requested_interval};
pub use distance::{distance_or_unknown, distance_to, haversine_distance, UNKNOWN_DISTANCE_MILES};
pub use error::{Factor, FieldError, ScoringIssue};
pub use matcher::{MatchResult, Matcher, DEFAULT_RESULT_LIMIT};
pub use scoring::{
    calculate_availability_score, calculate_distance_score, calculate_match_score,
    calculate_service_score, calculate_special_needs_score, FactorScores, MatchContext,
};
pub use tags::{is_blank_needs, tag_set};
