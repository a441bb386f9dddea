// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilityPolicy, Coordinates, DateInterval, OwnerRequest, ScoreBreakdown, ScoringWeights,
    SitterMatch, SitterProfile,
};
pub use requests::MatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchResponse, StatusResponse};
