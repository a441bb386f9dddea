//! Sitter Match - matching and ranking service for pet sitters
//!
//! This library provides the scoring engine used to rank sitters for an
//! owner's request: distance, availability, service match and
//! special-needs coverage, combined into a single score and ranked.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, MatchResult, Matcher};
pub use models::{Coordinates, OwnerRequest, ScoringWeights, SitterMatch, SitterProfile};
