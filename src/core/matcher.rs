use crate::core::{
    availability::describe_availability,
    distance::{round_miles, UNKNOWN_DISTANCE_MILES},
    error::{Factor, FieldError, ScoringIssue},
    scoring::{calculate_distance_score, calculate_match_score, MatchContext},
};
use crate::models::{Coordinates, OwnerRequest, ScoreBreakdown, ScoringWeights, SitterMatch, SitterProfile};

/// Number of matches returned when no limit is configured
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Result of the matching process
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub matches: Vec<SitterMatch>,
    pub total_candidates: usize,
    /// Candidates dropped entirely (no usable identity)
    pub skipped: usize,
    /// Per-factor defects that were scored with their default
    pub issues: Vec<ScoringIssue>,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Build the owner context once (normalized service, requested dates)
/// 2. Score each sitter independently on all four factors
/// 3. Default failed factors centrally and record the defect
/// 4. Stable sort by total score and keep the top `limit`
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    limit: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, limit: usize) -> Self {
        Self { weights, limit }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), DEFAULT_RESULT_LIMIT)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Rank sitters for an owner
    ///
    /// # Arguments
    /// * `request` - The owner's matching request
    /// * `origin` - Coordinates resolved for the request's location
    /// * `candidates` - Sitters supplied by the roster
    ///
    /// # Returns
    /// MatchResult containing at most `limit` matches, best first. Ties keep
    /// roster order. An empty roster yields an empty result.
    pub fn find_matches(
        &self,
        request: &OwnerRequest,
        origin: Coordinates,
        candidates: &[SitterProfile],
    ) -> MatchResult {
        let context = MatchContext::new(request, origin);
        let mut issues = Vec::new();
        let mut skipped = 0;

        let mut scored: Vec<SitterMatch> = candidates
            .iter()
            .filter_map(|profile| {
                if profile.name.trim().is_empty() {
                    tracing::warn!("Skipping sitter record without a name");
                    skipped += 1;
                    return None;
                }
                Some(self.score_profile(profile, &context, &mut issues))
            })
            .collect();

        // sort_by is stable, so equal scores keep roster order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(self.limit);

        tracing::debug!(
            "Ranked {} of {} sitters ({} skipped, {} defects)",
            scored.len(),
            candidates.len(),
            skipped,
            issues.len()
        );

        MatchResult {
            matches: scored,
            total_candidates: candidates.len(),
            skipped,
            issues,
        }
    }

    fn score_profile(
        &self,
        profile: &SitterProfile,
        context: &MatchContext,
        issues: &mut Vec<ScoringIssue>,
    ) -> SitterMatch {
        let scores = calculate_match_score(profile, context, &self.weights);

        let mut record = |factor: Factor, error: FieldError| {
            tracing::warn!("Sitter {:?}: {} scored as default ({})", profile.name, factor, error);
            issues.push(ScoringIssue {
                candidate: profile.name.clone(),
                factor,
                error,
            });
        };

        let distance_miles = scores.distance_miles.unwrap_or_else(|e| {
            record(Factor::Distance, e);
            UNKNOWN_DISTANCE_MILES
        });
        let availability = scores.availability.unwrap_or_else(|e| {
            record(Factor::Availability, e);
            0
        });

        let breakdown = ScoreBreakdown {
            distance: calculate_distance_score(distance_miles),
            availability,
            service: scores.service,
            special_needs: scores.special_needs,
        };

        SitterMatch {
            name: profile.name.clone(),
            location: profile.location_label(),
            distance: round_miles(distance_miles),
            score: breakdown.total(),
            availability: describe_availability(profile),
            special_needs: profile.special_needs.clone().unwrap_or_default(),
            breakdown,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
