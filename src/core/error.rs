use thiserror::Error;

/// Defect in a single sitter record or in one field of the owner's request
///
/// These never abort a matching run; the matcher scores the affected
/// factor with its default and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing field: {field}")]
    Missing { field: &'static str },

    #[error("invalid coordinate in {field}: {value}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("invalid date in {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },
}

/// Scoring factor a defect was attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    Distance,
    Availability,
    Service,
    SpecialNeeds,
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Factor::Distance => "distance",
            Factor::Availability => "availability",
            Factor::Service => "service",
            Factor::SpecialNeeds => "special_needs",
        };
        f.write_str(name)
    }
}

/// A defect recorded against one candidate during a matching run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringIssue {
    pub candidate: String,
    pub factor: Factor,
    pub error: FieldError,
}
