use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::OwnerRequest;

/// Request to match sitters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "zip_code", rename = "zipCode")]
    pub zip_code: String,
    #[validate(length(min = 1))]
    pub service: String,
    #[validate(length(min = 1))]
    #[serde(alias = "start_date", rename = "startDate")]
    pub start_date: String,
    #[serde(default, alias = "end_date", rename = "endDate")]
    pub end_date: Option<String>,
    /// Comma-separated special needs
    #[serde(default)]
    pub needs: String,
}

impl From<MatchRequest> for OwnerRequest {
    fn from(value: MatchRequest) -> Self {
        Self {
            location: value.zip_code,
            service: value.service,
            start_date: value.start_date,
            end_date: value.end_date,
            needs: value.needs,
        }
    }
}
