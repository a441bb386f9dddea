use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, MatchResponse, OwnerRequest, StatusResponse};
use crate::services::{LocationResolver, SitterSource};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn SitterSource>,
    pub resolver: Arc<dyn LocationResolver>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api").route("/match", web::post().to(match_sitters)));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(StatusResponse {
        message: "Pet Sitter Matching API".to_string(),
        status: "running".to_string(),
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match sitters endpoint
///
/// POST /api/match
///
/// Request body:
/// ```json
/// {
///   "zipCode": "10001",
///   "service": "catBoarding",
///   "startDate": "2025-02-01",
///   "endDate": "2025-02-07",
///   "needs": "Anxiety, Senior Cats"
/// }
/// ```
async fn match_sitters(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request = OwnerRequest::from(req.into_inner());

    tracing::info!(
        "Matching sitters for location {}, service {}",
        request.location,
        request.service
    );

    let roster = Arc::clone(&state.roster);
    let candidates = match web::block(move || roster.load()).await {
        Ok(Ok(candidates)) => candidates,
        Ok(Err(e)) => {
            tracing::error!("Failed to load sitter roster, returning no matches: {}", e);
            Vec::new()
        }
        Err(e) => {
            tracing::error!("Roster loader did not complete, returning no matches: {}", e);
            Vec::new()
        }
    };

    let origin = state.resolver.resolve(&request.location).await;

    let result = state.matcher.find_matches(&request, origin, &candidates);

    tracing::info!(
        "Returning {} matches (from {} sitters, {} skipped, {} defects)",
        result.matches.len(),
        result.total_candidates,
        result.skipped,
        result.issues.len()
    );

    HttpResponse::Ok().json(MatchResponse {
        matches: result.matches,
    })
}
