use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;
use crate::core::{MatchOutcome, Matcher};
use crate::models::{
    CandidateProfile, ErrorResponse, HealthResponse, MatchRequest, MatchResponse, RecordId,
    ScoringStrategy, ServiceInfo, SimpleMatchQuery,
};
use crate::services::{CacheKey, OpportunityCache, OpportunityClient, OpportunityList, ProfileClient, UpstreamError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub opportunities: Arc<OpportunityClient>,
    pub profiles: Arc<ProfileClient>,
    pub cache: Arc<OpportunityCache>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
///
/// Routes sit at the root so the gateway's `/matching/{path}` forwarding
/// reaches them unchanged.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check))
        .route("/match", web::post().to(match_opportunities))
        .route("/match/simple", web::get().to(match_simple));
}

async fn service_info() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        service: "matching-service".to_string(),
        status: "ok".to_string(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let provider_healthy = match state.opportunities.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Opportunity provider health check failed: {}", e);
            false
        }
    };

    let status = if provider_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Rank opportunities for a student
///
/// POST /match
///
/// Request body:
/// ```json
/// {
///   "student_user_id": 1,
///   "student_profile": { "gpa": 3.5, "skills": ["python"], "goals": ["research"] },
///   "opportunities": [ { "id": 1, "title": "...", "description": "...", "type": "scholarship" } ],
///   "strategy": "weighted"
/// }
/// ```
/// Only `student_user_id` is required; a missing profile is fetched from
/// the user service and missing opportunities from the provider.
async fn match_opportunities(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    let span = tracing::info_span!(
        "match",
        request_id = %uuid::Uuid::new_v4(),
        student = %req.student_user_id,
    );

    run_match(state, req.into_inner()).instrument(span).await
}

async fn run_match(state: web::Data<AppState>, req: MatchRequest) -> HttpResponse {
    let profile = match req.student_profile {
        Some(profile) => profile,
        None => match state.profiles.get_student_profile(&req.student_user_id).await {
            Ok(profile) => profile,
            Err(UpstreamError::NotFound(message)) => {
                return HttpResponse::NotFound().json(ErrorResponse {
                    error: "Student profile not found".to_string(),
                    message,
                    status_code: 404,
                });
            }
            Err(e) => {
                tracing::error!("Failed to fetch profile for {}: {}", req.student_user_id, e);
                return HttpResponse::BadGateway().json(ErrorResponse {
                    error: "Failed to fetch student profile".to_string(),
                    message: e.to_string(),
                    status_code: 502,
                });
            }
        },
    };

    if let Err(errors) = profile.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let outcome = match req.opportunities {
        Some(records) => state.matcher.rank_records(req.strategy, &profile, &records),
        None => {
            let records = load_opportunities(&state).await;
            state.matcher.rank_records(req.strategy, &profile, &records)
        }
    };

    respond(&state.matcher, req.student_user_id, req.strategy, outcome)
}

/// Rank provider opportunities from query parameters
///
/// GET /match/simple?student_user_id=1&gpa=3.2&skills=python,sql&goals=research
async fn match_simple(
    state: web::Data<AppState>,
    query: web::Query<SimpleMatchQuery>,
) -> impl Responder {
    let query = query.into_inner();
    let profile: CandidateProfile = query.to_profile();

    if let Err(errors) = profile.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let records = load_opportunities(&state).await;
    let outcome = state.matcher.rank_records(query.strategy, &profile, &records);

    respond(&state.matcher, query.student_user_id, query.strategy, outcome)
}

/// Fetch provider opportunities through the cache
///
/// An unreachable or failing provider yields an empty list; the caller
/// then receives an empty ranking instead of an error.
async fn load_opportunities(state: &AppState) -> OpportunityList {
    let key = CacheKey::opportunities();

    match state
        .cache
        .get_or_fetch(&key, || state.opportunities.list_opportunities())
        .await
    {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(
                "Opportunity provider at {} unavailable, ranking nothing: {}",
                state.opportunities.base_url(),
                e
            );
            Arc::new(Vec::new())
        }
    }
}

fn respond(
    matcher: &Matcher,
    student_user_id: RecordId,
    strategy: Option<ScoringStrategy>,
    outcome: MatchOutcome,
) -> HttpResponse {
    let skipped = outcome.skipped();

    tracing::info!(
        "Returning {} ranked opportunities for student {} ({:?} strategy, {} skipped)",
        outcome.results.len(),
        student_user_id,
        strategy.unwrap_or(matcher.strategy()),
        skipped
    );

    HttpResponse::Ok().json(MatchResponse {
        student_user_id,
        results: outcome.results,
        total_opportunities: outcome.total_opportunities,
        skipped_opportunities: skipped,
    })
}
