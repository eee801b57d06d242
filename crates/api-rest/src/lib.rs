//! # API REST
//!
//! REST API implementation for ccm.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - Per-session result storage for the care plan and assistant views
//!
//! Uses `api-shared` for request/response types. All scoring and advisory text comes from
//! `ccm-core`.

#![warn(rust_2018_idioms)]

pub mod sessions;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use api_shared::dto;
use api_shared::HealthService;
use ccm_core::{CareError, CarePlanStyle, Condition, ConditionInputs, ConditionResult, Scorer};

pub use sessions::{SessionLimits, SessionStore};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    scorer: Scorer,
    sessions: SessionStore,
}

impl AppState {
    pub fn new(scorer: Scorer, sessions: SessionStore) -> Self {
        Self { scorer, sessions }
    }
}

type ApiError = (StatusCode, String);

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        assess,
        create_session,
        end_session,
        record_result,
        list_results,
        care_plan,
        ask_assistant,
    ),
    components(schemas(
        dto::HealthRes,
        dto::AssessReq,
        dto::AssessRes,
        dto::CreateSessionRes,
        dto::EndSessionRes,
        dto::ResultEntry,
        dto::ListResultsRes,
        dto::RecordResultRes,
        dto::CarePlanRes,
        dto::AssistantReq,
        dto::AssistantRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assessments/:condition", post(assess))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(end_session))
        .route("/sessions/:id/results", get(list_results))
        .route("/sessions/:id/results/:condition", put(record_result))
        .route("/sessions/:id/care-plan", get(care_plan))
        .route("/sessions/:id/assistant", post(ask_assistant))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = dto::HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<dto::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/assessments/{condition}",
    params(("condition" = String, Path, description = "Cardiovascular, Diabetes, COPD or Asthma")),
    request_body = dto::AssessReq,
    responses(
        (status = 200, description = "Risk tier for the inputs", body = dto::AssessRes),
        (status = 400, description = "Unknown condition or invalid inputs")
    )
)]
/// Score one condition without recording the result anywhere.
#[axum::debug_handler]
async fn assess(
    State(state): State<AppState>,
    AxumPath(condition): AxumPath<String>,
    Json(req): Json<dto::AssessReq>,
) -> Result<Json<dto::AssessRes>, ApiError> {
    let inputs = parse_inputs(&condition, req.inputs)?;
    let assessment = state.scorer.assess(&inputs).map_err(care_error)?;
    Ok(Json(assessment.into()))
}

#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session opened", body = dto::CreateSessionRes)
    )
)]
/// Open an assessment session with no results.
#[axum::debug_handler]
async fn create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<dto::CreateSessionRes>) {
    let (id, created_at) = state.sessions.create();
    (
        StatusCode::CREATED,
        Json(dto::CreateSessionRes {
            session_id: id.simple().to_string(),
            created_at: created_at.to_rfc3339(),
        }),
    )
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session ended", body = dto::EndSessionRes),
        (status = 400, description = "Invalid session identifier"),
        (status = 404, description = "Unknown session")
    )
)]
/// End a session and discard its results.
#[axum::debug_handler]
async fn end_session(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::EndSessionRes>, ApiError> {
    let id = parse_session_id(&id)?;
    if state.sessions.end(id) {
        Ok(Json(dto::EndSessionRes { success: true }))
    } else {
        Err(unknown_session(id))
    }
}

#[utoipa::path(
    put,
    path = "/sessions/{id}/results/{condition}",
    params(
        ("id" = String, Path, description = "Session identifier"),
        ("condition" = String, Path, description = "Cardiovascular, Diabetes, COPD or Asthma")
    ),
    request_body = dto::AssessReq,
    responses(
        (status = 200, description = "Result recorded", body = dto::RecordResultRes),
        (status = 400, description = "Unknown condition or invalid inputs"),
        (status = 404, description = "Unknown session")
    )
)]
/// Score a condition and record it in the session, replacing any earlier result.
#[axum::debug_handler]
async fn record_result(
    State(state): State<AppState>,
    AxumPath((id, condition)): AxumPath<(String, String)>,
    Json(req): Json<dto::AssessReq>,
) -> Result<Json<dto::RecordResultRes>, ApiError> {
    let id = parse_session_id(&id)?;
    state
        .sessions
        .read(id, |_| ())
        .ok_or_else(|| unknown_session(id))?;

    let inputs = parse_inputs(&condition, req.inputs)?;
    let assessment = state.scorer.assess(&inputs).map_err(care_error)?;

    // The session may have been ended while the inputs were scored.
    let previous = state
        .sessions
        .update(id, |results| results.record(assessment))
        .ok_or_else(|| unknown_session(id))?;

    let recorded = ConditionResult::from(assessment);
    Ok(Json(dto::RecordResultRes {
        result: dto::ResultEntry::from(&recorded),
        previous_tier: previous.map(|p| p.tier.to_string()),
    }))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/results",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Results in submission order", body = dto::ListResultsRes),
        (status = 404, description = "Unknown session")
    )
)]
#[axum::debug_handler]
async fn list_results(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<dto::ListResultsRes>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let results = state
        .sessions
        .read(session_id, |results| {
            results
                .iter()
                .map(dto::ResultEntry::from)
                .collect::<Vec<_>>()
        })
        .ok_or_else(|| unknown_session(session_id))?;

    Ok(Json(dto::ListResultsRes {
        session_id: session_id.simple().to_string(),
        results,
    }))
}

#[utoipa::path(
    get,
    path = "/sessions/{id}/care-plan",
    params(
        ("id" = String, Path, description = "Session identifier"),
        ("style" = Option<String>, Query, description = "ccm (default) or mdt")
    ),
    responses(
        (status = 200, description = "Unified care plan", body = dto::CarePlanRes),
        (status = 400, description = "Unknown style"),
        (status = 404, description = "Unknown session")
    )
)]
/// Unified care plan for every condition assessed in the session.
#[axum::debug_handler]
async fn care_plan(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Query(query): Query<dto::CarePlanQuery>,
) -> Result<Json<dto::CarePlanRes>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let style = match query.style.as_deref() {
        Some(s) => s.parse::<CarePlanStyle>().map_err(care_error)?,
        None => CarePlanStyle::default(),
    };

    let text = state
        .sessions
        .read(session_id, |results| ccm_core::care_plan(results, style))
        .ok_or_else(|| unknown_session(session_id))?;

    Ok(Json(dto::CarePlanRes::new(style, text)))
}

#[utoipa::path(
    post,
    path = "/sessions/{id}/assistant",
    params(("id" = String, Path, description = "Session identifier")),
    request_body = dto::AssistantReq,
    responses(
        (status = 200, description = "Assistant reply", body = dto::AssistantRes),
        (status = 404, description = "Unknown session")
    )
)]
/// Route a free-text question to follow-up, monitoring or self-management advice.
#[axum::debug_handler]
async fn ask_assistant(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<dto::AssistantReq>,
) -> Result<Json<dto::AssistantRes>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let reply = state
        .sessions
        .read(session_id, |results| {
            ccm_core::assistant_reply(results, &req.query)
        })
        .ok_or_else(|| unknown_session(session_id))?;

    Ok(Json(reply.into()))
}

// Helper functions

fn parse_session_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|e| {
        tracing::error!("Invalid session id: {:?}", e);
        (StatusCode::BAD_REQUEST, "Invalid session id".to_string())
    })
}

fn parse_inputs(condition: &str, inputs: serde_json::Value) -> Result<ConditionInputs, ApiError> {
    let condition = condition
        .parse::<Condition>()
        .map_err(|e| care_error(e.into()))?;
    ConditionInputs::from_json(condition, inputs).map_err(care_error)
}

fn unknown_session(id: Uuid) -> ApiError {
    tracing::warn!(session = %id, "unknown session");
    (StatusCode::NOT_FOUND, "Unknown session".to_string())
}

fn care_error(e: CareError) -> ApiError {
    if e.is_client_error() {
        tracing::warn!("Rejected request: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    } else {
        tracing::error!("Internal error: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error".to_string(),
        )
    }
}
