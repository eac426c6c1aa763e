//! Consultation session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions               - Start a session from an intake form
//! - GET    /api/v1/sessions               - List the caller's sessions
//! - GET    /api/v1/sessions/{id}/messages - Get a session's transcript
//! - POST   /api/v1/sessions/{id}/messages - Exchange one message
//! - POST   /api/v1/sessions/{id}/report   - Generate a report from a transcript
//! - DELETE /api/v1/sessions/{id}          - Delete a session

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use dermaglow_types::assessment::Assessment;
use dermaglow_types::session::{ConsultSession, SessionMessage};

use crate::http::error::AppError;
use crate::http::extractors::auth::Authenticated;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for starting a session.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// The intake form; absence is a validation error.
    pub form: Option<Assessment>,
}

/// Request body for posting a message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

/// Request body for report generation: the caller's view of the transcript.
#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid session id: {s}")))
}

/// POST /api/v1/sessions - Start a session and seed the welcome message.
pub async fn start_session(
    State(state): State<AppState>,
    Authenticated(owner): Authenticated,
    Json(body): Json<StartSessionRequest>,
) -> Result<ApiResponse<ConsultSession>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let session = state.session_service.start_session(owner, body.form).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(session, request_id, elapsed))
}

/// GET /api/v1/sessions - List the caller's sessions, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Authenticated(owner): Authenticated,
) -> Result<ApiResponse<Vec<ConsultSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.session_service.sessions_for_owner(&owner).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(sessions, request_id, elapsed))
}

/// GET /api/v1/sessions/{id}/messages - Get a session's transcript.
pub async fn get_messages(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let messages = state.session_service.session_messages(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(
        serde_json::json!({ "messages": messages }),
        request_id,
        elapsed,
    ))
}

/// POST /api/v1/sessions/{id}/messages - Exchange one message.
pub async fn post_message(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(session_id): Path<String>,
    Json(body): Json<PostMessageRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let answer = state.session_service.post_message(&sid, &body.message).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(
        serde_json::json!({ "answer": answer, "sessionId": session_id }),
        request_id,
        elapsed,
    ))
}

/// POST /api/v1/sessions/{id}/report - Generate a report from the supplied
/// transcript. Nothing is persisted.
pub async fn generate_report(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(session_id): Path<String>,
    Json(body): Json<GenerateReportRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    let report = state
        .session_service
        .generate_report(&sid, &body.messages)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(
        serde_json::json!({ "report": report }),
        request_id,
        elapsed,
    ))
}

/// DELETE /api/v1/sessions/{id} - Delete a session and its transcript.
pub async fn delete_session(
    State(state): State<AppState>,
    _auth: Authenticated,
    Path(session_id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    state.session_service.delete_session(&sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(ApiResponse::success(
        serde_json::json!({ "deleted": true }),
        request_id,
        elapsed,
    ))
}
