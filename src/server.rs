//! HTTP routes: the contact endpoint plus health and profile lookups.

use crate::core::{DispatchResult, Submission};
use crate::dispatch::Dispatcher;
use crate::profile::PersonalData;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub profile: Arc<PersonalData>,
}

/// Body returned by `POST /api/contact` once dispatch has run.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub detail: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ContactResponse {
    /// Maps a dispatch result onto the response body and status code.
    pub fn from_result(result: DispatchResult) -> (StatusCode, Self) {
        let detail = result.detail();
        if result.overall_success {
            (
                StatusCode::OK,
                Self {
                    success: true,
                    message: "Notification sent (one or more channels succeeded).",
                    detail,
                    errors: Vec::new(),
                },
            )
        } else {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Self {
                    success: false,
                    message: "Failed to send via any configured channel.",
                    detail,
                    errors: result.errors,
                },
            )
        }
    }
}

#[derive(Debug, Serialize)]
struct ServerErrorResponse {
    success: bool,
    message: &'static str,
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    channels: Vec<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/contact", post(contact))
        .route("/api/health", get(health))
        .route("/api/profile", get(profile))
        .with_state(state)
}

/// The body is parsed as JSON whatever its `Content-Type` says.
async fn contact(State(state): State<AppState>, body: Bytes) -> Response {
    let submission = match serde_json::from_slice::<Submission>(&body) {
        Ok(submission) => submission,
        Err(e) => {
            let error = e.to_string();
            error!(error = %error, "Rejected contact submission with unreadable body");
            let body = ServerErrorResponse {
                success: false,
                message: "Server error occurred.",
                error,
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    let result = state.dispatcher.dispatch(&submission).await;
    let (status, body) = ContactResponse::from_result(result);
    (status, Json(body)).into_response()
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        channels: state.dispatcher.configured_channels(),
    })
}

async fn profile(State(state): State<AppState>) -> Json<PersonalData> {
    Json(state.profile.as_ref().clone())
}
