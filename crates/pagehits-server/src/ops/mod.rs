//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness
//! - `/metrics` : Prometheus text format
//! - `/`        : static dashboard
//! - fallback   : JSON 404

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::app_state::AppState;
use crate::error::ApiError;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.render_metrics();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

pub async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::warn!(path = %uri.path(), "404 not found");
    ApiError::RouteNotFound
}
