//! Request middleware: request id, access logs, request metrics.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::app_state::AppState;

pub static REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Bounded `endpoint` label: the first path segment for known routes.
pub fn endpoint_label(path: &str) -> &'static str {
    match path.split('/').nth(1).unwrap_or("") {
        "" => "root",
        "api" => "api",
        "health" => "health",
        "metrics" => "metrics",
        _ => "other",
    }
}

fn generate_request_id() -> String {
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros())
        .unwrap_or(0);
    format!("req-{micros}")
}

pub async fn track(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let request_id = req
        .headers()
        .get(&REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(generate_request_id);

    let span = tracing::info_span!("request", %request_id);
    tracing::info!(parent: &span, %method, %path, "incoming request");

    let mut res = next.run(req).instrument(span.clone()).await;

    let elapsed = start.elapsed();
    let endpoint = endpoint_label(&path);
    let metrics = state.metrics();
    metrics
        .requests
        .inc(&[("method", method.as_str()), ("endpoint", endpoint)]);
    metrics
        .request_duration
        .observe(&[("endpoint", endpoint)], elapsed);

    let duration_ms = (elapsed.as_secs_f64() * 100_000.0).round() / 100.0;
    tracing::info!(
        parent: &span,
        status = res.status().as_u16(),
        duration_ms,
        "request completed"
    );

    if let Ok(v) = HeaderValue::from_str(&request_id) {
        res.headers_mut().insert(REQUEST_ID.clone(), v);
    }
    res
}
