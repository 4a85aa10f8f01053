use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use pagehits_core::{Page, PageHitsError, PageId};

use crate::app_state::AppState;
use crate::error::{ApiError, Result};

#[derive(Debug, Serialize)]
pub struct HitsResp {
    pub hits: u64,
}

fn name_required() -> ApiError {
    PageHitsError::Validation("name required".into()).into()
}

// Parsed by hand so malformed bodies map to 400 instead of axum's 415/422.
// Only a JSON object carries a name; `null` or absent means missing.
fn parse_create(body: &[u8]) -> Result<Option<String>> {
    if body.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "create body is not json");
        name_required()
    })?;
    let Value::Object(mut fields) = value else {
        tracing::debug!("create body is not a json object");
        return Err(name_required());
    };
    match fields.remove("name") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name)),
        Some(other) => {
            tracing::debug!(name = %other, "create name is not a string");
            Err(name_required())
        }
    }
}

// A segment that is not an integer can never address a page.
fn parse_id(raw: &str) -> Result<PageId> {
    raw.parse().map_err(|_| ApiError::RouteNotFound)
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<Page>> {
    Json(state.registry().list())
}

pub async fn create(State(state): State<AppState>, body: Bytes) -> Result<(StatusCode, Json<Page>)> {
    let name = parse_create(&body)?;
    let page = state.registry().create(name.as_deref())?;
    tracing::info!(page_id = page.id, page_name = %page.name, "page created");
    Ok((StatusCode::CREATED, Json(page)))
}

pub async fn hits(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<HitsResp>> {
    let id = parse_id(&id)?;
    let hits = state.registry().hits(id)?;
    Ok(Json(HitsResp { hits }))
}

pub async fn hit(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Page>> {
    let id = parse_id(&id)?;
    let page = state.registry().hit(id)?;

    state
        .metrics()
        .page_hits
        .inc(&[("page_name", page.name.as_str())]);
    tracing::info!(
        page_id = page.id,
        page_name = %page.name,
        total_hits = page.hits,
        "hit recorded"
    );
    Ok(Json(page))
}
