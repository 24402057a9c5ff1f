// src/api/handlers.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AdError;
use crate::model::ad::{AdDraft, Advertisement};
use crate::model::query::{AdQuery, AdView, MutationResult};
use crate::serving::analytics::{record_click, record_impression};
use crate::serving::engine::process_ad_request;
use crate::store::StoreError;
use crate::AppState;

/// Display request: which ads should this slot render. Zero ads is a normal
/// outcome and still a 200; malformed enums are rejected by the extractor
/// before the store is touched.
pub async fn serve_ads(
    State(state): State<Arc<AppState>>,
    Json(query): Json<AdQuery>,
) -> (StatusCode, Json<Vec<AdView>>) {
    let views = process_ad_request(
        query,
        state.store.as_ref(),
        &state.config,
        &state.delivery_logger,
    )
    .await;
    (StatusCode::OK, Json(views))
}

/// Impression beacon. Always acknowledged: tracking must never fail a render,
/// so a missing id or a store hiccup is logged and swallowed here.
pub async fn track_impression(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<String>,
) -> StatusCode {
    if let Err(err) = record_impression(state.store.as_ref(), &ad_id).await {
        tracing::warn!(ad_id = %ad_id, "impression not recorded: {}", err);
    }
    StatusCode::NO_CONTENT
}

/// Click beacon, same contract as the impression beacon.
pub async fn track_click(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<String>,
) -> StatusCode {
    if let Err(err) = record_click(state.store.as_ref(), &ad_id).await {
        tracing::warn!(ad_id = %ad_id, "click not recorded: {}", err);
    }
    StatusCode::NO_CONTENT
}

/// Admin read of a single record, counters included.
pub async fn get_ad(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<String>,
) -> Result<Json<Advertisement>, AdError> {
    let matches = state.store.find(&|ad| ad.id == ad_id).await?;
    matches
        .into_iter()
        .next()
        .map(Json)
        .ok_or(AdError::NotFound(ad_id))
}

fn validate_draft(draft: &AdDraft) -> Result<(), AdError> {
    if let (Some(start), Some(end)) = (draft.start_date, draft.end_date) {
        if end < start {
            return Err(AdError::InvalidArgument(
                "end_date precedes start_date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Admin create. Mints the id and created-at, returns the structured
/// `{success, error}` envelope instead of bubbling store errors.
pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<AdDraft>,
) -> Json<MutationResult> {
    if let Err(err) = validate_draft(&draft) {
        return Json(MutationResult::failed(err.to_string()));
    }
    let id = Uuid::new_v4().to_string();
    let ad = draft.into_ad(id.clone(), Utc::now());
    match state.store.create(ad).await {
        Ok(()) => Json(MutationResult::ok(Some(id))),
        Err(err) => {
            tracing::error!("ad create failed: {}", err);
            Json(MutationResult::failed(err.to_string()))
        }
    }
}

/// Admin delete. Deleting an id that is already gone counts as success.
pub async fn delete_ad(
    State(state): State<Arc<AppState>>,
    Path(ad_id): Path<String>,
) -> Json<MutationResult> {
    match state.store.delete_by_id(&ad_id).await {
        Ok(existed) => {
            if !existed {
                tracing::debug!(ad_id = %ad_id, "delete of absent ad treated as success");
            }
            Json(MutationResult::ok(Some(ad_id)))
        }
        Err(StoreError::NotFound(_)) => Json(MutationResult::ok(Some(ad_id))),
        Err(err) => {
            tracing::error!(ad_id = %ad_id, "ad delete failed: {}", err);
            Json(MutationResult::failed(err.to_string()))
        }
    }
}
