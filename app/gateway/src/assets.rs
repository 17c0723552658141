//! Asset CRUD routes.

use crate::{error::ApiError, state::AppState};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use llm::LLM;
use serde::Deserialize;
use store::{Asset, AssetPatch, NewAsset};

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Number of records to skip.
    pub skip: i64,
    /// Maximum number of records to return.
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}

/// Create a new asset (`POST /assets`).
pub async fn create_asset<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Json(new): Json<NewAsset>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let asset = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(asset)))
}

/// List assets with pagination (`GET /assets`).
pub async fn list_assets<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let assets = state.store.page(page.skip, page.limit)?;
    Ok(Json(assets))
}

/// Fetch one asset (`GET /assets/{id}`).
pub async fn get_asset<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError> {
    let asset = state.store.get(&id)?;
    Ok(Json(asset))
}

/// Apply a partial update (`PUT /assets/{id}`).
pub async fn update_asset<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    Json(patch): Json<AssetPatch>,
) -> Result<Json<Asset>, ApiError> {
    let asset = state.store.update(&id, patch)?;
    Ok(Json(asset))
}

/// Delete an asset (`DELETE /assets/{id}`).
pub async fn delete_asset<P: LLM + 'static>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
