//! Category handlers; writes are admin-only

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::CategoryId;
use domain_catalog::{Category, CategoryPatch, NewCategory};

use crate::auth::{require_admin, Claims};
use crate::dto::catalog::SearchQuery;
use crate::{error::ApiError, AppState};

pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.catalog.list_categories(&query.q).await?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(state.catalog.get_category(id).await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    require_admin(&claims)?;
    let category = state.catalog.create_category(request, claims.metadata()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<CategoryId>,
    Json(request): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    require_admin(&claims)?;
    Ok(Json(state.catalog.update_category(id, request, claims.metadata()).await?))
}

/// Deletes a category; 409 while products belong to it
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, ApiError> {
    require_admin(&claims)?;
    state.catalog.delete_category(id, claims.metadata()).await?;
    Ok(StatusCode::NO_CONTENT)
}
