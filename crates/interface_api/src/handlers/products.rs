//! Product handlers; writes are admin-only

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::ProductId;
use domain_catalog::{NewProduct, Product, ProductPatch, ProductWithCategory};

use crate::auth::{require_admin, Claims};
use crate::dto::catalog::SearchQuery;
use crate::{error::ApiError, AppState};

/// Lists products with their category, filtered by designation or category name
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ProductWithCategory>>, ApiError> {
    Ok(Json(state.catalog.list_products(&query.q).await?))
}

/// Type-ahead product search for invoice lines
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.catalog.search_products(&query.q).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductWithCategory>, ApiError> {
    Ok(Json(state.catalog.get_product(id).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductWithCategory>), ApiError> {
    require_admin(&claims)?;
    let product = state.catalog.create_product(request, claims.metadata()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductPatch>,
) -> Result<Json<ProductWithCategory>, ApiError> {
    require_admin(&claims)?;
    Ok(Json(state.catalog.update_product(id, request, claims.metadata()).await?))
}

/// Deletes a product; 409 while invoice lines reference it
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode, ApiError> {
    require_admin(&claims)?;
    state.catalog.delete_product(id, claims.metadata()).await?;
    Ok(StatusCode::NO_CONTENT)
}
