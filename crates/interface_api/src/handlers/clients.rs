//! Client handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::ClientId;
use domain_catalog::{Client, ClientPatch, NewClient};

use crate::auth::Claims;
use crate::dto::catalog::SearchQuery;
use crate::{error::ApiError, AppState};

/// Lists clients, filtered by name or email
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.catalog.list_clients(&query.q).await?))
}

/// Type-ahead client search
pub async fn search_clients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Client>>, ApiError> {
    Ok(Json(state.catalog.search_clients(&query.q).await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.catalog.get_client(id).await?))
}

pub async fn create_client(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<NewClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let client = state.catalog.create_client(request, claims.metadata()).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn update_client(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ClientId>,
    Json(request): Json<ClientPatch>,
) -> Result<Json<Client>, ApiError> {
    Ok(Json(state.catalog.update_client(id, request, claims.metadata()).await?))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ClientId>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_client(id, claims.metadata()).await?;
    Ok(StatusCode::NO_CONTENT)
}
