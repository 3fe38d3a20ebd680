//! Dashboard handler

use axum::{extract::State, Json};

use crate::dto::dashboard::DashboardResponse;
use crate::{error::ApiError, AppState};

pub async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    Ok(Json(state.dashboard.summary().await?))
}
