//! Auth handlers
//!
//! Sessions are stateless bearer tokens; logging out is dropping the token
//! on the client side.

use axum::{extract::State, http::StatusCode, Extension, Json};
use tracing::info;
use validator::Validate;

use core_kernel::UserId;
use domain_identity::User;

use crate::auth::{create_token, Claims};
use crate::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::{error::ApiError, AppState};

/// Registers a user account and opens a session
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;
    let user = state.ports.users.register(request.into(), None).await?;
    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(session(&state, user)?)))
}

/// Opens a session
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;
    let user = state
        .ports
        .credentials
        .verify(&request.email, &request.password)
        .await?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(session(&state, user)?))
}

/// Returns the user the token belongs to
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<User>, ApiError> {
    let id: UserId = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;
    Ok(Json(state.ports.users.get(id, Some(claims.metadata())).await?))
}

fn session(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let expires_in = state.config.jwt_expiration_secs;
    let token = create_token(&user, &state.config.jwt_secret, expires_in)?;
    Ok(AuthResponse::bearer(token, expires_in, user))
}
