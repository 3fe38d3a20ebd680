//! API middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::auth::{validate_token, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Authentication middleware
///
/// Validates the bearer token and stores its claims in the request
/// extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        warn!("Missing or invalid Authorization header");
        return Err(ApiError::Unauthorized("Missing bearer token".to_string()));
    };

    match validate_token(token, &state.config.jwt_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(e) => {
            warn!("Token validation failed: {:?}", e);
            Err(e.into())
        }
    }
}

/// Logs one line per API call: who, what, outcome and duration
///
/// Runs inside the auth layer, so claims are present for every request
/// that reached a handler. Server errors are logged at `warn`.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user = request
        .extensions()
        .get::<Claims>()
        .map(|c| c.email.clone())
        .unwrap_or_else(|| "anonymous".to_string());

    let started = Instant::now();
    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(%method, %path, %user, status = status.as_u16(), elapsed_ms, "API request failed");
    } else {
        info!(%method, %path, %user, status = status.as_u16(), elapsed_ms, "API request");
    }

    response
}
