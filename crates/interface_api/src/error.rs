//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_catalog::CatalogError;
use domain_identity::IdentityError;
use domain_invoicing::InvoicingError;

use crate::auth::AuthError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Validation error listing every problem found
    pub fn validation(details: Vec<String>) -> Self {
        ApiError::Validation {
            message: details.join("; "),
            details,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                Some(details),
            ),
            ApiError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { message, field } => ApiError::Validation {
                details: vec![match field {
                    Some(field) => format!("{}: {}", field, message),
                    None => message.clone(),
                }],
                message,
            },
            PortError::Conflict { message } => ApiError::Conflict(message),
            PortError::Unauthorized { message } => ApiError::Unauthorized(message),
            PortError::Busy { .. } => ApiError::Unavailable(err.to_string()),
            PortError::Internal { message, .. } => ApiError::Internal(message),
        }
    }
}

impl From<InvoicingError> for ApiError {
    fn from(err: InvoicingError) -> Self {
        match err {
            InvoicingError::InvoiceNotFound(_) => ApiError::NotFound(err.to_string()),
            InvoicingError::Validation(messages) => ApiError::validation(messages),
            InvoicingError::LineOutOfRange { .. }
            | InvoicingError::LastLine
            | InvoicingError::InvalidNumber(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ClientNotFound(_)
            | CatalogError::CategoryNotFound(_)
            | CatalogError::ProductNotFound(_) => ApiError::NotFound(err.to_string()),
            CatalogError::CategoryInUse(_) | CatalogError::ProductInUse(_) => {
                ApiError::Conflict(err.to_string())
            }
            CatalogError::ValidationFailed(messages) => ApiError::validation(
                messages.split("; ").map(str::to_string).collect(),
            ),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::EmailTaken(_) => ApiError::Conflict(err.to_string()),
            IdentityError::Hashing(_) => ApiError::Internal(err.to_string()),
            IdentityError::InvalidEmail(_)
            | IdentityError::WeakPassword(_)
            | IdentityError::MissingName
            | IdentityError::UnknownRole(_) => ApiError::validation(vec![err.to_string()]),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingPermission(_) => ApiError::Forbidden(err.to_string()),
            AuthError::InvalidToken | AuthError::TokenExpired => {
                ApiError::Unauthorized(err.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {}", field, e.code),
                })
            })
            .collect();
        details.sort();
        ApiError::validation(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_errors_map_to_statuses() {
        let cases = [
            (PortError::not_found("Client", "CLI-1"), StatusCode::NOT_FOUND),
            (PortError::validation("bad"), StatusCode::UNPROCESSABLE_ENTITY),
            (PortError::conflict("taken"), StatusCode::CONFLICT),
            (PortError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (PortError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_invoice_validation_keeps_every_message() {
        let err = ApiError::from(InvoicingError::Validation(vec![
            "A client must be selected".to_string(),
            "Line 1: designation is required".to_string(),
        ]));
        match err {
            ApiError::Validation { details, .. } => assert_eq!(details.len(), 2),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_in_use_is_conflict() {
        let err = ApiError::from(CatalogError::ProductInUse("PRD-1".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_permission_is_forbidden() {
        let err = ApiError::from(AuthError::MissingPermission("admin".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
