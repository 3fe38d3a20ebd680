//! Storage ports
//!
//! Every domain crate declares its own port traits (`ClientPort`,
//! `InvoicePort`, `UserPort`, ...) on top of the vocabulary defined here: a
//! shared error type, the `DomainPort` marker, health reporting, and the
//! metadata callers attach to writes. The in-memory adapters in
//! `infra_memory` implement all of them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a port
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// Input rejected by the store, optionally tied to a field
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Unique key taken, or the row is still referenced elsewhere
    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The store cannot serve the request right now; retrying may succeed
    #[error("Store busy: {store}")]
    Busy { store: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: None,
        }
    }

    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        PortError::Unauthorized {
            message: message.into(),
        }
    }

    pub fn busy(store: impl Into<String>) -> Self {
        PortError::Busy {
            store: store.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Whether the same call may succeed if retried
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Busy { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker for port traits; implementations are shared as `Arc<dyn ...>`
pub trait DomainPort: Send + Sync + 'static {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// What an adapter reports on `/health/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Number of rows currently held
    pub rows: usize,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, rows: usize) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            rows,
            checked_at: Utc::now(),
        }
    }

    pub fn is_operational(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Caller context passed along with a port operation, used in logs
#[derive(Debug, Clone, Default)]
pub struct OperationMetadata {
    /// Id of the authenticated user, when there is one
    pub initiated_by: Option<String>,
    /// Free-form reason, e.g. "seed" for demo data
    pub reason: Option<String>,
}

impl OperationMetadata {
    pub fn initiated_by(user: impl Into<String>) -> Self {
        Self {
            initiated_by: Some(user.into()),
            ..Default::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_is_transient() {
        assert!(PortError::busy("memory-invoices").is_transient());
        assert!(!PortError::conflict("category in use").is_transient());
        assert!(!PortError::validation("Invalid email").is_transient());
    }

    #[test]
    fn test_healthy_result_is_operational() {
        let result = HealthCheckResult::healthy("memory-clients", 2);
        assert_eq!(result.status, AdapterHealth::Healthy);
        assert_eq!(result.rows, 2);
        assert!(result.is_operational());
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::initiated_by("USR-1").with_reason("seed");
        assert_eq!(metadata.initiated_by.as_deref(), Some("USR-1"));
        assert_eq!(metadata.reason.as_deref(), Some("seed"));
    }
}
