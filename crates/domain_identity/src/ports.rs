//! Identity Domain Ports
//!
//! [`CredentialVerifier`] is all the login flow needs; [`UserPort`] covers
//! account management. A store usually implements both.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError, UserId};

use crate::user::{NewUser, User};

/// Verifies login credentials
#[async_trait]
pub trait CredentialVerifier: DomainPort {
    /// Returns the user when the password matches
    ///
    /// Unknown emails and wrong passwords both yield the same
    /// `PortError::Unauthorized`.
    async fn verify(&self, email: &str, password: &str) -> Result<User, PortError>;
}

/// Storage port for user accounts
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    /// Registers a new account with the `user` role
    ///
    /// A duplicate email is a `PortError::Conflict`.
    async fn register(
        &self,
        data: NewUser,
        metadata: Option<OperationMetadata>,
    ) -> Result<User, PortError>;

    async fn get(&self, id: UserId, metadata: Option<OperationMetadata>) -> Result<User, PortError>;

    async fn find_by_email(
        &self,
        email: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<User>, PortError>;

    /// Creates the admin account if the email is not registered yet
    ///
    /// Returns the existing or created user. An existing account is promoted
    /// to admin; its password is left unchanged.
    async fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        nom: &str,
    ) -> Result<User, PortError>;
}
