//! In-memory user store
//!
//! Implements both [`UserPort`] and [`CredentialVerifier`]. Passwords are
//! kept as Argon2 hashes only.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError, UserId,
};
use domain_identity::user::normalize_email;
use domain_identity::{
    CredentialVerifier, IdentityError, NewUser, PasswordHasher, Role, User, UserAccount, UserPort,
};

use crate::error::identity_to_port_error;
use crate::table::Table;

/// `UserPort` and `CredentialVerifier` over an in-memory table
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    accounts: Arc<RwLock<Table<UserId, UserAccount>>>,
    hasher: PasswordHasher,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find<'a>(table: &'a Table<UserId, UserAccount>, email: &str) -> Option<&'a UserAccount> {
        let email = normalize_email(email);
        table.values().find(|account| account.user.email == email)
    }
}

impl DomainPort for InMemoryUserStore {}

#[async_trait]
impl HealthCheckable for InMemoryUserStore {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.accounts.read().await.len();
        HealthCheckResult::healthy("memory-users", count)
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryUserStore {
    #[instrument(skip(self, password))]
    async fn verify(&self, email: &str, password: &str) -> Result<User, PortError> {
        let table = self.accounts.read().await;
        match Self::find(&table, email) {
            Some(account) if self.hasher.verify(password, &account.password_hash) => {
                debug!(user_id = %account.user.id, "Credentials verified");
                Ok(account.user.clone())
            }
            _ => {
                warn!("Rejected login attempt");
                Err(identity_to_port_error(IdentityError::InvalidCredentials))
            }
        }
    }
}

#[async_trait]
impl UserPort for InMemoryUserStore {
    #[instrument(skip(self, data, _metadata), fields(email = %data.email))]
    async fn register(
        &self,
        data: NewUser,
        _metadata: Option<OperationMetadata>,
    ) -> Result<User, PortError> {
        data.validate().map_err(identity_to_port_error)?;
        let password_hash = self.hasher.hash(&data.password).map_err(identity_to_port_error)?;

        let mut table = self.accounts.write().await;
        if Self::find(&table, &data.email).is_some() {
            return Err(identity_to_port_error(IdentityError::EmailTaken(
                data.normalized_email(),
            )));
        }
        let account = UserAccount::new(&data.email, &data.nom, Role::User, password_hash);
        let user = account.user.clone();
        table.insert(user.id, account);
        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    async fn get(&self, id: UserId, _metadata: Option<OperationMetadata>) -> Result<User, PortError> {
        self.accounts
            .read()
            .await
            .get(&id)
            .map(|account| account.user.clone())
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn find_by_email(
        &self,
        email: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<User>, PortError> {
        let table = self.accounts.read().await;
        Ok(Self::find(&table, email).map(|account| account.user.clone()))
    }

    #[instrument(skip(self, password, nom))]
    async fn ensure_admin(&self, email: &str, password: &str, nom: &str) -> Result<User, PortError> {
        let mut table = self.accounts.write().await;
        if let Some(existing) = Self::find(&table, email).map(|account| account.user.id) {
            let account = table
                .get_mut(&existing)
                .ok_or_else(|| PortError::not_found("User", existing))?;
            account.user.role = Role::Admin;
            debug!(user_id = %existing, "Bootstrap admin already registered");
            return Ok(account.user.clone());
        }

        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            nom: nom.to_string(),
        }
        .validate()
        .map_err(identity_to_port_error)?;

        let password_hash = self.hasher.hash(password).map_err(identity_to_port_error)?;
        let account = UserAccount::new(email, nom, Role::Admin, password_hash);
        let user = account.user.clone();
        table.insert(user.id, account);
        info!(user_id = %user.id, "Created bootstrap admin");
        Ok(user)
    }
}
