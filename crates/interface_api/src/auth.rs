//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::OperationMetadata;
use domain_identity::{Role, User};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        has_role(self, Role::Admin.as_str())
    }

    /// Port metadata attributing an operation to this user
    pub fn metadata(&self) -> OperationMetadata {
        OperationMetadata::initiated_by(self.sub.clone())
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a session token for a user
///
/// The user's role is the only entry in `roles`.
pub fn create_token(user: &User, secret: &str, expiration_secs: u64) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        roles: vec![user.role.as_str().to_string()],
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role; admins have every role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims
        .roles
        .iter()
        .any(|r| r == required_role || r == Role::Admin.as_str())
}

/// Fails unless the claims carry the admin role
pub fn require_admin(claims: &Claims) -> Result<(), AuthError> {
    if claims.is_admin() {
        Ok(())
    } else {
        Err(AuthError::MissingPermission(Role::Admin.to_string()))
    }
}
