//! Identity domain errors

use thiserror::Error;

/// Errors that can occur in the identity domain
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Unknown email or wrong password; which one is not disclosed
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Password must be at least {0} characters long")]
    WeakPassword(usize),

    #[error("Name is required")]
    MissingName,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Password hashing backend failure
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}
