//! Users and roles

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use core_kernel::UserId;

use crate::error::IdentityError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Access level of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages the catalog (products, categories) in addition to invoicing
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }
}

/// A user as exposed outside the identity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub nom: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user together with its password hash, as kept by stores
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: String,
}

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub nom: String,
}

impl NewUser {
    /// Checks the email syntax, the password length and the name
    pub fn validate(&self) -> Result<(), IdentityError> {
        if !self.normalized_email().validate_email() {
            return Err(IdentityError::InvalidEmail(self.email.clone()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(IdentityError::WeakPassword(MIN_PASSWORD_LENGTH));
        }
        if self.nom.trim().is_empty() {
            return Err(IdentityError::MissingName);
        }
        Ok(())
    }

    /// Email as stored and looked up
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// Emails are compared trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserAccount {
    /// Creates an account with a fresh identifier
    pub fn new(email: &str, nom: &str, role: Role, password_hash: String) -> Self {
        Self {
            user: User {
                id: UserId::new(),
                email: normalize_email(email),
                nom: nom.trim().to_string(),
                role,
                created_at: Utc::now(),
            },
            password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, nom: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            nom: nom.to_string(),
        }
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::User.to_string(), "user");
        assert!("root".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_new_user_validation() {
        assert!(request("jean@example.tn", "motdepasse", "Jean").validate().is_ok());
        assert_eq!(
            request("jean", "motdepasse", "Jean").validate(),
            Err(IdentityError::InvalidEmail("jean".to_string()))
        );
        assert_eq!(
            request("jean@example.tn", "court", "Jean").validate(),
            Err(IdentityError::WeakPassword(MIN_PASSWORD_LENGTH))
        );
        assert_eq!(
            request("jean@example.tn", "motdepasse", " ").validate(),
            Err(IdentityError::MissingName)
        );
    }

    #[test]
    fn test_email_is_normalized() {
        let account = UserAccount::new(" Jean@Example.TN ", "Jean", Role::User, String::new());
        assert_eq!(account.user.email, "jean@example.tn");
        assert!(!account.user.is_admin());
    }
}
