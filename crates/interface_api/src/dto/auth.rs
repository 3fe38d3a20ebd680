//! Auth DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_identity::{NewUser, User};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "is required"))]
    pub nom: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(request: RegisterRequest) -> Self {
        NewUser {
            email: request.email,
            password: request.password,
            nom: request.nom,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

impl AuthResponse {
    pub fn bearer(token: String, expires_in: u64, user: User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}
