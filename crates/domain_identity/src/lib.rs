//! Identity Domain
//!
//! Users of the invoicing application and how they authenticate:
//!
//! - **Users**: an email, a display name and a role (`admin` or `user`)
//! - **Passwords**: stored as Argon2 PHC strings, never in clear
//! - **Ports**: [`CredentialVerifier`] checks a login, [`UserPort`] manages accounts
//!
//! Sessions are not kept here; the API layer issues signed tokens once
//! credentials have been verified.

pub mod user;
pub mod password;
pub mod ports;
pub mod error;

pub use user::{User, UserAccount, NewUser, Role, MIN_PASSWORD_LENGTH};
pub use password::PasswordHasher;
pub use ports::{CredentialVerifier, UserPort};
pub use error::IdentityError;
