//! Error translation for the in-memory adapters

use core_kernel::PortError;
use domain_identity::IdentityError;

/// Translates identity errors into port errors
///
/// - `InvalidCredentials` -> `PortError::Unauthorized`
/// - `EmailTaken` -> `PortError::Conflict`
/// - `Hashing` -> `PortError::Internal`
/// - validation failures -> `PortError::Validation`
pub fn identity_to_port_error(error: IdentityError) -> PortError {
    match error {
        IdentityError::InvalidCredentials => PortError::unauthorized(error.to_string()),
        IdentityError::EmailTaken(_) => PortError::conflict(error.to_string()),
        IdentityError::Hashing(_) => PortError::internal(error.to_string()),
        IdentityError::InvalidEmail(_) => PortError::validation_field(error.to_string(), "email"),
        IdentityError::WeakPassword(_) => {
            PortError::validation_field(error.to_string(), "password")
        }
        IdentityError::MissingName => PortError::validation_field(error.to_string(), "nom"),
        IdentityError::UnknownRole(_) => PortError::validation_field(error.to_string(), "role"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping() {
        assert!(matches!(
            identity_to_port_error(IdentityError::InvalidCredentials),
            PortError::Unauthorized { .. }
        ));
        assert!(matches!(
            identity_to_port_error(IdentityError::EmailTaken("a@b.tn".into())),
            PortError::Conflict { .. }
        ));
        assert!(matches!(
            identity_to_port_error(IdentityError::WeakPassword(8)),
            PortError::Validation { field: Some(_), .. }
        ));
    }
}
