//! API configuration

use serde::Deserialize;
use uuid::Uuid;

use domain_invoicing::CompanyProfile;

/// Log output format of the server binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API server configuration
///
/// Every key has a default. Environment variables use the `FACTURATION_`
/// prefix; nested keys are separated by `__`, e.g.
/// `FACTURATION_COMPANY__NAME`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT signing secret; a random one is generated per process when unset
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    pub log_format: LogFormat,
    /// Load the demo catalog and sample invoice at startup
    pub seed_demo_data: bool,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_password: Option<String>,
    pub bootstrap_admin_name: Option<String>,
    /// Issuer details printed on invoice previews
    pub company: CompanyProfile,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: Uuid::new_v4().simple().to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            seed_demo_data: true,
            bootstrap_admin_email: None,
            bootstrap_admin_password: None,
            bootstrap_admin_name: None,
            company: CompanyProfile::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FACTURATION")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the bootstrap admin credentials when both email and password are set
    pub fn bootstrap_admin(&self) -> Option<(&str, &str, &str)> {
        match (&self.bootstrap_admin_email, &self.bootstrap_admin_password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                let nom = self.bootstrap_admin_name.as_deref().unwrap_or("Administrateur");
                Some((email.as_str(), password.as_str(), nom))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.jwt_expiration_secs, 3600);
        assert!(config.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.bootstrap_admin().is_none());
    }

    #[test]
    fn test_generated_secrets_differ() {
        assert_ne!(ApiConfig::default().jwt_secret, ApiConfig::default().jwt_secret);
    }

    #[test]
    fn test_bootstrap_admin_needs_password() {
        let config = ApiConfig {
            bootstrap_admin_email: Some("admin@masociete.tn".to_string()),
            ..Default::default()
        };
        assert!(config.bootstrap_admin().is_none());

        let config = ApiConfig {
            bootstrap_admin_password: Some("motdepasse".to_string()),
            ..config
        };
        assert_eq!(
            config.bootstrap_admin(),
            Some(("admin@masociete.tn", "motdepasse", "Administrateur"))
        );
    }
}
