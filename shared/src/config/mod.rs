//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and token lifetimes
//! - `database` - Database connection and pool configuration
//! - `email` - Outbound email delivery for verification codes
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding
//! - `verification` - Verification code validity windows

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Verification code policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            verification: VerificationConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Every section falls back to its defaults when a variable is absent
    /// or cannot be parsed. Call `dotenvy::dotenv()` first if a `.env` file
    /// should be honoured.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            verification: VerificationConfig::from_env(),
            email: EmailConfig::from_env(),
            logging,
        }
    }

    /// Check settings that must never reach production with defaults
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is usable in the current environment
    /// * `Err(String)` - Human readable reason the configuration is rejected
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        for (name, minutes) in [
            ("registration", self.verification.registration_window_minutes),
            ("login", self.verification.login_window_minutes),
        ] {
            if !(1..=verification::MAX_WINDOW_MINUTES).contains(&minutes) {
                return Err(format!(
                    "{} window must be between 1 and {} minutes, got {}",
                    name,
                    verification::MAX_WINDOW_MINUTES,
                    minutes
                ));
            }
        }
        Ok(())
    }
}
