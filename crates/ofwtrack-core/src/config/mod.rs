//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::realtime::{RealtimeBackend, RealtimeConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// Deserialized from the merged sources: `config/default.toml`, an
/// optional environment overlay, and `OFWTRACK__*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Realtime push settings.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// `path` is the base file (extension optional). `env` selects the
    /// overlay `config/{env}` when present.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("OFWTRACK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.realtime.backend == RealtimeBackend::Redis && self.realtime.redis_url.is_none() {
            return Err(AppError::configuration(
                "realtime.redis_url is required when realtime.backend = \"redis\"",
            ));
        }
        if self.realtime.push_timeout_ms == 0 {
            return Err(AppError::configuration(
                "realtime.push_timeout_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("config should parse")
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://localhost/ofwtrack"
            "#,
        );
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.realtime.backend, RealtimeBackend::Memory);
        assert_eq!(cfg.realtime.push_timeout_ms, 2000);
        assert!(cfg.realtime.parallel_fanout);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let cfg = parse(
            r#"
            [database]
            url = "postgres://localhost/ofwtrack"

            [realtime]
            backend = "redis"
            "#,
        );
        assert!(cfg.validate().is_err());
    }
}
