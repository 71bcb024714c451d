//! Application configuration loaded from environment variables.

use std::env;

#[cfg(feature = "postgres")]
use inkwell_infra::DatabaseConfig;
use inkwell_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// Apply pending schema migrations before serving.
    pub run_migrations: bool,
    pub jwt: JwtConfig,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_parse("DB_MAX_CONNECTIONS", 100),
            min_connections: env_parse("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_parse("PORT", 8080),
            #[cfg(feature = "postgres")]
            database,
            run_migrations: env_flag("RUN_MIGRATIONS"),
            jwt: JwtConfig::from_env(),
        }
    }
}
