//! PostgreSQL connection and pool configuration.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

/// Connection settings for the durable meal store.
///
/// Reads from environment variables:
/// - `DB_HOST` — server host (default: `"localhost"`)
/// - `DB_PORT` — server port (default: `5432`)
/// - `DB_NAME` — database name (default: `"foodserver"`)
/// - `DB_USER` / `DB_PASSWORD` — credentials (default: `"postgres"` / empty)
/// - `DB_POOL_INITIAL` — connections opened up front (default: `1`)
/// - `DB_POOL_MAX` — upper bound on pooled connections (default: `10`)
/// - `DB_POOL_TIMEOUT_SECS` — how long a caller waits for a free connection (default: `10`)
/// - `DB_STRICT_PROVISIONING` — abort startup if the table cannot be created (default: `false`)
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub pool_initial: u32,
    pub pool_max: u32,
    pub acquire_timeout: Duration,
    pub strict_provisioning: bool,
}

impl PostgresConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("DB_HOST").unwrap_or(defaults.host),
            port: env_or("DB_PORT", defaults.port),
            database: std::env::var("DB_NAME").unwrap_or(defaults.database),
            user: std::env::var("DB_USER").unwrap_or(defaults.user),
            password: std::env::var("DB_PASSWORD").unwrap_or(defaults.password),
            pool_initial: env_or("DB_POOL_INITIAL", defaults.pool_initial),
            pool_max: env_or("DB_POOL_MAX", defaults.pool_max),
            acquire_timeout: Duration::from_secs(env_or(
                "DB_POOL_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
            strict_provisioning: env_or("DB_STRICT_PROVISIONING", defaults.strict_provisioning),
        }
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }

    /// Pool sizing; the initial size never exceeds the maximum.
    pub fn pool_options(&self) -> PgPoolOptions {
        let max = self.pool_max.max(1);
        PgPoolOptions::new()
            .min_connections(self.pool_initial.min(max))
            .max_connections(max)
            .acquire_timeout(self.acquire_timeout)
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "foodserver".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            pool_initial: 1,
            pool_max: 10,
            acquire_timeout: Duration::from_secs(10),
            strict_provisioning: false,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = PostgresConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.database, "foodserver");
        assert_eq!(config.pool_initial, 1);
        assert_eq!(config.pool_max, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(10));
        assert!(!config.strict_provisioning);
    }

    #[test]
    fn test_pool_options_respect_bounds() {
        let config = PostgresConfig {
            pool_initial: 4,
            pool_max: 8,
            acquire_timeout: Duration::from_secs(3),
            ..PostgresConfig::default()
        };
        let options = config.pool_options();
        assert_eq!(options.get_min_connections(), 4);
        assert_eq!(options.get_max_connections(), 8);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_initial_capacity_clamped_to_max() {
        let config = PostgresConfig {
            pool_initial: 20,
            pool_max: 5,
            ..PostgresConfig::default()
        };
        let options = config.pool_options();
        assert_eq!(options.get_min_connections(), 5);
        assert_eq!(options.get_max_connections(), 5);
    }

    #[test]
    fn test_connect_options() {
        let config = PostgresConfig {
            host: "db.internal".to_string(),
            port: 6543,
            database: "meals".to_string(),
            ..PostgresConfig::default()
        };
        let options = config.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("meals"));
    }
}
