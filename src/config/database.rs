use crate::core::{AppError, Result};
use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => compose_url(
                env::var("DB_USER").ok().as_deref(),
                env::var("DB_PASSWORD").ok().as_deref(),
                env::var("DB_SERVER").ok().as_deref(),
                env::var("DB_PORT").ok().as_deref(),
                env::var("DB_DATABASE").ok().as_deref(),
            )?,
        };

        Ok(DatabaseConfig {
            url,
            pool_size: env::var("DATABASE_POOL_SIZE")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid DATABASE_POOL_SIZE".to_string())
                })?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid DATABASE_MAX_CONNECTIONS".to_string())
                })?,
            run_migrations: parse_flag(env::var("DATABASE_RUN_MIGRATIONS").ok().as_deref())
                .ok_or_else(|| {
                    AppError::Configuration("Invalid DATABASE_RUN_MIGRATIONS".to_string())
                })?,
        })
    }

    /// Create a MySQL connection pool
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // 30 minutes
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(AppError::Database)
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(pool: &MySqlPool) -> Result<()> {
        sqlx::migrate!("./migrations").run(pool).await?;
        Ok(())
    }
}

/// Build a connection URL from the discrete DB_* variables.
///
/// User, server and database are mandatory; password and port are optional.
pub fn compose_url(
    user: Option<&str>,
    password: Option<&str>,
    server: Option<&str>,
    port: Option<&str>,
    database: Option<&str>,
) -> Result<String> {
    let missing = || {
        AppError::Configuration(
            "DATABASE_URL not set and DB_USER/DB_SERVER/DB_DATABASE incomplete".to_string(),
        )
    };

    let user = user.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let server = server.filter(|s| !s.is_empty()).ok_or_else(missing)?;
    let database = database.filter(|s| !s.is_empty()).ok_or_else(missing)?;

    let credentials = match password.filter(|s| !s.is_empty()) {
        Some(password) => format!("{}:{}", user, password),
        None => user.to_string(),
    };

    let host = match port.filter(|s| !s.is_empty()) {
        Some(port) => {
            port.parse::<u16>()
                .map_err(|_| AppError::Configuration("Invalid DB_PORT".to_string()))?;
            format!("{}:{}", server, port)
        }
        None => server.to_string(),
    };

    Ok(format!("mysql://{}@{}/{}", credentials, host, database))
}

/// Parse a boolean env flag; absent means false
pub(crate) fn parse_flag(value: Option<&str>) -> Option<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Some(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Some(false),
            "1" | "true" | "yes" | "on" => Some(true),
            _ => None,
        },
    }
}
