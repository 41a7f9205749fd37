//! Server Configuration
//!
//! Read once at startup from the environment (and `.env`).

use std::net::SocketAddr;
use std::time::Duration;

use auth::AuthConfig;
use booking::BookingConfig;
use platform::config::{ConfigError, env_flag, env_or, env_parse, env_var, parse_list, parse_secret};

const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub booking: BookingConfig,
}

/// libpq-style connection settings used when `DATABASE_URL` is not set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgSettings {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl Default for PgSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: "vagrant".to_string(),
            password: "123".to_string(),
            database: "lightbnb".to_string(),
            port: 5432,
        }
    }
}

impl PgSettings {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or("PGHOST", &defaults.host),
            user: env_or("PGUSER", &defaults.user),
            password: env_or("PGPASSWORD", &defaults.password),
            database: env_or("PGDATABASE", &defaults.database),
            port: env_parse("PGPORT", defaults.port)?,
        })
    }

    pub fn to_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = match env_var("DATABASE_URL") {
            Some(url) => url,
            None => PgSettings::from_env()?.to_url(),
        };

        let bind_addr = env_parse("BIND_ADDR", default_bind_addr())?;
        let frontend_origins = parse_list(&env_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS));

        Ok(Self {
            database_url,
            database_max_connections: env_parse("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_addr,
            frontend_origins,
            auth: auth_config_from_env(cfg!(debug_assertions))?,
            booking: BookingConfig::default(),
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

/// Debug builds fall back to a random secret and a non-Secure cookie
fn auth_config_from_env(debug: bool) -> Result<AuthConfig, ConfigError> {
    let base = if debug {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    let session_secret = match env_var("SESSION_SECRET") {
        Some(raw) => parse_secret("SESSION_SECRET", &raw)?,
        None if debug => base.session_secret,
        None => return Err(ConfigError::Missing("SESSION_SECRET".to_string())),
    };

    let ttl_hours: u64 = env_parse("SESSION_TTL_HOURS", 24)?;

    Ok(AuthConfig {
        session_secret,
        session_ttl: Duration::from_secs(ttl_hours * 3600),
        cookie_secure: env_flag("COOKIE_SECURE", !debug)?,
        password_pepper: env_var("PASSWORD_PEPPER").map(String::into_bytes),
        ..base
    })
}
