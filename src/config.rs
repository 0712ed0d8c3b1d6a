// src/config.rs

use std::{env, fmt, ops::RangeInclusive, str::FromStr};

use dotenvy::dotenv;

pub const DEFAULT_JWT_EXPIRATION: u64 = 24 * 60 * 60;
pub const MAX_JWT_EXPIRATION: u64 = 365 * 24 * 60 * 60;
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_QUIZ_PAGE_SIZE: usize = 10;
pub const MAX_QUIZ_PAGE_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Without it the service keeps everything
    /// in memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub port: u16,
    pub quiz_page_size: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, value } => write!(f, "{} has an invalid value '{}'", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = optional("DATABASE_URL");

        let jwt_secret = optional("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let quiz_page_size = in_range(
            "QUIZ_PAGE_SIZE",
            parsed("QUIZ_PAGE_SIZE", DEFAULT_QUIZ_PAGE_SIZE)?,
            1..=MAX_QUIZ_PAGE_SIZE,
        )?;
        let jwt_expiration = in_range(
            "JWT_EXPIRATION",
            parsed("JWT_EXPIRATION", DEFAULT_JWT_EXPIRATION)?,
            1..=MAX_JWT_EXPIRATION,
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            admin_username: optional("ADMIN_USERNAME"),
            admin_password: optional("ADMIN_PASSWORD"),
            port: parsed("PORT", DEFAULT_PORT)?,
            quiz_page_size,
        })
    }
}

/// Reads a variable, treating an empty value as unset.
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(value) => match value.trim().parse() {
            Ok(parsed) => Ok(parsed),
            Err(_) => Err(ConfigError::Invalid { key, value }),
        },
        None => Ok(default),
    }
}

fn in_range<T>(key: &'static str, value: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: PartialOrd + ToString,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        })
    }
}
