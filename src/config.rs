use std::{env, fmt, path::PathBuf, str::FromStr};

use derive_more::Display;
use log::info;

#[derive(Debug, Display)]
#[display(fmt = "invalid value for {}: {}", key, reason)]
pub struct ConfigError {
    key: &'static str,
    reason: String,
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Unset or empty selects the in-memory backend.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub photo_dir: PathBuf,
    pub photo_max_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load(&lookup, "HOST", "127.0.0.1")?,
            port: try_load(&lookup, "PORT", "8080")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            db_max_connections: try_load(&lookup, "DB_MAX_CONNECTIONS", "5")?,
            photo_dir: try_load(&lookup, "PHOTO_DIR", "./photos")?,
            photo_max_bytes: try_load(&lookup, "PHOTO_MAX_BYTES", "10485760")?,
        })
    }
}

fn try_load<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
    })
}
