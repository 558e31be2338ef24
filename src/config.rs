//! Server configuration parsed from environment variables.
//!
//! Required:
//! - `DATABASE_URL`
//!
//! Optional:
//! - `PORT`: default 8080
//! - `DB_MAX_CONNECTIONS`: default 5
//! - `IMAGES_DIR`: default `instance/images`
//! - `DISPLAY_UTC_OFFSET_HOURS`: default 8; the zone used for "today",
//!   history timestamps, and device schedule checks

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use chrono::FixedOffset;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_IMAGES_DIR: &str = "instance/images";
pub const DEFAULT_DISPLAY_UTC_OFFSET_HOURS: i32 = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub images_dir: PathBuf,
    pub display_offset: FixedOffset,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        let images_dir = lookup("IMAGES_DIR").map_or_else(|| PathBuf::from(DEFAULT_IMAGES_DIR), PathBuf::from);
        let offset_hours: i32 = parse_or(&lookup, "DISPLAY_UTC_OFFSET_HOURS", DEFAULT_DISPLAY_UTC_OFFSET_HOURS)?;
        let display_offset = FixedOffset::east_opt(offset_hours * 3600)
            .ok_or_else(|| ConfigError::Invalid { var: "DISPLAY_UTC_OFFSET_HOURS", value: offset_hours.to_string() })?;

        Ok(Self { database_url, port, db_max_connections, images_dir, display_offset })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}
