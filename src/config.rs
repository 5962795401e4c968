//! Environment configuration.
//!
//! Either `DATABASE_URL` or the discrete `DB_*` variables describe the
//! database. TLS verification can be relaxed with `DB_SSL_NO_VERIFY=true`
//! for hosted databases that present certificates we cannot verify.

use std::net::SocketAddr;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum DatabaseTarget {
    Url(String),
    Params {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseTarget,
    pub ssl_no_verify: bool,
    pub max_connections: u32,
    pub port: u16,
    pub expose_error_details: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Params {
                host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or("DB_PORT", var("DB_PORT"), DEFAULT_DB_PORT)?,
                user: var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
                password: var("DB_PASSWORD"),
                database: var("DB_DATABASE").ok_or(ConfigError::Missing("DB_DATABASE"))?,
            },
        };

        Ok(Self {
            database,
            ssl_no_verify: parse_flag("DB_SSL_NO_VERIFY", var("DB_SSL_NO_VERIFY"))?,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                var("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            port: parse_or("PORT", var("PORT"), DEFAULT_PORT)?,
            expose_error_details: parse_flag("EXPOSE_ERROR_DETAILS", var("EXPOSE_ERROR_DETAILS"))?,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { name, value: v }),
        None => Ok(default),
    }
}

fn parse_flag(name: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.to_ascii_lowercase().as_str() {
        "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
