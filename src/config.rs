//! Runtime configuration for the todo service.
//!
//! Settings come from the process environment, optionally seeded from a `.env`
//! file in the working directory.
//!
//! - `TODO_HOST`: bind address - default: "0.0.0.0"
//! - `TODO_PORT`: listening port - default: "5000"
//! - `TODO_DATA_DIR`: directory for persisted data - default: "data"
//! - `DATABASE_URL`: SQLite url - default: "sqlite://<TODO_DATA_DIR>/todo.db"
//! - `TODO_CORS_ORIGIN`: origin allowed to call the JSON API - default: none
//! - `TODO_HEALTH_URL`: url probed by `healthcheck` - default: "http://localhost:<TODO_PORT>/health"

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub database_url: String,
    pub cors_origin: Option<HeaderValue>,
    pub health_url: String,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // a missing .env is the normal case in the container
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("TODO_HOST") {
            Some(value) => value.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    var: "TODO_HOST",
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_HOST,
        };

        let port = match lookup("TODO_PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: "TODO_PORT",
                    value,
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PORT,
        };

        let data_dir = PathBuf::from(
            lookup("TODO_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
        );

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| format!("sqlite://{}", data_dir.join("todo.db").display()));

        let cors_origin = match lookup("TODO_CORS_ORIGIN") {
            Some(value) => Some(value.parse::<HeaderValue>().map_err(|e| {
                ConfigError::InvalidValue {
                    var: "TODO_CORS_ORIGIN",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        let health_url = lookup("TODO_HEALTH_URL")
            .unwrap_or_else(|| format!("http://localhost:{}/health", port));

        Ok(Self {
            host,
            port,
            data_dir,
            database_url,
            cors_origin,
            health_url,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
