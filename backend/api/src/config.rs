//! Service configuration
//! Loaded from environment variables (a `.env` file is honoured by `main`)

use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// How dashboard requests are authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionGateMode {
    /// Bearer token must be one of `SESSION_TOKENS`
    #[default]
    Tokens,
    /// No session check at all; local development only
    Open,
}

impl SessionGateMode {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "tokens" => Some(SessionGateMode::Tokens),
            "open" => Some(SessionGateMode::Open),
            _ => None,
        }
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub session_gate: SessionGateMode,
    /// Bearer tokens accepted by the session gate
    pub session_tokens: Vec<String>,
    pub seed_mock_data: bool,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3001,
            session_gate: SessionGateMode::Tokens,
            session_tokens: Vec::new(),
            seed_mock_data: true,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("API_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid API_HOST '{}': {}", raw, e))
            })?,
            None => defaults.host,
        };

        let port = match lookup("API_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid API_PORT '{}': {}", raw, e))
            })?,
            None => defaults.port,
        };

        let session_gate = match lookup("SESSION_GATE") {
            Some(raw) => SessionGateMode::parse(&raw).ok_or_else(|| {
                ConfigError::InvalidConfig(format!(
                    "Invalid SESSION_GATE '{}' (expected 'tokens' or 'open')",
                    raw
                ))
            })?,
            None => defaults.session_gate,
        };

        let session_tokens = lookup("SESSION_TOKENS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.session_tokens);

        let seed_mock_data = match lookup("SEED_MOCK_DATA") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                ConfigError::InvalidConfig(format!("Invalid SEED_MOCK_DATA '{}'", raw))
            })?,
            None => defaults.seed_mock_data,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.cors_allowed_origins);

        info!(
            host = %host,
            port,
            session_gate = ?session_gate,
            session_tokens = session_tokens.len(),
            seed_mock_data,
            "API configuration loaded"
        );

        Ok(Self {
            host,
            port,
            session_gate,
            session_tokens,
            seed_mock_data,
            cors_allowed_origins,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
