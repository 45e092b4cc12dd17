// ============================
// doorman-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::auth::session::DEFAULT_SESSION_TTL;
use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use anyhow::{bail, Result};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Log level
    pub log_level: String,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// Name of the session cookie
    pub session_cookie: String,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

/// Password complexity requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequirements {
    /// Minimum password length
    pub min_length: usize,
    /// Maximum password length
    pub max_length: usize,
    /// Require uppercase letters
    pub require_uppercase: bool,
    /// Require lowercase letters
    pub require_lowercase: bool,
    /// Require digits
    pub require_digit: bool,
    /// Require special characters
    pub require_special: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("static address parses"),
            log_level: "info".to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
            session_cookie: "doorman_session".to_string(),
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 128,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl Settings {
    /// Load settings from a config file and `DOORMAN_`-prefixed environment
    /// variables, layered on top of the defaults.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("DOORMAN_").split("__"))
            .extract()?;

        Ok(settings)
    }

    /// Reject configurations the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }

        if self.session_ttl_secs == 0 {
            bail!("session TTL must be positive");
        }

        if self.session_cookie.is_empty() {
            bail!("session cookie name must not be empty");
        }

        let req = &self.password_requirements;
        if req.min_length < 8 {
            bail!("password minimum length must be at least 8");
        }
        if req.max_length < req.min_length {
            bail!("password maximum length must not be below the minimum");
        }

        Ok(())
    }
}
