//! Server, signing-secret and password-hashing settings.

use std::env;

use crate::auth::password::PasswordHashing;
use crate::config::{must_var, parse_var};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `BACKEND_HOST` / `BACKEND_PORT`, with defaults.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_var::<u16>("BACKEND_PORT")?.unwrap_or(DEFAULT_PORT),
        })
    }
}

/// Signing secret from `APP_JWT_SECRET`. There is no fallback value.
pub fn security_from_env() -> Result<SecurityConfig, AppError> {
    let secret = must_var("APP_JWT_SECRET")?;
    Ok(SecurityConfig::new(secret.into_bytes()))
}

/// Argon2 cost parameters; unset variables keep the library defaults.
pub fn password_hashing_from_env() -> Result<PasswordHashing, AppError> {
    let memory_kib = parse_var::<u32>("PASSWORD_HASH_MEMORY_KIB")?;
    let iterations = parse_var::<u32>("PASSWORD_HASH_ITERATIONS")?;
    let parallelism = parse_var::<u32>("PASSWORD_HASH_PARALLELISM")?;

    if memory_kib.is_none() && iterations.is_none() && parallelism.is_none() {
        return Ok(PasswordHashing::default());
    }

    PasswordHashing::new(
        memory_kib.unwrap_or(argon2::Params::DEFAULT_M_COST),
        iterations.unwrap_or(argon2::Params::DEFAULT_T_COST),
        parallelism.unwrap_or(argon2::Params::DEFAULT_P_COST),
    )
}
