//! Process configuration, read once from the environment at start-up.

pub mod app;
pub mod db;

use std::env;

use crate::error::AppError;

/// Required environment variable; empty values count as missing.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Optional environment variable parsed into `T`; unset yields `None`.
pub(crate) fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("Environment variable '{name}' is invalid: '{raw}'"))),
        Err(_) => Ok(None),
    }
}
