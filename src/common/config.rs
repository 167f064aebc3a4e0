// src/common/config.rs
//! Environment-driven configuration for the registration service

use std::env;
use thiserror::Error;
use tracing::info;

use crate::register::models::{ErrorShape, RegistrationForm};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001,http://localhost:5173";
/// Matches the 100kb JSON body limit the registration endpoint always had.
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub register_form: RegistrationForm,
    pub error_shape: ErrorShape,
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let register_form = RegistrationForm::default();
        Self {
            port: DEFAULT_PORT,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
            register_form,
            error_shape: register_form.default_error_shape(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let cors_origins =
            split_origins(&lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()));

        let register_form = match lookup("REGISTER_FORM") {
            Some(raw) => raw.parse::<RegistrationForm>().map_err(|reason| {
                ConfigError::InvalidValue {
                    key: "REGISTER_FORM",
                    value: raw.clone(),
                    reason,
                }
            })?,
            None => RegistrationForm::default(),
        };

        let error_shape = match lookup("REGISTER_ERROR_SHAPE") {
            Some(raw) => raw.parse::<ErrorShape>().map_err(|reason| {
                ConfigError::InvalidValue {
                    key: "REGISTER_ERROR_SHAPE",
                    value: raw.clone(),
                    reason,
                }
            })?,
            None => register_form.default_error_shape(),
        };

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "MAX_BODY_BYTES",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            port,
            cors_origins,
            register_form,
            error_shape,
            max_body_bytes,
        })
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

/// Print the active registration setup on startup
pub fn log_config_summary(config: &AppConfig) {
    info!(
        port = config.port,
        register_form = %config.register_form,
        error_shape = %config.error_shape,
        max_body_bytes = config.max_body_bytes,
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );
}
