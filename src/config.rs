//! Builds [`CorsOptions`] from the host's untyped extra configuration.
//!
//! The policy lives under [`namespace::CORS`] (or the legacy
//! [`namespace::LEGACY_CORS`] key):
//!
//! ```json
//! {
//!   "security/cors": {
//!     "allow_origins": ["https://app.example.com", "https://*.example.com"],
//!     "allow_methods": ["GET", "POST"],
//!     "allow_headers": ["Origin", "Content-Type"],
//!     "expose_headers": ["X-Request-Id"],
//!     "allow_credentials": true,
//!     "max_age": "2h",
//!     "allow_private_network": false,
//!     "options_passthrough": false,
//!     "options_success_status": 204,
//!     "debug": false
//!   }
//! }
//! ```

use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::{DEFAULT_OPTIONS_SUCCESS_STATUS, namespace};
use crate::duration::{DurationError, parse_duration};
use crate::exposed_headers::ExposedHeaders;
use crate::logging::Logger;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::{Origin, PatternError};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Untyped configuration record handed over by the host application.
pub type ExtraConfig = serde_json::Map<String, Value>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no CORS configuration found under `{}`", namespace::CORS)]
    Absent,
    #[error("malformed CORS configuration: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid max_age: {0}")]
    InvalidMaxAge(#[from] DurationError),
    #[error("invalid allow_origins entry: {0}")]
    InvalidOrigin(#[from] PatternError),
    #[error("invalid CORS policy: {0}")]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCorsConfig {
    allow_origins: Vec<String>,
    allow_methods: Vec<String>,
    allow_headers: Vec<String>,
    expose_headers: Vec<String>,
    allow_credentials: bool,
    max_age: Option<String>,
    allow_private_network: bool,
    options_passthrough: bool,
    options_success_status: Option<u16>,
    debug: bool,
}

impl RawCorsConfig {
    fn into_options(self) -> Result<CorsOptions, ConfigError> {
        let max_age = match self.max_age.as_deref() {
            Some(value) => parse_duration(value)?,
            None => Duration::ZERO,
        };

        let options = CorsOptions {
            origin: Origin::from_patterns(&self.allow_origins)?,
            methods: AllowedMethods::list(self.allow_methods),
            allowed_headers: AllowedHeaders::list(self.allow_headers),
            exposed_headers: ExposedHeaders::list(self.expose_headers),
            credentials: self.allow_credentials,
            max_age,
            allow_private_network: self.allow_private_network,
            options_passthrough: self.options_passthrough,
            options_success_status: self
                .options_success_status
                .unwrap_or(DEFAULT_OPTIONS_SUCCESS_STATUS),
            debug: self.debug,
        };
        options.validate()?;
        Ok(options)
    }
}

/// Returns the raw policy entry, preferring the current namespace.
pub fn lookup(extra: &ExtraConfig) -> Option<&Value> {
    extra
        .get(namespace::CORS)
        .or_else(|| extra.get(namespace::LEGACY_CORS))
}

pub fn parse(extra: &ExtraConfig) -> Result<CorsOptions, ConfigError> {
    let entry = lookup(extra).ok_or(ConfigError::Absent)?;
    let raw = RawCorsConfig::deserialize(entry)?;
    raw.into_options()
}

/// Like [`parse`], but collapses every failure to `None`. A present but
/// unusable entry is reported once through `logger`; absence stays silent.
pub fn build(extra: &ExtraConfig, logger: &Logger) -> Option<CorsOptions> {
    match parse(extra) {
        Ok(options) => Some(options),
        Err(ConfigError::Absent) => None,
        Err(err) => {
            logger.in_scope(|| {
                tracing::warn!(error = %err, "CORS middleware disabled: invalid configuration");
            });
            None
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
