use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::DEFAULT_OPTIONS_SUCCESS_STATUS;
use crate::exposed_headers::ExposedHeaders;
use crate::origin::Origin;
use std::time::Duration;
use thiserror::Error;

/// Immutable CORS policy shared by every request.
#[derive(Clone, Debug)]
pub struct CorsOptions {
    pub origin: Origin,
    pub methods: AllowedMethods,
    pub allowed_headers: AllowedHeaders,
    pub exposed_headers: ExposedHeaders,
    pub credentials: bool,
    /// Zero means `Access-Control-Max-Age` is not sent.
    pub max_age: Duration,
    pub allow_private_network: bool,
    /// Forward successful preflights downstream instead of answering them.
    pub options_passthrough: bool,
    pub options_success_status: u16,
    /// Log every per-request decision at debug level.
    pub debug: bool,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            origin: Origin::Any,
            methods: AllowedMethods::default(),
            allowed_headers: AllowedHeaders::default(),
            exposed_headers: ExposedHeaders::default(),
            credentials: false,
            max_age: Duration::ZERO,
            allow_private_network: false,
            options_passthrough: false,
            options_success_status: DEFAULT_OPTIONS_SUCCESS_STATUS,
            debug: false,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("options_success_status {0} is not a 2xx or 3xx status code")]
    InvalidOptionsSuccessStatus(u16),
    #[error("allowed origin list cannot be empty")]
    EmptyAllowedOrigins,
}

impl CorsOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(200..=399).contains(&self.options_success_status) {
            return Err(ValidationError::InvalidOptionsSuccessStatus(
                self.options_success_status,
            ));
        }

        if self.origin.is_empty() {
            return Err(ValidationError::EmptyAllowedOrigins);
        }

        Ok(())
    }

    pub(crate) fn max_age_header_value(&self) -> Option<String> {
        match self.max_age.as_secs() {
            0 => None,
            seconds => Some(seconds.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
