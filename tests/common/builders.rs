#![allow(dead_code)]

use bunner_cors_gateway::constants::method;
use bunner_cors_gateway::{
    AllowedHeaders, AllowedMethods, Cors, CorsDecision, CorsOptions, ExposedHeaders, Origin,
    RequestContext, ValidationError,
};
use std::time::Duration;

#[derive(Default)]
pub struct CorsBuilder {
    options: CorsOptions,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: Origin) -> Self {
        self.options.origin = origin;
        self
    }

    pub fn origins<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.origin = Origin::from_patterns(patterns).expect("valid origin patterns");
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.methods = AllowedMethods::list(methods);
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.options.allowed_headers = headers;
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exposed_headers = ExposedHeaders::list(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.credentials = enabled;
        self
    }

    pub fn max_age(mut self, value: Duration) -> Self {
        self.options.max_age = value;
        self
    }

    pub fn private_network(mut self, enabled: bool) -> Self {
        self.options.allow_private_network = enabled;
        self
    }

    pub fn passthrough(mut self, enabled: bool) -> Self {
        self.options.options_passthrough = enabled;
        self
    }

    pub fn success_status(mut self, status: u16) -> Self {
        self.options.options_success_status = status;
        self
    }

    pub fn options(self) -> CorsOptions {
        self.options
    }

    pub fn try_build(self) -> Result<Cors, ValidationError> {
        Cors::new(self.options)
    }

    pub fn build(self) -> Cors {
        self.try_build().expect("valid CORS configuration")
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub struct PreflightRequestBuilder {
    method: String,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
    private_network: bool,
}

impl Default for PreflightRequestBuilder {
    fn default() -> Self {
        Self {
            method: method::OPTIONS.into(),
            origin: None,
            request_method: Some(method::GET.into()),
            request_headers: None,
            private_network: false,
        }
    }
}

impl PreflightRequestBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn without_request_method(mut self) -> Self {
        self.request_method = None;
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn private_network(mut self, enabled: bool) -> Self {
        self.private_network = enabled;
        self
    }

    pub fn check(&self, cors: &Cors) -> CorsDecision {
        cors.check(&RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
            access_control_request_private_network: self.private_network.then_some("true"),
        })
    }
}

pub fn preflight_request() -> PreflightRequestBuilder {
    PreflightRequestBuilder::default()
}

pub struct ActualRequestBuilder {
    method: String,
    origin: Option<String>,
}

impl Default for ActualRequestBuilder {
    fn default() -> Self {
        Self {
            method: method::GET.into(),
            origin: None,
        }
    }
}

impl ActualRequestBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn check(&self, cors: &Cors) -> CorsDecision {
        cors.check(&RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
            access_control_request_private_network: None,
        })
    }
}

pub fn actual_request() -> ActualRequestBuilder {
    ActualRequestBuilder::default()
}
