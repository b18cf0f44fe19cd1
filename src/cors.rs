use crate::constants::method;
use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::options::{CorsOptions, ValidationError};
use crate::result::{ActualResult, CorsDecision, PreflightResult};

/// How a single request takes part in CORS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestKind<'a> {
    NotCors,
    Preflight { origin: &'a str },
    Actual { origin: &'a str },
}

impl<'a> RequestKind<'a> {
    pub(crate) fn classify(request: &RequestContext<'a>) -> Self {
        let Some(origin) = request.origin() else {
            return Self::NotCors;
        };

        if request.method.eq_ignore_ascii_case(method::OPTIONS)
            && request.requested_method().is_some()
        {
            Self::Preflight { origin }
        } else {
            Self::Actual { origin }
        }
    }
}

/// Core CORS policy engine that evaluates requests using [`CorsOptions`].
///
/// Evaluation is a pure function of the request and the options, so one
/// instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Cors {
    options: CorsOptions,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &CorsOptions {
        &self.options
    }

    pub fn check(&self, request: &RequestContext<'_>) -> CorsDecision {
        match RequestKind::classify(request) {
            RequestKind::NotCors => CorsDecision::NotApplicable,
            RequestKind::Preflight { origin } => {
                CorsDecision::Preflight(self.process_preflight(origin, request))
            }
            RequestKind::Actual { origin } => CorsDecision::Actual(self.process_actual(origin)),
        }
    }

    fn process_preflight(&self, origin: &str, request: &RequestContext<'_>) -> PreflightResult {
        let builder = HeaderBuilder::new(&self.options);
        let mut headers = builder.build_preflight_vary(request);

        // A rejected origin still gets an answer, just without any grant.
        if let Some(origin_headers) = builder.build_origin_header(origin) {
            headers.extend(origin_headers);
            headers.extend(builder.build_methods_header(request));
            headers.extend(builder.build_allowed_headers(request));
            headers.extend(builder.build_max_age_header());
            headers.extend(builder.build_private_network_header(request));
            headers.extend(builder.build_credentials_header());
        }

        PreflightResult {
            headers: headers.into_headers(),
            status: self.options.options_success_status,
            terminate: !self.options.options_passthrough,
        }
    }

    fn process_actual(&self, origin: &str) -> ActualResult {
        let builder = HeaderBuilder::new(&self.options);
        let mut headers = builder.build_actual_vary();

        if let Some(origin_headers) = builder.build_origin_header(origin) {
            headers.extend(origin_headers);
            headers.extend(builder.build_credentials_header());
            headers.extend(builder.build_exposed_headers());
        }

        ActualResult {
            headers: headers.into_headers(),
        }
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
