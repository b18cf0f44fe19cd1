use crate::constants::{WILDCARD, header};
use crate::context::RequestContext;
use crate::headers::HeaderCollection;
use crate::options::CorsOptions;
use crate::origin::OriginDecision;

pub(crate) struct HeaderBuilder<'a> {
    options: &'a CorsOptions,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(options: &'a CorsOptions) -> Self {
        Self { options }
    }

    pub(crate) fn build_preflight_vary(&self, request: &RequestContext<'_>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.add_vary(header::ORIGIN);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_METHOD);
        headers.add_vary(header::ACCESS_CONTROL_REQUEST_HEADERS);
        if request.private_network_present() {
            headers.add_vary(header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK);
        }
        headers
    }

    pub(crate) fn build_actual_vary(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_estimate(1);
        headers.add_vary(header::ORIGIN);
        headers
    }

    /// Returns `None` when the origin is rejected.
    pub(crate) fn build_origin_header(&self, origin: &str) -> Option<HeaderCollection> {
        let value = match self.options.origin.resolve(origin, self.options.credentials) {
            OriginDecision::Any => WILDCARD,
            OriginDecision::Mirror => origin,
            OriginDecision::Disallow => return None,
        };

        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        Some(headers)
    }

    pub(crate) fn build_methods_header(&self, request: &RequestContext<'_>) -> HeaderCollection {
        match self.options.methods.header_value(request.requested_method()) {
            Some(value) => single(header::ACCESS_CONTROL_ALLOW_METHODS, value),
            None => HeaderCollection::new(),
        }
    }

    pub(crate) fn build_allowed_headers(&self, request: &RequestContext<'_>) -> HeaderCollection {
        match self
            .options
            .allowed_headers
            .header_value(request.requested_headers())
        {
            Some(value) => single(header::ACCESS_CONTROL_ALLOW_HEADERS, value),
            None => HeaderCollection::new(),
        }
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        match self.options.max_age_header_value() {
            Some(value) => single(header::ACCESS_CONTROL_MAX_AGE, value),
            None => HeaderCollection::new(),
        }
    }

    pub(crate) fn build_private_network_header(
        &self,
        request: &RequestContext<'_>,
    ) -> HeaderCollection {
        if self.options.allow_private_network && request.private_network_requested() {
            single(header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK, "true")
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        if self.options.credentials {
            single(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true")
        } else {
            HeaderCollection::new()
        }
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        match self.options.exposed_headers.header_value() {
            Some(value) => single(header::ACCESS_CONTROL_EXPOSE_HEADERS, value),
            None => HeaderCollection::new(),
        }
    }
}

fn single(name: &str, value: impl Into<String>) -> HeaderCollection {
    let mut headers = HeaderCollection::with_estimate(1);
    headers.push(name, value);
    headers
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
