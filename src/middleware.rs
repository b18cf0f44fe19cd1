use crate::config::{self, ExtraConfig};
use crate::constants::header;
use crate::context::RequestContext;
use crate::cors::Cors;
use crate::headers::Headers;
use crate::logging::Logger;
use crate::options::{CorsOptions, ValidationError};
use crate::result::{ActualResult, CorsDecision, PreflightResult};
use http::{HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Tower layer applying a CORS policy in front of a downstream service.
///
/// Constructors return `None` when the host configuration carries no usable
/// policy; callers skip the layer instead of installing a no-op.
#[derive(Clone, Debug)]
pub struct CorsLayer {
    cors: Arc<Cors>,
    logger: Logger,
}

impl CorsLayer {
    /// Logs through whatever `tracing` subscriber is current.
    pub fn new(extra: &ExtraConfig) -> Option<Self> {
        Self::build(extra, Logger::ambient())
    }

    pub fn with_logger(extra: &ExtraConfig, logger: impl Into<Logger>) -> Option<Self> {
        Self::build(extra, logger.into())
    }

    pub fn from_options(options: CorsOptions) -> Result<Self, ValidationError> {
        Ok(Self {
            cors: Arc::new(Cors::new(options)?),
            logger: Logger::ambient(),
        })
    }

    pub fn cors(&self) -> &Cors {
        &self.cors
    }

    fn build(extra: &ExtraConfig, logger: Logger) -> Option<Self> {
        let options = config::build(extra, &logger)?;
        // `config::build` only yields validated options.
        let cors = Cors::new(options).ok()?;
        Some(Self {
            cors: Arc::new(cors),
            logger,
        })
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            cors: Arc::clone(&self.cors),
            logger: self.logger.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CorsService<S> {
    inner: S,
    cors: Arc<Cors>,
    logger: Logger,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let decision = self.cors.check(&request_context(&request));
        if self.cors.options().debug {
            log_decision(&self.logger, &request, &decision);
        }

        match decision {
            CorsDecision::NotApplicable => Box::pin(self.inner.call(request)),
            CorsDecision::Preflight(result) if result.terminate => {
                let response = preflight_response(result.status, &result.headers);
                Box::pin(async move { Ok::<_, S::Error>(response) })
            }
            CorsDecision::Preflight(PreflightResult { headers, .. })
            | CorsDecision::Actual(ActualResult { headers }) => {
                let future = self.inner.call(request);
                Box::pin(async move {
                    let mut response = future.await?;
                    apply_headers(response.headers_mut(), &headers);
                    Ok::<_, S::Error>(response)
                })
            }
        }
    }
}

fn request_context<B>(request: &Request<B>) -> RequestContext<'_> {
    let headers = request.headers();

    RequestContext {
        method: request.method().as_str(),
        origin: header_value(headers, header::ORIGIN),
        access_control_request_method: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ),
        access_control_request_headers: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_HEADERS,
        ),
        access_control_request_private_network: header_value(
            headers,
            header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK,
        ),
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

fn preflight_response<B: Default>(status: u16, headers: &Headers) -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::from_u16(status).unwrap_or(StatusCode::NO_CONTENT);
    apply_headers(response.headers_mut(), headers);
    response
}

/// Sets each header, replacing any value the downstream service wrote.
fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        if let (Ok(header_name), Ok(header_value)) = (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            map.insert(header_name, header_value);
        }
    }
}

fn log_decision<B>(logger: &Logger, request: &Request<B>, decision: &CorsDecision) {
    logger.in_scope(|| {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            kind = decision.kind(),
            terminate = decision.terminate(),
            headers = ?decision.headers(),
            "evaluated CORS request"
        );
    });
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
