use crate::headers::Headers;

/// Headers and control flow for a preflight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResult {
    pub headers: Headers,
    /// Status written when the preflight is answered without calling downstream.
    pub status: u16,
    /// `false` when the policy passes preflights through to the downstream handler.
    pub terminate: bool,
}

/// Headers added to the downstream response of an actual cross-origin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualResult {
    pub headers: Headers,
}

/// Overall decision returned by the policy engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    Preflight(PreflightResult),
    Actual(ActualResult),
    /// No `Origin` header; the request is forwarded untouched.
    NotApplicable,
}

impl CorsDecision {
    pub fn is_cors(&self) -> bool {
        !matches!(self, CorsDecision::NotApplicable)
    }

    pub fn is_preflight(&self) -> bool {
        matches!(self, CorsDecision::Preflight(_))
    }

    pub fn headers(&self) -> Option<&Headers> {
        match self {
            CorsDecision::Preflight(result) => Some(&result.headers),
            CorsDecision::Actual(result) => Some(&result.headers),
            CorsDecision::NotApplicable => None,
        }
    }

    pub fn terminate(&self) -> bool {
        matches!(self, CorsDecision::Preflight(result) if result.terminate)
    }

    /// Only present when the exchange is answered without calling downstream.
    pub fn status(&self) -> Option<u16> {
        match self {
            CorsDecision::Preflight(result) if result.terminate => Some(result.status),
            _ => None,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            CorsDecision::Preflight(_) => "preflight",
            CorsDecision::Actual(_) => "actual",
            CorsDecision::NotApplicable => "not_cors",
        }
    }
}
