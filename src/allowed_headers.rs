use crate::util::{dedupe_trimmed, equals_ignore_case};

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum AllowedHeaders {
    /// Echo the `Access-Control-Request-Headers` value exactly as received.
    #[default]
    MirrorRequest,
    List(Vec<String>),
}

impl AllowedHeaders {
    /// An empty list falls back to [`AllowedHeaders::MirrorRequest`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deduped = dedupe_trimmed(values);
        if deduped.is_empty() {
            Self::MirrorRequest
        } else {
            Self::List(deduped)
        }
    }

    pub fn mirror_request() -> Self {
        Self::MirrorRequest
    }

    /// A request whose headers are all covered by the list is answered with
    /// its own value; anything else gets the configured list.
    pub fn header_value(&self, requested_headers: Option<&str>) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => match requested_headers {
                Some(requested) if Self::covers(values, requested) => Some(requested.to_string()),
                _ => Some(values.join(", ")),
            },
            Self::MirrorRequest => requested_headers
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
        }
    }

    fn covers(allowed: &[String], requested: &str) -> bool {
        let mut names = requested
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .peekable();
        if names.peek().is_none() {
            return false;
        }
        names.all(|name| allowed.iter().any(|entry| equals_ignore_case(entry, name)))
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
