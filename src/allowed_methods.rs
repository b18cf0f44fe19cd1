use crate::util::dedupe_trimmed;

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AllowedMethods {
    /// Nothing configured: echo the `Access-Control-Request-Method` value.
    #[default]
    MirrorRequest,
    /// Advertise this list on every preflight. Case is preserved.
    List(Vec<String>),
}

impl AllowedMethods {
    /// An empty list falls back to [`AllowedMethods::MirrorRequest`].
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

    pub fn header_value(&self, requested_method: Option<&str>) -> Option<String> {
        match self {
            AllowedMethods::List(values) if values.is_empty() => None,
            AllowedMethods::List(values) => Some(values.join(", ")),
            AllowedMethods::MirrorRequest => requested_method
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
