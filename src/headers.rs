use crate::constants::header;
use indexmap::IndexMap;

/// Response headers in emission order. A missing key means "do not set".
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_estimate(8)
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    pub(crate) fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value);
        } else {
            self.headers.insert(name, value.into());
        }
    }

    /// Appends a token to `Vary`, keeping order and skipping case-insensitive repeats.
    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let incoming = value.into();
        let incoming = incoming.trim();
        if incoming.is_empty() {
            return;
        }

        match self.headers.get_mut(header::VARY) {
            Some(existing) => {
                let seen = existing
                    .split(',')
                    .map(str::trim)
                    .any(|entry| entry.eq_ignore_ascii_case(incoming));
                if !seen {
                    existing.push_str(", ");
                    existing.push_str(incoming);
                }
            }
            None => {
                self.headers
                    .insert(header::VARY.to_string(), incoming.to_string());
            }
        }
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.push(name, value);
        }
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
