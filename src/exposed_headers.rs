use crate::util::dedupe_trimmed;
use std::ops::Deref;

/// Header names listed in `Access-Control-Expose-Headers` on actual requests.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExposedHeaders {
    values: Vec<String>,
}

impl ExposedHeaders {
    /// Trims entries, drops blanks and removes case-insensitive duplicates.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: dedupe_trimmed(values),
        }
    }

    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(", "))
        }
    }
}

impl Deref for ExposedHeaders {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
