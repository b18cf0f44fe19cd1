use crate::constants::WILDCARD;
use crate::util::{equals_ignore_case, escape_literal};
use regex_automata::meta::{BuildError, Regex};
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 4_096;
const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Origins a policy accepts.
#[derive(Clone, Debug, Default)]
pub enum Origin {
    #[default]
    Any,
    List(Vec<OriginMatcher>),
}

/// Outcome of matching a request origin against [`Origin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// Answer with the literal wildcard.
    Any,
    /// Echo the request origin back.
    Mirror,
    Disallow,
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern `{pattern}`")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

#[derive(Clone, Debug)]
pub enum OriginMatcher {
    /// A literal `*` entry. Never grants a credentialed request.
    Any,
    Exact(String),
    Pattern(Regex),
}

impl OriginMatcher {
    pub fn exact<S: Into<String>>(value: S) -> Self {
        Self::Exact(value.into())
    }

    /// Builds a matcher where each `*` stands for any run of characters,
    /// e.g. `https://*.example.com`.
    pub fn wildcard(pattern: &str) -> Result<Self, PatternError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let body = pattern
            .split(WILDCARD)
            .map(escape_literal)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^(?i:{body})$")).map_err(|err| PatternError::Build {
            pattern: pattern.to_string(),
            source: Box::new(err),
        })?;

        Ok(Self::Pattern(regex))
    }

    /// Parses one configured entry: entries containing `*` become patterns.
    pub fn parse(value: &str) -> Result<Self, PatternError> {
        let value = value.trim();
        if value == WILDCARD {
            Ok(Self::Any)
        } else if value.contains(WILDCARD) {
            Self::wildcard(value)
        } else {
            Ok(Self::exact(value))
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Any => true,
            OriginMatcher::Exact(value) => equals_ignore_case(value, candidate),
            OriginMatcher::Pattern(regex) => regex.is_match(candidate),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, OriginMatcher::Any)
    }
}

impl Origin {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// Builds the policy from configured strings. No entries, or only `*`
    /// entries, allow every origin. A `*` next to explicit entries is kept so
    /// credentialed requests still fall back to the explicit ones.
    pub fn from_patterns<I, S>(values: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matchers = Vec::new();
        for value in values {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            matchers.push(OriginMatcher::parse(value)?);
        }

        if matchers.iter().all(OriginMatcher::is_any) {
            Ok(Self::Any)
        } else {
            Ok(Self::List(matchers))
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Origin::Any)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Origin::List(matchers) if matchers.is_empty())
    }

    /// The wildcard only applies to requests without credentials; a
    /// credentialed request must match an explicit entry.
    pub fn resolve(&self, request_origin: &str, credentials: bool) -> OriginDecision {
        if request_origin.len() > MAX_ORIGIN_LENGTH {
            return OriginDecision::Disallow;
        }

        match self {
            Origin::Any if credentials => OriginDecision::Disallow,
            Origin::Any => OriginDecision::Any,
            Origin::List(matchers) => {
                if !credentials && matchers.iter().any(OriginMatcher::is_any) {
                    return OriginDecision::Any;
                }

                if matchers
                    .iter()
                    .filter(|matcher| !matcher.is_any())
                    .any(|matcher| matcher.matches(request_origin))
                {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::Exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::Exact(value.to_owned())
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
