#![allow(dead_code)]

use super::headers::{header_value, vary_values};
use bunner_cors_gateway::{CorsDecision, Headers};

pub fn assert_actual(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Actual(result) => result.headers,
        other => panic!("expected actual decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (Headers, u16, bool) {
    match decision {
        CorsDecision::Preflight(result) => (result.headers, result.status, result.terminate),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_not_applicable(decision: CorsDecision) {
    assert!(
        matches!(decision, CorsDecision::NotApplicable),
        "expected request to bypass CORS, got {:?}",
        decision
    );
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "header `{name}` mismatch in {headers:?}"
    );
}

pub fn assert_header_absent(headers: &Headers, name: &str) {
    assert!(
        header_value(headers, name).is_none(),
        "header `{name}` should be absent in {headers:?}"
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let expected: Vec<String> = expected
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect();
    assert_eq!(vary_values(headers), expected);
}
