use once_cell::sync::Lazy;
use regex_automata::meta::Regex;
use std::time::Duration;
use thiserror::Error;

// Longest units first so `ms` wins over `m`.
static SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<number>[0-9]*(?:\.[0-9]*)?)(?P<unit>ns|us|µs|μs|ms|s|m|h)")
        .expect("duration segment pattern is valid")
});

const MAX_FRACTION_DIGITS: usize = 18;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("invalid duration `{0}`")]
    Invalid(String),
    #[error("negative duration `{0}`")]
    Negative(String),
    #[error("duration `{0}` overflows")]
    Overflow(String),
}

/// Parses durations written like `2h`, `1h30m`, `1.5s` or `300ms`.
///
/// A bare `0` is accepted without a unit. Units: `ns`, `us` (`µs`, `μs`),
/// `ms`, `s`, `m`, `h`.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Empty);
    }

    if let Some(rest) = trimmed.strip_prefix('-') {
        return match parse_unsigned(rest, trimmed)? {
            Duration::ZERO => Ok(Duration::ZERO),
            _ => Err(DurationError::Negative(trimmed.to_string())),
        };
    }

    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    parse_unsigned(unsigned, trimmed)
}

fn parse_unsigned(value: &str, original: &str) -> Result<Duration, DurationError> {
    if value == "0" {
        return Ok(Duration::ZERO);
    }
    if value.is_empty() {
        return Err(DurationError::Invalid(original.to_string()));
    }

    let mut cursor = 0;
    let mut total: u128 = 0;
    for caps in SEGMENT.captures_iter(value) {
        let Some(segment) = caps.get_match() else {
            continue;
        };
        if segment.start() != cursor {
            return Err(DurationError::Invalid(original.to_string()));
        }

        let number = caps
            .get_group_by_name("number")
            .map(|span| &value[span.range()])
            .unwrap_or_default();
        let unit = caps
            .get_group_by_name("unit")
            .map(|span| &value[span.range()])
            .unwrap_or_default();

        let nanos = segment_nanos(number, unit, original)?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow(original.to_string()))?;
        cursor = segment.end();
    }

    if cursor != value.len() {
        return Err(DurationError::Invalid(original.to_string()));
    }

    let nanos =
        u64::try_from(total).map_err(|_| DurationError::Overflow(original.to_string()))?;
    Ok(Duration::from_nanos(nanos))
}

fn segment_nanos(number: &str, unit: &str, original: &str) -> Result<u128, DurationError> {
    let invalid = || DurationError::Invalid(original.to_string());
    let overflow = || DurationError::Overflow(original.to_string());

    let scale = unit_nanos(unit).ok_or_else(invalid)?;
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }

    let whole = if whole.is_empty() {
        0
    } else {
        whole.parse::<u128>().map_err(|_| overflow())?
    };
    let mut nanos = whole.checked_mul(scale).ok_or_else(overflow)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let digits = fraction.parse::<u128>().map_err(|_| invalid())?;
        let divisor = 10u128.pow(fraction.len() as u32);
        nanos = nanos
            .checked_add(digits * scale / divisor)
            .ok_or_else(overflow)?;
    }

    Ok(nanos)
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

#[cfg(test)]
#[path = "duration_test.rs"]
mod duration_test;
