pub(crate) fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        value.to_ascii_lowercase()
    } else {
        value.to_lowercase()
    }
}

#[doc(hidden)]
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }

    normalize_lower(a) == normalize_lower(b)
}

/// Trims every entry, drops blanks and removes case-insensitive duplicates
/// while keeping the first spelling seen.
pub(crate) fn dedupe_trimmed<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut deduped: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if deduped
            .iter()
            .any(|existing| equals_ignore_case(existing, &trimmed))
        {
            continue;
        }
        deduped.push(trimmed);
    }
    deduped
}

/// Escapes regex metacharacters so `value` matches itself literally.
pub(crate) fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        if matches!(
            ch,
            '\\' | '.'
                | '+'
                | '*'
                | '?'
                | '('
                | ')'
                | '|'
                | '['
                | ']'
                | '{'
                | '}'
                | '^'
                | '$'
                | '#'
                | '&'
                | '-'
                | '~'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
