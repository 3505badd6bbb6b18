#[doc(hidden)]
pub fn normalize_lower(value: &str) -> String {
    if value.is_ascii() {
        let mut owned = value.to_owned();
        owned.make_ascii_lowercase();
        owned
    } else {
        value.to_lowercase()
    }
}

/// Lower-cases an origin and strips any trailing `/`, so that
/// `HTTPS://Api.Example.com/` and `https://api.example.com` compare equal.
pub fn normalize_origin(origin: &str) -> String {
    let trimmed = origin.trim().trim_end_matches('/');
    normalize_lower(trimmed)
}

/// Canonical MIME-style header casing: `x-request-id` becomes `X-Request-Id`.
pub fn canonical_header_key(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.trim().chars() {
        if upper_next {
            canonical.extend(ch.to_uppercase());
        } else {
            canonical.extend(ch.to_lowercase());
        }
        upper_next = ch == '-';
    }
    canonical
}

pub(crate) fn is_http_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| {
            matches!(
                byte,
                b'0'..=b'9'
                    | b'A'..=b'Z'
                    | b'a'..=b'z'
                    | b'!'
                    | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'.'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'|'
                    | b'~'
            )
        })
}

/// Trims, transforms and de-duplicates a configured list while keeping the
/// first occurrence of each value.
pub(crate) fn dedupe_with<I, S, F>(values: I, transform: F) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut deduped: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let transformed = transform(trimmed);
        if !deduped.contains(&transformed) {
            deduped.push(transformed);
        }
    }
    deduped
}

#[cfg(test)]
#[path = "util_test.rs"]
mod util_test;
