//! Small helpers for auth input normalization and request metadata.

use axum::http::{HeaderMap, header::AUTHORIZATION};

/// Normalize an email for lookup/uniqueness checks.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalize a phone number for lookup: keep the leading `+` and the
/// digits, drop separators.
pub(super) fn normalize_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Extract the bearer token from the `Authorization` header.
///
/// Returns `None` when the header is missing, the scheme is not
/// `Bearer`, or the token part is empty.
pub(super) fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let token = value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("bearer "))?
                .trim();
            (!token.is_empty()).then_some(token)
        })
}

/// Extract a client IP for login audit records from common proxy headers.
pub(super) fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if forwarded.is_some() {
        return forwarded.map(str::to_string);
    }
    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Seconds since the Unix epoch.
pub(super) fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|duration| {
            #[allow(clippy::cast_possible_wrap)]
            {
                duration.as_secs() as i64
            }
        })
        .unwrap_or_default()
}
