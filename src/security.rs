use subtle::ConstantTimeEq;

/// Constant-time string comparison to prevent timing attacks
/// Use this for comparing the admin API key
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Check a presented `Authorization` header against the configured key.
///
/// Always false when no key is configured.
pub fn is_authorized(configured: Option<&str>, header: Option<&str>) -> bool {
    match (configured, header.and_then(bearer_token)) {
        (Some(expected), Some(presented)) => constant_time_compare(expected, presented),
        _ => false,
    }
}
