//! CSRF token lookup in a cookie string.

use std::borrow::Cow;

/// Cookie that carries the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Request header the backend expects the token in.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Find cookie `name` in a `document.cookie`-style string (`a=1; b=2`).
///
/// The value is percent-decoded. Returns `None` when the cookie is absent.
pub fn read_cookie_token(cookies: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(percent_decode)
}

// Falls back to the raw text when the escapes don't form valid UTF-8.
fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}
