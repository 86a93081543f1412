//! HTTP Basic credentials

use base64::{engine::general_purpose::STANDARD, Engine};

/// Build the `Authorization` header value for the given credentials.
///
/// A missing password is encoded as an empty one.
pub fn basic_authorization(username: &str, password: Option<&str>) -> String {
    let credentials = format!("{}:{}", username, password.unwrap_or_default());
    format!("Basic {}", STANDARD.encode(credentials.as_bytes()))
}
