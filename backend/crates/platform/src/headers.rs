//! Request header helpers
//!
//! Credential extraction from the `Authorization` header.

use axum::http::{HeaderMap, header};

/// Extract the credential from `Authorization: Bearer <credential>`.
///
/// The scheme is matched case-insensitively. Any other scheme, or an empty
/// credential, yields `None`.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, credential) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let credential = credential.trim();
    (!credential.is_empty()).then(|| credential.to_string())
}
