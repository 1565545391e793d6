//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Stable, non-reversible handle for a bearer secret.
///
/// Used wherever a credential has to act as a lookup key or appear in logs.
pub fn credential_fingerprint(secret: &str) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(sha256(secret.as_bytes()))
}
