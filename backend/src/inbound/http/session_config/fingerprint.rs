//! Short, non-secret identifier for the active session key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// Hex of the first eight bytes of `SHA-256(signing key)`.
///
/// Logged at start-up so operators can confirm which key a replica loaded.
///
/// ```
/// use actix_web::cookie::Key;
/// use hiring_backend::inbound::http::session_config::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}
