//! Webhook signature validation.
//!
//! The messaging platform signs every webhook delivery with
//! base64(HMAC-SHA256(channel secret, raw body)) in the
//! `X-Line-Signature` header. Validation recomputes the tag over the
//! exact raw bytes and compares in constant time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use ring::hmac;

/// Computes the signature for a body, base64-encoded.
pub fn sign(channel_secret: &str, body: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, channel_secret.as_bytes());
    BASE64.encode(hmac::sign(&key, body).as_ref())
}

/// Verifies a delivery signature against the raw request body.
///
/// Returns false for tampered bodies, wrong secrets, and signatures that
/// are not valid base64.
pub fn validate_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let tag = match BASE64.decode(signature) {
        Ok(tag) => tag,
        Err(_) => return false,
    };

    let key = hmac::Key::new(hmac::HMAC_SHA256, channel_secret.as_bytes());
    hmac::verify(&key, body, &tag).is_ok()
}
