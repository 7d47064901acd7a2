//! GitHub webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw body and sends the
//! digest in `x-hub-signature-256` as `sha256=<hex>`.
//! Reference: https://docs.github.com/en/webhooks/using-webhooks/validating-webhook-deliveries

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use super::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

/// Verify a GitHub webhook signature.
///
/// # Arguments
///
/// * `signature_header` - The `x-hub-signature-256` header value
/// * `payload` - The raw request body, exactly as received
/// * `secret` - The webhook secret shared with GitHub
///
/// Every failure collapses into the same [`AuthError`]; the reason is only
/// logged. An empty secret always fails.
pub fn verify(signature_header: &str, payload: &[u8], secret: &[u8]) -> Result<(), AuthError> {
    if signature_header.is_empty() || secret.is_empty() {
        warn!(
            has_signature = !signature_header.is_empty(),
            has_secret = !secret.is_empty(),
            "signature_missing_fields"
        );
        return Err(AuthError);
    }

    let expected = match signature_header
        .strip_prefix(SIGNATURE_PREFIX)
        .and_then(|hex_sig| hex::decode(hex_sig).ok())
    {
        Some(sig) => sig,
        None => {
            warn!(header_length = signature_header.len(), "signature_malformed_header");
            return Err(AuthError);
        }
    };

    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| AuthError)?;
    mac.update(payload);

    // verify_slice compares in constant time
    mac.verify_slice(&expected).map_err(|_| {
        warn!(payload_length = payload.len(), "signature_mismatch");
        AuthError
    })
}

/// Compute the `sha256=<hex>` header value for a payload.
#[cfg(test)]
pub(crate) fn sign(payload: &[u8], secret: &[u8]) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    format!("{}{}", SIGNATURE_PREFIX, hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time string comparison to prevent timing attacks.
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
