// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signature engine — HMAC-SHA256 over document identifiers.
//
// Signatures are never persisted; verification recomputes the expected
// value from the shared secret and compares in constant time. The signed
// token format `<payload>|hmac=<hex>` lets a verification link carry its
// own tamper-evident signature.

use ring::{constant_time, hmac};
use tracing::debug;

/// Marker separating the payload from its signature in a signed token.
const TOKEN_MARKER: &str = "|hmac=";

/// Sign `doc_id` with the shared secret: HMAC-SHA256, lowercase hex.
///
/// Both the secret and the identifier are taken as UTF-8 bytes.
pub fn sign(doc_id: &str, secret: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, doc_id.as_bytes());
    hex::encode(tag.as_ref())
}

/// Verify a provided signature against the one derived from `doc_id` and
/// the shared secret.
///
/// The expected signature is always computed before any comparison, and the
/// comparison itself is constant-time, so neither an absent/empty value nor
/// an early mismatch changes the timing profile. Hex case is ignored.
pub fn verify(doc_id: &str, provided: &str, secret: &str) -> bool {
    let expected = sign(doc_id, secret);
    let provided = provided.trim().to_ascii_lowercase();
    constant_time::verify_slices_are_equal(expected.as_bytes(), provided.as_bytes()).is_ok()
}

/// Build a signed token `<payload>|hmac=<hex>` for the given payload.
pub fn build_signed_token(payload: &str, secret: &str) -> String {
    format!("{payload}{TOKEN_MARKER}{}", sign(payload, secret))
}

/// Split a signed token into `(payload, signature_hex)`.
///
/// The split happens at the LAST marker occurrence, so payloads containing
/// the marker text still parse the way they were built. Returns `None` when
/// no marker is present.
pub fn parse_signed_token(token: &str) -> Option<(&str, &str)> {
    let idx = token.rfind(TOKEN_MARKER)?;
    let payload = &token[..idx];
    let sig = token[idx + TOKEN_MARKER.len()..].trim();
    Some((payload, sig))
}

/// Parse and verify a signed token in one step.
///
/// A token without a marker is not a signature at all and yields `false`.
pub fn verify_token(token: &str, secret: &str) -> bool {
    match parse_signed_token(token) {
        Some((payload, sig)) => verify(payload, sig, secret),
        None => {
            debug!("token carries no signature marker");
            false
        }
    }
}
