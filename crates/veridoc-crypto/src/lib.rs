// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// veridoc-crypto — Content digests and HMAC link signatures.
//
// Two stateless engines: SHA-256 digests of byte streams (the content
// fingerprint every trust decision rests on) and HMAC-SHA256 signatures
// over document identifiers (tamper-evident verification links).

pub mod digest;
pub mod signature;

pub use digest::{sha256_bytes, sha256_file, sha256_reader};
pub use signature::{build_signed_token, parse_signed_token, sign, verify, verify_token};
