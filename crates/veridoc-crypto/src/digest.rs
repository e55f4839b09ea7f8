// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digest engine — chunked SHA-256 content fingerprints.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use veridoc_core::error::{Result, VeridocError};

/// Read chunk size. Keeps memory use independent of input size.
const CHUNK_SIZE: usize = 8 * 1024;

/// Compute the SHA-256 digest of everything `reader` yields, as a lowercase
/// hex string.
///
/// The stream is consumed in 8 KiB chunks; the reader's lifecycle stays with
/// the caller. Identical bytes always produce the identical digest — there
/// is no salt and no metadata input.
pub fn sha256_reader(reader: &mut impl Read) -> std::io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Digest an in-memory buffer (e.g. an upload already read into memory).
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Digest a file on disk.
///
/// The handle is opened, fully consumed, and released before this returns.
/// A missing path maps to `VeridocError::FileNotFound`; other I/O faults
/// propagate with their cause preserved.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VeridocError::FileNotFound(path.to_path_buf())
        } else {
            VeridocError::Io(e)
        }
    })?;
    let hex = sha256_reader(&mut file)?;
    debug!(digest = %hex, "file digested");
    Ok(hex)
}
