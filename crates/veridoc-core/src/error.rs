// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Veridoc.
//
// Domain outcomes (record not found, rejected upload, digest mismatch) are
// values of the verify layer's `Outcome` enum, not errors — only genuine
// faults live here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Veridoc operations.
#[derive(Debug, Error)]
pub enum VeridocError {
    // -- Registration --
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("upload exceeds the configured size limit: {size} > {limit} bytes")]
    UploadTooLarge { size: u64, limit: u64 },

    // -- Storage / persistence --
    /// The registry file exists but could not be parsed. Unlike a missing
    /// file (which yields an empty registry), corruption is surfaced as a
    /// fatal error rather than silently replaced with empty data.
    #[error("registry file is corrupt: {path}: {source}")]
    CorruptRegistry {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Configuration --
    #[error("configuration error: {0}")]
    Config(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VeridocError>;
