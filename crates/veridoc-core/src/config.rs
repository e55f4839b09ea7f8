// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verifier configuration.
//
// Constructed once at startup and passed by reference into the signature
// engine and the registry, so tests can inject secrets and paths instead of
// reading ambient environment state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Persistent verifier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Shared secret for HMAC-signed verification links. Must be non-empty
    /// for signed-link verification to be meaningful.
    pub hmac_secret: String,
    /// Location of the JSON registry file.
    pub registry_path: PathBuf,
    /// Staging directory for uploaded candidate files.
    pub upload_dir: PathBuf,
    /// File extensions accepted for upload verification (lowercase, no dot).
    pub allowed_extensions: Vec<String>,
    /// Maximum accepted upload size in bytes.
    pub max_upload_bytes: u64,
    /// When true, a digest match against a revoked record reports
    /// `Revoked` instead of `Exact`. Defaults to false for compatibility
    /// with registries whose revocation field was informational only.
    #[serde(default)]
    pub enforce_revocation: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            hmac_secret: String::new(),
            registry_path: PathBuf::from("db.json"),
            upload_dir: PathBuf::from("uploads"),
            allowed_extensions: vec![
                "pdf".to_owned(),
                "png".to_owned(),
                "jpg".to_owned(),
                "jpeg".to_owned(),
            ],
            max_upload_bytes: 25 * 1024 * 1024,
            enforce_revocation: false,
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Persist configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Whether `extension` (case-insensitive, without the dot) is accepted
    /// for upload verification.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let ext = extension.to_ascii_lowercase();
        self.allowed_extensions.iter().any(|e| e == &ext)
    }
}
