// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verifier service — the facade the front end drives.
//
// Constructed once from an explicit `VerifierConfig` and owning the registry
// binding, so that secrets and paths are injected rather than read from the
// environment at arbitrary points.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use veridoc_core::config::VerifierConfig;
use veridoc_core::error::{Result, VeridocError};
use veridoc_core::types::DocumentRecord;
use veridoc_crypto::{build_signed_token, sha256_file, sign, verify};
use veridoc_registry::Registry;

use crate::decision::{Decision, Upload, decide};

/// Result of a signed-link check: whether the provided signature was valid,
/// plus the expected signature for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkVerification {
    pub valid: bool,
    pub expected_signature: String,
}

/// The document verifier: registry plus crypto engines behind the call
/// shapes the front end needs.
pub struct Verifier {
    config: VerifierConfig,
    registry: Registry,
}

impl Verifier {
    /// Build a verifier from explicit configuration.
    pub fn new(config: VerifierConfig) -> Self {
        let registry = Registry::open(&config.registry_path);
        Self { config, registry }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Register the file at `path`.
    ///
    /// The content is digested in place; a missing path is fatal for the
    /// registration flow and surfaces as `FileNotFound`. When no title is
    /// given the filename stands in, matching how issuers label one-off
    /// registrations.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn register_file(&self, path: impl AsRef<Path>, title: Option<&str>) -> Result<DocumentRecord> {
        let path = path.as_ref();
        let sha256 = sha256_file(path)?;

        let title = title
            .map(str::to_owned)
            .or_else(|| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| "Registered Document".to_owned());

        let record = self.registry.register(&sha256, &title, 1)?;
        info!(doc_id = %record.doc_id, "registration complete");
        Ok(record)
    }

    /// Look up a record for display, incrementing its scan counter.
    ///
    /// `None` is the normal "not found" outcome, never an error.
    pub fn view(&self, doc_id: &str) -> Result<Option<DocumentRecord>> {
        self.registry.record_scan(doc_id)
    }

    /// Look up a record without the view side effect.
    pub fn lookup(&self, doc_id: &str) -> Result<Option<DocumentRecord>> {
        self.registry.lookup(doc_id)
    }

    /// All registered records, for the index view.
    pub fn list(&self) -> Result<Vec<DocumentRecord>> {
        self.registry.list()
    }

    /// Revoke a registered document.
    pub fn revoke(&self, doc_id: &str) -> Result<bool> {
        self.registry.revoke(doc_id)
    }

    /// Replace a record's title.
    pub fn retitle(&self, doc_id: &str, title: &str) -> Result<bool> {
        self.registry.retitle(doc_id, title)
    }

    /// Check an HMAC-signed link for `doc_id`.
    ///
    /// Stateless and recomputable: no record of issued signatures exists, so
    /// this does not touch the registry and works even for identifiers that
    /// were never registered.
    pub fn verify_link(&self, doc_id: &str, signature: &str) -> LinkVerification {
        let valid = verify(doc_id, signature, &self.config.hmac_secret);
        if !valid {
            warn!(doc_id, "signed-link verification failed");
        }
        LinkVerification {
            valid,
            expected_signature: sign(doc_id, &self.config.hmac_secret),
        }
    }

    /// The signature a signed link for `doc_id` must carry.
    pub fn link_signature(&self, doc_id: &str) -> String {
        sign(doc_id, &self.config.hmac_secret)
    }

    /// Emit the signed token `<doc_id>|hmac=<sig>` for embedding in a
    /// pre-addressed verification link.
    pub fn signed_link(&self, doc_id: &str) -> String {
        build_signed_token(doc_id, &self.config.hmac_secret)
    }

    /// Verify uploaded bytes against the record for `doc_id`.
    ///
    /// Enforces the configured upload size ceiling before any digest work;
    /// everything past that gate is the pure decision of `decision::decide`.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub fn verify_upload(&self, doc_id: &str, filename: &str, bytes: &[u8]) -> Result<Decision> {
        let size = bytes.len() as u64;
        if size > self.config.max_upload_bytes {
            return Err(VeridocError::UploadTooLarge {
                size,
                limit: self.config.max_upload_bytes,
            });
        }

        let record = self.registry.lookup(doc_id)?;
        let upload = Upload { filename, bytes };
        let decision = decide(Some(&upload), record.as_ref(), &self.config);
        info!(outcome = %decision.outcome, "upload verified");
        Ok(decision)
    }

    /// Variant of `verify_upload` for a request that carried no file at all.
    pub fn verify_missing_upload(&self, doc_id: &str) -> Result<Decision> {
        let record = self.registry.lookup(doc_id)?;
        Ok(decide(None, record.as_ref(), &self.config))
    }

    /// Stage an uploaded candidate in the configured upload directory and
    /// return its staged path.
    ///
    /// Only the final filename component is honoured, so an uploader-chosen
    /// name cannot escape the staging directory.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub fn stage_upload(&self, filename: &str, bytes: &[u8]) -> Result<std::path::PathBuf> {
        std::fs::create_dir_all(&self.config.upload_dir)?;
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| VeridocError::Config(format!("unusable upload filename: {filename}")))?;
        let staged = self.config.upload_dir.join(name);
        std::fs::write(&staged, bytes)?;
        Ok(staged)
    }
}
