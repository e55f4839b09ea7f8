// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JSON-backed document registry.
//
// Every operation is a full load-mutate-save cycle over one JSON file, with
// no locking and no optimistic-concurrency check: two simultaneous writers
// (e.g. a scan-count increment racing a registration) can lose an update —
// last writer wins, whole-file overwrite. That matches the single-process,
// low-traffic deployment this store is built for.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, instrument};

use veridoc_core::error::{Result, VeridocError};
use veridoc_core::types::{DocumentRecord, RegistryData};

/// The document registry, bound to its storage path.
///
/// Holds no cached state: each call re-reads the file so that edits made
/// outside the process are reflected immediately.
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    /// Bind a registry to the given JSON file path. The file is not touched
    /// until the first load or save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The storage path this registry reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted registry.
    ///
    /// A missing file is the expected "no data yet" case and yields an empty
    /// registry with a default issuer. A file that exists but fails to parse
    /// is real corruption and surfaces as `CorruptRegistry` — it is never
    /// silently replaced with empty data.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<RegistryData> {
        if !self.path.exists() {
            debug!("registry file absent, starting empty");
            return Ok(RegistryData::default());
        }
        let text = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&text).map_err(|source| VeridocError::CorruptRegistry {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the complete registry back as pretty-printed JSON.
    ///
    /// Whole-file overwrite; atomic replacement is not guaranteed.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, data: &RegistryData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, json)?;
        debug!(documents = data.documents.len(), "registry saved");
        Ok(())
    }

    /// Register a document by its content digest.
    ///
    /// The identifier is derived from the digest, so registering identical
    /// content twice overwrites the same slot — an intentional idempotent
    /// identity, not a conflict. Returns the stored record.
    #[instrument(skip(self, title), fields(digest = %sha256))]
    pub fn register(&self, sha256: &str, title: &str, pages: u32) -> Result<DocumentRecord> {
        let sha256 = sha256.to_ascii_lowercase();
        let record = DocumentRecord::new(sha256, title.to_owned(), pages);

        let mut data = self.load()?;
        data.documents.insert(record.doc_id.clone(), record.clone());
        self.save(&data)?;

        info!(doc_id = %record.doc_id, "document registered");
        Ok(record)
    }

    /// Look up a record by identifier. A missing key is a value, not an
    /// error — "not found" is a normal, user-facing outcome on the
    /// verification path.
    pub fn lookup(&self, doc_id: &str) -> Result<Option<DocumentRecord>> {
        Ok(self.load()?.documents.get(doc_id).cloned())
    }

    /// Look up a record and bump its scan counter.
    ///
    /// This is the implicit side effect of viewing a record's verification
    /// page. Best-effort: the increment is a non-atomic load-mutate-save.
    #[instrument(skip(self))]
    pub fn record_scan(&self, doc_id: &str) -> Result<Option<DocumentRecord>> {
        let mut data = self.load()?;
        let Some(record) = data.documents.get_mut(doc_id) else {
            return Ok(None);
        };
        record.scans += 1;
        let snapshot = record.clone();
        self.save(&data)?;
        debug!(doc_id, scans = snapshot.scans, "scan recorded");
        Ok(Some(snapshot))
    }

    /// Revoke a document. `revoked_at` is set at most once and never
    /// cleared; returns false when the record does not exist or is already
    /// revoked.
    #[instrument(skip(self))]
    pub fn revoke(&self, doc_id: &str) -> Result<bool> {
        let mut data = self.load()?;
        let Some(record) = data.documents.get_mut(doc_id) else {
            return Ok(false);
        };
        if record.revoked_at.is_some() {
            return Ok(false);
        }
        record.revoked_at = Some(Utc::now());
        self.save(&data)?;
        info!(doc_id, "document revoked");
        Ok(true)
    }

    /// Replace a record's title — the one mutable label on a record.
    /// Returns false when the record does not exist.
    pub fn retitle(&self, doc_id: &str, title: &str) -> Result<bool> {
        let mut data = self.load()?;
        let Some(record) = data.documents.get_mut(doc_id) else {
            return Ok(false);
        };
        record.title = title.to_owned();
        self.save(&data)?;
        Ok(true)
    }

    /// All records, in identifier order.
    pub fn list(&self) -> Result<Vec<DocumentRecord>> {
        Ok(self.load()?.documents.into_values().collect())
    }
}
