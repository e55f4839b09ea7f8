// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Veridoc verifier.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix for digest-derived document identifiers.
pub const DOC_ID_PREFIX: &str = "demo-";

/// Number of leading hex digits of the digest used in the identifier.
pub const DOC_ID_DIGEST_LEN: usize = 8;

/// Derive the canonical document identifier from a content digest.
///
/// Identity is deterministic: registering the same bytes twice yields the
/// same identifier, so duplicate registrations collide intentionally.
pub fn doc_id_for_digest(sha256_hex: &str) -> String {
    let short = &sha256_hex[..DOC_ID_DIGEST_LEN.min(sha256_hex.len())];
    format!("{DOC_ID_PREFIX}{}", short.to_ascii_lowercase())
}

/// A registered document and its verification metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique key within the registry; stable once issued.
    pub doc_id: String,
    /// Lowercase hex SHA-256 of the document bytes, captured at
    /// registration. Immutable after creation.
    pub sha256: String,
    /// When the record was created (UTC).
    pub issued_at: DateTime<Utc>,
    /// Set at most once, never cleared. `None` means active.
    #[serde(default)]
    pub revoked_at: Option<DateTime<Utc>>,
    /// Free-text label; the only field meant to be edited after issuance.
    /// Not part of any integrity guarantee.
    pub title: String,
    /// Page count recorded at registration. Informational only — never part
    /// of the trust decision.
    #[serde(default = "default_pages")]
    pub pages: u32,
    /// Best-effort counter of verification-page views. Not transactionally
    /// safe (see the registry's load-mutate-save model).
    #[serde(default)]
    pub scans: u64,
}

fn default_pages() -> u32 {
    1
}

impl DocumentRecord {
    /// Create a fresh record for a newly registered document.
    pub fn new(sha256: String, title: String, pages: u32) -> Self {
        Self {
            doc_id: doc_id_for_digest(&sha256),
            sha256,
            issued_at: Utc::now(),
            revoked_at: None,
            title,
            pages,
            scans: 0,
        }
    }

    /// Whether the record has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// The party that issues and vouches for registered documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Default for Issuer {
    fn default() -> Self {
        Self {
            name: "Demo Issuer, Ltd.".to_owned(),
            created_at: Utc::now(),
        }
    }
}

/// The complete persisted state: one issuer descriptor plus all registered
/// documents, keyed by `doc_id`.
///
/// A `BTreeMap` keeps JSON output deterministic across save cycles. Unknown
/// or missing optional fields in older files deserialize to their defaults
/// rather than failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryData {
    pub issuer: Issuer,
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentRecord>,
}

impl Default for RegistryData {
    fn default() -> Self {
        Self {
            issuer: Issuer::default(),
            documents: BTreeMap::new(),
        }
    }
}
