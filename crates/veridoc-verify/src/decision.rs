// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Verification decision — combines a freshly computed digest with a looked-up
// record to produce one of a small set of mutually exclusive outcomes.
//
// The decision is purely over content digest: filename, declared MIME type,
// and page count never participate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use veridoc_core::config::VerifierConfig;
use veridoc_core::types::DocumentRecord;
use veridoc_crypto::sha256_bytes;

/// An uploaded candidate file, as received from the front end.
#[derive(Debug, Clone, Copy)]
pub struct Upload<'a> {
    /// The filename the uploader declared. Used only for the extension
    /// gate, never for the trust decision.
    pub filename: &'a str,
    pub bytes: &'a [u8],
}

impl Upload<'_> {
    /// The lowercase extension of the declared filename, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }
}

/// Mutually exclusive verification outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum Outcome {
    /// No record exists for the given identifier.
    NotFound,
    /// The request carried no file, or the file's extension is not in the
    /// accepted set. No digest was computed.
    InvalidUpload { extension: Option<String> },
    /// Uploaded digest equals the registered digest.
    Exact,
    /// A digest was computed but differs from the registered one.
    Mismatch,
    /// The digests match but the record is revoked and revocation
    /// enforcement is enabled.
    Revoked,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::NotFound => "not_found",
            Self::InvalidUpload { .. } => "invalid_upload",
            Self::Exact => "exact",
            Self::Mismatch => "mismatch",
            Self::Revoked => "revoked",
        };
        write!(f, "{label}")
    }
}

/// A decision plus the uploaded file's own digest, for display alongside the
/// outcome. The digest is present exactly when one was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(flatten)]
    pub outcome: Outcome,
    pub uploaded_sha256: Option<String>,
}

impl Decision {
    fn without_digest(outcome: Outcome) -> Self {
        Self {
            outcome,
            uploaded_sha256: None,
        }
    }
}

/// Decide the verification outcome for `upload` against `record`.
///
/// Outcome precedence: a missing record wins over everything (no digest is
/// computed for an identifier nobody registered); a missing or rejected
/// upload comes next; only then is the content digested and compared,
/// case-insensitively, against the stored hex.
pub fn decide(
    upload: Option<&Upload<'_>>,
    record: Option<&DocumentRecord>,
    config: &VerifierConfig,
) -> Decision {
    let Some(record) = record else {
        return Decision::without_digest(Outcome::NotFound);
    };

    let Some(upload) = upload else {
        return Decision::without_digest(Outcome::InvalidUpload { extension: None });
    };

    let extension = upload.extension();
    let accepted = extension
        .as_deref()
        .is_some_and(|ext| config.accepts_extension(ext));
    if !accepted {
        return Decision::without_digest(Outcome::InvalidUpload { extension });
    }

    let uploaded_sha256 = sha256_bytes(upload.bytes);
    let matches = uploaded_sha256.eq_ignore_ascii_case(&record.sha256);

    let outcome = if !matches {
        Outcome::Mismatch
    } else if config.enforce_revocation && record.is_revoked() {
        Outcome::Revoked
    } else {
        Outcome::Exact
    };

    Decision {
        outcome,
        uploaded_sha256: Some(uploaded_sha256),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use veridoc_core::types::DocumentRecord;

    use super::*;

    fn record_for(bytes: &[u8]) -> DocumentRecord {
        DocumentRecord::new(sha256_bytes(bytes), "Test".into(), 1)
    }

    fn config() -> VerifierConfig {
        VerifierConfig::default()
    }

    #[test]
    fn missing_record_is_not_found() {
        let upload = Upload {
            filename: "doc.pdf",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), None, &config());
        assert_eq!(d.outcome, Outcome::NotFound);
        assert!(d.uploaded_sha256.is_none());
    }

    #[test]
    fn missing_upload_is_invalid() {
        let record = record_for(b"hello");
        let d = decide(None, Some(&record), &config());
        assert_eq!(d.outcome, Outcome::InvalidUpload { extension: None });
        assert!(d.uploaded_sha256.is_none());
    }

    #[test]
    fn rejected_extension_names_the_offender() {
        let record = record_for(b"hello");
        let upload = Upload {
            filename: "evil.exe",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(
            d.outcome,
            Outcome::InvalidUpload {
                extension: Some("exe".into())
            }
        );
        // No digest is computed for a rejected upload.
        assert!(d.uploaded_sha256.is_none());
    }

    #[test]
    fn extensionless_filename_is_invalid() {
        let record = record_for(b"hello");
        let upload = Upload {
            filename: "README",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::InvalidUpload { extension: None });
    }

    #[test]
    fn matching_bytes_are_exact() {
        let record = record_for(b"hello");
        let upload = Upload {
            filename: "candidate.PDF",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::Exact);
        assert_eq!(d.uploaded_sha256.as_deref(), Some(record.sha256.as_str()));
    }

    #[test]
    fn single_byte_mutation_is_mismatch() {
        let record = record_for(b"hello");
        let upload = Upload {
            filename: "candidate.pdf",
            bytes: b"hellp",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::Mismatch);
        assert!(d.uploaded_sha256.is_some());
    }

    #[test]
    fn stored_digest_case_is_ignored() {
        let mut record = record_for(b"hello");
        record.sha256 = record.sha256.to_ascii_uppercase();
        let upload = Upload {
            filename: "candidate.pdf",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::Exact);
    }

    #[test]
    fn revocation_is_informational_by_default() {
        let mut record = record_for(b"hello");
        record.revoked_at = Some(Utc::now());
        let upload = Upload {
            filename: "candidate.pdf",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::Exact);
    }

    #[test]
    fn enforced_revocation_short_circuits_a_match() {
        let mut record = record_for(b"hello");
        record.revoked_at = Some(Utc::now());
        let mut cfg = config();
        cfg.enforce_revocation = true;

        let upload = Upload {
            filename: "candidate.pdf",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &cfg);
        assert_eq!(d.outcome, Outcome::Revoked);
        // The digest was still computed and is available for display.
        assert!(d.uploaded_sha256.is_some());

        // A mismatch on a revoked record still reports the mismatch.
        let wrong = Upload {
            filename: "candidate.pdf",
            bytes: b"hellp",
        };
        let d = decide(Some(&wrong), Some(&record), &cfg);
        assert_eq!(d.outcome, Outcome::Mismatch);
    }

    #[test]
    fn filename_never_influences_a_computed_decision() {
        let record = record_for(b"hello");
        let upload = Upload {
            filename: "completely-unrelated-name.pdf",
            bytes: b"hello",
        };
        let d = decide(Some(&upload), Some(&record), &config());
        assert_eq!(d.outcome, Outcome::Exact);
    }
}
