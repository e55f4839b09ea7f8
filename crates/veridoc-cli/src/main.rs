// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Veridoc — command-line front end for the document authenticity verifier.
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// to the service facade. Fatal errors go to stderr with a non-zero exit;
// domain outcomes (not found, mismatch, invalid upload) are ordinary output.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use veridoc_core::VerifierConfig;
use veridoc_core::error::Result;
use veridoc_core::types::DocumentRecord;
use veridoc_crypto::sha256_file;
use veridoc_verify::{Outcome, Verifier};

#[derive(Debug, Parser)]
#[command(name = "veridoc", version, about = "Digest-based document authenticity verification")]
struct Cli {
    /// Path to the verifier configuration file.
    #[arg(long, global = true, default_value = "veridoc.json")]
    config: PathBuf,

    /// Override the registry storage path from the configuration.
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Emit records and decisions as JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a document and print its identifier and digest.
    Register {
        /// File to register.
        path: PathBuf,
        /// Label for the record; defaults to the filename.
        #[arg(long)]
        title: Option<String>,
    },
    /// Print the SHA-256 digest of a file, nothing else.
    Hash { path: PathBuf },
    /// Show a registered record (counts as a verification-page view).
    Show { doc_id: String },
    /// List all registered records.
    List,
    /// Print the HMAC signature and signed token for an identifier.
    Sign { doc_id: String },
    /// Check a signature supplied with a signed link.
    VerifyLink { doc_id: String, signature: String },
    /// Verify a candidate file against a registered record.
    Verify { doc_id: String, file: PathBuf },
    /// Revoke a registered document.
    Revoke { doc_id: String },
    /// Replace a record's title.
    Retitle { doc_id: String, title: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Execute a parsed command. `Ok(false)` is a clean run whose domain outcome
/// (not found, mismatch, invalid signature) maps to a failure exit code.
fn run(cli: Cli) -> Result<bool> {
    let mut config = VerifierConfig::load(&cli.config)?;
    if let Some(registry) = cli.registry {
        config.registry_path = registry;
    }
    tracing::debug!(registry = %config.registry_path.display(), "configuration loaded");
    let verifier = Verifier::new(config);

    match cli.command {
        Command::Register { path, title } => {
            let record = verifier.register_file(&path, title.as_deref())?;
            println!("Registered.");
            println!("Doc ID: {}", record.doc_id);
            println!("SHA-256: {}", record.sha256);
        }

        Command::Hash { path } => {
            println!("{}", sha256_file(&path)?);
        }

        Command::Show { doc_id } => match verifier.view(&doc_id)? {
            Some(record) if cli.json => println!("{}", serde_json::to_string_pretty(&record)?),
            Some(record) => print_record(&record),
            None => {
                println!("not_found: {doc_id}");
                return Ok(false);
            }
        },

        Command::List => {
            let records = verifier.list()?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                if records.is_empty() {
                    println!("No documents registered.");
                }
                for record in records {
                    let state = if record.is_revoked() { "revoked" } else { "active" };
                    println!(
                        "{}  {}  {}  scans={}  [{}]",
                        record.doc_id, record.sha256, record.issued_at, record.scans, state
                    );
                }
            }
        }

        Command::Sign { doc_id } => {
            println!("Signature: {}", verifier.link_signature(&doc_id));
            println!("Token: {}", verifier.signed_link(&doc_id));
        }

        Command::VerifyLink { doc_id, signature } => {
            let check = verifier.verify_link(&doc_id, &signature);
            println!("valid: {}", check.valid);
            println!("expected_signature: {}", check.expected_signature);
            if !check.valid {
                return Ok(false);
            }
        }

        Command::Verify { doc_id, file } => {
            let bytes = std::fs::read(&file).map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    veridoc_core::VeridocError::FileNotFound(file.clone())
                } else {
                    veridoc_core::VeridocError::Io(e)
                }
            })?;
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload");

            // Stage the candidate the way the web front end would, then run
            // the decision over the staged bytes.
            verifier.stage_upload(filename, &bytes)?;
            let decision = verifier.verify_upload(&doc_id, filename, &bytes)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!("outcome: {}", decision.outcome);
                if let Some(digest) = &decision.uploaded_sha256 {
                    println!("uploaded_sha256: {digest}");
                }
                if let Outcome::InvalidUpload { extension } = &decision.outcome {
                    match extension {
                        Some(ext) => println!("rejected extension: .{ext}"),
                        None => println!("no usable file extension"),
                    }
                }
            }
            if decision.outcome != Outcome::Exact {
                return Ok(false);
            }
        }

        Command::Revoke { doc_id } => {
            if verifier.revoke(&doc_id)? {
                println!("Revoked {doc_id}.");
            } else {
                println!("{doc_id} does not exist or is already revoked.");
                return Ok(false);
            }
        }

        Command::Retitle { doc_id, title } => {
            if verifier.retitle(&doc_id, &title)? {
                println!("Retitled {doc_id}.");
            } else {
                println!("not_found: {doc_id}");
                return Ok(false);
            }
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a config pointing every path into the tempdir, so runs leave
    /// nothing behind in the working directory.
    fn write_config(dir: &tempfile::TempDir) -> PathBuf {
        let mut config = VerifierConfig::default();
        config.hmac_secret = "cli-test-secret".to_owned();
        config.registry_path = dir.path().join("db.json");
        config.upload_dir = dir.path().join("uploads");
        let path = dir.path().join("veridoc.json");
        config.save(&path).expect("save config");
        path
    }

    fn cli(config: &std::path::Path, command: Command) -> Cli {
        Cli {
            config: config.to_path_buf(),
            registry: None,
            json: false,
            command,
        }
    }

    #[test]
    fn register_then_verify_succeeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(&dir);
        let file = dir.path().join("hello.pdf");
        std::fs::write(&file, b"hello").expect("write fixture");

        let ok = run(cli(
            &config,
            Command::Register {
                path: file.clone(),
                title: None,
            },
        ))
        .expect("register");
        assert!(ok);

        let ok = run(cli(
            &config,
            Command::Verify {
                doc_id: "demo-2cf24dba".to_owned(),
                file,
            },
        ))
        .expect("verify");
        assert!(ok);
    }

    #[test]
    fn mismatched_candidate_maps_to_failure_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(&dir);
        let original = dir.path().join("hello.pdf");
        std::fs::write(&original, b"hello").expect("write fixture");
        let altered = dir.path().join("hellp.pdf");
        std::fs::write(&altered, b"hellp").expect("write fixture");

        run(cli(
            &config,
            Command::Register {
                path: original,
                title: None,
            },
        ))
        .expect("register");

        let ok = run(cli(
            &config,
            Command::Verify {
                doc_id: "demo-2cf24dba".to_owned(),
                file: altered,
            },
        ))
        .expect("verify");
        assert!(!ok);
    }

    #[test]
    fn unknown_id_maps_to_failure_exit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(&dir);

        let ok = run(cli(
            &config,
            Command::Show {
                doc_id: "demo-ffffffff".to_owned(),
            },
        ))
        .expect("show");
        assert!(!ok);
    }

    #[test]
    fn missing_registration_path_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(&dir);

        let result = run(cli(
            &config,
            Command::Register {
                path: dir.path().join("absent.pdf"),
                title: None,
            },
        ));
        assert!(matches!(
            result,
            Err(veridoc_core::VeridocError::FileNotFound(_))
        ));
    }

    #[test]
    fn registry_flag_overrides_the_config_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = write_config(&dir);
        let file = dir.path().join("hello.pdf");
        std::fs::write(&file, b"hello").expect("write fixture");

        let other = dir.path().join("other-db.json");
        let mut cmd = cli(&config, Command::Register { path: file, title: None });
        cmd.registry = Some(other.clone());
        run(cmd).expect("register");

        assert!(other.exists());
        assert!(!dir.path().join("db.json").exists());
    }
}

fn print_record(record: &DocumentRecord) {
    println!("Doc ID:    {}", record.doc_id);
    println!("Title:     {}", record.title);
    println!("SHA-256:   {}", record.sha256);
    println!("Issued:    {}", record.issued_at);
    match &record.revoked_at {
        Some(at) => println!("Revoked:   {at}"),
        None => println!("Revoked:   no"),
    }
    println!("Pages:     {}", record.pages);
    println!("Scans:     {}", record.scans);
}
