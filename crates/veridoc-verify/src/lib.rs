// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// veridoc-verify — The match/mismatch decision and the service facade that
// wires configuration, registry, and crypto engines into the verifier's
// public operations.

pub mod decision;
pub mod service;

pub use decision::{Decision, Outcome, Upload, decide};
pub use service::{LinkVerification, Verifier};
