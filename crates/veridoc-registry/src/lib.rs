// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// veridoc-registry — Keyed store of registered document records.
//
// Persistence is a single JSON file read fresh on every access (so
// out-of-band edits are always visible) and written back wholesale on every
// mutation. See the store module for the concurrency caveats that come with
// that model.

pub mod store;

pub use store::Registry;
