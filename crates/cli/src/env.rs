// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

// --- Logging ---

/// Log filter directives: CM_LOG > RUST_LOG
pub fn log_filter() -> Option<String> {
    std::env::var("CM_LOG")
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .filter(|s| !s.is_empty())
}

// --- Grammar ---

/// Grammar used when `--grammar` is absent.
pub fn default_grammar() -> Option<String> {
    std::env::var("CM_GRAMMAR").ok().filter(|s| !s.is_empty())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}
