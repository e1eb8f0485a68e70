//! Black-box behavior tests for the cm CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, exit codes and the files left on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/errors.rs"]
mod errors;
#[path = "specs/edit.rs"]
mod edit;
#[path = "specs/format.rs"]
mod format;
#[path = "specs/read.rs"]
mod read;
