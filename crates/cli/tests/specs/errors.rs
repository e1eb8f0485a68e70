//! Error handling specs
//!
//! Exit code 1 for unusable files, 2 for bad invocations.

use crate::prelude::*;

#[test]
fn syntax_error_shows_location() {
    ConfFile::with("A=1\nB=\"unterminated\n")
        .cm("check", &[])
        .fails()
        .code(1)
        .stderr_has("syntax error at line 2");
}

#[test]
fn missing_file_fails() {
    cli()
        .args(&["show", "/nonexistent/updatedb.conf"])
        .fails()
        .code(1)
        .stderr_has("/nonexistent/updatedb.conf");
}

#[test]
fn unknown_subcommand_exits_two() {
    cli().args(&["frobnicate"]).fails().code(2);
}

#[test]
fn invalid_grammar_env_exits_two() {
    ConfFile::updatedb()
        .cm("show", &[])
        .env("CM_GRAMMAR", "yaml")
        .fails()
        .code(2)
        .stderr_has("invalid CM_GRAMMAR 'yaml'");
}

#[test]
fn help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}
