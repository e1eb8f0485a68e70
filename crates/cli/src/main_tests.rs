// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::error::ErrorKind;
use clap::CommandFactory;
use clap::Parser;

use super::{format_error, Cli, Commands, GrammarKind, OutputFormat};

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn global_flags_follow_the_subcommand() {
    let cli = Cli::try_parse_from([
        "cm",
        "get",
        "/etc/updatedb.conf",
        "PRUNEFS",
        "-o",
        "json",
        "--grammar",
        "key-value",
    ])
    .unwrap();
    assert_eq!(cli.output, OutputFormat::Json);
    assert_eq!(cli.grammar, Some(GrammarKind::KeyValue));
    assert!(matches!(cli.command, Commands::Get(_)));
}

#[test]
fn set_collects_every_value() {
    let cli = Cli::try_parse_from(["cm", "set", "f.conf", "PRUNEFS", "NFS", "nfs", "--insert"])
        .unwrap();
    let Commands::Set(args) = cli.command else {
        panic!("expected set");
    };
    assert_eq!(args.values, vec!["NFS", "nfs"]);
    assert!(args.insert);
    assert!(!args.dry_run);
}

#[test]
fn set_requires_a_value() {
    let err = Cli::try_parse_from(["cm", "set", "f.conf", "PRUNEFS"])
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["cm"]).is_err());
}

#[derive(Debug, thiserror::Error)]
#[error("inner failure")]
struct Inner;

#[derive(Debug, thiserror::Error)]
enum Outer {
    #[error("outer: {0}")]
    Wrapped(#[source] Inner),
    #[error("outer failed")]
    Opaque(#[source] Inner),
}

#[test]
fn format_error_skips_redundant_chain() {
    let err = anyhow::Error::new(Outer::Wrapped(Inner));
    assert_eq!(format_error(&err), "outer: inner failure");
}

#[test]
fn format_error_renders_new_causes() {
    let err = anyhow::Error::new(Outer::Opaque(Inner));
    assert_eq!(
        format_error(&err),
        "outer failed\n\nCaused by:\n    0: inner failure"
    );
}
