// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cm - read and edit shell-style configuration files

mod color;
mod commands;
mod env;
mod exit_error;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, edit, fmt, get, show, GrammarKind};

#[derive(Parser)]
#[command(
    name = "cm",
    version,
    about = "Round-trip editor for updatedb.conf style configuration files"
)]
struct Cli {
    /// Grammar to parse with (default: CM_GRAMMAR, else updatedb)
    #[arg(long, value_enum, global = true)]
    grammar: Option<GrammarKind>,

    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of a file
    Show(show::ShowArgs),
    /// Print the value assigned to a key
    Get(get::GetArgs),
    /// Assign a value to a key
    Set(edit::SetArgs),
    /// Remove the assignment of a key
    Unset(edit::UnsetArgs),
    /// Check that a file parses and recomposes
    Check(check::CheckArgs),
    /// Recompose a file in normalized form
    Fmt(fmt::FmtArgs),
}

fn main() {
    setup_logging();
    if let Err(e) = run() {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Logs go to stderr so they never mix with command output.
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message, the
/// "Caused by" chain is skipped.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;
    let kind = GrammarKind::resolve(cli.grammar)?;
    let grammar = kind.grammar();
    tracing::debug!(grammar = grammar.name(), "resolved grammar");

    match cli.command {
        Commands::Show(args) => show::handle(args, grammar, format),
        Commands::Get(args) => get::handle(args, grammar, format),
        Commands::Set(args) => edit::set(args, grammar, format),
        Commands::Unset(args) => edit::unset(args, grammar, format),
        Commands::Check(args) => check::handle(args, grammar, format),
        Commands::Fmt(args) => fmt::handle(args, grammar, format),
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
