// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cm check`: verify a file parses and report how it recomposes

use anyhow::Result;
use clap::Args;
use cm_parser::{compose_document, Grammar};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::{load, Loaded};
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct CheckArgs {
    /// Configuration file
    pub path: PathBuf,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(crate) struct Report<'a> {
    path: &'a Path,
    grammar: &'a str,
    entries: usize,
    lines: usize,
    /// Lines that recompose differently (normalized word lists)
    changed_lines: usize,
}

pub(crate) fn report<'a>(path: &'a Path, grammar: &'a Grammar, loaded: &Loaded) -> Report<'a> {
    let composed = compose_document(&loaded.document);
    Report {
        path,
        grammar: grammar.name(),
        entries: loaded.document.len(),
        lines: loaded.document.line_count(),
        changed_lines: changed_lines(&loaded.text, &composed),
    }
}

fn changed_lines(before: &str, after: &str) -> usize {
    let before: Vec<&str> = before.lines().collect();
    let after: Vec<&str> = after.lines().collect();
    let differing = before.iter().zip(&after).filter(|(a, b)| a != b).count();
    differing + before.len().abs_diff(after.len())
}

pub fn handle(args: CheckArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let loaded = load(&args.path, grammar)?;
    let report = report(&args.path, grammar, &loaded);
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => {
            let round_trip = match report.changed_lines {
                0 => "round trip identical".to_string(),
                1 => "1 line normalized".to_string(),
                n => format!("{n} lines normalized"),
            };
            println!(
                "{}: ok ({} entries, {} lines, {})",
                report.path.display(),
                report.entries,
                report.lines,
                round_trip
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
