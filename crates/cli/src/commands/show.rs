// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cm show`: list the entries of a file

use anyhow::Result;
use clap::Args;
use cm_parser::{Compose, Document, Entry, Grammar};
use std::path::PathBuf;

use super::load;
use crate::color::Palette;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ShowArgs {
    /// Configuration file
    pub path: PathBuf,
}

pub fn handle(args: ShowArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let loaded = load(&args.path, grammar)?;
    match format {
        OutputFormat::Json => print_json(&loaded.document),
        OutputFormat::Text => {
            print!("{}", render(&loaded.document, Palette::detect()));
            Ok(())
        }
    }
}

/// One row per source line: line number, entry kind, content.
pub(crate) fn render(document: &Document, palette: Palette) -> String {
    let mut out = String::new();
    let mut line = 1;
    let mut row = |line: usize, kind: &str, body: String| {
        let row = format!(
            "{}  {}  {}",
            palette.context(&format!("{line:>4}")),
            palette.context(&format!("{kind:<10}")),
            body
        );
        out.push_str(row.trim_end());
        out.push('\n');
    };

    for entry in &document.entries {
        match entry {
            Entry::Assignment(a) => {
                let mut body = format!("{}={}", palette.key(&a.key.compose()), a.value.compose());
                if let Some(comment) = &a.comment {
                    body.push(' ');
                    body.push_str(&palette.comment(comment.text()));
                }
                row(line, "assignment", body);
            }
            Entry::Comment(block) => {
                for (i, text) in block.texts().enumerate() {
                    row(line + i, "comment", palette.comment(text));
                }
            }
            Entry::Blank(_) => row(line, "blank", String::new()),
        }
        line += entry.line_count();
    }
    out
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
