// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cm fmt`: recompose a file

use anyhow::Result;
use clap::Args;
use cm_parser::{compose_document, write_text, Grammar};
use std::path::PathBuf;

use super::load;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct FmtArgs {
    /// Configuration file
    pub path: PathBuf,
    /// Write the result back instead of printing it
    #[arg(long)]
    pub write: bool,
}

pub fn handle(args: FmtArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let loaded = load(&args.path, grammar)?;
    let composed = compose_document(&loaded.document);
    if !args.write {
        print!("{composed}");
        return Ok(());
    }

    let changed = composed != loaded.text;
    if changed {
        write_text(&args.path, &composed)?;
        tracing::info!(path = %args.path.display(), "reformatted");
    }
    match format {
        OutputFormat::Text => {
            let status = if changed { "Formatted" } else { "Unchanged" };
            println!("{status} {}", args.path.display());
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "path": args.path, "changed": changed })
        ),
    }
    Ok(())
}
