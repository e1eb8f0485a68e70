// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cm get`: print the effective value of a key

use anyhow::Result;
use clap::Args;
use cm_parser::{Compose, Grammar};
use std::path::PathBuf;

use super::load;
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Configuration file
    pub path: PathBuf,
    /// Key to look up (its last assignment wins)
    pub key: String,
}

pub fn handle(args: GetArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let loaded = load(&args.path, grammar)?;
    let Some(assignment) = loaded.document.find_assignment(&args.key) else {
        return Err(ExitError::new(
            1,
            format!("key '{}' not found in {}", args.key, args.path.display()),
        )
        .into());
    };

    match format {
        OutputFormat::Text => println!("{}", assignment.value.compose()),
        OutputFormat::Json => print_json(&serde_json::json!({
            "key": assignment.key_text(),
            "value": assignment.value,
            "items": assignment.value.items(),
            "comment": assignment.comment,
        }))?,
    }
    Ok(())
}
