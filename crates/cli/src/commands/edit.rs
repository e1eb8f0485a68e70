// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cm set` and `cm unset`: edit one key and write the file back

use anyhow::Result;
use clap::Args;
use cm_parser::{
    compose_document, save_document, Document, DocumentError, Grammar, SetOptions, Value,
    ValueError,
};
use std::path::{Path, PathBuf};

use super::load;
use crate::exit_error::ExitError;
use crate::output::{print_changed, OutputFormat};

#[derive(Args)]
pub struct SetArgs {
    /// Configuration file
    pub path: PathBuf,
    /// Key to assign
    pub key: String,
    /// New value; several values form a word list
    #[arg(required = true, num_args = 1..)]
    pub values: Vec<String>,
    /// Append the key if the file does not assign it yet
    #[arg(long)]
    pub insert: bool,
    /// Print the resulting file instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct UnsetArgs {
    /// Configuration file
    pub path: PathBuf,
    /// Key whose last assignment is removed
    pub key: String,
    /// Print the resulting file instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

/// A single value keeps a key that holds a word list a list; otherwise it
/// becomes a bare word, or a quoted string when it is not a word.
pub(crate) fn build_value(values: &[String], current: Option<&Value>) -> Result<Value, ValueError> {
    match values {
        [single] if !matches!(current, Some(Value::List(_))) => Value::from_text(single),
        _ => Value::list(values.iter().map(String::as_str)),
    }
}

fn key_error(err: DocumentError, path: &Path) -> anyhow::Error {
    match err {
        DocumentError::KeyNotFound { key } => {
            ExitError::new(1, format!("key '{key}' not found in {}", path.display())).into()
        }
        other => other.into(),
    }
}

fn finish(path: &Path, document: &Document, dry_run: bool) -> Result<bool> {
    if dry_run {
        print!("{}", compose_document(document));
        return Ok(false);
    }
    save_document(path, document)?;
    Ok(true)
}

pub fn set(args: SetArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let mut document = load(&args.path, grammar)?.document;
    let value = build_value(&args.values, document.get(&args.key))?;
    let options = SetOptions {
        insert_if_missing: args.insert,
    };
    document
        .set_value_with(&args.key, value, options)
        .map_err(|e| key_error(e, &args.path))?;

    if finish(&args.path, &document, args.dry_run)? {
        tracing::info!(path = %args.path.display(), key = %args.key, "set value");
        print_changed("Set", &args.key, &args.path, format);
    }
    Ok(())
}

pub fn unset(args: UnsetArgs, grammar: &Grammar, format: OutputFormat) -> Result<()> {
    let mut document = load(&args.path, grammar)?.document;
    document
        .remove_assignment(&args.key)
        .map_err(|e| key_error(e, &args.path))?;

    if finish(&args.path, &document, args.dry_run)? {
        tracing::info!(path = %args.path.display(), key = %args.key, "removed key");
        print_changed("Unset", &args.key, &args.path, format);
    }
    Ok(())
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
