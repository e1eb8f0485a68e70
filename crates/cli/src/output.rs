// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON followed by a newline.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Text-mode status line for commands that change a file.
///
/// `dry_run` commands print the recomposed file instead, so this is only
/// used after a write.
pub fn print_changed(verb: &str, key: &str, path: &std::path::Path, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{verb} {key} in {}", path.display()),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "action": verb.to_lowercase(), "key": key, "path": path })
        ),
    }
}
