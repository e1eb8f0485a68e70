// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File access and host detection for configuration files.

use crate::compose::compose_document;
use crate::error::Error;
use crate::grammar::Grammar;
use crate::value::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reading or writing a configuration file failed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn read_text(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text(path: &Path, text: &str) -> Result<(), SourceError> {
    std::fs::write(path, text).map_err(|source| SourceError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// True on Linux hosts, where `/etc/updatedb.conf` may exist.
pub fn platform_is_linux() -> bool {
    cfg!(target_os = "linux")
}

/// Read and parse the file at `path`.
pub fn load_document(path: &Path, grammar: &Grammar) -> Result<Document, Error> {
    let text = read_text(path)?;
    let document = crate::parse_document_with(&text, grammar)?;
    tracing::debug!(
        path = %path.display(),
        grammar = grammar.name(),
        entries = document.len(),
        "loaded document"
    );
    Ok(document)
}

/// Compose `document` and write it to `path`.
pub fn save_document(path: &Path, document: &Document) -> Result<(), SourceError> {
    let text = compose_document(document);
    write_text(path, &text)?;
    tracing::debug!(
        path = %path.display(),
        entries = document.len(),
        bytes = text.len(),
        "saved document"
    );
    Ok(())
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
