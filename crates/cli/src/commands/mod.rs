// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command handlers and the file loading they share.

pub mod check;
pub mod edit;
pub mod fmt;
pub mod get;
pub mod show;

use anyhow::Result;
use clap::ValueEnum;
use cm_parser::{parse_document_with, read_text, Document, Error, Grammar};
use std::path::Path;

use crate::exit_error::ExitError;

/// The built-in grammar to parse with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum GrammarKind {
    /// `/etc/updatedb.conf` style: quoted values are word lists
    #[default]
    Updatedb,
    /// Generic `key=value` files: quoted values are strings
    KeyValue,
}

impl GrammarKind {
    pub fn grammar(self) -> &'static Grammar {
        match self {
            GrammarKind::Updatedb => Grammar::updatedb(),
            GrammarKind::KeyValue => Grammar::key_value(),
        }
    }

    /// `--grammar` if given, else `CM_GRAMMAR`, else the default.
    pub fn resolve(flag: Option<GrammarKind>) -> Result<GrammarKind> {
        if let Some(kind) = flag {
            return Ok(kind);
        }
        match crate::env::default_grammar() {
            Some(name) => GrammarKind::from_str(&name, true).map_err(|_| {
                ExitError::new(
                    2,
                    format!("invalid CM_GRAMMAR '{name}' (expected updatedb or key-value)"),
                )
                .into()
            }),
            None => Ok(GrammarKind::default()),
        }
    }
}

/// A parsed file together with its original text.
pub struct Loaded {
    pub text: String,
    pub document: Document,
}

/// Read and parse `path`. Syntax errors exit with code 1 and show where
/// the file stopped matching.
pub fn load(path: &Path, grammar: &Grammar) -> Result<Loaded> {
    let text = read_text(path)?;
    match parse_document_with(&text, grammar) {
        Ok(document) => {
            tracing::debug!(
                path = %path.display(),
                entries = document.len(),
                "parsed"
            );
            Ok(Loaded { text, document })
        }
        Err(Error::Syntax(e)) => Err(ExitError::new(
            1,
            format!("{}: {e}\n{}", path.display(), e.context(&text, 40)),
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
