// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crate-level error type.

use crate::grammar::GrammarError;
use crate::parse_error::SyntaxError;
use crate::source::SourceError;
use crate::value::{DocumentError, ValueError};
use crate::visitor::TransformError;
use thiserror::Error;

/// Any failure of a parse, edit or file operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// The start rule of the grammar does not produce a document.
    #[error("grammar '{grammar}' does not produce a document from rule '{start}'")]
    NotADocument { grammar: String, start: String },
}
