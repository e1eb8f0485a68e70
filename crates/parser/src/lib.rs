// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Round-trip parser and composer for shell-style configuration files.
//!
//! Handles plain `key=value` files and the `/etc/updatedb.conf` dialect,
//! where a key is assigned a quoted, blank-separated list of words:
//!
//! ```text
//! PRUNE_BIND_MOUNTS="yes"
//! # directories updatedb skips
//! PRUNEPATHS="/tmp /var/spool /media"
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use cm_parser::{compose_document, parse_document, Value};
//!
//! let mut doc = parse_document("PRUNEFS=\"NFS nfs\" # network\n")?;
//! if let Some(list) = doc.find_assignment_mut("PRUNEFS").and_then(|a| a.value.as_list_mut()) {
//!     list.push(cm_parser::Word::new("afs")?);
//! }
//! assert_eq!(compose_document(&doc), "PRUNEFS=\"NFS nfs afs\" # network\n");
//! # Ok::<(), cm_parser::Error>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! text ── Parser ──> ParseTree ── transform ──> Document ── compose ──> text
//!            ^                                     |
//!         Grammar                               edits
//! ```
//!
//! - [`Grammar`]: data-driven PEG rules; [`Grammar::updatedb`] and
//!   [`Grammar::key_value`] are built in.
//! - [`Parser`]: the engine, producing a concrete [`ParseTree`] or a
//!   [`SyntaxError`] with line and column.
//! - [`transform`]: the bottom-up semantic visitor.
//! - [`Compose`]: the inverse of `transform`. Unedited documents compose to
//!   their source bytes, except that word lists are always written with
//!   double quotes and single blanks.

mod compose;
mod error;
pub mod grammar;
pub mod lexical;
mod parse_error;
mod parser;
mod source;
pub mod span;
mod value;
mod visitor;

pub use compose::{compose, compose_document, Compose};
pub use error::Error;
pub use grammar::{Expr, Grammar, GrammarBuilder, GrammarError, RuleDef, RuleId};
pub use lexical::Quote;
pub use parse_error::SyntaxError;
pub use parser::{ParseNode, ParseTree, Parser};
pub use source::{
    load_document, platform_is_linux, read_text, save_document, write_text, SourceError,
};
pub use span::{context_snippet, diagnostic_context, locate_span, Span};
pub use value::{
    Assignment, BlankLine, Comment, CommentBlock, CommentLine, Document, DocumentError, Entry,
    Key, Layout, QuotedString, SemanticValue, SetOptions, Value, ValueError, Word, WordList,
};
pub use visitor::{transform, visit_parse_tree, ParseTreeVisitor, TransformError};

/// Parse `text` with the `updatedb.conf` grammar.
pub fn parse_document(text: &str) -> Result<Document, Error> {
    parse_document_with(text, Grammar::updatedb())
}

/// Parse `text` with `grammar`, whose start rule must be a document rule.
pub fn parse_document_with(text: &str, grammar: &Grammar) -> Result<Document, Error> {
    let tree = Parser::parse(text, grammar)?;
    match transform(&tree, grammar)? {
        SemanticValue::Document(document) => Ok(document),
        _ => Err(Error::NotADocument {
            grammar: grammar.name().to_string(),
            start: grammar.start().to_string(),
        }),
    }
}
