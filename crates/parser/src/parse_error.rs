// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Syntax errors reported by the grammar engine.

use crate::span::{context_snippet, diagnostic_context, locate_span, Span};
use thiserror::Error;

/// Input text did not match the grammar.
///
/// The position is the farthest point any alternative reached, and
/// `expected` lists what would have let parsing continue there.
///
/// # Examples
///
/// ```ignore
/// use cm_parser::{parse_document, Error};
///
/// let err = parse_document("KEY=\"abc\n").unwrap_err();
/// assert!(matches!(err, Error::Syntax(ref e) if e.line == 1));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("syntax error at line {line}, column {column}: expected {expected}, found {found}")]
pub struct SyntaxError {
    /// 1-indexed line of the failure.
    pub line: usize,
    /// 1-indexed character column of the failure.
    pub column: usize,
    /// What the grammar would have accepted, e.g. `'=' or comment`.
    pub expected: String,
    /// Description of the offending input, e.g. `','` or `end of input`.
    pub found: String,
    /// The full source line containing the failure.
    pub snippet: String,
    /// Byte span of the offending character (empty at end of input).
    pub span: Span,
}

impl SyntaxError {
    pub(crate) fn at(source: &str, pos: usize, expected: String) -> Self {
        let pos = pos.min(source.len());
        let next = source[pos..].chars().next();
        let span = Span::new(pos, pos + next.map(char::len_utf8).unwrap_or(0));
        let (line, col, content) = locate_span(source, span);
        let found = match next {
            None => "end of input".to_string(),
            Some('\n') => "newline".to_string(),
            Some(c) if c.is_control() => format!("'{}'", c.escape_debug()),
            Some(c) => format!("'{c}'"),
        };
        Self {
            line,
            column: col + 1,
            expected,
            found,
            snippet: content.to_string(),
            span,
        }
    }

    /// Short excerpt with a caret under the failure.
    pub fn context(&self, source: &str, context_chars: usize) -> String {
        context_snippet(source, self.span, context_chars)
    }

    /// rustc-style diagnostic with a line gutter.
    pub fn diagnostic(&self, source: &str) -> String {
        diagnostic_context(source, self.span, &self.to_string())
    }
}
