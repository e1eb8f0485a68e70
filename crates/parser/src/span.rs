// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Byte spans over configuration text and line/column lookup.

use serde::Serialize;

/// A half-open byte range `[start, end)` in the parsed text.
///
/// Spans always sit on UTF-8 character boundaries because every terminal
/// the parser matches starts and ends on one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    #[inline]
    pub fn empty(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `start <= pos < end`.
    #[inline]
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Smallest span covering both.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Extract the spanned text, or `""` when out of bounds.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Locate a span in source, returning `(line, column, line_content)`.
///
/// `line` is 1-indexed, `column` is the 0-indexed character offset of
/// `span.start` inside its line, and `line_content` excludes the newline.
/// A span that starts exactly on a `\n` belongs to the line that newline
/// terminates.
pub fn locate_span(source: &str, span: Span) -> (usize, usize, &str) {
    let effective_start = span.start.min(source.len());
    let before = &source[..floor_char_boundary(source, effective_start)];

    let line_num = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let col = before[line_start..].chars().count();
    (line_num, col, &source[line_start..line_end])
}

/// Render an excerpt around `span` with carets under it.
///
/// ```text
/// PRUNEFS="NFS afs
///         ^
/// ```
pub fn context_snippet(source: &str, span: Span, context_chars: usize) -> String {
    let start_pos = floor_char_boundary(source, span.start.min(source.len()));
    let start = source[..start_pos]
        .char_indices()
        .rev()
        .take_while(|(_, c)| *c != '\n')
        .take(context_chars)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start_pos);

    let end = source[start_pos..]
        .char_indices()
        .take_while(|(_, c)| *c != '\n')
        .take(context_chars + 1)
        .last()
        .map(|(i, c)| start_pos + i + c.len_utf8())
        .unwrap_or(start_pos);

    let snippet = &source[start..end];
    let caret_pos = source[start..start_pos].chars().count();
    let caret_len = span.len().max(1);

    format!(
        "{}\n{}{}",
        snippet,
        " ".repeat(caret_pos),
        "^".repeat(caret_len)
    )
}

/// Rich diagnostic in the style of rustc:
///
/// ```text
/// error: expected '=' at line 3, column 5
///   --> line 3, column 5
///    |
///  3 | KEY value
///    |     ^
/// ```
pub fn diagnostic_context(source: &str, span: Span, message: &str) -> String {
    let (line_num, col, line_content) = locate_span(source, span);
    let span_len = span.len().max(1);

    format!(
        "error: {}\n  --> line {}, column {}\n   |\n{:>3} | {}\n   | {}{}",
        message,
        line_num,
        col + 1,
        line_num,
        line_content,
        " ".repeat(col),
        "^".repeat(span_len)
    )
}

fn floor_char_boundary(source: &str, mut pos: usize) -> usize {
    while pos > 0 && !source.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

#[cfg(test)]
#[path = "span_tests.rs"]
mod tests;
