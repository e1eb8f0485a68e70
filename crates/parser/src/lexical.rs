// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical rules: the atomic matchers every grammar is assembled from.
//!
//! Each rule is a regular expression that the grammar engine anchors at the
//! current cursor. Quoted strings terminate at the nearest unescaped closing
//! quote; `\q` inside a `q`-quoted string is a literal quote character and
//! any other backslash pair is kept verbatim.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// `\n`, never skipped as whitespace.
pub const NEWLINE_PATTERN: &str = r"\n";

/// `#` up to (not including) the end of the line.
pub const COMMENT_PATTERN: &str = r"#[^\n]*";

pub const DOUBLE_QUOTED_PATTERN: &str = r#""(?:[^"\\\n]|\\"|\\[^"\n])*""#;

pub const SINGLE_QUOTED_PATTERN: &str = r"'(?:[^'\\\n]|\\'|\\[^'\n])*'";

/// Maximal run of word characters: unicode word characters plus
/// `^ ° ! § $ % & / ( ) [ ] { } ~ @ + - * ? < > . _ : ` \ €`.
pub const WORD_PATTERN: &str = r"[\w^°!§$%&/()\[\]{}~@+\-*?<>._:`\\€]+";

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static WORD_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\A(?:{WORD_PATTERN})\z")).expect("constant regex pattern is valid")
});

/// Quote character of a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    pub fn from_char(c: char) -> Option<Quote> {
        match c {
            '\'' => Some(Quote::Single),
            '"' => Some(Quote::Double),
            _ => None,
        }
    }
}

/// True if `text` is one complete unquoted word.
pub fn is_word(text: &str) -> bool {
    WORD_EXACT.is_match(text)
}

/// Undo quote escaping inside the body of a `quote`-quoted string.
///
/// `\q` becomes `q`; any other backslash pair is copied unchanged so that
/// [`escape`] restores the body byte for byte.
pub fn unescape(body: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if next == q => out.push(q),
            Some(next) => {
                out.push('\\');
                out.push(next);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Escape every `quote` character in `text` with a backslash.
pub fn escape(text: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        if c == q {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// True if `text` survives `escape` followed by re-lexing.
///
/// Text that came out of [`unescape`] always does. Hand-written text fails
/// when it holds a newline, or a backslash that is followed by the quote
/// character or ends the text: no escaped body decodes to those.
pub fn is_quotable(text: &str, quote: Quote) -> bool {
    let q = quote.as_char();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\n' => return false,
            '\\' => match chars.next() {
                Some(next) if next == q || next == '\n' => return false,
                Some(_) => {}
                None => return false,
            },
            _ => {}
        }
    }
    true
}

/// Strip exactly one leading and one trailing quote from a lexeme matched
/// by one of the quoted-string patterns and unescape the body.
pub fn unquote(lexeme: &str, quote: Quote) -> String {
    let q = quote.as_char();
    let body = lexeme.strip_prefix(q).unwrap_or(lexeme);
    let body = body.strip_suffix(q).unwrap_or(body);
    unescape(body, quote)
}

#[cfg(test)]
#[path = "lexical_tests.rs"]
mod tests;
