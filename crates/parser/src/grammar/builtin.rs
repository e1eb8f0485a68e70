// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The grammars shipped with the crate and the names of their rules.
//!
//! ```text
//! maybe_quoted_word  = single_quoted_string | double_quoted_string | word
//! key                = maybe_quoted_word
//! single_value       = maybe_quoted_word
//! single_assignment  = key '=' single_value comment?
//! assignment_line    = single_assignment line_end
//! comment_line       = comment line_end
//! comment_block      = comment_line+
//! line_end           = newline | EOF
//!
//! multiple_values_blank_separated = word*
//! double_quoted_values = '"' multiple_values_blank_separated '"'
//! single_quoted_values = "'" multiple_values_blank_separated "'"
//! quoted_values        = double_quoted_values | single_quoted_values
//! multi_value_quoted_assignment = key '=' quoted_values comment? line_end
//!
//! updatedb document  = (multi_value_quoted_assignment | assignment_line
//!                       | comment_block | newline)* EOF
//! key_value document = (assignment_line | comment_block | newline)* EOF
//! ```

use super::{Expr, Grammar, GrammarBuilder};
use crate::lexical;
use std::sync::LazyLock;

pub const NEWLINE: &str = "newline";
pub const COMMENT: &str = "comment";
pub const DOUBLE_QUOTED_STRING: &str = "double_quoted_string";
pub const SINGLE_QUOTED_STRING: &str = "single_quoted_string";
pub const WORD: &str = "word";
pub const MAYBE_QUOTED_WORD: &str = "maybe_quoted_word";
pub const KEY: &str = "key";
pub const SINGLE_VALUE: &str = "single_value";
pub const SINGLE_ASSIGNMENT: &str = "single_assignment";
pub const ASSIGNMENT_LINE: &str = "assignment_line";
pub const LINE_END: &str = "line_end";
pub const COMMENT_LINE: &str = "comment_line";
pub const COMMENT_BLOCK: &str = "comment_block";
pub const MULTIPLE_VALUES_BLANK_SEPARATED: &str = "multiple_values_blank_separated";
pub const DOUBLE_QUOTED_VALUES: &str = "double_quoted_values";
pub const SINGLE_QUOTED_VALUES: &str = "single_quoted_values";
pub const QUOTED_VALUES: &str = "quoted_values";
pub const MULTI_VALUE_QUOTED_ASSIGNMENT: &str = "multi_value_quoted_assignment";
pub const DOCUMENT: &str = "document";

/// Lexical rules and the single-assignment rules shared by every grammar.
pub fn basic(name: &str) -> GrammarBuilder {
    GrammarBuilder::new(name)
        .rule(NEWLINE, Expr::regex(lexical::NEWLINE_PATTERN))
        .rule(COMMENT, Expr::regex(lexical::COMMENT_PATTERN))
        .rule(
            DOUBLE_QUOTED_STRING,
            Expr::regex(lexical::DOUBLE_QUOTED_PATTERN),
        )
        .rule(
            SINGLE_QUOTED_STRING,
            Expr::regex(lexical::SINGLE_QUOTED_PATTERN),
        )
        .rule(WORD, Expr::regex(lexical::WORD_PATTERN))
        .rule(
            MAYBE_QUOTED_WORD,
            Expr::choice([
                Expr::rule(SINGLE_QUOTED_STRING),
                Expr::rule(DOUBLE_QUOTED_STRING),
                Expr::rule(WORD),
            ]),
        )
        .rule(KEY, Expr::rule(MAYBE_QUOTED_WORD))
        .rule(SINGLE_VALUE, Expr::rule(MAYBE_QUOTED_WORD))
        .rule(
            SINGLE_ASSIGNMENT,
            Expr::seq([
                Expr::rule(KEY),
                Expr::literal("="),
                Expr::rule(SINGLE_VALUE),
                Expr::optional(Expr::rule(COMMENT)),
            ]),
        )
        .rule(
            LINE_END,
            Expr::choice([Expr::rule(NEWLINE), Expr::EndOfInput]),
        )
        .rule(
            ASSIGNMENT_LINE,
            Expr::seq([Expr::rule(SINGLE_ASSIGNMENT), Expr::rule(LINE_END)]),
        )
        .rule(
            COMMENT_LINE,
            Expr::seq([Expr::rule(COMMENT), Expr::rule(LINE_END)]),
        )
        .rule(COMMENT_BLOCK, Expr::one_or_more(Expr::rule(COMMENT_LINE)))
}

/// [`basic`] plus the blank-separated quoted list used by `updatedb.conf`.
pub fn multi_value(name: &str) -> GrammarBuilder {
    let quoted = |quote: &str| {
        Expr::seq([
            Expr::literal(quote),
            Expr::rule(MULTIPLE_VALUES_BLANK_SEPARATED),
            Expr::literal(quote),
        ])
    };
    basic(name)
        .rule(
            MULTIPLE_VALUES_BLANK_SEPARATED,
            Expr::zero_or_more(Expr::rule(WORD)),
        )
        .rule(DOUBLE_QUOTED_VALUES, quoted("\""))
        .rule(SINGLE_QUOTED_VALUES, quoted("'"))
        .rule(
            QUOTED_VALUES,
            Expr::choice([
                Expr::rule(DOUBLE_QUOTED_VALUES),
                Expr::rule(SINGLE_QUOTED_VALUES),
            ]),
        )
        .rule(
            MULTI_VALUE_QUOTED_ASSIGNMENT,
            Expr::seq([
                Expr::rule(KEY),
                Expr::literal("="),
                Expr::rule(QUOTED_VALUES),
                Expr::optional(Expr::rule(COMMENT)),
                Expr::rule(LINE_END),
            ]),
        )
}

fn document(line_kinds: &[&str]) -> Expr {
    Expr::seq([
        Expr::zero_or_more(Expr::choice(line_kinds.iter().map(|k| Expr::rule(*k)))),
        Expr::EndOfInput,
    ])
}

/// Grammar for `/etc/updatedb.conf` style files.
pub fn updatedb_builder() -> GrammarBuilder {
    multi_value("updatedb")
        .rule(
            DOCUMENT,
            document(&[
                MULTI_VALUE_QUOTED_ASSIGNMENT,
                ASSIGNMENT_LINE,
                COMMENT_BLOCK,
                NEWLINE,
            ]),
        )
        .start(DOCUMENT)
}

/// Grammar for generic `key=value` files.
pub fn key_value_builder() -> GrammarBuilder {
    basic("key_value")
        .rule(
            DOCUMENT,
            document(&[ASSIGNMENT_LINE, COMMENT_BLOCK, NEWLINE]),
        )
        .start(DOCUMENT)
}

// Allow expect here as the built-in grammars are covered by tests
#[allow(clippy::expect_used)]
static UPDATEDB: LazyLock<Grammar> = LazyLock::new(|| {
    updatedb_builder()
        .build()
        .expect("built-in updatedb grammar is valid")
});

#[allow(clippy::expect_used)]
static KEY_VALUE: LazyLock<Grammar> = LazyLock::new(|| {
    key_value_builder()
        .build()
        .expect("built-in key_value grammar is valid")
});

impl Grammar {
    /// The shared `updatedb.conf` grammar.
    pub fn updatedb() -> &'static Grammar {
        &UPDATEDB
    }

    /// The shared generic `key=value` grammar.
    pub fn key_value() -> &'static Grammar {
        &KEY_VALUE
    }
}
