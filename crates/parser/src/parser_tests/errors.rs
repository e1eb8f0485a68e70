// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Syntax error positions and expectations.

use super::*;

fn parse_err(input: &str) -> SyntaxError {
    Parser::parse(input, Grammar::updatedb()).unwrap_err()
}

#[yare::parameterized(
    comma       = { "a,b\n", 1, 2, "','" },
    semicolon   = { "a;b\n", 1, 2, "';'" },
    second_line = { "A=1\nB=,\n", 2, 3, "','" },
    bad_value   = { "KEY=;\n", 1, 5, "';'" },
    stray_quote = { "KEY=\"a\"b\n", 1, 8, "'b'" },
    carriage    = { "K=\r\n", 1, 3, "'\\r'" },
    nul_byte    = { "K=1\0\n", 1, 4, "'\\0'" },
)]
fn reports_position(input: &str, line: usize, column: usize, found: &str) {
    let err = parse_err(input);
    assert_eq!((err.line, err.column), (line, column), "{err}");
    assert_eq!(err.found, found);
}

#[test]
fn bare_word_without_equals_expects_equals() {
    let err = parse_err("a,b");
    assert_eq!(err.expected, "'='");
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 2: expected '=', found ','"
    );
}

#[test]
fn unterminated_quote_reports_its_line() {
    let err = parse_err("# header\nKEY=\"abc\nOTHER=1\n");
    assert_eq!(err.line, 2);
    assert_eq!(err.found, "newline");
    assert_eq!(err.snippet, "KEY=\"abc");
    assert!(err.expected.contains("word"), "{}", err.expected);
    assert!(err.expected.contains("'\"'"), "{}", err.expected);
}

#[test]
fn unterminated_quote_at_end_of_input() {
    let err = parse_err("KEY=\"abc");
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 9);
    assert_eq!(err.found, "end of input");
    assert!(err.span.is_empty());
}

#[test]
fn missing_value_lists_alternatives() {
    let err = parse_err("KEY=\n");
    assert_eq!((err.line, err.column), (1, 5));
    for expected in ["single_quoted_string", "double_quoted_string", "word"] {
        assert!(err.expected.contains(expected), "{}", err.expected);
    }
}

#[test]
fn key_value_grammar_rejects_word_lists_with_blanks() {
    let err = Parser::parse("KEY=a b\n", Grammar::key_value()).unwrap_err();
    assert_eq!((err.line, err.column), (1, 7));
    assert_eq!(err.found, "'b'");
}

#[test]
fn column_counts_characters() {
    let err = parse_err("Ä=ö,\n");
    assert_eq!((err.line, err.column), (1, 4));
    assert_eq!(err.found, "','");
}

#[test]
fn diagnostic_points_at_failure() {
    let input = "A=1\nB=,\n";
    let err = parse_err(input);
    let diagnostic = err.diagnostic(input);
    assert!(diagnostic.contains("B=,"), "{diagnostic}");
    assert!(diagnostic.contains('^'), "{diagnostic}");

    let context = err.context(input, 10);
    assert!(context.contains("B=,"), "{context}");
}
