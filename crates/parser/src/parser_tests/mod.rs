// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parser engine tests over the built-in grammars.
//!
//! Trees are compared through [`ParseNode::flatten`], which joins every
//! terminal's text with ` | ` (newlines shown as `\n`, end of input as an
//! empty field).

mod errors;

use super::*;
use crate::grammar::builtin::{
    COMMENT_BLOCK, DOCUMENT, MULTI_VALUE_QUOTED_ASSIGNMENT, SINGLE_ASSIGNMENT,
    SINGLE_QUOTED_STRING, WORD,
};

/// Parse `input` from rule `start` of the updatedb grammar and flatten it.
fn flatten_rule(start: &str, input: &str) -> String {
    let grammar = Grammar::updatedb().with_start(start).unwrap();
    let tree = Parser::parse(input, &grammar).unwrap();
    tree.root.flatten(input)
}

fn flatten_document(input: &str) -> String {
    let tree = Parser::parse(input, Grammar::updatedb()).unwrap();
    assert!(tree.is_complete());
    tree.root.flatten(input)
}

#[yare::parameterized(
    word            = { WORD, "unicode_string", "unicode_string" },
    word_stops      = { WORD, "a,b", "a" },
    single_quoted   = { SINGLE_QUOTED_STRING, "'single quoted'", "'single quoted'" },
    escaped_quote   = { SINGLE_QUOTED_STRING, r"'it\'s' tail", r"'it\'s'" },
    nearest_quote   = { SINGLE_QUOTED_STRING, "'a' b 'c'", "'a'" },
    assignment      = { SINGLE_ASSIGNMENT, "key = \"value\"", "key | = | \"value\"" },
    assignment_word = { SINGLE_ASSIGNMENT, "PATH=/usr/bin # bin", "PATH | = | /usr/bin | # bin" },
    multi_value     = { MULTI_VALUE_QUOTED_ASSIGNMENT, "PRUNEFS=\"NFS nfs\"\n", "PRUNEFS | = | \" | NFS | nfs | \" | \\n" },
    multi_empty     = { MULTI_VALUE_QUOTED_ASSIGNMENT, "KEY=\"\"\n", "KEY | = | \" | \" | \\n" },
    multi_single_q  = { MULTI_VALUE_QUOTED_ASSIGNMENT, "KEY='a b'\n", "KEY | = | ' | a | b | ' | \\n" },
    comment_block   = { COMMENT_BLOCK, "# one\n  # two\nX=1\n", "# one | \\n | # two | \\n" },
)]
fn flattens_rule(start: &str, input: &str, expected: &str) {
    assert_eq!(flatten_rule(start, input), expected);
}

#[yare::parameterized(
    comment_only   = { "# test\n", "# test | \\n | " },
    multi_value    = { "PRUNE_BIND_MOUNTS=\"yes\" # test comment\n", "PRUNE_BIND_MOUNTS | = | \" | yes | \" | # test comment | \\n | " },
    spaced         = { "PRUNE_BIND_MOUNTS = \"yes\"\n", "PRUNE_BIND_MOUNTS | = | \" | yes | \" | \\n | " },
    plain_value    = { "PATH=/usr/bin\n", "PATH | = | /usr/bin | \\n | " },
    quoted_scalar  = { "KEY=\"a,b\"\n", "KEY | = | \"a,b\" | \\n | " },
    blank_lines    = { "\n\n", "\\n | \\n | " },
    no_newline     = { "A=1", "A | = | 1 |  | " },
    empty          = { "", "" },
)]
fn flattens_document(input: &str, expected: &str) {
    assert_eq!(flatten_document(input), expected);
}

#[test]
fn end_of_input_is_a_terminal() {
    let tree = Parser::parse("", Grammar::updatedb()).unwrap();
    let children = tree.root.children();
    assert_eq!(children.len(), 1);
    assert!(children[0].is_terminal());
    assert!(children[0].span().is_empty());
}

#[test]
fn named_terminal_collapses_single_match() {
    let grammar = Grammar::updatedb();
    let input = "KEY=value\n";
    let tree = Parser::parse(input, grammar).unwrap();

    let line = &tree.root.children()[0];
    assert_eq!(grammar.rule_name(line.rule().unwrap()), "assignment_line");

    let assignment = &line.children()[0];
    assert_eq!(
        grammar.rule_name(assignment.rule().unwrap()),
        SINGLE_ASSIGNMENT
    );

    // key -> maybe_quoted_word -> word
    let key = &assignment.children()[0];
    let word = &key.children()[0].children()[0];
    assert!(word.is_terminal());
    assert_eq!(grammar.rule_name(word.rule().unwrap()), WORD);
    assert_eq!(tree.text(word), "KEY");

    // '=' is anonymous
    let equals = &assignment.children()[1];
    assert!(equals.is_terminal());
    assert_eq!(equals.rule(), None);
}

#[test]
fn whitespace_is_skipped_but_kept_out_of_spans() {
    let input = "\tKEY  =\t value \n";
    let tree = Parser::parse(input, Grammar::updatedb()).unwrap();
    let assignment = &tree.root.children()[0].children()[0];
    assert_eq!(tree.text(assignment), "KEY  =\t value");
    assert_eq!(assignment.span().start, 1);
}

#[test]
fn multi_value_wins_over_scalar_for_plain_words() {
    let grammar = Grammar::updatedb();
    let tree = Parser::parse("KEY=\"yes\"\n", grammar).unwrap();
    let entry = &tree.root.children()[0];
    assert_eq!(
        grammar.rule_name(entry.rule().unwrap()),
        MULTI_VALUE_QUOTED_ASSIGNMENT
    );
}

#[test]
fn key_value_grammar_keeps_quoted_scalars() {
    let grammar = Grammar::key_value();
    let input = "KEY=\"a b\"\n";
    let tree = Parser::parse(input, grammar).unwrap();
    assert_eq!(tree.root.flatten(input), "KEY | = | \"a b\" | \\n | ");
}

#[test]
fn partial_match_is_not_complete() {
    let grammar = Grammar::updatedb().with_start(WORD).unwrap();
    let tree = Parser::parse("a;b", &grammar).unwrap();
    assert_eq!(tree.end, 1);
    assert!(!tree.is_complete());
}

#[test]
fn dump_lists_rules_and_spans() {
    let grammar = Grammar::updatedb();
    let tree = Parser::parse("# hi\n", grammar).unwrap();
    let dump = tree.dump(grammar);
    assert!(dump.starts_with(&format!("{DOCUMENT} 0..5\n")));
    assert!(dump.contains("  comment_block 0..5\n"));
    assert!(dump.contains("comment 0..4 \"# hi\""));
}
