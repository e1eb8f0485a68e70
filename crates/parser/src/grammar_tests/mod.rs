// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::builtin::{self, DOCUMENT, SINGLE_ASSIGNMENT, WORD};
use super::*;

fn word_grammar() -> GrammarBuilder {
    Grammar::builder("test").rule(WORD, Expr::regex("[a-z]+"))
}

#[test]
fn builds_minimal_grammar() {
    let grammar = word_grammar().start(WORD).build().unwrap();
    assert_eq!(grammar.name(), "test");
    assert_eq!(grammar.start(), WORD);
    assert_eq!(grammar.whitespace(), &[' ', '\t']);
    assert_eq!(grammar.rules().len(), 1);
    assert_eq!(grammar.rule(WORD), Some(&Expr::regex("[a-z]+")));
    assert_eq!(grammar.rule("missing"), None);
}

#[test]
fn rejects_duplicate_rule() {
    let err = word_grammar()
        .rule(WORD, Expr::literal("x"))
        .start(WORD)
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule(WORD.to_string()));
}

#[test]
fn rejects_undefined_reference() {
    let err = word_grammar()
        .rule("pair", Expr::seq([Expr::rule(WORD), Expr::rule("value")]))
        .start("pair")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        GrammarError::UndefinedRule {
            rule: "pair".to_string(),
            target: "value".to_string(),
        }
    );
}

#[test]
fn rejects_missing_and_unknown_start() {
    assert_eq!(
        word_grammar().build().unwrap_err(),
        GrammarError::MissingStart
    );
    assert_eq!(
        word_grammar().start("nope").build().unwrap_err(),
        GrammarError::UnknownStart("nope".to_string())
    );
}

#[test]
fn rejects_invalid_pattern() {
    let err = Grammar::builder("test")
        .rule("broken", Expr::regex("[a-"))
        .start("broken")
        .build()
        .unwrap_err();
    assert!(
        matches!(err, GrammarError::InvalidPattern { ref rule, .. } if rule == "broken"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn rejects_newline_whitespace() {
    let err = word_grammar()
        .start(WORD)
        .whitespace([' ', '\n'])
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::NewlineWhitespace);
}

#[yare::parameterized(
    star_of_optional = { Expr::zero_or_more(Expr::optional(Expr::literal("a"))) },
    plus_of_star     = { Expr::one_or_more(Expr::zero_or_more(Expr::literal("a"))) },
    star_of_empty_re = { Expr::zero_or_more(Expr::regex("a*")) },
    star_of_eof      = { Expr::zero_or_more(Expr::EndOfInput) },
    nested_in_seq    = { Expr::seq([Expr::literal("x"), Expr::zero_or_more(Expr::literal(""))]) },
)]
fn rejects_nullable_repetition(expr: Expr) {
    let err = Grammar::builder("test")
        .rule("loop", expr)
        .start("loop")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        GrammarError::NullableRepetition {
            rule: "loop".to_string()
        }
    );
}

#[test]
fn nullable_detection_follows_rule_references() {
    let err = Grammar::builder("test")
        .rule("maybe", Expr::optional(Expr::literal("a")))
        .rule("indirect", Expr::rule("maybe"))
        .rule("loop", Expr::one_or_more(Expr::rule("indirect")))
        .start("loop")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        GrammarError::NullableRepetition {
            rule: "loop".to_string()
        }
    );
}

#[test]
fn repetition_of_consuming_rule_is_accepted() {
    let grammar = word_grammar()
        .rule("words", Expr::zero_or_more(Expr::rule(WORD)))
        .start("words")
        .build();
    assert!(grammar.is_ok());
}

#[test]
fn built_in_grammars_build() {
    let updatedb = Grammar::updatedb();
    assert_eq!(updatedb.name(), "updatedb");
    assert_eq!(updatedb.start(), DOCUMENT);
    assert!(updatedb.rule_id(builtin::MULTI_VALUE_QUOTED_ASSIGNMENT).is_some());

    let key_value = Grammar::key_value();
    assert_eq!(key_value.name(), "key_value");
    assert_eq!(key_value.start(), DOCUMENT);
    assert!(key_value.rule_id(builtin::MULTI_VALUE_QUOTED_ASSIGNMENT).is_none());
}

#[test]
fn built_in_grammars_are_shared() {
    assert!(std::ptr::eq(Grammar::updatedb(), Grammar::updatedb()));
}

#[test]
fn with_start_retargets_without_touching_original() {
    let grammar = Grammar::updatedb();
    let assignment = grammar.with_start(SINGLE_ASSIGNMENT).unwrap();
    assert_eq!(assignment.start(), SINGLE_ASSIGNMENT);
    assert_eq!(grammar.start(), DOCUMENT);

    assert_eq!(
        grammar.with_start("nope").unwrap_err(),
        GrammarError::UnknownStart("nope".to_string())
    );
}

#[test]
fn rule_ids_round_trip_to_names() {
    let grammar = Grammar::key_value();
    for rule in grammar.rules() {
        let id = grammar.rule_id(&rule.name).unwrap();
        assert_eq!(grammar.rule_name(id), rule.name);
    }
}

#[test]
fn debug_output_is_compact() {
    let debug = format!("{:?}", Grammar::key_value());
    assert!(debug.contains("key_value"));
    assert!(debug.contains("document"));
}
