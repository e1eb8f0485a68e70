// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property tests for parse/compose round trips.

#![allow(clippy::unwrap_used, clippy::panic)]

use cm_parser::{compose_document, parse_document, parse_document_with, Grammar, Value};
use proptest::prelude::*;

const KEY: &str = "[A-Z_][A-Z0-9_]{0,12}";
const WORD: &str = "[a-zA-Z0-9/._:+-]{1,12}";

fn blanks() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

fn comment() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("#[ -~]{0,20}")
}

/// A scalar value as written in the file: bare word, or a quoted string
/// without newlines, backslashes or its own quote character.
fn scalar() -> impl Strategy<Value = String> {
    prop_oneof![
        WORD.prop_map(|w| w),
        "[a-z ,;=#']{0,12}".prop_map(|s| format!("\"{s}\"")),
        "[a-z ,;=#\"]{0,12}".prop_map(|s| format!("'{s}'")),
    ]
}

/// One line of an `updatedb.conf` style file, without its newline.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        (KEY, scalar(), comment()).prop_map(|(k, v, c)| match c {
            Some(c) => format!("{k}={v} {c}"),
            None => format!("{k}={v}"),
        }),
        (KEY, prop::collection::vec(WORD, 0..5), "[ ]{1,3}")
            .prop_map(|(k, words, sep)| format!("{k}='{}'", words.join(&sep))),
        "#[ -~]{0,20}",
        blanks(),
    ]
}

proptest! {
    #[test]
    fn scalar_assignment_round_trips(
        key in KEY,
        value in scalar(),
        before in blanks(),
        after in blanks(),
        note in comment(),
    ) {
        let mut line = format!("{key}{before}={after}{value}");
        if let Some(note) = note {
            line.push(' ');
            line.push_str(&note);
        }
        line.push('\n');
        let doc = parse_document_with(&line, Grammar::key_value()).unwrap();
        prop_assert_eq!(compose_document(&doc), line);
    }

    #[test]
    fn word_list_round_trips_double_quoted(
        key in KEY,
        words in prop::collection::vec(WORD, 0..6),
        single in any::<bool>(),
    ) {
        let q = if single { '\'' } else { '"' };
        let input = format!("{key}={q}{}{q}\n", words.join(" "));
        let doc = parse_document(&input).unwrap();
        prop_assert_eq!(
            doc.get(&key),
            Some(&Value::list(words.iter().map(String::as_str)).unwrap())
        );
        prop_assert_eq!(compose_document(&doc), format!("{key}=\"{}\"\n", words.join(" ")));
    }

    #[test]
    fn compose_is_idempotent(lines in prop::collection::vec(line(), 0..8), final_nl in any::<bool>()) {
        let mut text = lines.join("\n");
        if final_nl && !lines.is_empty() {
            text.push('\n');
        }
        let once = compose_document(&parse_document(&text).unwrap());
        let twice = compose_document(&parse_document(&once).unwrap());
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn entry_order_is_preserved(lines in prop::collection::vec(line(), 1..8)) {
        let text = format!("{}\n", lines.join("\n"));
        let doc = parse_document(&text).unwrap();
        prop_assert_eq!(doc.line_count(), lines.len());
    }

    #[test]
    fn parsing_never_panics(input in "[ -~\t\n°€ä]{0,80}") {
        if let Ok(doc) = parse_document(&input) {
            let text = compose_document(&doc);
            prop_assert!(parse_document(&text).is_ok());
        }
    }
}
