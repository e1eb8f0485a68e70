// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod document;

use super::*;

#[test]
fn word_validates_characters() {
    assert_eq!(Word::new("/var/spool").unwrap().as_str(), "/var/spool");
    assert_eq!(
        Word::new("a,b").unwrap_err(),
        ValueError::InvalidWord("a,b".to_string())
    );
    assert!(Word::new("").is_err());
    assert!(Word::new("two words").is_err());
}

#[test]
fn quoted_string_rejects_unrepresentable_text() {
    assert_eq!(QuotedString::double("a \"b\"").unwrap().text(), "a \"b\"");
    assert!(QuotedString::double("line\nbreak").is_err());
    assert!(QuotedString::double("trailing\\").is_err());
    assert_eq!(
        QuotedString::single("a\\'b").unwrap_err(),
        ValueError::InvalidQuotedText {
            text: "a\\'b".to_string(),
            quote: Quote::Single
        }
    );
}

#[test]
fn quoted_string_from_lexeme_unescapes() {
    let q = QuotedString::from_lexeme(r#""say \"hi\"""#, Quote::Double);
    assert_eq!(q.text(), r#"say "hi""#);
    assert_eq!(q.quote(), Quote::Double);
}

#[test]
fn comment_must_start_with_hash() {
    assert_eq!(Comment::new("# a # b").unwrap().text(), "# a # b");
    assert!(Comment::new("no hash").is_err());
    assert!(Comment::new("# two\nlines").is_err());
}

#[test]
fn blank_line_accepts_only_blanks() {
    assert_eq!(BlankLine::with_whitespace(" \t").unwrap().whitespace, " \t");
    assert_eq!(
        BlankLine::with_whitespace("x").unwrap_err(),
        ValueError::InvalidWhitespace("x".to_string())
    );
}

#[yare::parameterized(
    word      = { "yes", Value::Word(Word::new("yes").unwrap()) },
    path      = { "/usr/bin", Value::Word(Word::new("/usr/bin").unwrap()) },
    blanks    = { "a b", Value::Quoted(QuotedString::double("a b").unwrap()) },
    comma     = { "a,b", Value::Quoted(QuotedString::double("a,b").unwrap()) },
    empty     = { "", Value::Quoted(QuotedString::double("").unwrap()) },
)]
fn value_from_text_picks_narrowest_form(text: &str, expected: Value) {
    assert_eq!(Value::from_text(text).unwrap(), expected);
}

#[test]
fn value_items() {
    let list = Value::list(["NFS", "nfs", "afs"]).unwrap();
    assert_eq!(list.items(), ["NFS", "nfs", "afs"]);
    assert_eq!(Value::from_text("a b").unwrap().items(), ["a b"]);
    assert!(Value::list(["ok", "not ok"]).is_err());
}

#[test]
fn word_list_edits() {
    let mut list = WordList::from_texts(["a", "b", "a"]).unwrap();
    assert!(list.contains("b"));
    assert_eq!(list.remove("a"), 2);
    list.push(Word::new("c").unwrap());
    let texts: Vec<_> = list.iter().map(Word::as_str).collect();
    assert_eq!(texts, ["b", "c"]);
    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
}

#[test]
fn key_from_text() {
    assert_eq!(Key::from_text("PATH").unwrap().text(), "PATH");
    assert!(matches!(Key::from_text("my key").unwrap(), Key::Quoted(_)));
}

#[test]
fn layout_default_is_canonical() {
    let layout = Layout::default();
    assert_eq!(layout.before_comment, " ");
    assert!(layout.indent.is_empty() && layout.trailing.is_empty());
    assert!(layout.validate().is_ok());

    let bad = Layout {
        after_equals: "\n".to_string(),
        ..Layout::default()
    };
    assert!(bad.validate().is_err());
}

#[test]
fn with_layout_rejects_line_breaks() {
    let assignment = Assignment::new(
        Key::from_text("K").unwrap(),
        Value::from_text("v").unwrap(),
    );
    let bad = Layout {
        trailing: " \n".to_string(),
        ..Layout::default()
    };
    assert!(matches!(
        assignment.clone().with_layout(bad),
        Err(ValueError::InvalidWhitespace(_))
    ));

    let indented = Layout {
        indent: "\t".to_string(),
        ..Layout::default()
    };
    let assignment = assignment.with_layout(indented).unwrap();
    assert_eq!(assignment.layout().indent, "\t");
    assert_eq!(crate::compose::Compose::compose(&assignment), "\tK=v");
}

#[test]
fn entry_line_counts() {
    let block = CommentBlock::from_texts(["# a", "# b"]).unwrap();
    assert_eq!(Entry::Comment(block).line_count(), 2);
    assert_eq!(Entry::Blank(BlankLine::new()).line_count(), 1);
}

#[test]
fn serializes_to_json() {
    let assignment = Assignment::new(
        Key::from_text("PRUNEFS").unwrap(),
        Value::list(["NFS", "nfs"]).unwrap(),
    )
    .with_comment(Comment::new("# network").unwrap());
    let json = serde_json::to_value(Entry::Assignment(assignment)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "kind": "assignment",
            "key": { "kind": "word", "value": "PRUNEFS" },
            "value": { "kind": "list", "value": ["NFS", "nfs"] },
            "comment": "# network",
        })
    );
}
