// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Document queries and edits on hand-built documents.

use super::*;

fn assign(key: &str, value: &str) -> Entry {
    Entry::Assignment(Assignment::new(
        Key::from_text(key).unwrap(),
        Value::from_text(value).unwrap(),
    ))
}

fn sample() -> Document {
    Document::from_entries(vec![
        Entry::Comment(CommentBlock::from_texts(["# header"]).unwrap()),
        assign("A", "1"),
        Entry::Blank(BlankLine::new()),
        assign("B", "2"),
        assign("A", "3"),
    ])
}

#[test]
fn last_assignment_wins() {
    let doc = sample();
    assert_eq!(doc.get("A").unwrap().items(), ["3"]);
    assert_eq!(doc.find_assignment("B").unwrap().key_text(), "B");
    assert!(doc.find_assignment("C").is_none());
}

#[test]
fn keys_are_distinct_in_first_appearance_order() {
    assert_eq!(sample().keys(), ["A", "B"]);
    assert_eq!(sample().assignments().count(), 3);
}

#[test]
fn set_value_replaces_effective_assignment() {
    let mut doc = sample();
    doc.set_value("A", Value::from_text("9").unwrap()).unwrap();
    assert_eq!(doc.get("A").unwrap().items(), ["9"]);
    // The overridden assignment is untouched
    assert_eq!(doc.assignments().next().unwrap().value.items(), ["1"]);
}

#[test]
fn set_value_keeps_comment_and_layout() {
    let mut doc = Document::new();
    let layout = Layout {
        before_equals: " ".to_string(),
        ..Layout::default()
    };
    let assignment = Assignment::new(
        Key::from_text("K").unwrap(),
        Value::from_text("v").unwrap(),
    )
    .with_comment(Comment::new("# keep").unwrap())
    .with_layout(layout)
    .unwrap();
    doc.append_entry(Entry::Assignment(assignment));

    doc.set_value("K", Value::list(["x", "y"]).unwrap()).unwrap();
    let updated = doc.find_assignment("K").unwrap();
    assert_eq!(updated.comment.as_ref().unwrap().text(), "# keep");
    assert_eq!(updated.layout().before_equals, " ");
}

#[test]
fn set_value_missing_key() {
    let mut doc = sample();
    let err = doc
        .set_value("C", Value::from_text("1").unwrap())
        .unwrap_err();
    assert_eq!(
        err,
        DocumentError::KeyNotFound {
            key: "C".to_string()
        }
    );
    assert_eq!(doc.len(), 5);
}

#[test]
fn set_value_with_insert_appends() {
    let mut doc = sample();
    let options = SetOptions {
        insert_if_missing: true,
    };
    doc.set_value_with("C", Value::from_text("new").unwrap(), options)
        .unwrap();
    assert_eq!(doc.len(), 6);
    assert_eq!(doc.get("C").unwrap().items(), ["new"]);
    assert_eq!(doc.keys(), ["A", "B", "C"]);
}

#[test]
fn insert_with_unrepresentable_key_fails() {
    let mut doc = Document::new();
    let options = SetOptions {
        insert_if_missing: true,
    };
    let err = doc
        .set_value_with("bad\nkey", Value::from_text("1").unwrap(), options)
        .unwrap_err();
    assert!(matches!(err, DocumentError::InvalidKey { .. }), "{err:?}");
    assert!(doc.is_empty());
}

#[test]
fn remove_assignment_takes_last() {
    let mut doc = sample();
    let removed = doc.remove_assignment("A").unwrap();
    assert_eq!(removed.value.items(), ["3"]);
    assert_eq!(doc.get("A").unwrap().items(), ["1"]);
    assert!(doc.remove_assignment("missing").is_err());
}

#[test]
fn entry_index_operations() {
    let mut doc = sample();
    let removed = doc.remove_entry(0).unwrap();
    assert!(matches!(removed, Entry::Comment(_)));
    assert_eq!(
        doc.remove_entry(10).unwrap_err(),
        DocumentError::IndexOutOfRange { index: 10, len: 4 }
    );

    doc.insert_entry(4, Entry::Blank(BlankLine::new())).unwrap();
    assert!(matches!(doc.entries[4], Entry::Blank(_)));
    assert!(doc.insert_entry(9, Entry::Blank(BlankLine::new())).is_err());
}

#[test]
fn line_count_sums_entries() {
    assert_eq!(sample().line_count(), 5);
    assert_eq!(Document::default().line_count(), 0);
}

#[yare::parameterized(
    remove_last_line   = { 2, "A=1\n\n" },
    remove_middle_line = { 1, "A=1\nB=2" },
)]
fn remove_entry_without_final_newline(index: usize, expected: &str) {
    let mut doc = crate::parse_document("A=1\n\nB=2").unwrap();
    assert!(!doc.final_newline);
    doc.remove_entry(index).unwrap();
    let text = crate::compose_document(&doc);
    assert_eq!(text, expected);
    assert_eq!(crate::parse_document(&text).unwrap(), doc);
}

#[test]
fn remove_assignment_on_unterminated_line_keeps_blank() {
    let mut doc = crate::parse_document("A=1\n\nB=2").unwrap();
    doc.remove_assignment("B").unwrap();
    assert_eq!(crate::compose_document(&doc), "A=1\n\n");
}

#[test]
fn append_terminates_previous_last_line() {
    let mut doc = crate::parse_document("A=1").unwrap();
    doc.append_entry(assign("B", "2"));
    assert_eq!(crate::compose_document(&doc), "A=1\nB=2\n");

    let mut doc = crate::parse_document("A=1").unwrap();
    doc.set_value_with(
        "C",
        Value::from_text("3").unwrap(),
        SetOptions {
            insert_if_missing: true,
        },
    )
    .unwrap();
    assert_eq!(crate::compose_document(&doc), "A=1\nC=3\n");
}

#[test]
fn insert_before_unterminated_line_keeps_it_last() {
    let mut doc = crate::parse_document("A=1\nB=2").unwrap();
    doc.insert_entry(1, assign("X", "0")).unwrap();
    assert_eq!(crate::compose_document(&doc), "A=1\nX=0\nB=2");

    doc.insert_entry(3, assign("Y", "9")).unwrap();
    assert_eq!(crate::compose_document(&doc), "A=1\nX=0\nB=2\nY=9\n");
}
