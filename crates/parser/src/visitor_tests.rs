// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::grammar::Expr;
use crate::parser::Parser;

fn transform_with(input: &str, grammar: &Grammar) -> SemanticValue {
    let tree = Parser::parse(input, grammar).unwrap();
    transform(&tree, grammar).unwrap()
}

fn document(input: &str) -> Document {
    match transform_with(input, Grammar::updatedb()) {
        SemanticValue::Document(doc) => doc,
        other => panic!("expected document, got {other:?}"),
    }
}

fn only_assignment(input: &str) -> Assignment {
    let doc = document(input);
    match doc.entries.as_slice() {
        [Entry::Assignment(a)] => a.clone(),
        other => panic!("expected one assignment, got {other:?}"),
    }
}

#[test]
fn end_to_end_scenario() {
    let doc = document("PRUNE_BIND_MOUNTS=\"yes\"\n# comment\nPATH=/usr/bin\n");
    assert_eq!(doc.entries.len(), 3);

    let Entry::Assignment(first) = &doc.entries[0] else {
        panic!("expected assignment");
    };
    assert_eq!(first.key_text(), "PRUNE_BIND_MOUNTS");
    assert_eq!(first.value, Value::list(["yes"]).unwrap());
    assert!(first.comment.is_none());

    let Entry::Comment(block) = &doc.entries[1] else {
        panic!("expected comment");
    };
    assert_eq!(block.texts().collect::<Vec<_>>(), ["# comment"]);

    let Entry::Assignment(last) = &doc.entries[2] else {
        panic!("expected assignment");
    };
    assert_eq!(last.key_text(), "PATH");
    assert_eq!(last.value, Value::Word(Word::new("/usr/bin").unwrap()));
    assert!(doc.final_newline);
}

#[test]
fn empty_quotes_are_an_empty_list() {
    let a = only_assignment("KEY=\"\"\n");
    assert_eq!(a.value, Value::List(WordList::default()));
}

#[test]
fn single_quoted_list_keeps_order() {
    let a = only_assignment("PRUNEPATHS='/tmp /var/spool /media'\n");
    assert_eq!(a.value.items(), ["/tmp", "/var/spool", "/media"]);
}

#[test]
fn quoted_scalar_is_unescaped() {
    let a = only_assignment(r#"MSG="a,\"b\"" # note"#);
    assert_eq!(
        a.value,
        Value::Quoted(QuotedString::double(r#"a,"b""#).unwrap())
    );
    assert_eq!(a.comment.unwrap().text(), "# note");
}

#[test]
fn quoted_key() {
    let a = only_assignment("'my key'=1\n");
    assert_eq!(a.key_text(), "my key");
    assert!(matches!(a.key, Key::Quoted(_)));
}

#[test]
fn layout_records_original_blanks() {
    let a = only_assignment("  KEY \t= value   # c \n");
    assert_eq!(a.layout.indent, "  ");
    assert_eq!(a.layout.before_equals, " \t");
    assert_eq!(a.layout.after_equals, " ");
    assert_eq!(a.layout.before_comment, "   ");
    assert_eq!(a.comment.unwrap().text(), "# c ");
    assert_eq!(a.layout.trailing, "");
}

#[test]
fn layout_records_trailing_blanks() {
    let a = only_assignment("KEY=\"a b\"  \n");
    assert_eq!(a.layout.trailing, "  ");
    assert_eq!(a.layout.before_comment, " ");
}

#[test]
fn comment_lines_keep_indent() {
    let doc = document("# one\n\t# two\n");
    let [Entry::Comment(block)] = doc.entries.as_slice() else {
        panic!("expected one comment block");
    };
    assert_eq!(block.lines.len(), 2);
    assert_eq!(block.lines[1].indent, "\t");
    assert_eq!(block.lines[1].comment.text(), "# two");
}

#[test]
fn blank_lines_keep_whitespace() {
    let doc = document("A=1\n  \n\nB=2\n");
    let blanks: Vec<_> = doc
        .entries
        .iter()
        .filter_map(|e| match e {
            Entry::Blank(b) => Some(b.whitespace.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(blanks, ["  ", ""]);
}

#[test]
fn unterminated_last_line() {
    let doc = document("A=1");
    assert!(!doc.final_newline);
    assert_eq!(doc.entries.len(), 1);

    let doc = document("A=1\n   ");
    assert!(!doc.final_newline);
    assert_eq!(
        doc.entries[1],
        Entry::Blank(BlankLine::with_whitespace("   ").unwrap())
    );
}

#[test]
fn empty_document() {
    let doc = document("");
    assert!(doc.is_empty());
    assert!(doc.final_newline);
}

#[test]
fn key_value_grammar_produces_quoted_strings() {
    let value = transform_with("KEY=\"a b\"\n", Grammar::key_value());
    let SemanticValue::Document(doc) = value else {
        panic!("expected document");
    };
    assert_eq!(
        doc.get("KEY"),
        Some(&Value::Quoted(QuotedString::double("a b").unwrap()))
    );
}

#[test]
fn sub_rules_transform_to_their_values() {
    let grammar = Grammar::updatedb().with_start(rules::SINGLE_ASSIGNMENT).unwrap();
    let value = transform_with("KEY = 'v' # c", &grammar);
    let SemanticValue::Assignment(a) = value else {
        panic!("expected assignment");
    };
    assert_eq!(a.value, Value::Quoted(QuotedString::single("v").unwrap()));

    let grammar = Grammar::updatedb().with_start(rules::WORD).unwrap();
    assert_eq!(
        transform_with("word", &grammar),
        SemanticValue::Word(Word::new("word").unwrap())
    );

    let grammar = Grammar::updatedb().with_start(rules::COMMENT_LINE).unwrap();
    let SemanticValue::CommentBlock(block) = transform_with("# x\n", &grammar) else {
        panic!("expected comment block");
    };
    assert_eq!(block.lines.len(), 1);
}

#[test]
fn unknown_rules_become_text() {
    let grammar = Grammar::builder("custom")
        .rule("pair", Expr::seq([Expr::literal("a"), Expr::literal("b")]))
        .start("pair")
        .build()
        .unwrap();
    assert_eq!(
        transform_with("a b", &grammar),
        SemanticValue::Text("a b".to_string())
    );
}

#[test]
fn reused_rule_name_with_wrong_shape_fails() {
    let grammar = Grammar::builder("custom")
        .rule(rules::KEY, Expr::seq([Expr::literal("a"), Expr::literal("b")]))
        .start(rules::KEY)
        .build()
        .unwrap();
    let tree = Parser::parse("ab", &grammar).unwrap();
    let err = transform(&tree, &grammar).unwrap_err();
    assert_eq!(err.rule, rules::KEY);
    assert_eq!((err.start, err.end), (0, 2));
}

struct WordCollector<'g>(&'g Grammar);

impl ParseTreeVisitor for WordCollector<'_> {
    type Output = Vec<String>;
    type Error = std::convert::Infallible;

    fn visit_terminal(
        &mut self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
    ) -> Result<Vec<String>, Self::Error> {
        let is_word = node.rule().map(|id| self.0.rule_name(id)) == Some(rules::WORD);
        Ok(if is_word {
            vec![tree.text(node).to_string()]
        } else {
            Vec::new()
        })
    }

    fn visit_rule(
        &mut self,
        _tree: &ParseTree<'_>,
        _node: &ParseNode,
        children: Vec<Vec<String>>,
    ) -> Result<Vec<String>, Self::Error> {
        Ok(children.concat())
    }
}

#[test]
fn custom_visitor_sees_children_in_order() {
    let grammar = Grammar::updatedb();
    let tree = Parser::parse("PRUNEFS=\"NFS nfs\"\nB=x\n", grammar).unwrap();
    let words = visit_parse_tree(&tree, &mut WordCollector(grammar)).unwrap();
    assert_eq!(words, ["PRUNEFS", "NFS", "nfs", "B", "x"]);
}
