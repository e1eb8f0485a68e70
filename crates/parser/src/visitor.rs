// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bottom-up traversal of parse trees and the semantic transform.

use crate::grammar::builtin as rules;
use crate::grammar::Grammar;
use crate::lexical::Quote;
use crate::parser::{ParseNode, ParseTree};
use crate::span::Span;
use crate::value::{
    Assignment, BlankLine, Comment, CommentBlock, CommentLine, Document, Entry, Key, Layout,
    QuotedString, SemanticValue, Value, Word, WordList,
};
use thiserror::Error;

/// Visitor over a concrete parse tree.
///
/// Children are always visited before their parent, and the parent receives
/// the children's results in source order. Returning an error stops the
/// walk.
///
/// # Example: Collect Words
///
/// ```ignore
/// use cm_parser::{visit_parse_tree, Grammar, ParseNode, ParseTree, ParseTreeVisitor, Parser};
///
/// struct Words<'g>(&'g Grammar);
///
/// impl ParseTreeVisitor for Words<'_> {
///     type Output = Vec<String>;
///     type Error = std::convert::Infallible;
///
///     fn visit_terminal(&mut self, tree: &ParseTree<'_>, node: &ParseNode) -> Result<Vec<String>, Self::Error> {
///         let is_word = node.rule().map(|id| self.0.rule_name(id)) == Some("word");
///         Ok(if is_word { vec![tree.text(node).to_string()] } else { Vec::new() })
///     }
///
///     fn visit_rule(&mut self, _: &ParseTree<'_>, _: &ParseNode, children: Vec<Vec<String>>) -> Result<Vec<String>, Self::Error> {
///         Ok(children.concat())
///     }
/// }
///
/// let grammar = Grammar::updatedb();
/// let tree = Parser::parse("PRUNEFS=\"NFS nfs\"\n", grammar)?;
/// let words = visit_parse_tree(&tree, &mut Words(grammar))?;
/// assert_eq!(words, ["PRUNEFS", "NFS", "nfs"]);
/// ```
pub trait ParseTreeVisitor {
    type Output;
    type Error;

    fn visit_terminal(
        &mut self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
    ) -> Result<Self::Output, Self::Error>;

    fn visit_rule(
        &mut self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
        children: Vec<Self::Output>,
    ) -> Result<Self::Output, Self::Error>;
}

/// Walk `tree` bottom-up with `visitor`.
pub fn visit_parse_tree<V: ParseTreeVisitor>(
    tree: &ParseTree<'_>,
    visitor: &mut V,
) -> Result<V::Output, V::Error> {
    visit_node(tree, &tree.root, visitor)
}

fn visit_node<V: ParseTreeVisitor>(
    tree: &ParseTree<'_>,
    node: &ParseNode,
    visitor: &mut V,
) -> Result<V::Output, V::Error> {
    match node {
        ParseNode::Terminal { .. } => visitor.visit_terminal(tree, node),
        ParseNode::NonTerminal { children, .. } => {
            let mut results = Vec::with_capacity(children.len());
            for child in children {
                results.push(visit_node(tree, child, visitor)?);
            }
            visitor.visit_rule(tree, node, results)
        }
    }
}

/// A parse tree did not have the shape its rule name promises.
///
/// Only reachable with a hand-written grammar that reuses the built-in rule
/// names for different expressions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("rule '{rule}' at bytes {start}..{end} does not have the expected shape")]
pub struct TransformError {
    pub rule: String,
    pub start: usize,
    pub end: usize,
}

/// Turn a parse tree of a built-in grammar into semantic values.
///
/// Rules with no semantic meaning of their own pass a single child through
/// or become [`SemanticValue::Text`] holding the matched text.
pub fn transform(tree: &ParseTree<'_>, grammar: &Grammar) -> Result<SemanticValue, TransformError> {
    let mut visitor = SemanticVisitor { grammar };
    let root = visit_parse_tree(tree, &mut visitor)?;
    Ok(root.fragment.into_value())
}

/// Intermediate result of the semantic visitor: a value plus where it was.
struct Visited {
    span: Span,
    fragment: Fragment,
}

enum Fragment {
    Value(SemanticValue),
    Line(CommentLine),
    Newline,
    /// End of input reached in place of a newline.
    End,
}

impl Fragment {
    fn into_value(self) -> SemanticValue {
        match self {
            Fragment::Value(value) => value,
            Fragment::Line(line) => SemanticValue::CommentBlock(CommentBlock { lines: vec![line] }),
            Fragment::Newline => SemanticValue::Text("\n".to_string()),
            Fragment::End => SemanticValue::Text(String::new()),
        }
    }

    fn is_line_end(&self) -> bool {
        matches!(self, Fragment::Newline | Fragment::End)
    }
}

struct SemanticVisitor<'g> {
    grammar: &'g Grammar,
}

/// Text between two positions. Only blanks can sit between tokens of one
/// line, so the result is always valid layout.
fn gap(source: &str, from: usize, to: usize) -> String {
    source.get(from..to).unwrap_or("").to_string()
}

/// Blanks between the start of the line holding `pos` and `pos`.
fn indent_before(source: &str, pos: usize) -> String {
    let line_start = source[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    gap(source, line_start, pos)
}

impl SemanticVisitor<'_> {
    fn rule_name(&self, node: &ParseNode) -> &str {
        node.rule().map(|id| self.grammar.rule_name(id)).unwrap_or("")
    }

    fn malformed(&self, node: &ParseNode) -> TransformError {
        let span = node.span();
        TransformError {
            rule: self.rule_name(node).to_string(),
            start: span.start,
            end: span.end,
        }
    }

    fn key(&self, node: &ParseNode, visited: Visited) -> Result<Key, TransformError> {
        match visited.fragment {
            Fragment::Value(SemanticValue::Word(w)) => Ok(Key::Word(w)),
            Fragment::Value(SemanticValue::QuotedString(q)) => Ok(Key::Quoted(q)),
            _ => Err(self.malformed(node)),
        }
    }

    fn value(&self, node: &ParseNode, visited: Visited) -> Result<Value, TransformError> {
        match visited.fragment {
            Fragment::Value(SemanticValue::Word(w)) => Ok(Value::Word(w)),
            Fragment::Value(SemanticValue::QuotedString(q)) => Ok(Value::Quoted(q)),
            Fragment::Value(SemanticValue::WordList(l)) => Ok(Value::List(l)),
            _ => Err(self.malformed(node)),
        }
    }

    /// `key '=' value comment? line_end?`, shared by both assignment forms.
    fn assignment(
        &self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
        children: Vec<Visited>,
    ) -> Result<(Assignment, Option<Visited>), TransformError> {
        let source = tree.source;
        let mut children = children.into_iter();
        let (Some(key), Some(equals), Some(value)) =
            (children.next(), children.next(), children.next())
        else {
            return Err(self.malformed(node));
        };

        let mut comment = None;
        let mut line_end = None;
        for child in children {
            let is_comment = matches!(child.fragment, Fragment::Value(SemanticValue::Comment(_)));
            if is_comment && comment.is_none() && line_end.is_none() {
                comment = Some(child);
            } else if child.fragment.is_line_end() && line_end.is_none() {
                line_end = Some(child);
            } else {
                return Err(self.malformed(node));
            }
        }

        let mut layout = Layout {
            indent: indent_before(source, key.span.start),
            before_equals: gap(source, key.span.end, equals.span.start),
            after_equals: gap(source, equals.span.end, value.span.start),
            ..Layout::default()
        };
        let mut last_end = value.span.end;
        let comment = match comment {
            Some(Visited {
                span,
                fragment: Fragment::Value(SemanticValue::Comment(c)),
            }) => {
                layout.before_comment = gap(source, value.span.end, span.start);
                last_end = span.end;
                Some(c)
            }
            _ => None,
        };
        if let Some(end) = &line_end {
            layout.trailing = gap(source, last_end, end.span.start);
        }

        let assignment = Assignment {
            key: self.key(node, key)?,
            value: self.value(node, value)?,
            comment,
            layout,
        };
        Ok((assignment, line_end))
    }

    fn document(
        &self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
        children: Vec<Visited>,
    ) -> Result<Document, TransformError> {
        let source = tree.source;
        let mut entries = Vec::with_capacity(children.len());
        let start = node.span().start;
        let mut prev_end = source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        for child in children {
            match child.fragment {
                Fragment::Value(SemanticValue::Assignment(a)) => entries.push(Entry::Assignment(a)),
                Fragment::Value(SemanticValue::CommentBlock(b)) => entries.push(Entry::Comment(b)),
                Fragment::Newline => entries.push(Entry::Blank(BlankLine {
                    whitespace: indent_before(source, child.span.start),
                })),
                // End of input: blanks after the last newline form an
                // unterminated blank line.
                Fragment::Value(SemanticValue::Text(ref t)) if t.is_empty() => {
                    let whitespace = gap(source, prev_end, child.span.start);
                    if !whitespace.is_empty() {
                        entries.push(Entry::Blank(BlankLine { whitespace }));
                    }
                }
                _ => return Err(self.malformed(node)),
            }
            prev_end = child.span.end;
        }
        Ok(Document {
            entries,
            final_newline: source.is_empty() || source.ends_with('\n'),
        })
    }
}

impl ParseTreeVisitor for SemanticVisitor<'_> {
    type Output = Visited;
    type Error = TransformError;

    fn visit_terminal(
        &mut self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
    ) -> Result<Visited, TransformError> {
        let text = tree.text(node);
        let fragment = match self.rule_name(node) {
            rules::WORD => Fragment::Value(SemanticValue::Word(Word::from_lexeme(text))),
            rules::DOUBLE_QUOTED_STRING => Fragment::Value(SemanticValue::QuotedString(
                QuotedString::from_lexeme(text, Quote::Double),
            )),
            rules::SINGLE_QUOTED_STRING => Fragment::Value(SemanticValue::QuotedString(
                QuotedString::from_lexeme(text, Quote::Single),
            )),
            rules::COMMENT => Fragment::Value(SemanticValue::Comment(Comment::from_lexeme(text))),
            rules::NEWLINE => Fragment::Newline,
            rules::LINE_END if text.is_empty() => Fragment::End,
            rules::LINE_END => Fragment::Newline,
            _ => Fragment::Value(SemanticValue::Text(text.to_string())),
        };
        Ok(Visited {
            span: node.span(),
            fragment,
        })
    }

    fn visit_rule(
        &mut self,
        tree: &ParseTree<'_>,
        node: &ParseNode,
        children: Vec<Visited>,
    ) -> Result<Visited, TransformError> {
        let span = node.span();
        let fragment = match self.rule_name(node) {
            rules::MAYBE_QUOTED_WORD
            | rules::KEY
            | rules::SINGLE_VALUE
            | rules::QUOTED_VALUES
            | rules::LINE_END => {
                let mut children = children;
                match (children.pop(), children.is_empty()) {
                    (Some(only), true) => only.fragment,
                    _ => return Err(self.malformed(node)),
                }
            }
            rules::MULTIPLE_VALUES_BLANK_SEPARATED => {
                let mut words = Vec::with_capacity(children.len());
                for child in children {
                    match child.fragment {
                        Fragment::Value(SemanticValue::Word(w)) => words.push(w),
                        _ => return Err(self.malformed(node)),
                    }
                }
                Fragment::Value(SemanticValue::WordList(WordList::new(words)))
            }
            rules::DOUBLE_QUOTED_VALUES | rules::SINGLE_QUOTED_VALUES => children
                .into_iter()
                .find_map(|child| match child.fragment {
                    Fragment::Value(SemanticValue::WordList(list)) => {
                        Some(Fragment::Value(SemanticValue::WordList(list)))
                    }
                    _ => None,
                })
                .ok_or_else(|| self.malformed(node))?,
            rules::SINGLE_ASSIGNMENT => {
                let (assignment, _) = self.assignment(tree, node, children)?;
                Fragment::Value(SemanticValue::Assignment(assignment))
            }
            rules::MULTI_VALUE_QUOTED_ASSIGNMENT => {
                let (assignment, line_end) = self.assignment(tree, node, children)?;
                if line_end.is_none() {
                    return Err(self.malformed(node));
                }
                Fragment::Value(SemanticValue::Assignment(assignment))
            }
            rules::ASSIGNMENT_LINE => {
                let mut children = children.into_iter();
                match (children.next(), children.next(), children.next()) {
                    (
                        Some(Visited {
                            span: inner,
                            fragment: Fragment::Value(SemanticValue::Assignment(mut assignment)),
                        }),
                        Some(end),
                        None,
                    ) if end.fragment.is_line_end() => {
                        assignment.layout.trailing = gap(tree.source, inner.end, end.span.start);
                        Fragment::Value(SemanticValue::Assignment(assignment))
                    }
                    _ => return Err(self.malformed(node)),
                }
            }
            rules::COMMENT_LINE => {
                let mut children = children.into_iter();
                match (children.next(), children.next(), children.next()) {
                    (
                        Some(Visited {
                            span: inner,
                            fragment: Fragment::Value(SemanticValue::Comment(comment)),
                        }),
                        Some(end),
                        None,
                    ) if end.fragment.is_line_end() => Fragment::Line(CommentLine {
                        indent: indent_before(tree.source, inner.start),
                        comment,
                    }),
                    _ => return Err(self.malformed(node)),
                }
            }
            rules::COMMENT_BLOCK => {
                let mut lines = Vec::with_capacity(children.len());
                for child in children {
                    match child.fragment {
                        Fragment::Line(line) => lines.push(line),
                        _ => return Err(self.malformed(node)),
                    }
                }
                Fragment::Value(SemanticValue::CommentBlock(CommentBlock { lines }))
            }
            rules::DOCUMENT => {
                Fragment::Value(SemanticValue::Document(self.document(tree, node, children)?))
            }
            _ => Fragment::Value(SemanticValue::Text(tree.text(node).to_string())),
        };
        Ok(Visited { span, fragment })
    }
}

#[cfg(test)]
#[path = "visitor_tests.rs"]
mod tests;
