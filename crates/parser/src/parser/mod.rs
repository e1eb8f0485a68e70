// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recursive-descent PEG engine over a [`Grammar`].
//!
//! The engine is a direct interpreter of the grammar's resolved rule table.
//! Ordered choice commits to the first alternative that matches; repetition
//! is greedy and never backtracks into itself. Before every terminal the
//! grammar's whitespace characters are skipped (newlines never are).
//!
//! On failure the error points at the farthest position any terminal was
//! tried, listing every terminal that was expected there.

mod tree;

pub use tree::{ParseNode, ParseTree};

use crate::grammar::{Grammar, Op, RuleId};
use crate::parse_error::SyntaxError;
use crate::span::Span;

/// What a failed terminal wanted to see.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Expected {
    Rule(RuleId),
    Literal(String),
    EndOfInput,
}

/// Farthest failure seen so far.
#[derive(Debug, Default)]
struct Farthest {
    pos: usize,
    expected: Vec<Expected>,
}

/// Result of one successful expression match.
struct Match {
    end: usize,
    nodes: Vec<ParseNode>,
}

impl Match {
    fn empty(pos: usize) -> Self {
        Self {
            end: pos,
            nodes: Vec::new(),
        }
    }

    fn terminal(start: usize, end: usize) -> Self {
        Self {
            end,
            nodes: vec![ParseNode::Terminal {
                rule: None,
                span: Span::new(start, end),
            }],
        }
    }
}

/// Grammar interpreter for one input text.
///
/// # Examples
///
/// ```ignore
/// use cm_parser::{Grammar, Parser};
///
/// let tree = Parser::parse("PRUNE_BIND_MOUNTS=\"yes\"\n", Grammar::updatedb())?;
/// assert!(tree.is_complete());
/// # Ok::<(), cm_parser::SyntaxError>(())
/// ```
pub struct Parser<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
    farthest: Farthest,
}

impl<'g, 's> Parser<'g, 's> {
    /// Parse `source` from the grammar's start rule.
    ///
    /// The start rule does not have to consume all input unless it ends in
    /// end-of-input, as the document rules of the built-in grammars do.
    pub fn parse(source: &'s str, grammar: &'g Grammar) -> Result<ParseTree<'s>, SyntaxError> {
        let mut parser = Parser {
            grammar,
            source,
            farthest: Farthest::default(),
        };
        let start = grammar.start_id();
        match parser.eval_rule(start, 0) {
            Some(m) => {
                let root = m.nodes.into_iter().next().unwrap_or(ParseNode::NonTerminal {
                    rule: start,
                    span: Span::empty(0),
                    children: Vec::new(),
                });
                tracing::debug!(
                    grammar = grammar.name(),
                    start = grammar.start(),
                    consumed = m.end,
                    "parsed"
                );
                Ok(ParseTree {
                    source,
                    root,
                    end: m.end,
                })
            }
            None => {
                let err = parser.error();
                tracing::debug!(grammar = grammar.name(), error = %err, "parse failed");
                Err(err)
            }
        }
    }

    fn error(&self) -> SyntaxError {
        let mut names: Vec<String> = Vec::new();
        for expected in &self.farthest.expected {
            let name = match expected {
                Expected::Rule(id) => self.grammar.rule_name(*id).to_string(),
                Expected::Literal(text) => format!("'{}'", text.replace('\n', "\\n")),
                Expected::EndOfInput => "end of input".to_string(),
            };
            if !names.contains(&name) {
                names.push(name);
            }
        }
        let expected = if names.is_empty() {
            self.grammar.start().to_string()
        } else {
            names.join(" or ")
        };
        SyntaxError::at(self.source, self.farthest.pos, expected)
    }

    fn fail(&mut self, pos: usize, expected: Expected) {
        if pos > self.farthest.pos {
            self.farthest.pos = pos;
            self.farthest.expected.clear();
        }
        if pos == self.farthest.pos && !self.farthest.expected.contains(&expected) {
            self.farthest.expected.push(expected);
        }
    }

    fn skip_whitespace(&self, pos: usize) -> usize {
        let rest = &self.source[pos..];
        let skipped: usize = rest
            .chars()
            .take_while(|c| self.grammar.is_whitespace(*c))
            .map(char::len_utf8)
            .sum();
        pos + skipped
    }

    /// Match a named rule and wrap what it produced in a node for it.
    fn eval_rule(&mut self, id: RuleId, pos: usize) -> Option<Match> {
        let grammar = self.grammar;
        let op = grammar.op(id);
        let m = self.eval(op, pos, id)?;

        let span = match (m.nodes.first(), m.nodes.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::empty(pos),
        };
        // Sequences and repetitions keep their node even around one terminal,
        // so a document holding only end of input is still a document.
        let single_terminal = !matches!(
            op,
            Op::Sequence(_) | Op::ZeroOrMore(_) | Op::OneOrMore(_)
        ) && matches!(
            m.nodes.as_slice(),
            [ParseNode::Terminal { rule: None, .. }]
        );
        let node = if single_terminal {
            ParseNode::Terminal {
                rule: Some(id),
                span,
            }
        } else {
            ParseNode::NonTerminal {
                rule: id,
                span,
                children: m.nodes,
            }
        };
        Some(Match {
            end: m.end,
            nodes: vec![node],
        })
    }

    /// Match `op` at `pos`. `rule` is the innermost named rule, used to
    /// describe failed patterns.
    fn eval(&mut self, op: &Op, pos: usize, rule: RuleId) -> Option<Match> {
        match op {
            Op::Literal(text) => {
                let start = self.skip_whitespace(pos);
                if self.source[start..].starts_with(text.as_str()) {
                    Some(Match::terminal(start, start + text.len()))
                } else {
                    self.fail(start, Expected::Literal(text.clone()));
                    None
                }
            }
            Op::Regex(regex) => {
                let start = self.skip_whitespace(pos);
                match regex.find(&self.source[start..]) {
                    Some(found) => Some(Match::terminal(start, start + found.end())),
                    None => {
                        self.fail(start, Expected::Rule(rule));
                        None
                    }
                }
            }
            Op::Sequence(items) => {
                let mut m = Match::empty(pos);
                for item in items {
                    let next = self.eval(item, m.end, rule)?;
                    m.end = next.end;
                    m.nodes.extend(next.nodes);
                }
                Some(m)
            }
            Op::Choice(items) => items.iter().find_map(|item| self.eval(item, pos, rule)),
            Op::ZeroOrMore(inner) => Some(self.repeat(inner, Match::empty(pos), rule)),
            Op::OneOrMore(inner) => {
                let first = self.eval(inner, pos, rule)?;
                self.ensure_progress(pos, first.end, rule);
                Some(self.repeat(inner, first, rule))
            }
            Op::Optional(inner) => Some(
                self.eval(inner, pos, rule)
                    .unwrap_or_else(|| Match::empty(pos)),
            ),
            Op::EndOfInput => {
                let start = self.skip_whitespace(pos);
                if start == self.source.len() {
                    Some(Match::terminal(start, start))
                } else {
                    self.fail(start, Expected::EndOfInput);
                    None
                }
            }
            Op::Rule(id) => self.eval_rule(*id, pos),
        }
    }

    fn repeat(&mut self, inner: &Op, mut acc: Match, rule: RuleId) -> Match {
        while let Some(next) = self.eval(inner, acc.end, rule) {
            self.ensure_progress(acc.end, next.end, rule);
            acc.end = next.end;
            acc.nodes.extend(next.nodes);
        }
        acc
    }

    /// A repetition that matched without consuming input would loop
    /// forever. Grammar validation rules this out, so reaching it means the
    /// grammar definition itself is corrupt.
    #[allow(clippy::panic)]
    fn ensure_progress(&self, before: usize, after: usize, rule: RuleId) {
        if after <= before {
            panic!(
                "internal invariant violated: repetition in rule '{}' of grammar '{}' made no progress at byte {}",
                self.grammar.rule_name(rule),
                self.grammar.name(),
                before
            );
        }
    }
}

#[cfg(test)]
#[path = "../parser_tests/mod.rs"]
mod tests;
