// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete parse tree produced by the engine.

use crate::grammar::{Grammar, RuleId};
use crate::span::Span;

/// One matched span.
///
/// Terminals come from literals, patterns and end of input. A named rule
/// whose body is a terminal or a choice, and whose whole match is a single
/// anonymous terminal, is reported as a terminal carrying that rule. Anonymous sequences and repetitions inside a
/// rule do not get nodes of their own: their children are spliced into the
/// enclosing rule's node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    Terminal {
        rule: Option<RuleId>,
        span: Span,
    },
    NonTerminal {
        rule: RuleId,
        span: Span,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    pub fn span(&self) -> Span {
        match self {
            ParseNode::Terminal { span, .. } | ParseNode::NonTerminal { span, .. } => *span,
        }
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self {
            ParseNode::Terminal { rule, .. } => *rule,
            ParseNode::NonTerminal { rule, .. } => Some(*rule),
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Terminal { .. } => &[],
            ParseNode::NonTerminal { children, .. } => children,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ParseNode::Terminal { .. })
    }

    /// Render the tree the way PEG tools flatten it: terminal text joined
    /// with ` | `, newlines escaped.
    pub fn flatten(&self, source: &str) -> String {
        let mut parts = Vec::new();
        self.collect_terminals(source, &mut parts);
        parts.join(" | ")
    }

    fn collect_terminals(&self, source: &str, out: &mut Vec<String>) {
        match self {
            ParseNode::Terminal { span, .. } => {
                out.push(span.slice(source).replace('\n', "\\n"));
            }
            ParseNode::NonTerminal { children, .. } => {
                for child in children {
                    child.collect_terminals(source, out);
                }
            }
        }
    }
}

/// A successful parse: the root node over the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree<'s> {
    pub source: &'s str,
    pub root: ParseNode,
    /// Byte offset where the start rule stopped.
    pub end: usize,
}

impl ParseTree<'_> {
    pub fn text(&self, node: &ParseNode) -> &str {
        node.span().slice(self.source)
    }

    /// True when the start rule consumed every byte.
    pub fn is_complete(&self) -> bool {
        self.end == self.source.len()
    }

    /// Indented dump of the tree, one node per line.
    pub fn dump(&self, grammar: &Grammar) -> String {
        let mut out = String::new();
        dump_node(&self.root, self.source, grammar, 0, &mut out);
        out
    }
}

fn dump_node(node: &ParseNode, source: &str, grammar: &Grammar, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let name = node.rule().map(|id| grammar.rule_name(id)).unwrap_or("");
    let span = node.span();
    match node {
        ParseNode::Terminal { .. } => {
            out.push_str(&format!(
                "{indent}{name} {}..{} {:?}\n",
                span.start,
                span.end,
                span.slice(source)
            ));
        }
        ParseNode::NonTerminal { children, .. } => {
            out.push_str(&format!("{indent}{name} {}..{}\n", span.start, span.end));
            for child in children {
                dump_node(child, source, grammar, depth + 1, out);
            }
        }
    }
}
