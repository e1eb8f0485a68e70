// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Data-driven PEG grammar definitions.
//!
//! A grammar is a table of named rules, each an [`Expr`] tree. Rules refer to
//! each other by name through [`Expr::Ref`]. [`GrammarBuilder::build`]
//! resolves every reference, compiles every pattern and rejects grammars the
//! engine could loop on, so a [`Grammar`] value is always complete and
//! immutable. Built-in grammars live in [`builtin`].

pub mod builtin;

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors detected while assembling a grammar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    #[error("rule '{rule}' references undefined rule '{target}'")]
    UndefinedRule { rule: String, target: String },

    #[error("start rule '{0}' is not defined")]
    UnknownStart(String),

    #[error("grammar has no start rule")]
    MissingStart,

    #[error("invalid pattern in rule '{rule}': {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("rule '{rule}' repeats an expression that can match without consuming input")]
    NullableRepetition { rule: String },

    #[error("newline cannot be skippable whitespace")]
    NewlineWhitespace,
}

/// A matching expression, the body of a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Exact text.
    Literal(String),
    /// Regular expression, anchored at the cursor when matched.
    Regex(String),
    /// All of these, in order.
    Sequence(Vec<Expr>),
    /// The first of these that matches.
    OrderedChoice(Vec<Expr>),
    ZeroOrMore(Box<Expr>),
    OneOrMore(Box<Expr>),
    Optional(Box<Expr>),
    /// Succeeds only once all input is consumed.
    EndOfInput,
    /// Another rule of the same grammar, by name.
    Ref(String),
}

impl Expr {
    pub fn literal(text: impl Into<String>) -> Expr {
        Expr::Literal(text.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Expr {
        Expr::Regex(pattern.into())
    }

    pub fn rule(name: impl Into<String>) -> Expr {
        Expr::Ref(name.into())
    }

    pub fn seq(items: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Sequence(items.into_iter().collect())
    }

    pub fn choice(items: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::OrderedChoice(items.into_iter().collect())
    }

    pub fn zero_or_more(inner: Expr) -> Expr {
        Expr::ZeroOrMore(Box::new(inner))
    }

    pub fn one_or_more(inner: Expr) -> Expr {
        Expr::OneOrMore(Box::new(inner))
    }

    pub fn optional(inner: Expr) -> Expr {
        Expr::Optional(Box::new(inner))
    }
}

/// Index of a rule inside its [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

/// A named rule as written by the grammar author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub expr: Expr,
}

/// Resolved form of [`Expr`] the engine walks.
#[derive(Debug, Clone)]
pub(crate) enum Op {
    Literal(String),
    Regex(Regex),
    Sequence(Vec<Op>),
    Choice(Vec<Op>),
    ZeroOrMore(Box<Op>),
    OneOrMore(Box<Op>),
    Optional(Box<Op>),
    EndOfInput,
    Rule(RuleId),
}

/// A complete, validated grammar.
#[derive(Clone)]
pub struct Grammar {
    name: String,
    rules: Vec<RuleDef>,
    ops: Vec<Op>,
    index: HashMap<String, RuleId>,
    start: RuleId,
    whitespace: Vec<char>,
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.name)
            .field("start", &self.rule_name(self.start))
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Grammar {
    pub fn builder(name: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the rule parsing starts from.
    pub fn start(&self) -> &str {
        self.rule_name(self.start)
    }

    pub fn whitespace(&self) -> &[char] {
        &self.whitespace
    }

    pub fn rules(&self) -> &[RuleDef] {
        &self.rules
    }

    /// The definition of rule `name`, if any.
    pub fn rule(&self, name: &str) -> Option<&Expr> {
        self.rule_id(name).map(|id| &self.rules[id.0].expr)
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub fn rule_name(&self, id: RuleId) -> &str {
        self.rules.get(id.0).map(|r| r.name.as_str()).unwrap_or("")
    }

    /// A copy of this grammar that starts parsing at rule `name`.
    pub fn with_start(&self, name: &str) -> Result<Grammar, GrammarError> {
        let start = self
            .rule_id(name)
            .ok_or_else(|| GrammarError::UnknownStart(name.to_string()))?;
        Ok(Grammar {
            start,
            ..self.clone()
        })
    }

    pub(crate) fn start_id(&self) -> RuleId {
        self.start
    }

    pub(crate) fn op(&self, id: RuleId) -> &Op {
        &self.ops[id.0]
    }

    pub(crate) fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(&c)
    }
}

/// Collects rules and produces a validated [`Grammar`].
#[derive(Debug, Clone)]
pub struct GrammarBuilder {
    name: String,
    rules: Vec<RuleDef>,
    start: Option<String>,
    whitespace: Vec<char>,
}

impl GrammarBuilder {
    /// New builder; whitespace defaults to blanks and tabs.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            start: None,
            whitespace: vec![' ', '\t'],
        }
    }

    pub fn rule(mut self, name: impl Into<String>, expr: Expr) -> Self {
        self.rules.push(RuleDef {
            name: name.into(),
            expr,
        });
        self
    }

    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn whitespace(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.whitespace = chars.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.whitespace.contains(&'\n') {
            return Err(GrammarError::NewlineWhitespace);
        }

        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            if index.insert(rule.name.clone(), RuleId(i)).is_some() {
                return Err(GrammarError::DuplicateRule(rule.name.clone()));
            }
        }

        let start_name = self.start.ok_or(GrammarError::MissingStart)?;
        let start = *index
            .get(&start_name)
            .ok_or(GrammarError::UnknownStart(start_name))?;

        let ops = self
            .rules
            .iter()
            .map(|rule| compile(&rule.name, &rule.expr, &index))
            .collect::<Result<Vec<_>, _>>()?;

        check_repetitions(&self.rules, &ops)?;

        Ok(Grammar {
            name: self.name,
            rules: self.rules,
            ops,
            index,
            start,
            whitespace: self.whitespace,
        })
    }
}

fn compile(rule: &str, expr: &Expr, index: &HashMap<String, RuleId>) -> Result<Op, GrammarError> {
    let compile_all = |items: &[Expr]| {
        items
            .iter()
            .map(|e| compile(rule, e, index))
            .collect::<Result<Vec<_>, _>>()
    };
    let boxed = |inner: &Expr| compile(rule, inner, index).map(Box::new);

    Ok(match expr {
        Expr::Literal(text) => Op::Literal(text.clone()),
        Expr::Regex(pattern) => {
            let anchored = format!(r"\A(?:{pattern})");
            let regex = Regex::new(&anchored).map_err(|e| GrammarError::InvalidPattern {
                rule: rule.to_string(),
                message: e.to_string(),
            })?;
            Op::Regex(regex)
        }
        Expr::Sequence(items) => Op::Sequence(compile_all(items)?),
        Expr::OrderedChoice(items) => Op::Choice(compile_all(items)?),
        Expr::ZeroOrMore(inner) => Op::ZeroOrMore(boxed(inner)?),
        Expr::OneOrMore(inner) => Op::OneOrMore(boxed(inner)?),
        Expr::Optional(inner) => Op::Optional(boxed(inner)?),
        Expr::EndOfInput => Op::EndOfInput,
        Expr::Ref(target) => match index.get(target) {
            Some(id) => Op::Rule(*id),
            None => {
                return Err(GrammarError::UndefinedRule {
                    rule: rule.to_string(),
                    target: target.clone(),
                })
            }
        },
    })
}

/// Reject repetition over expressions that can succeed on empty input.
///
/// Nullability of rules is a least fixed point: start from "nothing is
/// nullable" and re-evaluate until no rule changes.
fn check_repetitions(rules: &[RuleDef], ops: &[Op]) -> Result<(), GrammarError> {
    let mut nullable = vec![false; ops.len()];
    loop {
        let mut changed = false;
        for (i, op) in ops.iter().enumerate() {
            if !nullable[i] && is_nullable(op, &nullable) {
                nullable[i] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    for (rule, op) in rules.iter().zip(ops) {
        if repeats_nullable(op, &nullable) {
            return Err(GrammarError::NullableRepetition {
                rule: rule.name.clone(),
            });
        }
    }
    Ok(())
}

fn is_nullable(op: &Op, rules: &[bool]) -> bool {
    match op {
        Op::Literal(text) => text.is_empty(),
        Op::Regex(regex) => regex.is_match(""),
        Op::Sequence(items) => items.iter().all(|o| is_nullable(o, rules)),
        Op::Choice(items) => items.iter().any(|o| is_nullable(o, rules)),
        Op::ZeroOrMore(_) | Op::Optional(_) | Op::EndOfInput => true,
        Op::OneOrMore(inner) => is_nullable(inner, rules),
        Op::Rule(id) => rules[id.0],
    }
}

fn repeats_nullable(op: &Op, rules: &[bool]) -> bool {
    match op {
        Op::ZeroOrMore(inner) | Op::OneOrMore(inner) => {
            is_nullable(inner, rules) || repeats_nullable(inner, rules)
        }
        Op::Sequence(items) | Op::Choice(items) => {
            items.iter().any(|o| repeats_nullable(o, rules))
        }
        Op::Optional(inner) => repeats_nullable(inner, rules),
        Op::Literal(_) | Op::Regex(_) | Op::EndOfInput | Op::Rule(_) => false,
    }
}

#[cfg(test)]
#[path = "../grammar_tests/mod.rs"]
mod tests;
