// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Semantic values: the typed tree a parsed configuration file becomes.
//!
//! ```text
//! Document
//! └── Entry[]
//!     ├── Assignment
//!     │   ├── key: Key (Word | QuotedString)
//!     │   ├── value: Value (Word | QuotedString | WordList)
//!     │   ├── comment: Comment?
//!     │   └── layout: Layout (original blanks)
//!     ├── CommentBlock
//!     │   └── CommentLine[] (indent + Comment)
//!     └── BlankLine
//! ```
//!
//! Every node owns its children; nothing is shared. Constructors validate
//! their input so that a hand-built tree always composes to text the
//! grammar accepts again.

mod document;

pub use document::{Document, DocumentError, SetOptions};

use crate::lexical::{self, Quote};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A value failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid word {0:?}: words are non-empty runs of letters, digits and ._-:/\\()[]{{}}?*+~<>^°!§$%&@`€")]
    InvalidWord(String),

    #[error("text {text:?} cannot be written inside {quote:?} quotes")]
    InvalidQuotedText { text: String, quote: Quote },

    #[error("invalid comment {0:?}: comments start with '#' and span a single line")]
    InvalidComment(String),

    #[error("invalid layout {0:?}: only blanks and tabs are allowed")]
    InvalidWhitespace(String),
}

fn check_blanks(text: &str) -> Result<(), ValueError> {
    if text.chars().all(|c| c == ' ' || c == '\t') {
        Ok(())
    } else {
        Err(ValueError::InvalidWhitespace(text.to_string()))
    }
}

/// An unquoted token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Word(String);

impl Word {
    pub fn new(text: impl Into<String>) -> Result<Self, ValueError> {
        let text = text.into();
        if lexical::is_word(&text) {
            Ok(Word(text))
        } else {
            Err(ValueError::InvalidWord(text))
        }
    }

    /// Wrap a lexeme the `word` rule already matched.
    pub(crate) fn from_lexeme(text: &str) -> Self {
        Word(text.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A quoted string; `text` is the unescaped content between the quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuotedString {
    text: String,
    quote: Quote,
}

impl QuotedString {
    pub fn new(text: impl Into<String>, quote: Quote) -> Result<Self, ValueError> {
        let text = text.into();
        if lexical::is_quotable(&text, quote) {
            Ok(Self { text, quote })
        } else {
            Err(ValueError::InvalidQuotedText { text, quote })
        }
    }

    pub fn double(text: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(text, Quote::Double)
    }

    pub fn single(text: impl Into<String>) -> Result<Self, ValueError> {
        Self::new(text, Quote::Single)
    }

    /// Build from a lexeme matched by a quoted-string rule.
    pub(crate) fn from_lexeme(lexeme: &str, quote: Quote) -> Self {
        Self {
            text: lexical::unquote(lexeme, quote),
            quote,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn quote(&self) -> Quote {
        self.quote
    }
}

/// The blank-separated words of a multi-value quoted assignment, in
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct WordList(Vec<Word>);

impl WordList {
    pub fn new(words: Vec<Word>) -> Self {
        WordList(words)
    }

    /// Validate and collect every item as a [`Word`].
    pub fn from_texts<I, S>(items: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        items
            .into_iter()
            .map(Word::new)
            .collect::<Result<Vec<_>, _>>()
            .map(WordList)
    }

    pub fn words(&self) -> &[Word] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.0.iter().any(|w| w.as_str() == text)
    }

    pub fn push(&mut self, word: Word) {
        self.0.push(word);
    }

    /// Remove every occurrence of `text`; returns how many were removed.
    pub fn remove(&mut self, text: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|w| w.as_str() != text);
        before - self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.0.iter()
    }
}

/// A shell comment including its leading `#`, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Result<Self, ValueError> {
        let text = text.into();
        if text.starts_with('#') && !text.contains('\n') {
            Ok(Comment(text))
        } else {
            Err(ValueError::InvalidComment(text))
        }
    }

    pub(crate) fn from_lexeme(text: &str) -> Self {
        Comment(text.to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// One line of a comment block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentLine {
    /// Blanks before the `#`.
    pub indent: String,
    pub comment: Comment,
}

impl CommentLine {
    pub fn new(comment: Comment) -> Self {
        Self {
            indent: String::new(),
            comment,
        }
    }
}

/// Contiguous comment lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommentBlock {
    pub lines: Vec<CommentLine>,
}

impl CommentBlock {
    /// A block from comment texts, each starting with `#`.
    pub fn from_texts<I, S>(texts: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = texts
            .into_iter()
            .map(|t| Comment::new(t).map(CommentLine::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lines })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.comment.text())
    }
}

/// An empty line; `whitespace` holds any blanks on it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BlankLine {
    pub whitespace: String,
}

impl BlankLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitespace(whitespace: impl Into<String>) -> Result<Self, ValueError> {
        let whitespace = whitespace.into();
        check_blanks(&whitespace)?;
        Ok(Self { whitespace })
    }
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Key {
    Word(Word),
    Quoted(QuotedString),
}

impl Key {
    /// The key's text without quotes.
    pub fn text(&self) -> &str {
        match self {
            Key::Word(w) => w.as_str(),
            Key::Quoted(q) => q.text(),
        }
    }

    /// A bare word when possible, a double-quoted string otherwise.
    pub fn from_text(text: &str) -> Result<Self, ValueError> {
        match Word::new(text) {
            Ok(word) => Ok(Key::Word(word)),
            Err(_) => QuotedString::double(text).map(Key::Quoted),
        }
    }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
    Word(Word),
    Quoted(QuotedString),
    List(WordList),
}

impl Value {
    /// A bare word when `text` is one, a double-quoted string otherwise.
    pub fn from_text(text: &str) -> Result<Self, ValueError> {
        match Word::new(text) {
            Ok(word) => Ok(Value::Word(word)),
            Err(_) => QuotedString::double(text).map(Value::Quoted),
        }
    }

    pub fn list<I, S>(items: I) -> Result<Self, ValueError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WordList::from_texts(items).map(Value::List)
    }

    /// The individual items: one for scalars, every word for lists.
    pub fn items(&self) -> Vec<&str> {
        match self {
            Value::Word(w) => vec![w.as_str()],
            Value::Quoted(q) => vec![q.text()],
            Value::List(list) => list.iter().map(Word::as_str).collect(),
        }
    }

    pub fn as_list(&self) -> Option<&WordList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut WordList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Blank runs around the parts of an assignment line, as found in the
/// source. [`Layout::default`] is the canonical spacing: nothing around
/// `=` and one blank before a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub indent: String,
    pub before_equals: String,
    pub after_equals: String,
    pub before_comment: String,
    pub trailing: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            indent: String::new(),
            before_equals: String::new(),
            after_equals: String::new(),
            before_comment: " ".to_string(),
            trailing: String::new(),
        }
    }
}

impl Layout {
    pub(crate) fn validate(&self) -> Result<(), ValueError> {
        for part in [
            &self.indent,
            &self.before_equals,
            &self.after_equals,
            &self.before_comment,
            &self.trailing,
        ] {
            check_blanks(part)?;
        }
        Ok(())
    }
}

/// One logical configuration line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub key: Key,
    pub value: Value,
    pub comment: Option<Comment>,
    #[serde(skip)]
    pub(crate) layout: Layout,
}

impl Assignment {
    pub fn new(key: Key, value: Value) -> Self {
        Self {
            key,
            value,
            comment: None,
            layout: Layout::default(),
        }
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Replace the spacing of the line. Every part must be blanks only.
    pub fn with_layout(mut self, layout: Layout) -> Result<Self, ValueError> {
        layout.validate()?;
        self.layout = layout;
        Ok(self)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn key_text(&self) -> &str {
        self.key.text()
    }
}

/// A top-level line (or block of lines) of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Assignment(Assignment),
    Comment(CommentBlock),
    Blank(BlankLine),
}

impl Entry {
    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Entry::Assignment(a) => Some(a),
            _ => None,
        }
    }

    /// Number of text lines the entry composes to.
    pub fn line_count(&self) -> usize {
        match self {
            Entry::Assignment(_) | Entry::Blank(_) => 1,
            Entry::Comment(block) => block.lines.len(),
        }
    }
}

/// Any node the transform stage can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SemanticValue {
    Word(Word),
    QuotedString(QuotedString),
    WordList(WordList),
    Comment(Comment),
    CommentBlock(CommentBlock),
    BlankLine(BlankLine),
    Assignment(Assignment),
    Document(Document),
    /// Matched text with no semantic meaning of its own (newlines, `=`).
    Text(String),
}

#[cfg(test)]
#[path = "../value_tests/mod.rs"]
mod tests;
