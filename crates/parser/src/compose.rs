// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialization of semantic values back to configuration text.
//!
//! Composition is the inverse of [`crate::transform`]: nodes that came out
//! of a parse carry their original layout and compose back to the same
//! bytes. The one normalization is [`WordList`], which is always written
//! double-quoted with single blanks between the words.

use crate::lexical::{self, Quote};
use crate::value::{
    Assignment, BlankLine, Comment, CommentBlock, CommentLine, Document, Entry, Key,
    QuotedString, SemanticValue, Value, Word, WordList,
};

/// A value with a textual form.
pub trait Compose {
    /// Append this value's text to `out`.
    fn compose_into(&self, out: &mut String);

    fn compose(&self) -> String {
        let mut out = String::new();
        self.compose_into(&mut out);
        out
    }
}

impl Compose for Word {
    fn compose_into(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

impl Compose for QuotedString {
    fn compose_into(&self, out: &mut String) {
        let q = self.quote().as_char();
        out.push(q);
        out.push_str(&lexical::escape(self.text(), self.quote()));
        out.push(q);
    }
}

impl Compose for WordList {
    fn compose_into(&self, out: &mut String) {
        let q = Quote::Double.as_char();
        out.push(q);
        for (i, word) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            word.compose_into(out);
        }
        out.push(q);
    }
}

impl Compose for Comment {
    fn compose_into(&self, out: &mut String) {
        out.push_str(self.text());
    }
}

impl Compose for Key {
    fn compose_into(&self, out: &mut String) {
        match self {
            Key::Word(w) => w.compose_into(out),
            Key::Quoted(q) => q.compose_into(out),
        }
    }
}

impl Compose for Value {
    fn compose_into(&self, out: &mut String) {
        match self {
            Value::Word(w) => w.compose_into(out),
            Value::Quoted(q) => q.compose_into(out),
            Value::List(l) => l.compose_into(out),
        }
    }
}

/// The line without its terminating newline.
impl Compose for Assignment {
    fn compose_into(&self, out: &mut String) {
        let layout = &self.layout;
        out.push_str(&layout.indent);
        self.key.compose_into(out);
        out.push_str(&layout.before_equals);
        out.push('=');
        out.push_str(&layout.after_equals);
        self.value.compose_into(out);
        if let Some(comment) = &self.comment {
            out.push_str(&layout.before_comment);
            comment.compose_into(out);
        }
        out.push_str(&layout.trailing);
    }
}

impl Compose for CommentLine {
    fn compose_into(&self, out: &mut String) {
        out.push_str(&self.indent);
        self.comment.compose_into(out);
    }
}

/// Every line newline-terminated.
impl Compose for CommentBlock {
    fn compose_into(&self, out: &mut String) {
        for line in &self.lines {
            line.compose_into(out);
            out.push('\n');
        }
    }
}

impl Compose for BlankLine {
    fn compose_into(&self, out: &mut String) {
        out.push_str(&self.whitespace);
    }
}

impl Compose for Document {
    fn compose_into(&self, out: &mut String) {
        let start = out.len();
        for entry in &self.entries {
            match entry {
                Entry::Assignment(a) => {
                    a.compose_into(out);
                    out.push('\n');
                }
                Entry::Comment(block) => block.compose_into(out),
                Entry::Blank(blank) => {
                    blank.compose_into(out);
                    out.push('\n');
                }
            }
        }
        if !self.final_newline && out.len() > start && out.ends_with('\n') {
            out.pop();
        }
    }
}

impl Compose for SemanticValue {
    fn compose_into(&self, out: &mut String) {
        match self {
            SemanticValue::Word(v) => v.compose_into(out),
            SemanticValue::QuotedString(v) => v.compose_into(out),
            SemanticValue::WordList(v) => v.compose_into(out),
            SemanticValue::Comment(v) => v.compose_into(out),
            SemanticValue::CommentBlock(v) => v.compose_into(out),
            SemanticValue::BlankLine(v) => v.compose_into(out),
            SemanticValue::Assignment(v) => v.compose_into(out),
            SemanticValue::Document(v) => v.compose_into(out),
            SemanticValue::Text(text) => out.push_str(text),
        }
    }
}

/// Text form of any semantic value.
pub fn compose(value: &SemanticValue) -> String {
    value.compose()
}

/// Text form of a document. Never fails.
pub fn compose_document(document: &Document) -> String {
    document.compose()
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
