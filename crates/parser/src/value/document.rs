// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-file document and its editing operations.

use super::{Assignment, Entry, Key, Value, ValueError};
use serde::Serialize;
use thiserror::Error;

/// Errors from document queries and edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    #[error("entry index {index} out of range (document has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot insert key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: ValueError,
    },
}

/// Options for [`Document::set_value_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Append a new assignment when the key is absent.
    pub insert_if_missing: bool,
}

/// A parsed configuration file.
///
/// Entries keep the order they had in the source. A key may be assigned
/// more than once; as when the file is sourced by a shell, the last
/// assignment is the effective one and every lookup or edit targets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub entries: Vec<Entry>,
    /// Whether the last line ends with a newline. Only the line that was
    /// parsed without one goes unterminated: edits that change which entry
    /// is last set this back to `true`.
    pub final_newline: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            final_newline: true,
        }
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            final_newline: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
        self.final_newline = true;
    }

    /// Insert before `index`; `index == len` appends.
    pub fn insert_entry(&mut self, index: usize, entry: Entry) -> Result<(), DocumentError> {
        if index > self.entries.len() {
            return Err(DocumentError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if index == self.entries.len() {
            self.final_newline = true;
        }
        self.entries.insert(index, entry);
        Ok(())
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<Entry, DocumentError> {
        if index >= self.entries.len() {
            return Err(DocumentError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.take_entry(index))
    }

    fn take_entry(&mut self, index: usize) -> Entry {
        if index + 1 == self.entries.len() {
            self.final_newline = true;
        }
        self.entries.remove(index)
    }

    /// All assignments in document order, including overridden ones.
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter().filter_map(Entry::as_assignment)
    }

    /// Distinct keys in order of first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for assignment in self.assignments() {
            let key = assignment.key_text();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().rposition(|entry| {
            entry
                .as_assignment()
                .is_some_and(|a| a.key_text() == key)
        })
    }

    /// The effective (last) assignment of `key`.
    pub fn find_assignment(&self, key: &str) -> Option<&Assignment> {
        self.position(key)
            .and_then(|i| self.entries[i].as_assignment())
    }

    pub fn find_assignment_mut(&mut self, key: &str) -> Option<&mut Assignment> {
        let index = self.position(key)?;
        match &mut self.entries[index] {
            Entry::Assignment(a) => Some(a),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find_assignment(key).map(|a| &a.value)
    }

    /// Replace the value of `key`, keeping its comment and layout.
    pub fn set_value(&mut self, key: &str, value: Value) -> Result<(), DocumentError> {
        self.set_value_with(key, value, SetOptions::default())
    }

    pub fn set_value_with(
        &mut self,
        key: &str,
        value: Value,
        options: SetOptions,
    ) -> Result<(), DocumentError> {
        if let Some(assignment) = self.find_assignment_mut(key) {
            assignment.value = value;
            return Ok(());
        }
        if !options.insert_if_missing {
            return Err(DocumentError::KeyNotFound {
                key: key.to_string(),
            });
        }
        let key = Key::from_text(key).map_err(|source| DocumentError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        tracing::debug!(key = key.text(), "appending new assignment");
        self.append_entry(Entry::Assignment(Assignment::new(key, value)));
        Ok(())
    }

    /// Remove the effective assignment of `key` and return it.
    pub fn remove_assignment(&mut self, key: &str) -> Result<Assignment, DocumentError> {
        let index = self.position(key).ok_or_else(|| DocumentError::KeyNotFound {
            key: key.to_string(),
        })?;
        match self.take_entry(index) {
            Entry::Assignment(a) => Ok(a),
            _ => Err(DocumentError::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Number of text lines the document composes to.
    pub fn line_count(&self) -> usize {
        self.entries.iter().map(Entry::line_count).sum()
    }
}
