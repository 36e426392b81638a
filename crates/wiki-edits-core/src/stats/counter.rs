//! Editor edit counter

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::{EditRecord, ANONYMOUS};

/// One row of a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorCount {
    pub editor: String,
    pub edits: usize,
}

/// Edit counts keyed by editor name.
///
/// Counts only ever grow. Editors are remembered in the order they were first
/// seen so that [`EditorCounter::ranked`] breaks ties deterministically.
#[derive(Debug, Clone, Default)]
pub struct EditorCounter {
    counts: HashMap<String, usize>,
    discovery: Vec<String>,
}

impl EditorCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one edit for `editor`, creating the entry at 1 if absent
    pub fn increment(&mut self, editor: &str) {
        self.add(editor, 1);
    }

    fn add(&mut self, editor: &str, n: usize) {
        let editor = if editor.trim().is_empty() {
            ANONYMOUS
        } else {
            editor
        };
        match self.counts.get_mut(editor) {
            Some(count) => *count += n,
            None => {
                self.counts.insert(editor.to_string(), n);
                self.discovery.push(editor.to_string());
            }
        }
    }

    /// Count every record's editor
    pub fn merge(&mut self, records: &[EditRecord]) {
        for record in records {
            self.increment(&record.editor);
        }
    }

    /// Fold another counter into this one
    pub fn absorb(&mut self, other: &EditorCounter) {
        for editor in &other.discovery {
            self.add(editor, other.counts[editor]);
        }
    }

    pub fn get(&self, editor: &str) -> usize {
        self.counts.get(editor).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn unique_editors(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All editors, most edits first; ties keep discovery order
    pub fn ranked(&self) -> Vec<EditorCount> {
        let mut ranked: Vec<EditorCount> = self
            .discovery
            .iter()
            .map(|editor| EditorCount {
                editor: editor.clone(),
                edits: self.counts[editor],
            })
            .collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.edits.cmp(&a.edits));
        ranked
    }

    /// The `n` most active editors
    pub fn top(&self, n: usize) -> Vec<EditorCount> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl PartialEq for EditorCounter {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for EditorCounter {}
