/// Core types for recorded edits.
use serde::{Deserialize, Serialize};

/// Caret and selection state captured alongside an edit.
///
/// Offsets are char indices into the buffer. Kept independent of the
/// core crate's `Caret` so the log has no dependency on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaretSnapshot {
    /// Char offset of the caret.
    pub head: usize,
    /// Selection anchor, if a selection was active.
    pub anchor: Option<usize>,
}

impl CaretSnapshot {
    /// A caret at `head` with no selection.
    pub fn at(head: usize) -> Self {
        Self { head, anchor: None }
    }
}

/// The kind of edit an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    Insert,
    Delete,
    Replace,
}

/// A single reversible edit.
///
/// `length` is the number of chars the edit left in the buffer at `index`
/// for `Insert` and `Replace`, and the number of chars removed for `Delete`.
/// `data` holds the text that reversal puts back: empty for `Insert`,
/// the removed text for `Delete`, the replaced-out text for `Replace`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: OperationKind,
    /// Char index where the edit occurred.
    pub index: usize,
    pub length: usize,
    pub data: String,
    /// Caret state to restore when this entry is reversed.
    pub caret: CaretSnapshot,
}

impl LogEntry {
    pub fn insert(index: usize, length: usize, caret: CaretSnapshot) -> Self {
        Self {
            kind: OperationKind::Insert,
            index,
            length,
            data: String::new(),
            caret,
        }
    }

    pub fn delete(removed: String, index: usize, length: usize, caret: CaretSnapshot) -> Self {
        Self {
            kind: OperationKind::Delete,
            index,
            length,
            data: removed,
            caret,
        }
    }

    pub fn replace(
        replaced_out: String,
        index: usize,
        inserted_length: usize,
        caret: CaretSnapshot,
    ) -> Self {
        Self {
            kind: OperationKind::Replace,
            index,
            length: inserted_length,
            data: replaced_out,
            caret,
        }
    }

    /// Number of chars currently at `index` that reversing this entry removes.
    pub fn reversal_span(&self) -> usize {
        match self.kind {
            OperationKind::Insert | OperationKind::Replace => self.length,
            OperationKind::Delete => 0,
        }
    }

    /// Char offset just past the reversal span.
    pub fn reversal_end(&self) -> usize {
        self.index + self.reversal_span()
    }

    /// Text that reversal inserts at `index` after removing the span.
    pub fn restore_text(&self) -> &str {
        &self.data
    }

    /// Builds the entry that undoes this entry's reversal.
    ///
    /// `removed` is the text that occupied the reversal span before it was
    /// removed, and `caret` the caret state just before the reversal.
    pub fn invert(&self, removed: String, caret: CaretSnapshot) -> LogEntry {
        match self.kind {
            OperationKind::Insert => LogEntry::delete(removed, self.index, self.length, caret),
            OperationKind::Delete => {
                LogEntry::insert(self.index, self.data.chars().count(), caret)
            }
            OperationKind::Replace => {
                LogEntry::replace(removed, self.index, self.data.chars().count(), caret)
            }
        }
    }
}
