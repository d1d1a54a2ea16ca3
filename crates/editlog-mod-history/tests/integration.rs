// Integration tests for the history system.
//
// These drive the UndoManager the way an editing surface does: mutate a
// buffer, record the edit, and reverse popped entries against the buffer.

use editlog_mod_history::{CaretSnapshot, HistoryConfig, LogEntry, UndoManager};
use proptest::prelude::*;

/// Minimal char-indexed buffer standing in for an editing surface.
struct Doc {
    text: String,
    caret: CaretSnapshot,
    history: UndoManager,
}

fn byte_at(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

impl Doc {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: CaretSnapshot::at(0),
            history: UndoManager::new(HistoryConfig::default()),
        }
    }

    fn splice(&mut self, index: usize, remove: usize, insert: &str) -> String {
        let start = byte_at(&self.text, index);
        let end = byte_at(&self.text, index + remove);
        let removed = self.text[start..end].to_string();
        self.text.replace_range(start..end, insert);
        removed
    }

    fn insert(&mut self, index: usize, text: &str) {
        let before = self.caret;
        self.splice(index, 0, text);
        self.caret = CaretSnapshot::at(index + text.chars().count());
        self.history.record_insert(index, text.chars().count(), before);
    }

    fn delete(&mut self, index: usize, length: usize) {
        let before = self.caret;
        let removed = self.splice(index, length, "");
        self.caret = CaretSnapshot::at(index);
        self.history.record_delete(removed, index, length, before);
    }

    fn replace(&mut self, index: usize, length: usize, text: &str) {
        let before = self.caret;
        let removed = self.splice(index, length, text);
        self.caret = CaretSnapshot::at(index + text.chars().count());
        let inserted = text.chars().count();
        self.history
            .record_replace(removed, index, length, inserted, before);
    }

    fn reverse(&mut self, entry: LogEntry) {
        let now = self.caret;
        let removed = self.splice(entry.index, entry.reversal_span(), entry.restore_text());
        self.caret = entry.caret;
        self.history.finish_replay(entry.invert(removed, now));
    }

    fn undo(&mut self) -> bool {
        match self.history.undo_step() {
            Some(entry) => {
                self.reverse(entry);
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.history.redo_step() {
            Some(entry) => {
                self.reverse(entry);
                true
            }
            None => false,
        }
    }
}

// ── Worked examples ────────────────────────────────────────────────────

#[test]
fn test_insert_undo_redo() {
    let mut doc = Doc::new("abc");
    doc.insert(1, "X");
    assert_eq!(doc.text, "aXbc");
    assert!(doc.undo());
    assert_eq!(doc.text, "abc");
    assert!(doc.redo());
    assert_eq!(doc.text, "aXbc");
}

#[test]
fn test_delete_undo() {
    let mut doc = Doc::new("hello");
    doc.delete(0, 2);
    assert_eq!(doc.text, "llo");
    assert!(doc.undo());
    assert_eq!(doc.text, "hello");
}

#[test]
fn test_replace_undo_redo() {
    let mut doc = Doc::new("cat");
    doc.replace(0, 1, "r");
    assert_eq!(doc.text, "rat");
    assert!(doc.undo());
    assert_eq!(doc.text, "cat");
    assert!(doc.redo());
    assert_eq!(doc.text, "rat");
}

#[test]
fn test_new_edit_after_undo_clears_redo() {
    let mut doc = Doc::new("abc");
    doc.insert(3, "d");
    doc.undo();
    doc.insert(0, "z");
    assert!(!doc.redo());
    assert_eq!(doc.text, "zabc");
}

// ── Round trips ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Edit {
    Insert { at: usize, word: usize },
    Delete { at: usize, span: usize },
    Replace { at: usize, span: usize, word: usize },
}

const WORDS: [&str; 5] = ["x", "yz", "日本", "🌍!", "abc"];

/// Positions are reduced modulo the buffer length when applied, so any
/// generated edit lands inside the current text.
fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0..64usize, 0..WORDS.len()).prop_map(|(at, word)| Edit::Insert { at, word }),
        (0..64usize, 1..8usize).prop_map(|(at, span)| Edit::Delete { at, span }),
        (0..64usize, 1..8usize, 0..WORDS.len())
            .prop_map(|(at, span, word)| Edit::Replace { at, span, word }),
    ]
}

fn apply(doc: &mut Doc, edit: &Edit) {
    let len = doc.text.chars().count();
    match *edit {
        Edit::Insert { at, word } => doc.insert(at % (len + 1), WORDS[word]),
        Edit::Delete { at, span } if len > 0 => {
            let at = at % len;
            doc.delete(at, span.min(len - at));
        }
        Edit::Replace { at, span, word } if len > 0 => {
            let at = at % len;
            doc.replace(at, span.min(len - at), WORDS[word]);
        }
        // Nothing to delete or replace yet.
        _ => doc.insert(0, "seed"),
    }
}

proptest! {
    #[test]
    fn test_n_edits_then_n_undos_restores_original(
        edits in prop::collection::vec(arb_edit(), 1..30)
    ) {
        let mut doc = Doc::new("the quick brown fox");
        doc.caret = CaretSnapshot {
            head: 4,
            anchor: Some(9),
        };
        let original_caret = doc.caret;

        for edit in &edits {
            apply(&mut doc, edit);
        }
        prop_assert_eq!(doc.history.undo_len(), edits.len());
        for _ in 0..edits.len() {
            prop_assert!(doc.undo());
        }

        prop_assert_eq!(doc.text.as_str(), "the quick brown fox");
        prop_assert_eq!(doc.caret, original_caret);
        prop_assert!(!doc.history.can_undo());
    }

    #[test]
    fn test_undo_then_redo_is_identity(
        edits in prop::collection::vec(arb_edit(), 1..15)
    ) {
        let mut doc = Doc::new("lorem ipsum");
        for edit in &edits {
            apply(&mut doc, edit);
        }

        let before = doc.text.clone();
        prop_assert!(doc.undo());
        prop_assert!(doc.redo());
        prop_assert_eq!(doc.text, before);
    }

    #[test]
    fn test_undo_all_then_redo_all_reaches_final_text(
        edits in prop::collection::vec(arb_edit(), 1..20)
    ) {
        let mut doc = Doc::new("");
        for edit in &edits {
            apply(&mut doc, edit);
        }
        let last = doc.text.clone();

        while doc.undo() {}
        prop_assert_eq!(doc.text.as_str(), "");
        while doc.redo() {}
        prop_assert_eq!(doc.history.undo_len(), edits.len());
        prop_assert_eq!(doc.text, last);
    }
}

#[test]
fn test_undo_all_then_redo_all() {
    let mut doc = Doc::new("");
    doc.insert(0, "a");
    doc.insert(1, "b");
    doc.insert(2, "c");
    doc.replace(1, 1, "B");
    doc.delete(0, 1);
    assert_eq!(doc.text, "Bc");

    while doc.undo() {}
    assert_eq!(doc.text, "");

    while doc.redo() {}
    assert_eq!(doc.text, "Bc");
    assert_eq!(doc.history.undo_len(), 5);
}
