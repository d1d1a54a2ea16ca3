//! Text-input surface combining a buffer, caret, and undo/redo history.
//!
//! A `TextInput` owns its `TextBuffer`, `Caret`, and an `UndoManager` with
//! the undo and redo logs. Edits are validated, applied to the buffer, and
//! then recorded. Undo and redo reverse popped entries against the buffer.
//! Event dispatch lives in the `dispatch` submodule.

mod dispatch;

use std::rc::Rc;

use editlog_config::InputConfig;

use crate::buffer::TextBuffer;
use crate::caret::Caret;
use crate::clipboard::{Clipboard, PasteTicket};
use crate::events::{EventSource, Subscription};
use crate::filter::CharFilter;
use crate::history::{history_config, LogEntry, UndoManager};

/// A single-owner editing surface.
pub struct TextInput {
    buffer: TextBuffer,
    caret: Caret,
    history: UndoManager,
    filter: CharFilter,
    max_length: Option<usize>,
    clear_history_on_blur: bool,
    focused: bool,
    /// Bumped on every blur; paste tickets from an older epoch are stale.
    focus_epoch: u64,
    paste_serial: u64,
    pending_paste: Option<PasteTicket>,
    clipboard: Box<dyn Clipboard>,
    subscription: Option<Subscription>,
    /// Monotonic counter bumped on every buffer mutation.
    content_version: u64,
}

impl std::fmt::Debug for TextInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInput")
            .field("len_chars", &self.buffer.len_chars())
            .field("caret", &self.caret)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .field("focused", &self.focused)
            .field("subscription", &self.subscription)
            .field("content_version", &self.content_version)
            .finish()
    }
}

impl TextInput {
    /// Creates an empty, unfocused surface.
    pub fn new(config: &InputConfig, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            buffer: TextBuffer::new(),
            caret: Caret::new(),
            history: UndoManager::new(history_config(config)),
            filter: CharFilter::from_config(config),
            max_length: config.length_limit(),
            clear_history_on_blur: config.clear_history_on_blur,
            focused: false,
            focus_epoch: 0,
            paste_serial: 0,
            pending_paste: None,
            clipboard,
            subscription: None,
            content_version: 0,
        }
    }

    /// Seeds the surface with `text` (filtered and truncated like any
    /// insert) and puts the caret at the end. Not recorded in history.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    /// Replaces all content without recording an edit. Clears history,
    /// since existing entries no longer describe this buffer.
    pub fn set_text(&mut self, text: &str) {
        let filtered = self.filter.strip(text);
        let kept: String = match self.max_length {
            Some(max) => filtered.chars().take(max).collect(),
            None => filtered.into_owned(),
        };
        self.buffer.set_text(&kept);
        self.caret = Caret::at(self.buffer.len_chars());
        self.history.reset();
        self.bump_version();
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn history(&self) -> &UndoManager {
        &self.history
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn content_version(&self) -> u64 {
        self.content_version
    }

    #[inline]
    fn bump_version(&mut self) {
        self.content_version = self.content_version.wrapping_add(1);
    }

    // ── Caret and selection ──────────────────────────────────────────

    /// Moves the caret to `head`, clamped to the buffer, dropping any selection.
    pub fn set_caret(&mut self, head: usize) {
        self.caret = Caret::at(head.min(self.buffer.len_chars()));
    }

    /// Selects anchor..head, clamped to the buffer.
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.buffer.len_chars();
        self.caret = Caret {
            head: head.min(len),
            anchor: Some(anchor.min(len)),
        };
    }

    pub fn select_all(&mut self) {
        self.caret.select_all(self.buffer.len_chars());
    }

    /// The selected text, or `None` if nothing is selected.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.caret.selection_range()?;
        self.buffer.text_range(start, end).ok()
    }

    // ── Edits ────────────────────────────────────────────────────────

    /// Filters `text` and cuts it to the room left under `max_length`
    /// once `removing` chars are taken out.
    fn prepare(&self, text: &str, removing: usize) -> String {
        let filtered = self.filter.strip(text);
        match self.max_length {
            Some(max) => {
                let remaining = self.buffer.len_chars().saturating_sub(removing);
                let budget = max.saturating_sub(remaining);
                filtered.chars().take(budget).collect()
            }
            None => filtered.into_owned(),
        }
    }

    /// Replaces `remove_len` chars at `index` with `text` and records it.
    ///
    /// Rejects out-of-range requests and edits that would not change the
    /// buffer. Nothing is recorded for a rejected request.
    fn apply_edit(&mut self, index: usize, remove_len: usize, text: &str) -> bool {
        let len = self.buffer.len_chars();
        let in_range = index
            .checked_add(remove_len)
            .is_some_and(|end| end <= len);
        if !in_range {
            tracing::debug!(index, remove_len, len, "rejecting out-of-range edit");
            return false;
        }
        if remove_len == 0 && text.is_empty() {
            return false;
        }
        if self
            .buffer
            .text_range(index, index + remove_len)
            .is_ok_and(|current| current == text)
        {
            tracing::trace!(index, "edit leaves buffer unchanged");
            return false;
        }

        let caret_before = self.caret.snapshot();
        let removed = match self.buffer.splice(index, remove_len, text) {
            Ok(removed) => removed,
            Err(e) => {
                tracing::debug!("edit rejected by buffer: {e:#}");
                return false;
            }
        };
        let inserted = text.chars().count();
        self.caret = Caret::at(index + inserted);
        self.history
            .record_replace(removed, index, remove_len, inserted, caret_before);
        self.bump_version();
        true
    }

    /// Inserts `text` at `index`. Returns whether the buffer changed.
    pub fn insert_at(&mut self, index: usize, text: &str) -> bool {
        let prepared = self.prepare(text, 0);
        if prepared.is_empty() {
            tracing::debug!(index, "nothing left to insert after filtering");
            return false;
        }
        self.apply_edit(index, 0, &prepared)
    }

    /// Deletes `length` chars at `index`. Returns whether the buffer changed.
    pub fn delete_range(&mut self, index: usize, length: usize) -> bool {
        if length == 0 {
            return false;
        }
        self.apply_edit(index, length, "")
    }

    /// Replaces `length` chars at `index` with `text`.
    ///
    /// A zero `length` inserts and an empty `text` deletes. Text that is
    /// entirely filtered out rejects the request rather than deleting.
    pub fn replace_range(&mut self, index: usize, length: usize, text: &str) -> bool {
        let prepared = self.prepare(text, length);
        if prepared.is_empty() && !text.is_empty() {
            tracing::debug!(index, "replacement text filtered out");
            return false;
        }
        self.apply_edit(index, length, &prepared)
    }

    /// Types `text` at the caret, replacing the selection if there is one.
    pub fn insert_text(&mut self, text: &str) -> bool {
        match self.caret.selection_range() {
            Some((start, end)) => self.replace_range(start, end - start, text),
            None => self.insert_at(self.caret.head, text),
        }
    }

    pub fn delete_selection(&mut self) -> bool {
        match self.caret.selection_range() {
            Some((start, end)) => self.delete_range(start, end - start),
            None => false,
        }
    }

    /// Deletes the selection, or the char before the caret.
    pub fn backspace(&mut self) -> bool {
        if self.caret.has_selection() {
            return self.delete_selection();
        }
        match self.caret.head.checked_sub(1) {
            Some(index) => self.delete_range(index, 1),
            None => false,
        }
    }

    /// Deletes the selection, or the char after the caret.
    pub fn delete_forward(&mut self) -> bool {
        if self.caret.has_selection() {
            return self.delete_selection();
        }
        self.delete_range(self.caret.head, 1)
    }

    // ── Undo / redo ──────────────────────────────────────────────────

    /// Reverses the most recent edit. Returns `false` if there was none.
    pub fn undo(&mut self) -> bool {
        match self.history.undo_step() {
            Some(entry) => self.replay(entry),
            None => false,
        }
    }

    /// Reapplies the most recently undone edit.
    pub fn redo(&mut self) -> bool {
        match self.history.redo_step() {
            Some(entry) => self.replay(entry),
            None => false,
        }
    }

    /// Reverses `entry` in the buffer and hands its inverse to the history.
    fn replay(&mut self, entry: LogEntry) -> bool {
        let caret_now = self.caret.snapshot();
        match self
            .buffer
            .splice(entry.index, entry.reversal_span(), entry.restore_text())
        {
            Ok(removed) => {
                self.caret = entry.caret.into();
                self.caret.clamp(self.buffer.len_chars());
                self.history.finish_replay(entry.invert(removed, caret_now));
                self.bump_version();
                true
            }
            Err(e) => {
                tracing::warn!("history entry does not fit buffer, dropping it: {e:#}");
                self.history.abort_replay();
                false
            }
        }
    }

    // ── Focus ────────────────────────────────────────────────────────

    pub fn focus(&mut self) {
        if !self.focused {
            self.focused = true;
            tracing::trace!("input focused");
        }
    }

    /// Drops focus: clears the selection, invalidates pending pastes, and
    /// clears history when configured to.
    pub fn blur(&mut self) {
        if !self.focused {
            return;
        }
        self.focused = false;
        self.focus_epoch += 1;
        self.pending_paste = None;
        self.caret.clear_selection();
        if self.clear_history_on_blur {
            self.history.reset();
        }
        tracing::trace!(epoch = self.focus_epoch, "input blurred");
    }

    // ── Clipboard ────────────────────────────────────────────────────

    /// Copies the selection to the clipboard.
    pub fn copy(&mut self) -> bool {
        let Some(text) = self.selected_text() else {
            return false;
        };
        match self.clipboard.set_text(&text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to write clipboard: {e:#}");
                false
            }
        }
    }

    /// Copies the selection, then deletes it.
    pub fn cut(&mut self) -> bool {
        self.copy() && self.delete_selection()
    }

    /// Requests the clipboard contents. The host answers through
    /// [`complete_paste`](Self::complete_paste). Only the most recent
    /// ticket is honored.
    pub fn paste(&mut self) -> Option<PasteTicket> {
        if !self.focused {
            return None;
        }
        self.paste_serial += 1;
        let ticket = PasteTicket {
            focus_epoch: self.focus_epoch,
            serial: self.paste_serial,
        };
        self.pending_paste = Some(ticket);
        self.clipboard.request_text(ticket);
        Some(ticket)
    }

    /// Delivers clipboard text for `ticket`.
    ///
    /// A late answer (surface blurred since the request, or a newer paste
    /// was issued) is ignored.
    pub fn complete_paste(&mut self, ticket: PasteTicket, text: &str) -> bool {
        if !self.focused || self.pending_paste != Some(ticket) {
            tracing::debug!(?ticket, "ignoring stale paste");
            return false;
        }
        self.pending_paste = None;
        self.insert_text(text)
    }

    // ── Event source ─────────────────────────────────────────────────

    /// Subscribes to `source`, releasing any previous subscription.
    pub fn attach(&mut self, source: Rc<dyn EventSource>) {
        self.subscription = Some(Subscription::new(source));
    }

    pub fn detach(&mut self) {
        self.subscription = None;
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Drains and handles queued events. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = match &self.subscription {
            Some(sub) => sub.drain(),
            None => return 0,
        };
        let mut handled = 0;
        for event in events {
            if self.handle_event(event) {
                handled += 1;
            }
        }
        handled
    }

    /// Releases the surface: clears both logs and unsubscribes.
    pub fn dispose(mut self) {
        self.history.reset();
        self.pending_paste = None;
        self.subscription = None;
        tracing::trace!("input disposed");
    }
}
