//! Input event handling for the text-input surface.
//!
//! Maps text and key events to surface operations.

use crate::events::{InputEvent, Key, Modifiers};

use super::TextInput;

impl TextInput {
    /// Handles one event. Returns whether it changed anything.
    ///
    /// Text and key events are ignored while the surface is unfocused.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::FocusGained => {
                let was_focused = self.focused;
                self.focus();
                !was_focused
            }
            InputEvent::FocusLost => {
                let was_focused = self.focused;
                self.blur();
                was_focused
            }
            InputEvent::Text(_) | InputEvent::Key { .. } if !self.focused => {
                tracing::trace!(?event, "ignoring input while unfocused");
                false
            }
            InputEvent::Text(text) => self.insert_text(&text),
            InputEvent::Key { key, modifiers } => self.handle_key(key, modifiers),
        }
    }

    /// Handles a single key press.
    fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        let len = self.buffer.len_chars();
        let extend = modifiers.shift;
        let before = self.caret;

        match (key, modifiers.ctrl) {
            (Key::Z, true) if modifiers.shift => self.redo(),
            (Key::Z, true) => self.undo(),
            (Key::Y, true) => self.redo(),
            (Key::A, true) => {
                let selected = self.caret.selection_range();
                self.select_all();
                self.caret.selection_range() != selected
            }
            (Key::C, true) => self.copy(),
            (Key::X, true) => self.cut(),
            (Key::V, true) => self.paste().is_some(),
            (Key::Backspace, _) => self.backspace(),
            (Key::Delete, _) => self.delete_forward(),
            (Key::Enter, false) => self.insert_text("\n"),
            (Key::ArrowLeft, _) => {
                self.caret.move_left(extend);
                self.caret != before
            }
            (Key::ArrowRight, _) => {
                self.caret.move_right(len, extend);
                self.caret != before
            }
            (Key::Home, _) => {
                self.caret.move_home(extend);
                self.caret != before
            }
            (Key::End, _) => {
                self.caret.move_end(len, extend);
                self.caret != before
            }
            _ => false,
        }
    }
}
