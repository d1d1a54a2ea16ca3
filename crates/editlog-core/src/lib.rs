//! Text-input surface driving an undo/redo log.
//!
//! The surface is a plain struct (buffer, caret, history) that a host UI
//! wraps in whatever widget interface it needs. Input arrives through an
//! injected [`EventSource`]; clipboard access goes through [`Clipboard`].
pub mod buffer;
pub mod caret;
pub mod clipboard;
pub mod events;
pub mod filter;
pub mod history;
pub mod input;

pub use buffer::TextBuffer;
pub use caret::Caret;
pub use clipboard::{Clipboard, MemoryClipboard, PasteTicket};
pub use events::{EventQueue, EventSource, InputEvent, Key, ListenerId, Modifiers, Subscription};
pub use filter::CharFilter;
pub use input::TextInput;
