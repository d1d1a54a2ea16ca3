//! Clipboard seam between an input surface and its host.
//!
//! Writes are immediate. Reads are asynchronous: the surface hands out a
//! [`PasteTicket`] and the host answers later through
//! `TextInput::complete_paste`. A surface that lost focus in the meantime
//! ignores the answer.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::Result;

/// Correlates an asynchronous clipboard read with the surface state that
/// requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasteTicket {
    pub(crate) focus_epoch: u64,
    pub(crate) serial: u64,
}

/// Host clipboard access.
pub trait Clipboard {
    /// Replaces the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the host clipboard rejects the write.
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Starts an asynchronous read. The host delivers the text later,
    /// paired with `ticket`.
    fn request_text(&mut self, ticket: PasteTicket);
}

#[derive(Debug, Default)]
struct ClipboardState {
    text: Option<String>,
    pending: VecDeque<PasteTicket>,
}

/// In-process clipboard. Clones share contents and pending reads.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents.
    pub fn text(&self) -> Option<String> {
        self.state.borrow().text.clone()
    }

    /// Replaces contents from the host side.
    pub fn set_contents(&self, text: &str) {
        self.state.borrow_mut().text = Some(text.to_string());
    }

    /// Resolves every pending read against the current contents.
    ///
    /// Reads against an empty clipboard are dropped.
    pub fn take_completions(&self) -> Vec<(PasteTicket, String)> {
        let mut state = self.state.borrow_mut();
        let pending: Vec<PasteTicket> = state.pending.drain(..).collect();
        match &state.text {
            Some(text) => pending.into_iter().map(|t| (t, text.clone())).collect(),
            None => Vec::new(),
        }
    }

    pub fn pending_reads(&self) -> usize {
        self.state.borrow().pending.len()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.set_contents(text);
        Ok(())
    }

    fn request_text(&mut self, ticket: PasteTicket) {
        self.state.borrow_mut().pending.push_back(ticket);
    }
}
