/// Caret and selection model for an input surface.
use crate::history::CaretSnapshot;

/// Caret position plus an optional selection anchor, both char offsets.
///
/// When `anchor` is set the selection spans anchor..head in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Caret {
    pub head: usize,
    pub anchor: Option<usize>,
}

impl Caret {
    /// Creates a caret at offset 0 with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(head: usize) -> Self {
        Self { head, anchor: None }
    }

    /// Returns the selection as an ordered (start, end) pair.
    /// `None` if there is no anchor or the selection is empty.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.head {
            return None;
        }
        Some((anchor.min(self.head), anchor.max(self.head)))
    }

    pub fn has_selection(&self) -> bool {
        self.selection_range().is_some()
    }

    /// Starts a selection at the current position if none is active.
    pub fn start_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.head);
        }
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Selects the whole buffer of `len` chars.
    pub fn select_all(&mut self, len: usize) {
        self.anchor = Some(0);
        self.head = len;
    }

    /// Moves the caret to `head`, extending the selection if `extend`.
    pub fn move_to(&mut self, head: usize, extend: bool) {
        if extend {
            self.start_selection();
        } else {
            self.clear_selection();
        }
        self.head = head;
    }

    /// Moves one char left. Without `extend`, an active selection
    /// collapses to its start instead.
    pub fn move_left(&mut self, extend: bool) {
        if !extend {
            if let Some((start, _)) = self.selection_range() {
                self.move_to(start, false);
                return;
            }
        }
        self.move_to(self.head.saturating_sub(1), extend);
    }

    /// Moves one char right, bounded by `len`. Without `extend`, an active
    /// selection collapses to its end instead.
    pub fn move_right(&mut self, len: usize, extend: bool) {
        if !extend {
            if let Some((_, end)) = self.selection_range() {
                self.move_to(end, false);
                return;
            }
        }
        self.move_to((self.head + 1).min(len), extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        self.move_to(0, extend);
    }

    pub fn move_end(&mut self, len: usize, extend: bool) {
        self.move_to(len, extend);
    }

    /// Keeps head and anchor within a buffer of `len` chars.
    pub fn clamp(&mut self, len: usize) {
        self.head = self.head.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    pub fn snapshot(&self) -> CaretSnapshot {
        CaretSnapshot {
            head: self.head,
            anchor: self.anchor,
        }
    }
}

impl From<CaretSnapshot> for Caret {
    fn from(s: CaretSnapshot) -> Self {
        Caret {
            head: s.head,
            anchor: s.anchor,
        }
    }
}
