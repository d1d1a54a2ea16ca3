//! Filtering of characters an input surface does not accept.
//!
//! Filtering is a single pass over the input: every disallowed character is
//! dropped, and the rest are kept in order.

use std::borrow::Cow;

use editlog_config::InputConfig;

/// Decides which characters may enter a buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFilter {
    allow_newlines: bool,
    allow_tabs: bool,
    disallowed: Vec<char>,
}

impl CharFilter {
    pub fn new(allow_newlines: bool, allow_tabs: bool, disallowed: &str) -> Self {
        Self {
            allow_newlines,
            allow_tabs,
            disallowed: disallowed.chars().collect(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(
            config.allow_newlines,
            config.allow_tabs,
            &config.disallowed_chars,
        )
    }

    /// Whether `c` may be inserted.
    pub fn allows(&self, c: char) -> bool {
        match c {
            '\n' => self.allow_newlines,
            '\t' => self.allow_tabs,
            // Carriage returns never enter the buffer; CRLF collapses to LF.
            '\r' => false,
            c if c.is_control() => false,
            c => !self.disallowed.contains(&c),
        }
    }

    /// Returns `text` with disallowed characters removed.
    ///
    /// Borrows when nothing needs to be removed.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.chars().all(|c| self.allows(c)) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.chars().filter(|&c| self.allows(c)).collect())
    }
}
