/// Text buffer wrapping `ropey::Rope`, addressed by char offsets.
use std::fmt;

use anyhow::Result;
use ropey::Rope;

/// The text owned by one input surface.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

impl TextBuffer {
    /// Creates an empty text buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Returns the total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the total number of bytes in the buffer.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Returns the character at a given char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn char_at(&self, char_idx: usize) -> Result<char> {
        if char_idx >= self.rope.len_chars() {
            anyhow::bail!(
                "char index {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        Ok(self.rope.char(char_idx))
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        if start > end {
            anyhow::bail!("invalid range: start ({}) > end ({})", start, end);
        }
        if end > self.rope.len_chars() {
            anyhow::bail!(
                "range end {} out of bounds (buffer has {} chars)",
                end,
                self.rope.len_chars()
            );
        }
        Ok(())
    }

    /// Returns the text in the char range [start..end).
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn text_range(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        Ok(self.rope.slice(start..end).to_string())
    }

    /// Inserts text at the given char index.
    ///
    /// # Errors
    ///
    /// Returns an error if the char index is out of bounds.
    pub fn insert(&mut self, char_idx: usize, text: &str) -> Result<()> {
        if char_idx > self.rope.len_chars() {
            anyhow::bail!(
                "insert position {} out of bounds (buffer has {} chars)",
                char_idx,
                self.rope.len_chars()
            );
        }
        self.rope.insert(char_idx, text);
        Ok(())
    }

    /// Removes the char range [start..end) and returns the removed text.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn remove(&mut self, start: usize, end: usize) -> Result<String> {
        let removed = self.text_range(start, end)?;
        self.rope.remove(start..end);
        Ok(removed)
    }

    /// Replaces `remove_len` chars at `start` with `text` and returns the
    /// text that was removed. Nothing changes if the range is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn splice(&mut self, start: usize, remove_len: usize, text: &str) -> Result<String> {
        let end = start
            .checked_add(remove_len)
            .ok_or_else(|| anyhow::anyhow!("range length overflow at {}", start))?;
        let removed = self.remove(start, end)?;
        self.rope.insert(start, text);
        Ok(removed)
    }

    /// Replaces all content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_empty() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len_chars(), 0);
        assert_eq!(buf.to_string(), "");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut buf = TextBuffer::new();
        buf.insert(0, "hello").unwrap();
        buf.insert(5, " world").unwrap();
        assert_eq!(buf.to_string(), "hello world");

        let removed = buf.remove(5, 11).unwrap();
        assert_eq!(removed, " world");
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_splice_returns_removed_text() {
        let mut buf = TextBuffer::from("cat");
        let removed = buf.splice(0, 1, "r").unwrap();
        assert_eq!(removed, "c");
        assert_eq!(buf.to_string(), "rat");
    }

    #[test]
    fn test_splice_pure_insert() {
        let mut buf = TextBuffer::from("abc");
        let removed = buf.splice(1, 0, "X").unwrap();
        assert!(removed.is_empty());
        assert_eq!(buf.to_string(), "aXbc");
    }

    #[test]
    fn test_text_range() {
        let buf = TextBuffer::from("hello world");
        assert_eq!(buf.text_range(0, 5).unwrap(), "hello");
        assert_eq!(buf.text_range(2, 2).unwrap(), "");
    }

    #[test]
    fn test_set_text() {
        let mut buf = TextBuffer::from("old");
        buf.set_text("new text");
        assert_eq!(buf.to_string(), "new text");
        assert_eq!(buf.len_chars(), 8);
    }

    // ── Unicode handling ─────────────────────────────────────────────

    #[test]
    fn test_unicode_multi_byte_chars() {
        let buf = TextBuffer::from("héllo 🌍");
        assert_eq!(buf.len_chars(), 7);
        assert!(buf.len_bytes() > 7);
        assert_eq!(buf.char_at(1).unwrap(), 'é');
        assert_eq!(buf.char_at(6).unwrap(), '🌍');
    }

    #[test]
    fn test_unicode_splice() {
        let mut buf = TextBuffer::from("a🌍b🎉c");
        let removed = buf.splice(1, 3, "日本").unwrap();
        assert_eq!(removed, "🌍b🎉");
        assert_eq!(buf.to_string(), "a日本c");
    }

    // ── Error paths ──────────────────────────────────────────────────

    #[test]
    fn test_insert_out_of_bounds() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.insert(100, "x").is_err());
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_remove_start_greater_than_end() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.remove(3, 1).is_err());
    }

    #[test]
    fn test_remove_end_out_of_bounds() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.remove(0, 100).is_err());
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_splice_out_of_bounds_leaves_buffer_unchanged() {
        let mut buf = TextBuffer::from("hello");
        assert!(buf.splice(4, 5, "x").is_err());
        assert!(buf.splice(usize::MAX, 1, "x").is_err());
        assert_eq!(buf.to_string(), "hello");
    }

    #[test]
    fn test_char_at_out_of_bounds() {
        let buf = TextBuffer::from("hello");
        assert!(buf.char_at(5).is_err());
    }
}
