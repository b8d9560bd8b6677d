//! Composition buffer holding uncommitted input.
//!
//! The buffer stores translated script characters, not raw keys. Editing only
//! happens at the end, so the cursor is always the buffer length.

/// Uncommitted input and its cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    /// Create a new empty input buffer.
    pub fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Get the buffered text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters (always at the end).
    pub fn cursor(&self) -> usize {
        self.char_len()
    }

    /// Number of Unicode scalars in the buffer.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Append a character at the end.
    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Remove and return the last character (backspace).
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}
