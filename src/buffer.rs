//! Text buffer traits and the rope-backed implementation.
//!
//! The indenter only reads through [`TextBuffer`]; hosts that own their own
//! text surface implement it over their storage. [`TextBufferMut`] is needed
//! only to apply a computed [`Edit`](crate::Edit).

use ropey::Rope;
use std::borrow::Cow;
use std::ops::Range;

/// Read-only view into a text buffer.
///
/// Lines are separated by `'\n'`; columns and offsets count characters.
pub trait TextBuffer {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Length of a specific line in characters (excluding newline)
    fn line_length(&self, line: usize) -> usize;

    /// Total length in characters
    fn len_chars(&self) -> usize;

    /// Check if buffer is empty
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Get character at position, None if out of bounds or at the line end
    fn char_at(&self, line: usize, column: usize) -> Option<char>;

    /// Get line content (without trailing newline)
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;

    /// Convert (line, column) to a character offset
    fn position_to_offset(&self, line: usize, column: usize) -> usize;

    /// Convert a character offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> (usize, usize);

    /// Get slice of text as String (by character indices)
    fn slice(&self, range: Range<usize>) -> String;

    /// Get full content as String (may be expensive for large buffers)
    fn content(&self) -> String;
}

/// Mutable buffer operations. Extends TextBuffer.
pub trait TextBufferMut: TextBuffer {
    /// Insert text at character offset
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove text in character range
    fn remove(&mut self, range: Range<usize>);

    /// Replace text in range with new text (atomic operation)
    fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }
}

/// TextBuffer implementation wrapping ropey::Rope.
#[derive(Debug, Clone)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Create a RopeBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            rope: Rope::from_str(s),
        }
    }
}

impl Default for RopeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RopeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl TextBuffer for RopeBuffer {
    fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        // Exclude trailing newline if present
        if len > 0 && line_slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let line_start = self.rope.line_to_char(line);
        if column >= self.line_length(line) {
            return None;
        }
        Some(self.rope.char(line_start + column))
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line).to_string();
        Some(Cow::Owned(s.trim_end_matches('\n').to_string()))
    }

    fn position_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let line_start = self.rope.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        let line_start = self.rope.line_to_char(line);
        (line, clamped - line_start)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    fn content(&self) -> String {
        self.rope.to_string()
    }
}

impl TextBufferMut for RopeBuffer {
    fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        if start < end {
            self.rope.remove(start..end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rope_buffer_multiline() {
        let buf = RopeBuffer::from_text("line1\nline2\nline3");
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line(0).unwrap().as_ref(), "line1");
        assert_eq!(buf.line(2).unwrap().as_ref(), "line3");
    }

    #[test]
    fn test_rope_buffer_line_length() {
        let buf = RopeBuffer::from_text("{\n\tx;\n}");
        assert_eq!(buf.line_length(0), 1);
        assert_eq!(buf.line_length(1), 3);
        assert_eq!(buf.line_length(2), 1);
    }

    #[test]
    fn test_char_at_stops_before_newline() {
        let buf = RopeBuffer::from_text("ab\ncd");
        assert_eq!(buf.char_at(0, 1), Some('b'));
        assert_eq!(buf.char_at(0, 2), None);
        assert_eq!(buf.char_at(1, 0), Some('c'));
        assert_eq!(buf.char_at(5, 0), None);
    }

    #[test]
    fn test_rope_buffer_position_conversion() {
        let buf = RopeBuffer::from_text("hello\nworld");
        assert_eq!(buf.offset_to_position(5), (0, 5));
        assert_eq!(buf.offset_to_position(6), (1, 0));
        assert_eq!(buf.position_to_offset(1, 5), 11);
        assert_eq!(buf.position_to_offset(0, 99), 5);
    }

    #[test]
    fn test_rope_buffer_replace() {
        let mut buf = RopeBuffer::from_text("if (x)\n    }");
        buf.replace(7..11, "");
        assert_eq!(buf.to_string(), "if (x)\n}");
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = RopeBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_length(0), 0);
    }
}
