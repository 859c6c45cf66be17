//! The text change produced by a handler.

use crate::buffer::{TextBuffer, TextBufferMut};
use crate::position::{Position, Span};

/// A single replace operation: delete `delete` (if any), insert `insert` at
/// `insert_at`, then put the cursor `cursor_offset_delta` characters after
/// the end of the inserted text (negative moves it back into the text).
///
/// Hosts must apply it as one undoable step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub delete: Option<Span>,
    pub insert: String,
    pub insert_at: Position,
    pub cursor_offset_delta: isize,
}

impl Edit {
    /// Create an insert operation
    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self {
            delete: None,
            insert: text.into(),
            insert_at: at,
            cursor_offset_delta: 0,
        }
    }

    /// Create a replace operation; an empty span degrades to an insert
    pub fn replace(span: Span, text: impl Into<String>) -> Self {
        Self {
            delete: (!span.is_empty()).then_some(span),
            insert: text.into(),
            insert_at: span.begin,
            cursor_offset_delta: 0,
        }
    }

    pub fn with_cursor_offset(mut self, delta: isize) -> Self {
        self.cursor_offset_delta = delta;
        self
    }

    /// Apply to `buffer` with one replace call, returning the new cursor position
    pub fn apply(&self, buffer: &mut dyn TextBufferMut) -> Position {
        let start = buffer.position_to_offset(self.insert_at.line, self.insert_at.column);
        let end = self
            .delete
            .map_or(start, |span| buffer.position_to_offset(span.end.line, span.end.column));

        buffer.replace(start..end, &self.insert);

        let inserted_end = start + self.insert.chars().count();
        let cursor = inserted_end.saturating_add_signed(self.cursor_offset_delta);
        let (line, column) = buffer.offset_to_position(cursor);
        Position::new(line, column)
    }
}
