//! Read-only view of the text the indenter works on.
//!
//! [`Source`] pairs a buffer with its classifier and provides pure position
//! arithmetic: every movement takes a [`Position`] and returns a new one, so
//! no scan ever has to restore a shared cursor.

use std::borrow::Cow;

use crate::buffer::TextBuffer;
use crate::context::{ContextClass, ContextClassifier};
use crate::indent::whitespace::visual_column;
use crate::position::Position;

#[derive(Clone, Copy)]
pub struct Source<'a> {
    buffer: &'a dyn TextBuffer,
    classifier: &'a dyn ContextClassifier,
}

impl std::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("lines", &self.buffer.line_count())
            .field("chars", &self.buffer.len_chars())
            .finish()
    }
}

impl<'a> Source<'a> {
    pub fn new(buffer: &'a dyn TextBuffer, classifier: &'a dyn ContextClassifier) -> Self {
        Self { buffer, classifier }
    }

    pub fn buffer(&self) -> &'a dyn TextBuffer {
        self.buffer
    }

    pub fn classify(&self, pos: Position) -> ContextClass {
        self.classifier.classify(pos)
    }

    pub fn is_code(&self, pos: Position) -> bool {
        self.classify(pos).is_code()
    }

    /// Character at `pos`; the line end of any line but the last reads as `'\n'`
    pub fn char_at(&self, pos: Position) -> Option<char> {
        if pos.line >= self.buffer.line_count() {
            return None;
        }
        if pos.column < self.buffer.line_length(pos.line) {
            return self.buffer.char_at(pos.line, pos.column);
        }
        if pos.column == self.buffer.line_length(pos.line)
            && pos.line + 1 < self.buffer.line_count()
        {
            return Some('\n');
        }
        None
    }

    /// Position of the character before `pos`, crossing line breaks
    pub fn prev(&self, pos: Position) -> Option<Position> {
        if pos.column > 0 {
            let column = pos.column.min(self.buffer.line_length(pos.line) + 1);
            Some(Position::new(pos.line, column - 1))
        } else if pos.line > 0 {
            let line = pos.line - 1;
            Some(Position::new(line, self.buffer.line_length(line)))
        } else {
            None
        }
    }

    /// Position after the character at `pos`, crossing line breaks
    pub fn next(&self, pos: Position) -> Option<Position> {
        let len = self.buffer.line_length(pos.line);
        if pos.column < len {
            Some(Position::new(pos.line, pos.column + 1))
        } else if pos.line + 1 < self.buffer.line_count() {
            Some(Position::new(pos.line + 1, 0))
        } else {
            None
        }
    }

    /// Character immediately before `pos`
    pub fn char_before(&self, pos: Position) -> Option<char> {
        self.prev(pos).and_then(|p| self.char_at(p))
    }

    /// Position `count` characters after `pos`
    pub fn advance(&self, pos: Position, count: usize) -> Option<Position> {
        (0..count).try_fold(pos, |p, _| self.next(p))
    }

    /// End position of `needle` if it occurs at `pos`
    pub fn matches_at(&self, pos: Position, needle: &str) -> Option<Position> {
        let mut cur = pos;
        for expected in needle.chars() {
            if self.char_at(cur)? != expected {
                return None;
            }
            cur = self.next(cur).unwrap_or(Position::new(cur.line, cur.column + 1));
        }
        Some(cur)
    }

    /// Start of the last occurrence of `needle` that begins at or after
    /// `limit` and ends at or before `end`
    pub fn rfind(&self, end: Position, needle: &str, limit: Position) -> Option<Position> {
        let mut cur = end;
        while let Some(start) = self.prev(cur) {
            if start < limit {
                return None;
            }
            if let Some(stop) = self.matches_at(start, needle) {
                if stop <= end {
                    return Some(start);
                }
            }
            cur = start;
        }
        None
    }

    pub fn line_text(&self, line: usize) -> Cow<'a, str> {
        self.buffer.line(line).unwrap_or(Cow::Borrowed(""))
    }

    pub fn line_length(&self, line: usize) -> usize {
        self.buffer.line_length(line)
    }

    /// Text between two positions
    pub fn text_between(&self, begin: Position, end: Position) -> String {
        let start = self.buffer.position_to_offset(begin.line, begin.column);
        let stop = self.buffer.position_to_offset(end.line, end.column);
        self.buffer.slice(start..stop)
    }

    /// Number of whitespace characters that start the line
    pub fn leading_whitespace_len(&self, line: usize) -> usize {
        (0..self.buffer.line_length(line))
            .take_while(|&c| {
                self.buffer
                    .char_at(line, c)
                    .is_some_and(|ch| ch == ' ' || ch == '\t')
            })
            .count()
    }

    /// Whether only spaces and tabs precede `pos` on its line
    pub fn is_first_on_line(&self, pos: Position) -> bool {
        self.leading_whitespace_len(pos.line) >= pos.column
    }

    /// Visual column of `pos`, expanding tabs to `tab_width` stops
    pub fn visual_column(&self, pos: Position, tab_width: usize) -> usize {
        visual_column(&self.line_text(pos.line), pos.column, tab_width)
    }

    /// Visual column of the first non-whitespace character on `line`
    pub fn first_char_column(&self, line: usize, tab_width: usize) -> usize {
        let ws = self.leading_whitespace_len(line);
        visual_column(&self.line_text(line), ws, tab_width)
    }

    /// Earliest position of the same-class run that contains `pos`.
    ///
    /// A block comment run stops at a `/*` that directly follows a `*/`, so
    /// back-to-back comments stay apart.
    pub fn class_run_start(&self, pos: Position, class: ContextClass) -> Position {
        let mut start = pos;
        while let Some(p) = self.prev(start) {
            if self.classify(p) != class {
                break;
            }
            if class == ContextClass::BlockComment && self.opens_after_close(start) {
                break;
            }
            start = p;
        }
        start
    }

    /// Whether `pos` starts a `/*` immediately preceded by `*/`
    fn opens_after_close(&self, pos: Position) -> bool {
        let Some(slash) = self.prev(pos) else {
            return false;
        };
        self.matches_at(pos, "/*").is_some()
            && self.char_at(slash) == Some('/')
            && self.char_before(slash) == Some('*')
    }
}
