//! Re-indentation handlers.

mod comment;
mod newline;
mod unindent;
pub mod whitespace;

pub use comment::close_comment;
pub use newline::{compute_indent, indent_line};
pub use unindent::{
    unindent_case_or_label, unindent_closing_brace, unindent_hash, unindent_opening_brace,
};
pub use whitespace::{build_indent, visual_column};

use crate::position::Position;
use crate::source::Source;

/// Position of the `expected` character just typed before `pos`, if it is code
pub(crate) fn typed_char(src: &Source<'_>, pos: Position, expected: char) -> Option<Position> {
    let at = src.prev(pos)?;
    (src.char_at(at) == Some(expected) && src.is_code(at)).then_some(at)
}

/// Column a token's line is measured from: the token's own column when it
/// starts its line, otherwise the column of the line's first character
pub(crate) fn token_column(src: &Source<'_>, pos: Position, tab_width: usize) -> usize {
    if src.is_first_on_line(pos) {
        src.visual_column(pos, tab_width)
    } else {
        src.first_char_column(pos.line, tab_width)
    }
}

/// Last non-whitespace character before `pos` that is code, not part of a
/// comment or literal
pub(crate) fn last_code_char(src: &Source<'_>, pos: Position) -> Option<(Position, char)> {
    let mut cur = pos;
    while let Some(at) = src.prev(cur) {
        cur = at;
        if !src.is_code(at) {
            continue;
        }
        match src.char_at(at) {
            Some(ch) if !ch.is_whitespace() => return Some((at, ch)),
            _ => {}
        }
    }
    None
}
