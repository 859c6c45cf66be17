//! Backward bracket matching.

use crate::position::Position;
use crate::source::Source;

use super::code::CodeCharsBackward;

/// Opening counterpart of a closing bracket
pub fn opening_bracket(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        ']' => Some('['),
        '}' => Some('{'),
        _ => None,
    }
}

/// Find the opening bracket that `close` would match, scanning backward from
/// the character before `pos`.
///
/// Brackets inside comments and literals are not counted. `None` means the
/// buffer start was reached without balancing, i.e. there is no enclosing
/// bracket of that kind.
pub fn find_matching_open(src: &Source<'_>, pos: Position, close: char) -> Option<Position> {
    let open = opening_bracket(close)?;
    let mut depth = 1usize;

    for (at, ch) in CodeCharsBackward::new(src, pos) {
        if ch == close {
            depth += 1;
        } else if ch == open {
            depth -= 1;
            if depth == 0 {
                return Some(at);
            }
        }
    }

    tracing::trace!(?pos, %close, "no matching open bracket");
    None
}

/// Find a `(` left open by the current statement.
///
/// Like [`find_matching_open`] for `)`, but a `{` or `}` met outside any
/// parenthesis ends the search: the open paren would belong to an earlier
/// statement.
pub fn find_unclosed_paren(src: &Source<'_>, pos: Position) -> Option<Position> {
    let mut depth = 1usize;

    for (at, ch) in CodeCharsBackward::new(src, pos) {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
            '{' | '}' if depth == 1 => return None,
            _ => {}
        }
    }
    None
}
