use crate::context::ContextClass;
use crate::edit::Edit;
use crate::position::{Position, Span};
use crate::source::Source;

/// Turn a `* /` that starts a block comment line into `*/`.
///
/// Runs after `/` was inserted; `pos` is just after it.
pub fn close_comment(src: &Source<'_>, pos: Position) -> Option<Edit> {
    let slash = src.prev(pos).filter(|&p| src.char_at(p) == Some('/'))?;
    let space = src.prev(slash).filter(|&p| src.char_at(p) == Some(' '))?;
    let star = src.prev(space).filter(|&p| src.char_at(p) == Some('*'))?;
    if star.line != slash.line {
        return None;
    }

    if src.classify(star) != ContextClass::BlockComment || !src.is_first_on_line(star) {
        return None;
    }
    Some(Edit::replace(Span::new(star, pos), "*/"))
}
