//! Backward iteration over code characters.

use crate::context::ContextClass;
use crate::position::Position;
use crate::source::Source;

/// Iterator over `(position, char)` moving backward from a start position,
/// yielding only characters that are code.
///
/// Comments are skipped; a completed `/* … */` ending at the current
/// position is jumped over in one step, as is a whole string or character
/// literal once its closing quote is reached. Whitespace and line breaks
/// are yielded.
#[derive(Debug, Clone)]
pub struct CodeCharsBackward<'s, 'a> {
    src: &'s Source<'a>,
    cur: Position,
}

impl<'s, 'a> CodeCharsBackward<'s, 'a> {
    /// Starts with the character just before `pos`
    pub fn new(src: &'s Source<'a>, pos: Position) -> Self {
        Self { src, cur: pos }
    }
}

impl Iterator for CodeCharsBackward<'_, '_> {
    type Item = (Position, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.src.prev(self.cur)?;
            self.cur = pos;
            let Some(ch) = self.src.char_at(pos) else {
                continue;
            };
            let class = self.src.classify(pos);

            if class == ContextClass::LineComment {
                continue;
            }
            if ch == '/' && class != ContextClass::String {
                if let Some(open) = block_comment_start(self.src, pos) {
                    self.cur = open;
                    continue;
                }
            }
            if class == ContextClass::BlockComment {
                continue;
            }
            if ch == '"' || ch == '\'' {
                match opening_quote(self.src, pos, ch) {
                    Some(open) => {
                        self.cur = open;
                        continue;
                    }
                    // A stray quote, e.g. an apostrophe in a directive
                    None if class == ContextClass::Code => return Some((pos, ch)),
                    None => continue,
                }
            }
            if class == ContextClass::String {
                continue;
            }
            return Some((pos, ch));
        }
    }
}

/// Start of the block comment whose closing `*/` ends at `slash`
fn block_comment_start(src: &Source<'_>, slash: Position) -> Option<Position> {
    let star = src.prev(slash)?;
    if src.char_at(star)? != '*' {
        return None;
    }
    src.rfind(star, "/*", Position::zero())
}

/// Opening quote of the literal closed by the quote at `close`.
///
/// Literals do not span lines, so the search stops at the line start.
fn opening_quote(src: &Source<'_>, close: Position, quote: char) -> Option<Position> {
    if is_escaped(src, close) {
        return None;
    }
    (0..close.column)
        .rev()
        .map(|column| Position::new(close.line, column))
        .find(|&p| src.char_at(p) == Some(quote) && !is_escaped(src, p))
}

/// Whether an odd number of backslashes directly precedes `pos` on its line
fn is_escaped(src: &Source<'_>, pos: Position) -> bool {
    let backslashes = (0..pos.column)
        .rev()
        .take_while(|&column| src.char_at(Position::new(pos.line, column)) == Some('\\'))
        .count();
    backslashes % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{RopeBuffer, TextBuffer};
    use crate::context::{ContextClassifier, LexicalClassifier};

    struct NoClasses;

    impl ContextClassifier for NoClasses {
        fn classify(&self, _pos: Position) -> ContextClass {
            ContextClass::Code
        }
    }

    fn code_before_end(text: &str) -> String {
        let buffer = RopeBuffer::from_text(text);
        let classifier = LexicalClassifier::from_buffer(&buffer);
        let src = Source::new(&buffer, &classifier);
        let last = buffer.line_count() - 1;
        let end = Position::new(last, buffer.line_length(last));
        let mut chars: Vec<char> = CodeCharsBackward::new(&src, end).map(|(_, c)| c).collect();
        chars.reverse();
        chars.into_iter().collect()
    }

    #[test]
    fn test_skips_comments_and_literals() {
        assert_eq!(code_before_end("a /* { */ b // }\nc"), "a  b \nc");
        assert_eq!(code_before_end(r#"x = "}" + '{';"#), "x =  + ;");
    }

    #[test]
    fn test_escaped_quote_inside_literal() {
        assert_eq!(code_before_end(r#"f("a\"(", b)"#), "f(, b)");
    }

    #[test]
    fn test_literals_skipped_without_classifier() {
        let buffer = RopeBuffer::from_text("(\")\" x /* ) */");
        let src = Source::new(&buffer, &NoClasses);
        let chars: String = CodeCharsBackward::new(&src, Position::new(0, 14))
            .map(|(_, c)| c)
            .collect();
        assert_eq!(chars, " x (");
    }
}
