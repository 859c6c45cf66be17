//! Backward keyword search.

use crate::position::Position;
use crate::source::Source;

/// Keywords that introduce a conditional continuation line, in the order
/// they are tried
pub const CONDITION_KEYWORDS: &[&str] = &["else if", "else", "if", "do", "while", "switch", "for"];

pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Find the last occurrence of `keyword` that starts at or after `limit` and
/// ends at or before `pos`.
///
/// An occurrence counts only if all of it is code, it is a whole word, and it
/// is preceded by whitespace or nothing. Rejected occurrences do not stop
/// the search.
pub fn find_keyword_backward(
    src: &Source<'_>,
    pos: Position,
    keyword: &str,
    limit: Position,
) -> Option<Position> {
    if keyword.is_empty() {
        return None;
    }
    let mut end = pos;
    loop {
        let start = src.rfind(end, keyword, limit)?;
        if is_keyword_at(src, start, keyword) {
            return Some(start);
        }
        tracing::trace!(?start, keyword, "rejected keyword candidate");
        // Continue with occurrences that start earlier
        end = src.advance(start, keyword.chars().count() - 1)?;
    }
}

fn is_keyword_at(src: &Source<'_>, start: Position, keyword: &str) -> bool {
    let len = keyword.chars().count();
    let all_code = (0..len).all(|i| src.advance(start, i).is_some_and(|p| src.is_code(p)));
    if !all_code {
        return false;
    }

    let before_ok = src.char_before(start).map_or(true, char::is_whitespace);
    let after_ok = src
        .advance(start, len)
        .and_then(|end| src.char_at(end))
        .map_or(true, |ch| !is_word_char(ch));
    before_ok && after_ok
}

/// Find a condition keyword on `pos`'s line before `pos`, trying
/// [`CONDITION_KEYWORDS`] in order and returning the first hit.
pub fn find_condition_keyword(src: &Source<'_>, pos: Position) -> Option<(&'static str, Position)> {
    CONDITION_KEYWORDS.iter().find_map(|&keyword| {
        find_keyword_backward(src, pos, keyword, pos.line_start()).map(|at| (keyword, at))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::RopeBuffer;
    use crate::context::LexicalClassifier;

    fn find(text: &str, pos: Position, keyword: &str) -> Option<Position> {
        let buffer = RopeBuffer::from_text(text);
        let classifier = LexicalClassifier::from_buffer(&buffer);
        find_keyword_backward(&Source::new(&buffer, &classifier), pos, keyword, Position::zero())
    }

    #[test]
    fn test_skips_keyword_in_string() {
        let text = r#"const char *s = "if (x)"; if (y) {}"#;
        assert_eq!(find(text, Position::new(0, 30), "if"), Some(Position::new(0, 26)));
        assert_eq!(find(text, Position::new(0, 25), "if"), None);
    }

    #[test]
    fn test_rejects_identifier_suffix() {
        assert_eq!(find("motif (x)", Position::new(0, 9), "if"), None);
        assert_eq!(find("x; if (motif)", Position::new(0, 13), "if"), Some(Position::new(0, 3)));
    }

    #[test]
    fn test_rejects_identifier_prefix() {
        assert_eq!(find("iffy = 1;", Position::new(0, 9), "if"), None);
    }

    #[test]
    fn test_rejects_non_whitespace_before() {
        assert_eq!(find("}else", Position::new(0, 5), "else"), None);
        assert_eq!(find("} else", Position::new(0, 6), "else"), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_skips_keyword_in_comment() {
        let text = "while (a) /* if */ x";
        assert_eq!(find(text, Position::new(0, 20), "if"), None);
        assert_eq!(find(text, Position::new(0, 20), "while"), Some(Position::zero()));
    }

    #[test]
    fn test_condition_keyword_priority() {
        let buffer = RopeBuffer::from_text("x;\n} else if (y)");
        let classifier = LexicalClassifier::from_buffer(&buffer);
        let src = Source::new(&buffer, &classifier);
        assert_eq!(
            find_condition_keyword(&src, Position::new(1, 10)),
            Some(("else if", Position::new(1, 2)))
        );
    }

    #[test]
    fn test_condition_keyword_limited_to_line() {
        let buffer = RopeBuffer::from_text("if (a)\n  foo (b)");
        let classifier = LexicalClassifier::from_buffer(&buffer);
        let src = Source::new(&buffer, &classifier);
        assert_eq!(find_condition_keyword(&src, Position::new(1, 6)), None);
    }
}
