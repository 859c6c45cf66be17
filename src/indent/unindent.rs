//! Handlers for characters that pull their line back to the left.
//!
//! Each runs after the host inserted the character, with `pos` just after
//! it, and returns `None` when the line is already where it belongs.

use crate::config::{DirectiveIndent, IndentConfig};
use crate::edit::Edit;
use crate::position::{Position, Span};
use crate::scan::{find_matching_open, is_word_char};
use crate::source::Source;

use super::whitespace::{build_indent, clamp_column};
use super::{last_code_char, token_column, typed_char};

/// Re-indent a `{` that starts its line to the enclosing scope's body
/// column plus `pre_scope_indent`.
pub fn unindent_opening_brace(
    src: &Source<'_>,
    pos: Position,
    config: &IndentConfig,
) -> Option<Edit> {
    let brace = typed_char(src, pos, '{')?;
    if !src.is_first_on_line(brace) {
        return None;
    }

    let outer = find_matching_open(src, brace, '}')?;
    let column = token_column(src, outer, config.effective_tab_width()) as isize
        + config.post_scope()
        + config.pre_scope();
    let indent = build_indent(config, clamp_column(column), &src.line_text(outer.line));
    replace_line_head(src, pos, format!("{indent}{{"))
}

/// Align a `}` that starts an indented line with its matching `{`
pub fn unindent_closing_brace(
    src: &Source<'_>,
    pos: Position,
    config: &IndentConfig,
) -> Option<Edit> {
    let brace = typed_char(src, pos, '}')?;
    if brace.column == 0 || !src.is_first_on_line(brace) {
        return None;
    }

    let open = find_matching_open(src, brace, '}')?;
    let column = token_column(src, open, config.effective_tab_width());
    let indent = build_indent(config, column, &src.line_text(open.line));
    replace_line_head(src, pos, format!("{indent}}}"))
}

/// Move a `case …:` / `default:` line to its switch's case column, or a
/// `label:` line to column 0.
pub fn unindent_case_or_label(
    src: &Source<'_>,
    pos: Position,
    config: &IndentConfig,
) -> Option<Edit> {
    let colon = typed_char(src, pos, ':')?;
    if src.char_before(colon) == Some(':') || src.char_at(pos) == Some(':') {
        return None;
    }

    let line_start = colon.line_start();
    let ws = src.leading_whitespace_len(colon.line);
    let existing = Span::new(line_start, Position::new(colon.line, ws));
    let head = src.text_between(existing.end, colon);
    let head = head.trim();

    let indent = if is_case_clause(head) {
        let open = find_matching_open(src, colon, '}')?;
        let column = token_column(src, open, config.effective_tab_width()) as isize + config.case();
        build_indent(config, clamp_column(column), &src.line_text(open.line))
    } else if is_label(head) && follows_statement_boundary(src, line_start) {
        String::new()
    } else {
        return None;
    };

    if src.text_between(existing.begin, existing.end) == indent {
        return None;
    }
    tracing::debug!(line = colon.line, head, "re-indenting label line");
    let after_head = pos.column.saturating_sub(ws) as isize;
    Some(Edit::replace(existing, indent).with_cursor_offset(after_head))
}

fn is_case_clause(head: &str) -> bool {
    head == "default"
        || head
            .strip_prefix("case")
            .is_some_and(|rest| {
                rest.starts_with(|c: char| !is_word_char(c)) && !rest.trim().is_empty()
            })
}

fn is_label(head: &str) -> bool {
    let mut chars = head.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(is_word_char)
}

/// Labels only start statements; `a ?\n  b :` is a conditional expression
fn follows_statement_boundary(src: &Source<'_>, line_start: Position) -> bool {
    match last_code_char(src, line_start) {
        None => true,
        Some((_, ch)) => matches!(ch, ';' | '{' | '}' | ':'),
    }
}

/// Move a `#` that starts its line to the directive column
pub fn unindent_hash(src: &Source<'_>, pos: Position, config: &IndentConfig) -> Option<Edit> {
    let hash = typed_char(src, pos, '#')?;
    if !src.is_first_on_line(hash) {
        return None;
    }

    let indent = match config.directive_indent {
        DirectiveIndent::FlushLeft => String::new(),
        DirectiveIndent::Columns(n) => build_indent(config, n, ""),
    };
    let existing = Span::new(hash.line_start(), hash);
    if src.text_between(existing.begin, existing.end) == indent {
        return None;
    }
    Some(Edit::replace(existing, indent).with_cursor_offset(1))
}

/// Replace everything from the line start up to `pos` with `text`
fn replace_line_head(src: &Source<'_>, pos: Position, text: String) -> Option<Edit> {
    let start = pos.line_start();
    if src.text_between(start, pos) == text {
        return None;
    }
    Some(Edit::replace(Span::new(start, pos), text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{RopeBuffer, TextBuffer};
    use crate::context::LexicalClassifier;

    type Handler = fn(&Source<'_>, Position, &IndentConfig) -> Option<Edit>;

    /// Run `handler` with the cursor at the end of `text`, returning the
    /// resulting text and cursor
    fn run(handler: Handler, text: &str, config: &IndentConfig) -> Option<(String, Position)> {
        let mut buffer = RopeBuffer::from_text(text);
        let last = buffer.line_count() - 1;
        let pos = Position::new(last, buffer.line_length(last));
        let edit = {
            let classifier = LexicalClassifier::from_buffer(&buffer);
            handler(&Source::new(&buffer, &classifier), pos, config)?
        };
        let cursor = edit.apply(&mut buffer);
        Some((buffer.to_string(), cursor))
    }

    fn four() -> IndentConfig {
        IndentConfig::default().with_indent_width(4)
    }

    #[test]
    fn test_closing_brace_aligns_with_open() {
        let (text, cursor) =
            run(unindent_closing_brace, "void f() {\n    if (x) {\n        }", &four()).unwrap();
        assert_eq!(text, "void f() {\n    if (x) {\n    }");
        assert_eq!(cursor, Position::new(2, 5));
    }

    #[test]
    fn test_closing_brace_at_column_zero_is_noop() {
        assert_eq!(run(unindent_closing_brace, "f() {\n}", &four()), None);
    }

    #[test]
    fn test_closing_brace_already_aligned_is_noop() {
        assert_eq!(run(unindent_closing_brace, "f() {\n  g() {\n  }", &four()), None);
    }

    #[test]
    fn test_closing_brace_in_string_is_noop() {
        assert_eq!(run(unindent_closing_brace, "f() {\n    \"}", &four()), None);
    }

    #[test]
    fn test_opening_brace_gnu_half_indent() {
        let gnu = IndentConfig::default();
        let (text, _) = run(unindent_opening_brace, "f ()\n{\n  if (x)\n      {", &gnu).unwrap();
        assert_eq!(text, "f ()\n{\n  if (x)\n    {");
    }

    #[test]
    fn test_opening_brace_after_code_is_noop() {
        assert_eq!(run(unindent_opening_brace, "f() {\n  if (x) {", &four()), None);
    }

    #[test]
    fn test_case_moves_to_switch_column() {
        let text = "  switch (x) {\n        case 1:";
        let (text, cursor) = run(unindent_case_or_label, text, &four()).unwrap();
        assert_eq!(text, "  switch (x) {\n  case 1:");
        assert_eq!(cursor, Position::new(1, 9));
    }

    #[test]
    fn test_case_indent_is_added() {
        let config = IndentConfig {
            case_indent: 2,
            ..four()
        };
        let (text, _) = run(unindent_case_or_label, "switch (x) {\ndefault:", &config).unwrap();
        assert_eq!(text, "switch (x) {\n  default:");
    }

    #[test]
    fn test_label_goes_to_column_zero() {
        let (text, cursor) =
            run(unindent_case_or_label, "f() {\n  x = 1;\n    out:", &four()).unwrap();
        assert_eq!(text, "f() {\n  x = 1;\nout:");
        assert_eq!(cursor, Position::new(2, 4));
    }

    #[test]
    fn test_scope_operator_is_not_a_label() {
        assert_eq!(run(unindent_case_or_label, "{\n    std::", &four()), None);
        assert_eq!(
            run(unindent_case_or_label, "{\n    std:", &four()).map(|r| r.0),
            Some("{\nstd:".to_string())
        );
    }

    #[test]
    fn test_ternary_colon_is_not_a_label() {
        assert_eq!(run(unindent_case_or_label, "{\n  y = a ?\n      b :", &four()), None);
        assert_eq!(run(unindent_case_or_label, "{\n  y = a ? b :", &four()), None);
    }

    #[test]
    fn test_hash_flush_left() {
        let (text, cursor) = run(unindent_hash, "f() {\n    #", &four()).unwrap();
        assert_eq!(text, "f() {\n#");
        assert_eq!(cursor, Position::new(1, 1));
        assert_eq!(run(unindent_hash, "#", &four()), None);
    }

    #[test]
    fn test_hash_fixed_column() {
        let config = IndentConfig {
            directive_indent: DirectiveIndent::Columns(2),
            ..four()
        };
        let (text, cursor) = run(unindent_hash, "\t#", &config).unwrap();
        assert_eq!(text, "  #");
        assert_eq!(cursor, Position::new(0, 3));
    }

    #[test]
    fn test_hash_after_code_is_noop() {
        assert_eq!(run(unindent_hash, "x = 1; #", &four()), None);
        assert_eq!(run(unindent_hash, "  // #", &four()), None);
    }
}
