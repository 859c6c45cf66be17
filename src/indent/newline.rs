//! Indentation of the line created by Enter.
//!
//! The rules below are tried in order against the last code character
//! before the line break; the first one that produces a target wins. When
//! none does, the new line starts at column 0.

use crate::config::IndentConfig;
use crate::context::ContextClass;
use crate::edit::Edit;
use crate::position::{Position, Span};
use crate::scan::{
    find_keyword_backward, find_matching_open, find_unclosed_paren, is_word_char,
    CodeCharsBackward, CONDITION_KEYWORDS,
};
use crate::source::Source;

use super::whitespace::{build_indent, clamp_column};
use super::{last_code_char, token_column};

/// Where a rule wants the new line to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Target {
    column: isize,
    reference_line: usize,
    prefix: &'static str,
}

impl Target {
    fn at(column: isize, reference_line: usize) -> Self {
        Self {
            column,
            reference_line,
            prefix: "",
        }
    }
}

struct RuleInput<'r, 'a> {
    src: &'r Source<'a>,
    config: &'r IndentConfig,
    /// Start of the new line
    line_start: Position,
    /// Last code character before the line break
    last: Option<(Position, char)>,
}

impl RuleInput<'_, '_> {
    fn tab_width(&self) -> usize {
        self.config.effective_tab_width()
    }

    fn column_of(&self, pos: Position) -> isize {
        self.src.visual_column(pos, self.tab_width()) as isize
    }

    fn first_char_column(&self, line: usize) -> isize {
        self.src.first_char_column(line, self.tab_width()) as isize
    }

    fn scope_column(&self, brace: Position) -> isize {
        token_column(self.src, brace, self.tab_width()) as isize
    }
}

type Rule = fn(&RuleInput<'_, '_>) -> Option<Target>;

const RULES: &[(&str, Rule)] = &[
    ("comment continuation", comment_continuation),
    ("list continuation", list_continuation),
    ("statement end", statement_end),
    ("open condition", open_condition),
    ("block close", block_close),
    ("completed condition", completed_condition),
    ("dangling else/do", dangling_keyword),
    ("open scope", open_scope),
];

/// Leading whitespace (plus comment prefix, if any) for the line at `pos`.
///
/// Only the text before `pos`'s line is consulted.
pub fn compute_indent(src: &Source<'_>, pos: Position, config: &IndentConfig) -> String {
    let line_start = pos.line_start();
    let input = RuleInput {
        src,
        config,
        line_start,
        last: last_code_char(src, line_start),
    };

    let fired = RULES.iter().find_map(|(name, rule)| {
        let target = rule(&input)?;
        tracing::debug!(rule = name, ?target, line = pos.line, "indent rule fired");
        Some(target)
    });

    match fired {
        Some(target) => {
            let mut indent = build_indent(
                config,
                clamp_column(target.column),
                &src.line_text(target.reference_line),
            );
            indent.push_str(target.prefix);
            indent
        }
        None => {
            tracing::debug!(line = pos.line, "no indent rule fired");
            String::new()
        }
    }
}

/// The edit that indents the line just created by a line break before `pos`.
///
/// Whitespace already at the start of the new line is replaced. When the
/// new line starts with `}`, that brace is aligned with its scope; if the
/// break split `{}` apart, an indented blank line is opened between them
/// and the cursor is left on it. `None` when the line is already right.
pub fn indent_line(src: &Source<'_>, pos: Position, config: &IndentConfig) -> Option<Edit> {
    let line_start = pos.line_start();
    let first = Position::new(pos.line, src.leading_whitespace_len(pos.line));
    let existing = Span::new(line_start, first);

    let indent = match split_brace_indent(src, first, config) {
        Some((brace_indent, true)) => {
            let indent = compute_indent(src, pos, config);
            let back = brace_indent.chars().count() + 1;
            tracing::debug!(line = pos.line, "split braces onto separate lines");
            return Some(
                Edit::replace(existing, format!("{indent}\n{brace_indent}"))
                    .with_cursor_offset(-(back as isize)),
            );
        }
        Some((brace_indent, false)) => brace_indent,
        None => compute_indent(src, pos, config),
    };

    if src.text_between(existing.begin, existing.end) == indent {
        return None;
    }
    Some(Edit::replace(existing, indent))
}

/// Indentation for a `}` at `first`, and whether the break separated it
/// from a `{` just before
fn split_brace_indent(
    src: &Source<'_>,
    first: Position,
    config: &IndentConfig,
) -> Option<(String, bool)> {
    if src.char_at(first) != Some('}') || !src.is_code(first) {
        return None;
    }
    let brace_indent = closing_brace_indent(src, first, config)?;
    let split = matches!(last_code_char(src, first.line_start()), Some((_, '{')));
    Some((brace_indent, split))
}

fn closing_brace_indent(
    src: &Source<'_>,
    brace: Position,
    config: &IndentConfig,
) -> Option<String> {
    let open = find_matching_open(src, brace, '}')?;
    let column = token_column(src, open, config.effective_tab_width());
    Some(build_indent(config, column, &src.line_text(open.line)))
}

fn comment_continuation(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let src = cx.src;
    let brk = src.prev(cx.line_start)?;

    if src.classify(brk) == ContextClass::BlockComment {
        let open = src.class_run_start(brk, ContextClass::BlockComment);
        return Some(Target {
            column: cx.column_of(open) + 1,
            reference_line: open.line,
            prefix: "* ",
        });
    }

    let last = src.prev(brk).filter(|p| p.line == brk.line)?;
    if src.classify(last) != ContextClass::LineComment {
        return None;
    }
    let start = src.class_run_start(last, ContextClass::LineComment);
    if !src.is_first_on_line(start) {
        return None;
    }
    Some(Target {
        column: cx.column_of(start),
        reference_line: start.line,
        prefix: "// ",
    })
}

fn list_continuation(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let Some((at, ',')) = cx.last else {
        return None;
    };

    let paren = find_matching_open(cx.src, at, ')');
    let brace = find_matching_open(cx.src, at, '}');
    match (paren, brace) {
        (Some(paren), brace) if brace.map_or(true, |brace| paren > brace) => {
            Some(Target::at(cx.column_of(paren) + 1, paren.line))
        }
        (_, Some(brace)) => Some(Target::at(
            cx.scope_column(brace) + cx.config.post_scope(),
            brace.line,
        )),
        _ => None,
    }
}

fn statement_end(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let Some((at, ';')) = cx.last else {
        return None;
    };

    let start = statement_start(cx.src, at)?;
    if start.line >= at.line || starts_case_clause(cx.src, start) {
        return None;
    }
    Some(Target::at(cx.first_char_column(start.line), start.line))
}

/// First code character of the statement ending at `semi`.
///
/// `None` when the statement is inside an open parenthesis or is part of a
/// labelled or `case` clause.
fn statement_start(src: &Source<'_>, semi: Position) -> Option<Position> {
    let mut depth = 0usize;
    let mut line = semi.line;
    let mut start = None;

    for (at, ch) in CodeCharsBackward::new(src, semi) {
        if at.line != line {
            line = at.line;
            if is_directive_line(src, line) {
                break;
            }
        }
        match ch {
            ')' | ']' => depth += 1,
            '(' | '[' => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            ';' | '{' | '}' if depth == 0 => break,
            ':' if depth == 0 && !is_scope_operator(src, at) => return None,
            _ => {}
        }
        if !ch.is_whitespace() {
            start = Some(at);
        }
    }
    start
}

fn starts_case_clause(src: &Source<'_>, start: Position) -> bool {
    ["case", "default"].iter().any(|keyword| {
        src.matches_at(start, keyword)
            .and_then(|end| src.char_at(end))
            .map_or(true, |ch| !is_word_char(ch))
    })
}

fn is_directive_line(src: &Source<'_>, line: usize) -> bool {
    let first = Position::new(line, src.leading_whitespace_len(line));
    src.char_at(first) == Some('#')
}

fn is_scope_operator(src: &Source<'_>, colon: Position) -> bool {
    src.char_before(colon) == Some(':')
        || src.next(colon).and_then(|p| src.char_at(p)) == Some(':')
}

fn open_condition(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let (at, _) = cx.last?;
    let after = cx.src.next(at)?;
    let open = find_unclosed_paren(cx.src, after)?;
    Some(Target::at(cx.column_of(open) + 1, open.line))
}

fn block_close(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let Some((at, '}')) = cx.last else {
        return None;
    };

    let open = find_matching_open(cx.src, at, '}')?;
    match find_matching_open(cx.src, open, '}') {
        Some(outer) => Some(Target::at(
            cx.scope_column(outer) + cx.config.post_scope(),
            outer.line,
        )),
        None => Some(Target::at(cx.scope_column(open), open.line)),
    }
}

fn completed_condition(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let Some((at, ')')) = cx.last else {
        return None;
    };

    let src = cx.src;
    let open = find_matching_open(src, at, ')')?;
    // `} else for (` has `else` first in priority but `for` owns the paren
    let start = CONDITION_KEYWORDS.iter().find_map(|&keyword| {
        let start = find_keyword_backward(src, open, keyword, open.line_start())?;
        let end = src.advance(start, keyword.chars().count())?;
        src.text_between(end, open).trim().is_empty().then_some(start)
    })?;
    Some(Target::at(
        cx.first_char_column(start.line) + cx.config.condition(),
        start.line,
    ))
}

fn dangling_keyword(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let (at, ch) = cx.last?;
    if ch != 'e' && ch != 'o' {
        return None;
    }

    let src = cx.src;
    let after = src.next(at)?;
    let start = ["else", "do"].iter().find_map(|keyword| {
        let start = find_keyword_backward(src, after, keyword, at.line_start())?;
        (src.advance(start, keyword.len())? == after).then_some(start)
    })?;
    Some(Target::at(
        cx.scope_column(start) + cx.config.pre_scope(),
        start.line,
    ))
}

fn open_scope(cx: &RuleInput<'_, '_>) -> Option<Target> {
    let (at, ch) = cx.last?;
    let brace = if ch == '{' {
        at
    } else {
        find_matching_open(cx.src, cx.src.next(at)?, '}')?
    };
    Some(Target::at(
        cx.scope_column(brace) + cx.config.post_scope(),
        brace.line,
    ))
}
