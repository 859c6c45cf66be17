//! Lexical context classification.
//!
//! The scanners never look inside comments or string literals. Which class a
//! position belongs to is answered by a [`ContextClassifier`]. The crate
//! ships two: [`SyntaxClassifier`](crate::syntax::SyntaxClassifier), backed
//! by a tree-sitter parse, and [`LexicalClassifier`]. Hosts with their own
//! highlighter can implement the trait over their highlight spans.

use crate::buffer::TextBuffer;
use crate::position::Position;

/// Lexical category of a single character position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContextClass {
    #[default]
    Code,
    LineComment,
    BlockComment,
    /// String or character literal, quotes included
    String,
}

impl ContextClass {
    pub fn is_comment(self) -> bool {
        matches!(self, ContextClass::LineComment | ContextClass::BlockComment)
    }

    pub fn is_code(self) -> bool {
        self == ContextClass::Code
    }
}

/// Answers "what kind of text is the character at `pos`".
///
/// The class of a position is the class of the character starting there, so
/// the delimiters (`/*`, `*/`, `//`, quotes) belong to their comment or
/// literal. Positions without information classify as [`ContextClass::Code`].
pub trait ContextClassifier {
    fn classify(&self, pos: Position) -> ContextClass;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClassSpan {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) class: ContextClass,
}

/// Sorted, non-overlapping class spans over char offsets, with the line
/// table needed to turn a [`Position`] into an offset
#[derive(Debug, Clone, Default)]
pub(crate) struct SpanTable {
    line_starts: Vec<usize>,
    spans: Vec<ClassSpan>,
}

impl SpanTable {
    pub(crate) fn new(chars: &[char], mut spans: Vec<ClassSpan>) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, &c)| c == '\n')
                .map(|(i, _)| i + 1),
        );

        spans.sort_by_key(|s| s.start);
        let mut end = 0;
        spans.retain(|s| {
            let keep = s.start >= end && s.start < s.end;
            if keep {
                end = s.end;
            }
            keep
        });

        tracing::trace!(spans = spans.len(), lines = line_starts.len(), "classified buffer");
        Self { line_starts, spans }
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        let start = *self.line_starts.get(pos.line)?;
        let next = self.line_starts.get(pos.line + 1).copied();
        // Clamp into the line, the last valid column being its line break
        let column = match next {
            Some(next) => pos.column.min(next - 1 - start),
            None => pos.column,
        };
        Some(start + column)
    }

    pub(crate) fn classify(&self, pos: Position) -> ContextClass {
        let Some(offset) = self.offset(pos) else {
            return ContextClass::Code;
        };
        let idx = self.spans.partition_point(|s| s.start <= offset);
        match idx.checked_sub(1).map(|i| self.spans[i]) {
            Some(span) if offset < span.end => span.class,
            _ => ContextClass::Code,
        }
    }
}

/// Comment and literal spans of `chars`, found in one forward pass
pub(crate) fn scan_spans(chars: &[char]) -> Vec<ClassSpan> {
    let n = chars.len();
    let at = |i: usize| chars.get(i).copied();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < n {
        let start = i;
        match (chars[i], at(i + 1)) {
            ('/', Some('/')) => {
                i += 2;
                while i < n && !(chars[i] == '\n' && chars[i - 1] != '\\') {
                    i += 1;
                }
                spans.push(ClassSpan {
                    start,
                    end: i,
                    class: ContextClass::LineComment,
                });
            }
            ('/', Some('*')) => {
                i += 2;
                loop {
                    if i + 1 >= n {
                        i = n;
                        break;
                    }
                    if chars[i] == '*' && chars[i + 1] == '/' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
                spans.push(ClassSpan {
                    start,
                    end: i,
                    class: ContextClass::BlockComment,
                });
            }
            (quote @ ('"' | '\''), _) => {
                i += 1;
                while i < n {
                    match chars[i] {
                        '\\' => i += 2,
                        '\n' => break,
                        c if c == quote => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                spans.push(ClassSpan {
                    start,
                    end: i.min(n),
                    class: ContextClass::String,
                });
            }
            _ => i += 1,
        }
    }
    spans
}

/// Classifier computed from the raw text in one forward pass.
///
/// Recognizes `//` comments (with `\` line continuation), `/* */` comments
/// (unterminated ones run to the end of the buffer), and `"…"` / `'…'`
/// literals with `\` escapes (an unescaped newline ends an unterminated one).
/// [`SyntaxClassifier`](crate::syntax::SyntaxClassifier) falls back to it for
/// text that does not parse cleanly.
#[derive(Debug, Clone, Default)]
pub struct LexicalClassifier {
    table: SpanTable,
}

impl LexicalClassifier {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let spans = scan_spans(&chars);
        Self {
            table: SpanTable::new(&chars, spans),
        }
    }

    pub fn from_buffer(buffer: &dyn TextBuffer) -> Self {
        Self::new(&buffer.content())
    }
}

impl ContextClassifier for LexicalClassifier {
    fn classify(&self, pos: Position) -> ContextClass {
        self.table.classify(pos)
    }
}
