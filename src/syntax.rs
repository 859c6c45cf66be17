//! Tree-sitter backed context classification
//!
//! The buffer is parsed with the C grammar and a small query picks out the
//! comment and literal nodes. A parse with errors (an unterminated comment,
//! a string still being typed) says little about where those nodes really
//! are, so such text is classified lexically instead.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Parser, Query, QueryCursor, Tree};

use crate::buffer::TextBuffer;
use crate::context::{scan_spans, ClassSpan, ContextClass, ContextClassifier, SpanTable};
use crate::position::Position;

/// Macro bodies are one opaque `preproc_arg` token in the grammar, so their
/// comments and literals are found by scanning the token's text
const CONTEXT_QUERY: &str = r#"
(comment) @comment
(string_literal) @string
(char_literal) @string
(system_lib_string) @string
(preproc_arg) @preproc
"#;

/// Classifier built from a tree-sitter parse of the whole buffer
#[derive(Debug, Clone, Default)]
pub struct SyntaxClassifier {
    table: SpanTable,
    parsed: bool,
}

impl SyntaxClassifier {
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let (spans, parsed) = match parse_spans(text, &chars) {
            Some(spans) => (spans, true),
            None => (scan_spans(&chars), false),
        };
        Self {
            table: SpanTable::new(&chars, spans),
            parsed,
        }
    }

    pub fn from_buffer(buffer: &dyn TextBuffer) -> Self {
        Self::new(&buffer.content())
    }

    /// Whether the classes came from a clean parse rather than the lexical
    /// fallback
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }
}

impl ContextClassifier for SyntaxClassifier {
    fn classify(&self, pos: Position) -> ContextClass {
        self.table.classify(pos)
    }
}

fn parse(text: &str, language: &Language) -> Option<Tree> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(language) {
        tracing::error!("Failed to set language for C: {}", e);
        return None;
    }
    parser.parse(text, None)
}

/// Comment and literal spans from a clean parse, in char offsets
fn parse_spans(text: &str, chars: &[char]) -> Option<Vec<ClassSpan>> {
    let language: Language = tree_sitter_c::LANGUAGE.into();
    let tree = parse(text, &language)?;
    let root = tree.root_node();
    if root.has_error() {
        tracing::debug!("parse has errors, classifying lexically");
        return None;
    }

    let query = match Query::new(&language, CONTEXT_QUERY) {
        Ok(query) => query,
        Err(e) => {
            tracing::error!("Failed to compile context query: {:?}", e);
            return None;
        }
    };

    // Tree-sitter reports byte offsets; spans are kept in chars
    let byte_starts: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    let to_char = |byte: usize| byte_starts.partition_point(|&b| b < byte);

    let mut spans = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(&query, root, text.as_bytes());
    while let Some((query_match, capture_idx)) = captures.next() {
        let capture = &query_match.captures[*capture_idx];
        let start = to_char(capture.node.start_byte());
        let end = to_char(capture.node.end_byte());

        let class = match query.capture_names()[capture.index as usize] {
            "comment" if chars.get(start + 1) == Some(&'/') => ContextClass::LineComment,
            "comment" => ContextClass::BlockComment,
            "string" => ContextClass::String,
            _ => {
                let body = chars.get(start..end).unwrap_or_default();
                spans.extend(scan_spans(body).into_iter().map(|span| ClassSpan {
                    start: span.start + start,
                    end: span.end + start,
                    ..span
                }));
                continue;
            }
        };
        spans.push(ClassSpan { start, end, class });
    }
    Some(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_at(classifier: &SyntaxClassifier, line: usize, column: usize) -> ContextClass {
        classifier.classify(Position::new(line, column))
    }

    #[test]
    fn test_function_body() {
        let text = "int main(void) {\n    char c = '{'; // }\n    return puts(\"}\"); /* { */\n}\n";
        let classifier = SyntaxClassifier::new(text);
        assert!(classifier.is_parsed());

        assert_eq!(class_at(&classifier, 1, 4), ContextClass::Code);
        assert_eq!(class_at(&classifier, 1, 14), ContextClass::String);
        assert_eq!(class_at(&classifier, 1, 16), ContextClass::Code);
        assert_eq!(class_at(&classifier, 1, 18), ContextClass::LineComment);
        assert_eq!(class_at(&classifier, 1, 21), ContextClass::LineComment);
        assert_eq!(class_at(&classifier, 1, 22), ContextClass::Code);

        assert_eq!(class_at(&classifier, 2, 16), ContextClass::String);
        assert_eq!(class_at(&classifier, 2, 17), ContextClass::String);
        assert_eq!(class_at(&classifier, 2, 19), ContextClass::Code);
        assert_eq!(class_at(&classifier, 2, 22), ContextClass::BlockComment);
        assert_eq!(class_at(&classifier, 2, 28), ContextClass::BlockComment);
        assert_eq!(class_at(&classifier, 3, 0), ContextClass::Code);
    }

    #[test]
    fn test_macro_body_is_scanned() {
        let classifier = SyntaxClassifier::new("#define OPEN \"{\" // brace\nint x;\n");
        assert!(classifier.is_parsed());
        assert_eq!(class_at(&classifier, 0, 8), ContextClass::Code);
        assert_eq!(class_at(&classifier, 0, 14), ContextClass::String);
        assert_eq!(class_at(&classifier, 0, 17), ContextClass::LineComment);
        assert_eq!(class_at(&classifier, 1, 0), ContextClass::Code);
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let classifier = SyntaxClassifier::new("/* é */ int x;\n");
        assert!(classifier.is_parsed());
        assert_eq!(class_at(&classifier, 0, 6), ContextClass::BlockComment);
        assert_eq!(class_at(&classifier, 0, 8), ContextClass::Code);
    }

    #[test]
    fn test_unterminated_comment_falls_back() {
        let classifier = SyntaxClassifier::new("int x; /* open\n");
        assert!(!classifier.is_parsed());
        assert_eq!(class_at(&classifier, 0, 14), ContextClass::BlockComment);
    }

    #[test]
    fn test_empty_buffer() {
        let classifier = SyntaxClassifier::new("");
        assert_eq!(class_at(&classifier, 0, 0), ContextClass::Code);
    }
}
