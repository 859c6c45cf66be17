//! Position and span types.

/// A position in the text buffer (line and column, both 0-indexed).
///
/// `column` counts characters. `column == line_length` addresses the line
/// break (or the end of the buffer on the last line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Start of this position's line
    pub const fn line_start(self) -> Self {
        Self::new(self.line, 0)
    }
}

/// A half-open range `begin..end` between two positions, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    /// Create a span, swapping the endpoints if they are out of order
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        let a = Position::new(0, 5);
        let b = Position::new(1, 0);
        let c = Position::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_span_normalizes_order() {
        let span = Span::new(Position::new(2, 1), Position::new(0, 4));
        assert_eq!(span.begin, Position::new(0, 4));
        assert_eq!(span.end, Position::new(2, 1));
    }

    #[test]
    fn test_empty_span() {
        let p = Position::new(3, 3);
        assert!(Span::new(p, p).is_empty());
        assert_eq!(p.line_start(), Position::new(3, 0));
    }
}
