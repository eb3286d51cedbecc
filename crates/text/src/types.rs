// Chunk: docs/chunks/styled_text - Styled text runs shared by the renderer and its consumers

use std::cmp::Ordering;

/// Position in a document as (line, column) where both are 0-indexed.
///
/// Columns are byte offsets into the line, matching the point convention of
/// the tree-sitter parser. Positions order by line first, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.line.cmp(&other.line) {
            Ordering::Equal => self.col.cmp(&other.col),
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_dominates_column() {
        assert!(Position::new(0, 100) < Position::new(1, 0));
        assert!(Position::new(2, 0) > Position::new(1, 7));
    }

    #[test]
    fn column_breaks_ties_within_a_line() {
        assert!(Position::new(3, 1) < Position::new(3, 2));
        assert_eq!(Position::new(3, 2).cmp(&Position::new(3, 2)), Ordering::Equal);
    }

    #[test]
    fn min_picks_earliest() {
        let a = Position::new(4, 9);
        let b = Position::new(5, 0);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn default_is_document_start() {
        assert_eq!(Position::default(), Position::new(0, 0));
    }
}
