// Chunk: docs/chunks/capture_source - Parser/query boundary behind a trait

//! The boundary between the renderer and the grammar engine.
//!
//! Everything downstream of this module works on plain [`Capture`] values:
//! a capture key, the pattern that produced it, a position range and the
//! node text. [`CaptureSource`] is the seam: [`TreeSitterSource`] parses with
//! tree-sitter and runs the highlight and locals queries, while tests can
//! supply any closure `Fn(&str, &str) -> CaptureSet` instead.

use std::path::PathBuf;

use glance_text::Position;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Point, Query, QueryCursor, Tree};

use crate::error::{Result, SyntaxError};
use crate::query::{QueryKind, QueryStore};
use crate::registry::LanguageRegistry;

/// One captured node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Index of the query pattern that matched.
    pub pattern: usize,
    /// Capture key, e.g. `keyword.control` or `local.definition`.
    pub name: String,
    pub start: Position,
    pub end: Position,
    /// Exact source text of the node.
    pub text: String,
}

impl Capture {
    pub fn new(
        pattern: usize,
        name: impl Into<String>,
        start: Position,
        end: Position,
        text: impl Into<String>,
    ) -> Self {
        Self {
            pattern,
            name: name.into(),
            start,
            end,
            text: text.into(),
        }
    }
}

/// Captures from both queries for one (language, source) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureSet {
    pub highlights: Vec<Capture>,
    pub locals: Vec<Capture>,
}

impl CaptureSet {
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty() && self.locals.is_empty()
    }
}

/// Produces captures for source text in a given language.
///
/// Implementations never fail: a language they cannot handle yields an
/// empty [`CaptureSet`], which renders as plain text.
pub trait CaptureSource: Send + Sync {
    fn captures(&self, language: &str, source: &str) -> CaptureSet;
}

impl<F> CaptureSource for F
where
    F: Fn(&str, &str) -> CaptureSet + Send + Sync,
{
    fn captures(&self, language: &str, source: &str) -> CaptureSet {
        self(language, source)
    }
}

/// Tree-sitter backed capture source.
///
/// Owns the grammar registry and the query cache. A parser is created per
/// call, so a shared `TreeSitterSource` can serve concurrent renders.
pub struct TreeSitterSource {
    registry: LanguageRegistry,
    queries: QueryStore,
}

impl TreeSitterSource {
    /// Creates a source with every bundled grammar, reading queries from
    /// `query_root`.
    pub fn new(query_root: impl Into<PathBuf>) -> Self {
        Self::with_registry(LanguageRegistry::new(), query_root)
    }

    pub fn with_registry(registry: LanguageRegistry, query_root: impl Into<PathBuf>) -> Self {
        let queries = QueryStore::new(query_root, &registry);
        Self { registry, queries }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn queries(&self) -> &QueryStore {
        &self.queries
    }

    /// Parses `source` into a concrete syntax tree.
    pub fn parse(&self, language: &str, source: &str) -> Result<Tree> {
        let unsupported = || SyntaxError::UnsupportedLanguage {
            language: language.to_string(),
        };

        let grammar = self.registry.grammar(language).ok_or_else(unsupported)?;
        let mut parser = Parser::new();
        if let Err(err) = parser.set_language(grammar) {
            log::warn!("grammar for '{language}' rejected by parser: {err}");
            return Err(unsupported());
        }
        parser.parse(source, None).ok_or_else(unsupported)
    }
}

impl CaptureSource for TreeSitterSource {
    fn captures(&self, language: &str, source: &str) -> CaptureSet {
        let highlights = self.queries.get(language, QueryKind::Highlights);
        let locals = self.queries.get(language, QueryKind::Locals);
        if highlights.is_none() && locals.is_none() {
            return CaptureSet::default();
        }

        let tree = match self.parse(language, source) {
            Ok(tree) => tree,
            Err(err) => {
                log::debug!("{}", err.report());
                return CaptureSet::default();
            }
        };

        CaptureSet {
            highlights: highlights
                .map(|query| run_query(query, &tree, source))
                .unwrap_or_default(),
            locals: locals
                .map(|query| run_query(query, &tree, source))
                .unwrap_or_default(),
        }
    }
}

/// Runs `query` over the whole tree, flattening every match into captures.
pub fn run_query(query: &Query, tree: &Tree, source: &str) -> Vec<Capture> {
    let names = query.capture_names();
    let bytes = source.as_bytes();
    let mut captures = Vec::new();

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, tree.root_node(), bytes);
    while let Some(mat) = matches.next() {
        for capture in mat.captures {
            let node = capture.node;
            let Some(name) = names.get(capture.index as usize) else {
                continue;
            };
            captures.push(Capture {
                pattern: mat.pattern_index,
                name: (*name).to_string(),
                start: to_position(node.start_position()),
                end: to_position(node.end_position()),
                text: node.utf8_text(bytes).unwrap_or_default().to_string(),
            });
        }
    }

    captures
}

fn to_position(point: Point) -> Position {
    Position::new(point.row, point.column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_query(root: &Path, language: &str, kind: QueryKind, text: &str) {
        let dir = root.join(language);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(kind.file_name()), text).unwrap();
    }

    #[test]
    fn test_parse_supported_language() {
        let dir = tempfile::tempdir().unwrap();
        let source = TreeSitterSource::new(dir.path());
        let tree = source.parse("python", "x = 1\n").unwrap();
        assert_eq!(tree.root_node().kind(), "module");
    }

    #[test]
    fn test_parse_unsupported_language() {
        let dir = tempfile::tempdir().unwrap();
        let source = TreeSitterSource::new(dir.path());
        let err = source.parse("java", "class A {}").unwrap_err();
        assert!(matches!(err, SyntaxError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn test_no_queries_no_captures() {
        let dir = tempfile::tempdir().unwrap();
        let source = TreeSitterSource::new(dir.path());
        assert!(source.captures("python", "x = 1\n").is_empty());
        assert!(source.captures("java", "class A {}").is_empty());
    }

    #[test]
    fn test_highlight_captures_positions_and_patterns() {
        let dir = tempfile::tempdir().unwrap();
        write_query(
            dir.path(),
            "python",
            QueryKind::Highlights,
            "(integer) @constant.numeric\n(identifier) @variable\n",
        );
        let source = TreeSitterSource::new(dir.path());
        let set = source.captures("python", "x = 1\ny = x\n");

        assert!(set.locals.is_empty());
        assert!(set.highlights.contains(&Capture::new(
            0,
            "constant.numeric",
            Position::new(0, 4),
            Position::new(0, 5),
            "1",
        )));
        assert!(set.highlights.contains(&Capture::new(
            1,
            "variable",
            Position::new(1, 4),
            Position::new(1, 5),
            "x",
        )));
        let identifiers = set
            .highlights
            .iter()
            .filter(|c| c.name == "variable")
            .count();
        assert_eq!(identifiers, 3);
    }

    #[test]
    fn test_locals_captures_carry_text() {
        let dir = tempfile::tempdir().unwrap();
        write_query(
            dir.path(),
            "python",
            QueryKind::Locals,
            "(function_definition) @local.scope\n(identifier) @local.reference\n",
        );
        let source = TreeSitterSource::new(dir.path());
        let set = source.captures("python", "def f():\n    return f\n");

        let scope = set
            .locals
            .iter()
            .find(|c| c.name == "local.scope")
            .unwrap();
        assert_eq!(scope.start, Position::new(0, 0));
        assert!(scope.end >= Position::new(1, 12));

        let references: Vec<_> = set
            .locals
            .iter()
            .filter(|c| c.name == "local.reference")
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(references, vec!["f", "f"]);
    }

    #[test]
    fn test_closure_is_a_capture_source() {
        let stub = |language: &str, _source: &str| {
            let mut set = CaptureSet::default();
            if language == "stub" {
                set.highlights.push(Capture::new(
                    0,
                    "keyword",
                    Position::new(0, 0),
                    Position::new(0, 3),
                    "def",
                ));
            }
            set
        };
        assert_eq!(stub.captures("stub", "def").highlights.len(), 1);
        assert!(stub.captures("other", "def").is_empty());
    }
}
