// Chunk: docs/chunks/query_store - Memoized per-language query loading

//! Per-language highlight and locals queries, loaded from disk once.
//!
//! Queries live under a root directory as `{root}/{language}/highlights.scm`
//! and `{root}/{language}/locals.scm`. Each (language, kind) pair is loaded
//! at most once for the lifetime of the store: a missing file, an unreadable
//! file and a query that fails to compile are all remembered as "absent" and
//! never retried.
//!
//! One `OnceLock` cell is allocated per registered grammar up front, so the
//! map itself is immutable after construction and lookups never take a lock
//! once a cell is populated.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tree_sitter::{Language, Query};

use crate::error::{Result, SyntaxError};
use crate::registry::LanguageRegistry;

/// The query files the renderer knows how to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Highlights,
    Locals,
}

impl QueryKind {
    /// File name of this query inside a language directory.
    pub fn file_name(self) -> &'static str {
        match self {
            QueryKind::Highlights => "highlights.scm",
            QueryKind::Locals => "locals.scm",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

struct LanguageQueries {
    grammar: Language,
    highlights: OnceLock<Option<Query>>,
    locals: OnceLock<Option<Query>>,
}

impl LanguageQueries {
    fn cell(&self, kind: QueryKind) -> &OnceLock<Option<Query>> {
        match kind {
            QueryKind::Highlights => &self.highlights,
            QueryKind::Locals => &self.locals,
        }
    }
}

/// Process-lifetime cache of compiled queries.
pub struct QueryStore {
    root: PathBuf,
    languages: HashMap<&'static str, LanguageQueries>,
}

impl QueryStore {
    /// Creates a store reading from `root`, with one slot per grammar in
    /// `registry`. Nothing is read until a query is first requested.
    pub fn new(root: impl Into<PathBuf>, registry: &LanguageRegistry) -> Self {
        let languages = registry
            .languages()
            .map(|(key, grammar)| {
                (
                    key,
                    LanguageQueries {
                        grammar: grammar.clone(),
                        highlights: OnceLock::new(),
                        locals: OnceLock::new(),
                    },
                )
            })
            .collect();

        Self {
            root: root.into(),
            languages,
        }
    }

    /// The directory queries are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the compiled query, loading it on first use.
    ///
    /// Returns `None` for languages without a grammar and for queries that
    /// are missing or broken; the latter are logged once when first seen.
    pub fn get(&self, language: &str, kind: QueryKind) -> Option<&Query> {
        let queries = self.languages.get(language)?;
        queries
            .cell(kind)
            .get_or_init(|| {
                match load_query(&self.root, language, &queries.grammar, kind) {
                    Ok(Some(query)) => {
                        log::debug!("loaded {kind} for '{language}'");
                        Some(query)
                    }
                    Ok(None) => {
                        log::debug!("no {kind} for '{language}'");
                        None
                    }
                    Err(err) => {
                        log::warn!("{}", err.report());
                        None
                    }
                }
            })
            .as_ref()
    }
}

/// Reads and compiles one query file.
///
/// A file that does not exist is not an error: it yields `Ok(None)`.
pub fn load_query(
    root: &Path,
    language: &str,
    grammar: &Language,
    kind: QueryKind,
) -> Result<Option<Query>> {
    let path = root.join(language).join(kind.file_name());
    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(SyntaxError::QueryRead { path, source }),
    };

    Query::new(grammar, &text)
        .map(Some)
        .map_err(|source| SyntaxError::MalformedQuery {
            language: language.to_string(),
            kind,
            source,
        })
}
