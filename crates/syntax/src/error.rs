// Chunk: docs/chunks/preview_errors - Error taxonomy and logging

//! Errors raised while loading grammars and queries.
//!
//! None of these abort a render. The renderer logs them and degrades to
//! unstyled output; the enum exists so the loading APIs can say *why* a
//! language ended up without highlighting.

use std::path::PathBuf;

use thiserror::Error;

use crate::query::QueryKind;

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[derive(Debug, Error)]
pub enum SyntaxError {
    /// No grammar is registered for the language key.
    #[error("no grammar registered for language '{language}'")]
    UnsupportedLanguage { language: String },

    /// The query file exists but does not compile against the grammar.
    #[error("failed to compile {kind} for '{language}'")]
    MalformedQuery {
        language: String,
        kind: QueryKind,
        #[source]
        source: tree_sitter::QueryError,
    },

    /// The query file exists but could not be read.
    #[error("failed to read query file '{}'", path.display())]
    QueryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be read.
    #[error("failed to read config file '{}'", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for [`PreviewConfig`](crate::PreviewConfig).
    #[error("invalid preview configuration")]
    ConfigParse(#[source] toml::de::Error),

    /// Configuration parsed but a value is out of range.
    #[error("invalid preview configuration: {field} {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Content is not valid UTF-8 text.
    #[error("content is not valid UTF-8")]
    UndecodableContent(#[source] std::str::Utf8Error),
}

impl SyntaxError {
    /// Renders the error with its source chain on one line, for logging.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
