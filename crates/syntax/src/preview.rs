// Chunk: docs/chunks/preview_render - Sweep-based preview rendering

//! Entry point: raw file content in, styled display lines out.

use crate::captures::{CaptureSource, TreeSitterSource};
use crate::config::PreviewConfig;
use crate::error::SyntaxError;
use crate::events::{extract_events, schedule};
use crate::indent::{guide_text, normalize};
use crate::line::PreviewLine;
use crate::sweep::{sweep, SweepOptions};
use crate::theme::SyntaxTheme;

/// File content as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// Content that is not valid UTF-8; rendered as a placeholder.
    Binary,
}

impl Content {
    /// Decodes bytes as UTF-8, falling back to [`Content::Binary`].
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Content::Text(text),
            Err(err) => {
                let err = SyntaxError::UndecodableContent(err.utf8_error());
                log::debug!("{}", err.report());
                Content::Binary
            }
        }
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

/// Renders file previews.
///
/// Rendering is a pure function of (content, language) for a given renderer:
/// all sweep state lives in the call. A renderer can be shared across
/// threads.
pub struct PreviewRenderer<S = TreeSitterSource> {
    source: S,
    theme: SyntaxTheme,
    config: PreviewConfig,
}

impl PreviewRenderer<TreeSitterSource> {
    /// Tree-sitter backed renderer reading queries from `config.query_root`.
    pub fn from_config(config: PreviewConfig) -> Self {
        let source = TreeSitterSource::new(config.query_root.clone());
        Self::new(source, SyntaxTheme::default(), config)
    }
}

impl Default for PreviewRenderer<TreeSitterSource> {
    fn default() -> Self {
        Self::from_config(PreviewConfig::default())
    }
}

impl<S: CaptureSource> PreviewRenderer<S> {
    pub fn new(source: S, theme: SyntaxTheme, config: PreviewConfig) -> Self {
        Self {
            source,
            theme,
            config,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn theme(&self) -> &SyntaxTheme {
        &self.theme
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Renders `content`, highlighting with `language` when given.
    ///
    /// Never fails: unknown languages, missing queries and parse failures
    /// all produce unstyled lines.
    pub fn render(&self, content: &Content, language: Option<&str>) -> Vec<PreviewLine> {
        let text = match content {
            Content::Text(text) => text,
            Content::Binary => {
                return vec![PreviewLine::placeholder(self.config.binary_placeholder.as_str())]
            }
        };

        let normalized = normalize(text, &self.config.default_indent);
        if normalized.is_empty() {
            return vec![PreviewLine::empty()];
        }

        let mut events = match language {
            Some(language) => {
                // Captures must line up with the repaired lines, so the
                // grammar sees the normalized text.
                let source = normalized.lines.join("\n");
                extract_events(&self.source.captures(language, &source))
            }
            None => Vec::new(),
        };
        schedule(&mut events);
        log::trace!(
            "rendering {} lines with {} events ({})",
            normalized.lines.len(),
            events.len(),
            language.unwrap_or("plain")
        );

        let guide = guide_text(
            &normalized.unit,
            self.config.indent_guide,
            self.config.tab_width,
        );
        let options = SweepOptions {
            theme: &self.theme,
            guide: &guide,
            first_line_number: self.config.first_line_number,
            strict: self.config.strict_events,
        };
        sweep(&normalized, events, &options)
    }

    /// Convenience for text content.
    pub fn render_text(&self, text: &str, language: Option<&str>) -> Vec<PreviewLine> {
        self.render(&Content::from(text), language)
    }
}
