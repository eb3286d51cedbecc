// Chunk: docs/chunks/preview_config - TOML preview configuration

//! Preview configuration.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration:
//!
//! ```toml
//! query_root = "queries"        # relative to the config file
//! tab_width = 4
//! default_indent = "    "
//! indent_guide = "│"
//! first_line_number = 1
//! binary_placeholder = "<binary>"
//! strict_events = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SyntaxError};
use crate::indent::{DEFAULT_INDENT, GUIDE_GLYPH, MAX_TAB_WIDTH};

/// Placeholder line shown for content that is not UTF-8 text.
pub const BINARY_PLACEHOLDER: &str = "<binary>";

/// Query files shipped with this crate.
pub fn default_query_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/queries"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Directory holding `{language}/highlights.scm` and `{language}/locals.scm`.
    pub query_root: PathBuf,
    /// Display width of a tab inside an indent guide.
    pub tab_width: usize,
    /// Indent unit used when no line of the content is indented.
    pub default_indent: String,
    /// Glyph drawn at the start of each indent unit.
    pub indent_guide: char,
    /// Gutter label of the first line.
    pub first_line_number: usize,
    /// Text of the single line rendered for binary content.
    pub binary_placeholder: String,
    /// Panic on unbalanced sweep events instead of logging and skipping.
    pub strict_events: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            query_root: default_query_root(),
            tab_width: 4,
            default_indent: DEFAULT_INDENT.to_string(),
            indent_guide: GUIDE_GLYPH,
            first_line_number: 1,
            binary_placeholder: BINARY_PLACEHOLDER.to_string(),
            strict_events: cfg!(debug_assertions),
        }
    }
}

impl PreviewConfig {
    /// Parses configuration text. Relative paths are kept as written.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(SyntaxError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TAB_WIDTH).contains(&self.tab_width) {
            return Err(SyntaxError::InvalidConfig {
                field: "tab_width",
                reason: format!(
                    "must be between 1 and {MAX_TAB_WIDTH}, got {}",
                    self.tab_width
                ),
            });
        }
        Ok(())
    }

    /// Reads a configuration file. A relative `query_root` is resolved
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SyntaxError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text)?;

        if config.query_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.query_root = dir.join(&config.query_root);
            }
        }
        log::debug!(
            "loaded preview config from {} (query root {})",
            path.display(),
            config.query_root.display()
        );
        Ok(config)
    }
}
