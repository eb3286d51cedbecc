// Chunk: docs/chunks/preview_render - Sweep-based preview rendering

//! glance-syntax: syntax-highlighted file previews built on tree-sitter.
//!
//! A preview is a read-only rendering of a whole file: every line gets a
//! right-aligned number in the gutter, leading indentation is drawn as
//! indent guides, and the content is split into styled runs.
//!
//! # Pipeline
//!
//! 1. [`normalize`] splits the content into lines, infers the indent unit
//!    and repairs blank lines so guides stay continuous.
//! 2. A [`CaptureSource`] (normally [`TreeSitterSource`]) parses the text
//!    and runs the language's `highlights.scm` and `locals.scm` queries.
//! 3. [`extract_events`] turns captures into positioned boundary events and
//!    [`schedule`] orders them.
//! 4. [`sweep`] walks the lines once, tracking open highlights, scopes and
//!    definitions, and emits [`PreviewLine`]s.
//!
//! Locals make a reference to a name take the style its definition had, so a
//! parameter keeps its parameter color wherever it is used in the function.
//!
//! # Example
//!
//! ```
//! use glance_syntax::{Content, PreviewConfig, PreviewRenderer};
//!
//! let renderer = PreviewRenderer::from_config(PreviewConfig::default());
//! let lines = renderer.render(&Content::from("def f(x):\n    return x\n"), Some("python"));
//! assert_eq!(lines.len(), 2);
//! assert_eq!(lines[1].guides, 1);
//! assert_eq!(lines[1].content_text(), "return x");
//! ```

mod captures;
mod config;
mod error;
mod events;
mod indent;
mod line;
mod preview;
mod query;
mod registry;
mod sweep;
mod theme;
mod worker;

pub use captures::{run_query, Capture, CaptureSet, CaptureSource, TreeSitterSource};
pub use config::{default_query_root, PreviewConfig, BINARY_PLACEHOLDER};
pub use error::{Result, SyntaxError};
pub use events::{
    extract_events, schedule, Event, EventKind, HighlightTag, LOCAL_DEFINITION, LOCAL_REFERENCE,
    LOCAL_SCOPE,
};
pub use indent::{
    detect_indent_unit, guide_text, indent_depth, is_blank, normalize, repair_blank_lines,
    split_lines, NormalizedText, DEFAULT_INDENT, GUIDE_GLYPH, MAX_TAB_WIDTH,
};
pub use line::PreviewLine;
pub use preview::{Content, PreviewRenderer};
pub use query::{load_query, QueryKind, QueryStore};
pub use registry::{language_for_extension, language_for_path, LanguageRegistry};
pub use sweep::{sweep, SweepOptions};
pub use theme::{capture_key_prefixes, SyntaxTheme, INDENT_GUIDE_KEY, LINE_NUMBER_KEY};
pub use worker::{PreviewResult, PreviewWorker};
