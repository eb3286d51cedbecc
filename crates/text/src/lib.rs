// Chunk: docs/chunks/styled_text - Styled text runs shared by the renderer and its consumers

//! glance-text: positions and styled text for glance previews.
//!
//! This crate holds the plain data types that flow between the syntax
//! renderer and whatever draws its output:
//!
//! - [`Position`]: a (line, column) coordinate, ordered lexicographically
//! - [`Color`], [`Style`]: text attributes a theme can assign
//! - [`Span`]: a run of text with uniform styling
//! - [`StyledLine`]: a sequence of spans comprising a single display line
//!
//! # Example
//!
//! ```
//! use glance_text::{Color, Span, Style, StyledLine};
//!
//! let keyword = Style {
//!     fg: Color::Rgb { r: 0xc6, g: 0xa0, b: 0xf6 },
//!     ..Style::default()
//! };
//! let line = StyledLine::new(vec![Span::new("def", keyword), Span::plain(" f():")]);
//! assert_eq!(line.text(), "def f():");
//! ```

mod styled;
mod types;

pub use styled::{merge_spans, Color, Span, Style, StyledLine, UnderlineStyle};
pub use types::Position;
