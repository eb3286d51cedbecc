// Chunk: docs/chunks/styled_text - Styled text runs shared by the renderer and its consumers

//! Styled text for preview rendering.
//!
//! Styling is kept to what a preview theme needs, so a consumer can map it
//! onto any surface:
//! - [`Color`]: default or 24-bit RGB
//! - [`Style`]: foreground plus bold, italic and underline
//! - [`Span`]: A run of text with uniform styling
//! - [`StyledLine`]: A sequence of spans comprising a single line
//!
//! None of these types know how to emit escape sequences; that is left to
//! the consumer.

// =============================================================================
// Color Types
// =============================================================================

/// Text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Default foreground; the consumer decides.
    #[default]
    Default,
    /// 24-bit RGB color.
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Builds an RGB color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Color::Rgb {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }
}

// =============================================================================
// Underline Types
// =============================================================================

/// Underline rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnderlineStyle {
    /// No underline.
    #[default]
    None,
    /// Single straight underline.
    Single,
}

// =============================================================================
// Style
// =============================================================================

/// Text styling attributes.
///
/// The default style is unstyled text: default color, no attributes.
///
/// # Example
///
/// ```
/// use glance_text::{Color, Style, UnderlineStyle};
///
/// let link = Style {
///     fg: Color::hex(0x8aadf4),
///     italic: true,
///     underline: UnderlineStyle::Single,
///     ..Style::default()
/// };
/// assert!(!link.is_default());
/// assert!(Style::default().is_default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Underline style.
    pub underline: UnderlineStyle,
}

impl Style {
    /// Style with only a foreground color set.
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: color,
            bold: false,
            italic: false,
            underline: UnderlineStyle::None,
        }
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn underlined(mut self) -> Self {
        self.underline = UnderlineStyle::Single;
        self
    }

    /// Returns true if this is the unstyled default.
    pub fn is_default(&self) -> bool {
        *self == Style::default()
    }
}

// =============================================================================
// Span and StyledLine
// =============================================================================

/// A contiguous run of text with uniform styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content of this span.
    pub text: String,
    /// The style applied to this text.
    pub style: Style,
}

impl Span {
    /// Creates a new span with the given text and style.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Creates an unstyled span (default style).
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }
}

/// A display line as a sequence of styled spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledLine {
    /// The spans comprising this line.
    pub spans: Vec<Span>,
}

impl StyledLine {
    /// Creates a new styled line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Returns true if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text of every span, styles dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Merges adjacent spans that have the same style.
pub fn merge_spans(spans: Vec<Span>) -> Vec<Span> {
    let mut result: Vec<Span> = Vec::with_capacity(spans.len());

    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        if let Some(last) = result.last_mut() {
            if last.style == span.style {
                last.text.push_str(&span.text);
                continue;
            }
        }
        result.push(span);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(
            Color::hex(0xeed49f),
            Color::Rgb {
                r: 0xee,
                g: 0xd4,
                b: 0x9f
            }
        );
    }

    #[test]
    fn const_builders_compose() {
        let style = Style::fg(Color::hex(0x939ab7)).italic();
        assert!(style.italic);
        assert!(!style.bold);
        assert_eq!(style.fg, Color::hex(0x939ab7));
        assert!(Style::fg(Color::Default).is_default());
    }

    #[test]
    fn underlined_sets_single_underline() {
        let style = Style::fg(Color::hex(0x8aadf4)).underlined();
        assert_eq!(style.underline, UnderlineStyle::Single);
        assert!(!style.is_default());
    }

    #[test]
    fn text_concatenates_spans() {
        let line = StyledLine::new(vec![
            Span::plain("let "),
            Span::new("x", Style::default().bold()),
            Span::plain(" = 1"),
        ]);
        assert_eq!(line.text(), "let x = 1");
    }

    #[test]
    fn empty_line_has_no_spans() {
        assert!(StyledLine::default().is_empty());
        assert!(!StyledLine::new(vec![Span::plain("")]).is_empty());
    }

    #[test]
    fn merge_spans_combines_same_style() {
        let style = Style::default();
        let spans = vec![
            Span::new("hello", style),
            Span::new(" ", style),
            Span::new("world", style),
        ];
        let merged = merge_spans(spans);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "hello world");
    }

    #[test]
    fn merge_spans_preserves_different_styles() {
        let bold = Style::default().bold();
        let spans = vec![Span::new("hello", bold), Span::plain("world")];
        let merged = merge_spans(spans);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn merge_spans_drops_empty_runs() {
        let bold = Style::default().bold();
        let spans = vec![
            Span::new("a", bold),
            Span::plain(""),
            Span::new("b", bold),
        ];
        let merged = merge_spans(spans);
        assert_eq!(merged, vec![Span::new("ab", bold)]);
    }
}
