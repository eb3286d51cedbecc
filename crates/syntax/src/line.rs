// Chunk: docs/chunks/preview_render - Sweep-based preview rendering

use glance_text::{Span, StyledLine};

/// One rendered display line.
///
/// The spans are laid out as: gutter label, indent guides, content. The
/// gutter and guides are decoration; `content()` is the source text of the
/// line after its leading indent units, split into styled runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLine {
    /// Gutter label, or `None` for lines that have no gutter
    /// (the binary placeholder and the empty-document line).
    pub number: Option<usize>,
    /// How many leading indent units were drawn as guides.
    pub guides: usize,
    spans: Vec<Span>,
    content_start: usize,
}

impl PreviewLine {
    pub(crate) fn new(number: usize, gutter: Span, guides: Vec<Span>, content: Vec<Span>) -> Self {
        let guide_count = guides.len();
        let mut spans = Vec::with_capacity(1 + guide_count + content.len());
        spans.push(gutter);
        spans.extend(guides);
        spans.extend(content);
        Self {
            number: Some(number),
            guides: guide_count,
            spans,
            content_start: 1 + guide_count,
        }
    }

    /// A line with no gutter and a single unstyled run.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            number: None,
            guides: 0,
            spans: vec![Span::plain(text)],
            content_start: 0,
        }
    }

    /// A line with no gutter and no runs.
    pub fn empty() -> Self {
        Self {
            number: None,
            guides: 0,
            spans: Vec::new(),
            content_start: 0,
        }
    }

    /// Every run of the line, gutter first.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The gutter run, if the line has one.
    pub fn gutter(&self) -> Option<&Span> {
        self.number.and(self.spans.first())
    }

    /// Indent guide runs.
    pub fn guide_spans(&self) -> &[Span] {
        let start = self.content_start - self.guides;
        &self.spans[start..self.content_start]
    }

    /// Content runs, after gutter and guides.
    pub fn content(&self) -> &[Span] {
        &self.spans[self.content_start..]
    }

    pub fn content_text(&self) -> String {
        self.content().iter().map(|s| s.text.as_str()).collect()
    }

    /// Full display text including gutter and guides.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn to_styled_line(&self) -> StyledLine {
        StyledLine::new(self.spans.clone())
    }

    pub fn into_styled_line(self) -> StyledLine {
        StyledLine::new(self.spans)
    }
}
