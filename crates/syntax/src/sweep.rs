// Chunk: docs/chunks/preview_render - Sweep-based preview rendering

//! Sweep-line conversion of scheduled events into styled display lines.
//!
//! The sweep walks the normalized text once, from the start of the first
//! line to the end of the last. At each position it first applies every
//! event at or before that position, then emits the text up to the next
//! event (or end of content) in the style the current state resolves to.
//!
//! ## State
//!
//! - a scope stack, each scope listing the symbols defined in it (the root
//!   scope is never popped)
//! - per-symbol definition stacks of styles; the innermost live binding is
//!   the last element
//! - multisets of open references and open highlights
//!
//! ## Resolution
//!
//! The effective style at a position is, in order:
//!
//! 1. the innermost definition style of an open reference, checking open
//!    references in byte order of their symbol text,
//! 2. the first theme match among open highlight keys, ordered by pattern
//!    index then key,
//! 3. the default style.
//!
//! A definition binds its symbol to the effective style at its own
//! position, evaluated after all other events at that position.

use std::collections::{BTreeMap, HashMap};

use glance_text::{merge_spans, Position, Span, Style};

use crate::events::{Event, EventKind, HighlightTag};
use crate::indent::NormalizedText;
use crate::line::PreviewLine;
use crate::theme::SyntaxTheme;

/// Rendering parameters that are not part of the text itself.
#[derive(Debug, Clone, Copy)]
pub struct SweepOptions<'a> {
    pub theme: &'a SyntaxTheme,
    /// Display text substituted for each leading indent unit.
    pub guide: &'a str,
    /// Gutter label of the first line.
    pub first_line_number: usize,
    /// Panic on unbalanced events instead of logging and skipping them.
    pub strict: bool,
}

/// Mutable state of one sweep. Owned by a single render; never shared.
#[derive(Debug)]
struct SweepState {
    scopes: Vec<Vec<String>>,
    definitions: HashMap<String, Vec<Style>>,
    references: BTreeMap<String, usize>,
    highlights: BTreeMap<HighlightTag, usize>,
    strict: bool,
}

impl SweepState {
    fn new(strict: bool) -> Self {
        Self {
            scopes: vec![Vec::new()],
            definitions: HashMap::new(),
            references: BTreeMap::new(),
            highlights: BTreeMap::new(),
            strict,
        }
    }

    fn current_style(&self, theme: &SyntaxTheme) -> Style {
        let bound = self
            .references
            .keys()
            .find_map(|symbol| self.definitions.get(symbol).and_then(|styles| styles.last()));
        if let Some(style) = bound {
            return *style;
        }
        theme.resolve(self.highlights.keys().map(|tag| tag.key.as_str()))
    }

    fn apply(&mut self, event: Event, theme: &SyntaxTheme) {
        let position = event.position;
        match event.kind {
            EventKind::ScopeStart => self.scopes.push(Vec::new()),
            EventKind::ScopeEnd => {
                if self.scopes.len() <= 1 {
                    self.unbalanced("scope end", "<scope>", position);
                    return;
                }
                let defined = self.scopes.pop().unwrap_or_default();
                for symbol in defined {
                    if let Some(styles) = self.definitions.get_mut(&symbol) {
                        styles.pop();
                        if styles.is_empty() {
                            self.definitions.remove(&symbol);
                        }
                    }
                }
            }
            EventKind::Definition(symbol) => {
                let style = self.current_style(theme);
                self.definitions
                    .entry(symbol.clone())
                    .or_default()
                    .push(style);
                if let Some(scope) = self.scopes.last_mut() {
                    scope.push(symbol);
                }
            }
            EventKind::ReferenceStart(symbol) => {
                *self.references.entry(symbol).or_insert(0) += 1;
            }
            EventKind::ReferenceEnd(symbol) => {
                if !release(&mut self.references, &symbol) {
                    self.unbalanced("reference end", &symbol, position);
                }
            }
            EventKind::HighlightStart(tag) => {
                *self.highlights.entry(tag).or_insert(0) += 1;
            }
            EventKind::HighlightEnd(tag) => {
                if !release(&mut self.highlights, &tag) {
                    self.unbalanced("highlight end", &tag.key, position);
                }
            }
        }
    }

    fn unbalanced(&self, what: &str, name: &str, position: Position) {
        if self.strict {
            panic!(
                "unbalanced {what} for '{name}' at {}:{}",
                position.line, position.col
            );
        }
        log::warn!(
            "skipping unbalanced {what} for '{name}' at {}:{}",
            position.line,
            position.col
        );
    }
}

/// Decrements a multiset count, removing the entry at zero.
/// Returns false if the key was not present.
fn release<K: Ord>(counts: &mut BTreeMap<K, usize>, key: &K) -> bool {
    let Some(count) = counts.get_mut(key) else {
        return false;
    };
    *count -= 1;
    if *count == 0 {
        counts.remove(key);
    }
    true
}

/// Accumulates the runs of the display line being built.
struct LineBuilder {
    number: usize,
    gutter: Span,
    guides: Vec<Span>,
    content: Vec<Span>,
}

impl LineBuilder {
    fn new(number: usize, width: usize, style: Style) -> Self {
        Self {
            number,
            gutter: Span::new(format!("{number:>width$} "), style),
            guides: Vec::new(),
            content: Vec::new(),
        }
    }

    /// True while nothing but guides has been emitted on this line.
    fn in_indent(&self) -> bool {
        self.content.is_empty()
    }

    fn push(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.content.push(Span::new(text, style));
        }
    }

    fn finish(self) -> PreviewLine {
        PreviewLine::new(self.number, self.gutter, self.guides, merge_spans(self.content))
    }
}

/// Sweeps scheduled events over normalized lines.
///
/// `events` must already be in [`schedule`](crate::events::schedule) order.
/// Events at or past the end of the content are never applied.
pub fn sweep(text: &NormalizedText, events: Vec<Event>, options: &SweepOptions<'_>) -> Vec<PreviewLine> {
    let lines = &text.lines;
    let unit = text.unit.as_str();
    let theme = options.theme;
    let end = Position::new(lines.len(), 0);

    let last_number = options
        .first_line_number
        .saturating_add(lines.len().saturating_sub(1));
    let width = last_number.to_string().len();
    let number_style = theme.line_number();
    let guide_style = theme.indent_guide();

    let mut state = SweepState::new(options.strict);
    let mut pending = events.into_iter().peekable();
    let mut output = Vec::with_capacity(lines.len());
    let mut builder: Option<LineBuilder> = None;
    let mut pos = Position::default();

    while pos.line < lines.len() {
        while let Some(event) = pending.next_if(|event| event.position <= pos) {
            state.apply(event, theme);
        }

        let next = pending
            .peek()
            .map_or(end, |event| event.position.min(end));
        let style = state.current_style(theme);

        while pos < next {
            let line = lines[pos.line].as_str();
            let current = builder.get_or_insert_with(|| {
                LineBuilder::new(
                    options.first_line_number.saturating_add(pos.line),
                    width,
                    number_style,
                )
            });

            if !unit.is_empty() && current.in_indent() {
                while line
                    .get(pos.col..)
                    .is_some_and(|rest| rest.starts_with(unit))
                    && Position::new(pos.line, pos.col + unit.len()) <= next
                {
                    current.guides.push(Span::new(options.guide, guide_style));
                    pos.col += unit.len();
                }
            }

            if pos.line < next.line {
                current.push(clamped_slice(line, pos.col, line.len()), style);
                if let Some(done) = builder.take() {
                    output.push(done.finish());
                }
                pos = Position::new(pos.line + 1, 0);
            } else {
                current.push(clamped_slice(line, pos.col, next.col), style);
                pos.col = next.col;
            }
        }
    }

    output
}

/// `line[start..end]` with both ends clamped to the line and floored to a
/// character boundary.
fn clamped_slice(line: &str, start: usize, end: usize) -> &str {
    let end = floor_char_boundary(line, end.min(line.len()));
    let start = floor_char_boundary(line, start.min(end));
    &line[start..end]
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
