// Chunk: docs/chunks/preview_events - Positioned highlight/scope/definition/reference events

//! Positioned boundary events derived from captures.
//!
//! Every capture becomes one or two events at its start/end positions. The
//! sweep consumes them in [`schedule`] order: by position, and at a shared
//! position by a fixed category rank so that
//!
//! - spans closing at a boundary are closed before spans opening there
//!   (adjacent highlights neither gap nor double-count),
//! - a scope opening at a position is open before a definition at the same
//!   position is recorded,
//! - a definition sees every highlight and reference active at its position.

use glance_text::Position;

use crate::captures::CaptureSet;

/// Locals capture naming a scope node.
pub const LOCAL_SCOPE: &str = "local.scope";
/// Locals capture naming a defining occurrence of a symbol.
pub const LOCAL_DEFINITION: &str = "local.definition";
/// Locals capture naming a use of a symbol.
pub const LOCAL_REFERENCE: &str = "local.reference";

/// Identity of one highlight span source: the pattern that matched and the
/// capture key. Two patterns capturing the same key open and close
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HighlightTag {
    pub pattern: usize,
    pub key: String,
}

impl HighlightTag {
    pub fn new(pattern: usize, key: impl Into<String>) -> Self {
        Self {
            pattern,
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    HighlightStart(HighlightTag),
    HighlightEnd(HighlightTag),
    ScopeStart,
    ScopeEnd,
    /// A symbol is defined here; carries the symbol text.
    Definition(String),
    ReferenceStart(String),
    ReferenceEnd(String),
}

impl EventKind {
    /// Order among events sharing a position. Lower applies first.
    pub fn rank(&self) -> u8 {
        match self {
            EventKind::HighlightEnd(_) => 0,
            EventKind::ReferenceEnd(_) => 1,
            EventKind::ScopeEnd => 2,
            EventKind::ScopeStart => 3,
            EventKind::ReferenceStart(_) => 4,
            EventKind::HighlightStart(_) => 5,
            EventKind::Definition(_) => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub position: Position,
    pub kind: EventKind,
}

impl Event {
    pub fn new(position: Position, kind: EventKind) -> Self {
        Self { position, kind }
    }
}

/// Converts captures into unordered events.
///
/// Highlight captures bracket their node with start/end events tagged by
/// (pattern, key). Locals captures are interpreted by name; any name other
/// than `local.scope`, `local.definition` and `local.reference` is ignored.
///
/// Zero-width captures (error-recovery placeholders) cover no text and are
/// dropped, except definitions, which are a single event.
pub fn extract_events(captures: &CaptureSet) -> Vec<Event> {
    let mut events = Vec::with_capacity(2 * (captures.highlights.len() + captures.locals.len()));

    for capture in captures.highlights.iter().filter(|c| c.start < c.end) {
        let tag = HighlightTag::new(capture.pattern, capture.name.as_str());
        events.push(Event::new(capture.start, EventKind::HighlightStart(tag.clone())));
        events.push(Event::new(capture.end, EventKind::HighlightEnd(tag)));
    }

    for capture in &captures.locals {
        let empty = capture.start >= capture.end;
        match capture.name.as_str() {
            LOCAL_SCOPE | LOCAL_REFERENCE if empty => {}
            LOCAL_SCOPE => {
                events.push(Event::new(capture.start, EventKind::ScopeStart));
                events.push(Event::new(capture.end, EventKind::ScopeEnd));
            }
            LOCAL_DEFINITION => {
                events.push(Event::new(
                    capture.start,
                    EventKind::Definition(capture.text.clone()),
                ));
            }
            LOCAL_REFERENCE => {
                events.push(Event::new(
                    capture.start,
                    EventKind::ReferenceStart(capture.text.clone()),
                ));
                events.push(Event::new(
                    capture.end,
                    EventKind::ReferenceEnd(capture.text.clone()),
                ));
            }
            _ => {}
        }
    }

    events
}

/// Sorts events into application order.
///
/// The sort is stable: events equal in position and rank keep extraction
/// order, which keeps the output deterministic.
pub fn schedule(events: &mut [Event]) {
    events.sort_by_key(|event| (event.position, event.kind.rank()));
}
