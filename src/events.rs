//! Logical YAML events and the cursor the node deserializers drive.
//!
//! [`Events`] is the pull contract every event source implements: the live parser adapter
//! ([`crate::LiveEvents`]) and the recorded [`EventBuffer`]. Node deserializers never see a
//! source directly; they go through [`EventReader`], which adds the "current / expect /
//! accept" vocabulary and turns structural surprises into located errors.

use saphyr_parser::ScalarStyle;

use crate::error::Error;
use crate::location::Location;

/// Owned, simplified event. Stream and document markers are not represented.
#[derive(Clone, Debug, PartialEq)]
pub enum Ev {
    Scalar {
        value: String,
        tag: Option<String>,
        style: ScalarStyle,
        anchor: Option<usize>,
        start: Location,
        end: Location,
    },
    SeqStart {
        anchor: Option<usize>,
        tag: Option<String>,
        start: Location,
        end: Location,
    },
    SeqEnd {
        start: Location,
        end: Location,
    },
    MapStart {
        anchor: Option<usize>,
        tag: Option<String>,
        start: Location,
        end: Location,
    },
    MapEnd {
        start: Location,
        end: Location,
    },
    /// Reference to the node carrying anchor `id`.
    Alias {
        id: usize,
        start: Location,
        end: Location,
    },
}

/// Event kind, the argument of [`EventReader::expect`] and [`EventReader::accept`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    Alias,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Scalar => "scalar",
            EventKind::SequenceStart => "sequence start",
            EventKind::SequenceEnd => "sequence end",
            EventKind::MappingStart => "mapping start",
            EventKind::MappingEnd => "mapping end",
            EventKind::Alias => "alias",
        }
    }
}

impl Ev {
    /// Plain scalar without tag or anchor, location unknown.
    pub fn scalar(value: impl Into<String>) -> Self {
        Ev::Scalar {
            value: value.into(),
            tag: None,
            style: ScalarStyle::Plain,
            anchor: None,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    /// Double-quoted scalar: never inferred as anything but a string.
    pub fn quoted(value: impl Into<String>) -> Self {
        Ev::Scalar {
            value: value.into(),
            tag: None,
            style: ScalarStyle::DoubleQuoted,
            anchor: None,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn seq_start() -> Self {
        Ev::SeqStart {
            anchor: None,
            tag: None,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn seq_end() -> Self {
        Ev::SeqEnd {
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn map_start() -> Self {
        Ev::MapStart {
            anchor: None,
            tag: None,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn map_end() -> Self {
        Ev::MapEnd {
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    pub fn alias(id: usize) -> Self {
        Ev::Alias {
            id,
            start: Location::UNKNOWN,
            end: Location::UNKNOWN,
        }
    }

    /// Attach anchor `id`. Ignored on events that cannot carry an anchor.
    pub fn with_anchor(mut self, id: usize) -> Self {
        match &mut self {
            Ev::Scalar { anchor, .. } | Ev::SeqStart { anchor, .. } | Ev::MapStart { anchor, .. } => {
                *anchor = Some(id);
            }
            _ => {}
        }
        self
    }

    /// Attach a tag. Ignored on events that cannot carry a tag.
    pub fn with_tag(mut self, new_tag: impl Into<String>) -> Self {
        match &mut self {
            Ev::Scalar { tag, .. } | Ev::SeqStart { tag, .. } | Ev::MapStart { tag, .. } => {
                *tag = Some(new_tag.into());
            }
            _ => {}
        }
        self
    }

    /// Set both locations.
    pub fn at(mut self, new_start: Location, new_end: Location) -> Self {
        let (start, end) = self.locations_mut();
        *start = new_start;
        *end = new_end;
        self
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Ev::Scalar { .. } => EventKind::Scalar,
            Ev::SeqStart { .. } => EventKind::SequenceStart,
            Ev::SeqEnd { .. } => EventKind::SequenceEnd,
            Ev::MapStart { .. } => EventKind::MappingStart,
            Ev::MapEnd { .. } => EventKind::MappingEnd,
            Ev::Alias { .. } => EventKind::Alias,
        }
    }

    pub fn start(&self) -> Location {
        match self {
            Ev::Scalar { start, .. }
            | Ev::SeqStart { start, .. }
            | Ev::SeqEnd { start, .. }
            | Ev::MapStart { start, .. }
            | Ev::MapEnd { start, .. }
            | Ev::Alias { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Location {
        match self {
            Ev::Scalar { end, .. }
            | Ev::SeqStart { end, .. }
            | Ev::SeqEnd { end, .. }
            | Ev::MapStart { end, .. }
            | Ev::MapEnd { end, .. }
            | Ev::Alias { end, .. } => *end,
        }
    }

    /// Anchor defined by this node, if any.
    pub fn anchor(&self) -> Option<usize> {
        match self {
            Ev::Scalar { anchor, .. } | Ev::SeqStart { anchor, .. } | Ev::MapStart { anchor, .. } => {
                *anchor
            }
            _ => None,
        }
    }

    fn locations_mut(&mut self) -> (&mut Location, &mut Location) {
        match self {
            Ev::Scalar { start, end, .. }
            | Ev::SeqStart { start, end, .. }
            | Ev::SeqEnd { start, end }
            | Ev::MapStart { start, end, .. }
            | Ev::MapEnd { start, end }
            | Ev::Alias { start, end, .. } => (start, end),
        }
    }
}

/// Source of events with one-item lookahead.
pub trait Events {
    /// Consume the next event; `Ok(None)` at the end of the stream.
    fn next(&mut self) -> Result<Option<Ev>, Error>;
    /// Look at the next event without consuming it.
    fn peek(&mut self) -> Result<Option<&Ev>, Error>;
    /// Location of the last consumed event, for end-of-input diagnostics.
    fn last_location(&self) -> Location;
}

/// Event source that replays a pre-recorded buffer.
///
/// Events whose start location is unknown are given a synthetic one: the event at index
/// `i` starts at line `i + 1`, column 1. This keeps diagnostics on hand-built streams
/// pointing at a distinct position per event.
#[derive(Clone, Debug)]
pub struct EventBuffer {
    buf: Vec<Ev>,
    idx: usize,
    last_location: Location,
}

impl EventBuffer {
    pub fn new(events: Vec<Ev>) -> Self {
        let buf = events
            .into_iter()
            .enumerate()
            .map(|(i, ev)| {
                if ev.start().is_known() {
                    ev
                } else {
                    ev.at(Location::new(i + 1, 1, i), Location::new(i + 1, 2, i + 1))
                }
            })
            .collect();
        Self {
            buf,
            idx: 0,
            last_location: Location::UNKNOWN,
        }
    }
}

impl Events for EventBuffer {
    fn next(&mut self) -> Result<Option<Ev>, Error> {
        let Some(ev) = self.buf.get(self.idx).cloned() else {
            return Ok(None);
        };
        self.idx += 1;
        self.last_location = ev.start();
        Ok(Some(ev))
    }

    fn peek(&mut self) -> Result<Option<&Ev>, Error> {
        Ok(self.buf.get(self.idx))
    }

    fn last_location(&self) -> Location {
        self.last_location
    }
}

/// Cursor over an [`Events`] source.
pub struct EventReader<'e> {
    events: &'e mut dyn Events,
}

impl<'e> EventReader<'e> {
    pub fn new(events: &'e mut dyn Events) -> Self {
        Self { events }
    }

    /// The event the cursor is on. Fails with [`Error::Eof`] at the end of the stream.
    pub fn current(&mut self) -> Result<&Ev, Error> {
        let last = self.events.last_location();
        self.events
            .peek()?
            .ok_or_else(|| Error::eof().with_location(last))
    }

    /// Consume the current event if it is of `kind`; fail otherwise.
    pub fn expect(&mut self, kind: EventKind) -> Result<Ev, Error> {
        match self.events.next()? {
            Some(ev) if ev.kind() == kind => Ok(ev),
            Some(other) => {
                Err(Error::unexpected(kind.name(), other.kind().name()).with_location(other.start()))
            }
            None => Err(Error::eof().with_location(self.events.last_location())),
        }
    }

    /// Whether the current event is of `kind`. Never consumes; `false` at the end of the stream.
    pub fn accept(&mut self, kind: EventKind) -> Result<bool, Error> {
        Ok(self.events.peek()?.is_some_and(|ev| ev.kind() == kind))
    }

    /// Whether the stream is exhausted.
    pub fn is_at_end(&mut self) -> Result<bool, Error> {
        Ok(self.events.peek()?.is_none())
    }

    /// Consume the current event whatever it is.
    pub fn skip(&mut self) -> Result<Ev, Error> {
        self.events
            .next()?
            .ok_or_else(|| Error::eof().with_location(self.events.last_location()))
    }
}
