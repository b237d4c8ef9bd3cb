//!
//! Live events: a compact layer over the YAML event stream from `saphyr_parser::Parser`.
//!
//! Responsibilities
//! - Provide owned, simplified events (`Ev`) for the node deserializers.
//! - Hide stream/document markers; expose only logical data events.
//! - Track source locations for diagnostics.
//! - Enforce the optional [`Budget`].
//!
//! Unlike a replaying adapter, aliases are surfaced as [`Ev::Alias`]: resolving them is the
//! job of the deserialization session, which hands out shared values or promises.

use std::borrow::Cow;

use saphyr_parser::{Event, Parser, StrInput};

use crate::budget::{Budget, BudgetEnforcer};
use crate::error::Error;
use crate::events::{Ev, Events};
use crate::location::{locations_from_span, Location};

/// Live event source that wraps `saphyr_parser::Parser`.
pub struct LiveEvents<'a> {
    /// Underlying streaming parser that produces raw events from the input.
    parser: Parser<'a, StrInput<'a>>,
    /// Single-item lookahead buffer (peeked event not yet consumed).
    look: Option<Ev>,
    /// Budget (raw events).
    budget: Option<BudgetEnforcer>,
    /// Location of the last yielded event (for better error reporting).
    last_location: Location,
    /// Number of document starts seen so far.
    documents: usize,
}

impl<'a> LiveEvents<'a> {
    /// Create a new live event source over `input`, enforcing `budget` if given.
    pub fn new(input: &'a str, budget: Option<Budget>) -> Self {
        Self {
            parser: Parser::new_from_str(input),
            look: None,
            budget: budget.map(BudgetEnforcer::new),
            last_location: Location::UNKNOWN,
            documents: 0,
        }
    }

    /// Number of documents started so far, including the one being read.
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Pull the next logical event from the parser, skipping stream/document markers.
    ///
    /// Returns `Ok(None)` on true EOF.
    fn next_impl(&mut self) -> Result<Option<Ev>, Error> {
        while let Some(item) = self.parser.next() {
            let (raw, span) = item.map_err(Error::from_scan_error)?;
            let (start, end) = locations_from_span(&span);

            if let Some(ref mut budget) = self.budget {
                if let Err(breach) = budget.observe(&raw) {
                    return Err(Error::budget(breach).with_location(start));
                }
            }

            let ev = match raw {
                Event::StreamStart | Event::StreamEnd | Event::DocumentEnd | Event::Nothing => {
                    continue;
                }
                Event::DocumentStart(_) => {
                    self.documents += 1;
                    continue;
                }
                Event::Scalar(val, style, anchor_id, tag) => Ev::Scalar {
                    value: match val {
                        Cow::Borrowed(v) => v.to_string(),
                        Cow::Owned(v) => v,
                    },
                    tag: tag.map(|t| t.to_string()),
                    style,
                    anchor: anchor(anchor_id),
                    start,
                    end,
                },
                Event::SequenceStart(anchor_id, tag) => Ev::SeqStart {
                    anchor: anchor(anchor_id),
                    tag: tag.map(|t| t.to_string()),
                    start,
                    end,
                },
                Event::SequenceEnd => Ev::SeqEnd { start, end },
                Event::MappingStart(anchor_id, tag) => Ev::MapStart {
                    anchor: anchor(anchor_id),
                    tag: tag.map(|t| t.to_string()),
                    start,
                    end,
                },
                Event::MappingEnd => Ev::MapEnd { start, end },
                Event::Alias(anchor_id) => Ev::Alias {
                    id: anchor_id,
                    start,
                    end,
                },
            };
            return Ok(Some(ev));
        }
        Ok(None)
    }
}

/// The parser reports "no anchor" as id 0.
fn anchor(anchor_id: usize) -> Option<usize> {
    (anchor_id != 0).then_some(anchor_id)
}

impl Events for LiveEvents<'_> {
    /// Get the next event, using the lookahead buffer if present.
    fn next(&mut self) -> Result<Option<Ev>, Error> {
        let ev = match self.look.take() {
            Some(ev) => Some(ev),
            None => self.next_impl()?,
        };
        if let Some(ev) = &ev {
            self.last_location = ev.start();
        }
        Ok(ev)
    }

    /// Peek at the next event without consuming it, filling the lookahead buffer if empty.
    fn peek(&mut self) -> Result<Option<&Ev>, Error> {
        if self.look.is_none() {
            self.look = self.next_impl()?;
        }
        Ok(self.look.as_ref())
    }

    fn last_location(&self) -> Location {
        self.last_location
    }
}
