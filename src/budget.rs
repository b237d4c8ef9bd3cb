//! Streaming YAML budget checker.
//!
//! Observes the raw `saphyr-parser` events as [`crate::live_events::LiveEvents`]
//! pulls them and stops pathological inputs before the node deserializers
//! allocate collections for them.

use std::borrow::Cow;
use std::collections::HashSet;

use saphyr_parser::Event;
use serde::Serialize;

/// Budgets for a streaming YAML scan.
///
/// The defaults are permissive for typical configuration files while stopping
/// obvious resource-amplifying inputs.
///
/// ```rust
/// use saphyr_nodes::{from_str_with_options, options, Budget, SeqType, ValueType};
///
/// let options = options! {
///     budget: Some(Budget { max_depth: 2, ..Budget::default() }),
/// };
/// let ty = ValueType::Seq(SeqType::untyped());
/// assert!(from_str_with_options("[[1]]", &ty, options.clone()).is_ok());
/// assert!(from_str_with_options("[[[1]]]", &ty, options).is_err());
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Budget {
    /// Maximum total parser events (counting every event).
    ///
    /// Default: 1,000,000
    pub max_events: usize,
    /// Maximum number of alias (`*ref`) events allowed.
    ///
    /// Default: 50,000
    pub max_aliases: usize,
    /// Maximal total number of anchors (distinct `&anchor` definitions).
    ///
    /// Default: 50,000
    pub max_anchors: usize,
    /// Maximum structural nesting depth (sequences + mappings).
    ///
    /// Default: 2,000
    pub max_depth: usize,
    /// Maximum number of *nodes* (SequenceStart/MappingStart/Scalar).
    ///
    /// Default: 250,000
    pub max_nodes: usize,
    /// Maximum total bytes of scalar contents.
    ///
    /// Default: 67,108,864 (64 MiB)
    pub max_total_scalar_bytes: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_events: 1_000_000,
            max_aliases: 50_000,
            max_anchors: 50_000,
            max_depth: 2_000,
            max_nodes: 250_000,
            max_total_scalar_bytes: 64 * 1024 * 1024,
        }
    }
}

/// What tripped the budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum BudgetBreach {
    /// The total number of parser events exceeded [`Budget::max_events`].
    Events { events: usize },
    /// The number of alias events exceeded [`Budget::max_aliases`].
    Aliases { aliases: usize },
    /// The number of distinct anchors exceeded [`Budget::max_anchors`].
    Anchors { anchors: usize },
    /// The nesting depth exceeded [`Budget::max_depth`].
    Depth { depth: usize },
    /// The number of nodes exceeded [`Budget::max_nodes`].
    Nodes { nodes: usize },
    /// The cumulative scalar size exceeded [`Budget::max_total_scalar_bytes`].
    ScalarBytes { total_scalar_bytes: usize },
    /// A closing event without a matching opening event.
    Unbalanced,
}

/// Stateful helper that enforces a [`Budget`] while consuming parser events.
#[derive(Debug)]
pub(crate) struct BudgetEnforcer {
    budget: Budget,
    events: usize,
    aliases: usize,
    nodes: usize,
    depth: usize,
    total_scalar_bytes: usize,
    defined_anchors: HashSet<usize>,
}

impl BudgetEnforcer {
    pub(crate) fn new(budget: Budget) -> Self {
        Self {
            budget,
            events: 0,
            aliases: 0,
            nodes: 0,
            depth: 0,
            total_scalar_bytes: 0,
            defined_anchors: HashSet::with_capacity(64),
        }
    }

    /// Observe a parser [`Event`], updating the internal counters.
    ///
    /// Returns `Err(BudgetBreach)` as soon as a limit is exceeded.
    pub(crate) fn observe(&mut self, ev: &Event) -> Result<(), BudgetBreach> {
        self.events += 1;
        if self.events > self.budget.max_events {
            return Err(BudgetBreach::Events {
                events: self.events,
            });
        }

        match ev {
            Event::Alias(_) => {
                self.aliases += 1;
                if self.aliases > self.budget.max_aliases {
                    return Err(BudgetBreach::Aliases {
                        aliases: self.aliases,
                    });
                }
            }
            Event::Scalar(value, _, anchor_id, _) => {
                self.bump_nodes()?;
                let len = match value {
                    Cow::Borrowed(s) => s.len(),
                    Cow::Owned(s) => s.len(),
                };
                self.total_scalar_bytes = self.total_scalar_bytes.saturating_add(len);
                if self.total_scalar_bytes > self.budget.max_total_scalar_bytes {
                    return Err(BudgetBreach::ScalarBytes {
                        total_scalar_bytes: self.total_scalar_bytes,
                    });
                }
                self.record_anchor(*anchor_id)?;
            }
            Event::SequenceStart(anchor_id, _) | Event::MappingStart(anchor_id, _) => {
                self.bump_nodes()?;
                self.depth = self.depth.saturating_add(1);
                if self.depth > self.budget.max_depth {
                    return Err(BudgetBreach::Depth { depth: self.depth });
                }
                self.record_anchor(*anchor_id)?;
            }
            Event::SequenceEnd | Event::MappingEnd => {
                self.depth = self
                    .depth
                    .checked_sub(1)
                    .ok_or(BudgetBreach::Unbalanced)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn bump_nodes(&mut self) -> Result<(), BudgetBreach> {
        self.nodes += 1;
        if self.nodes > self.budget.max_nodes {
            return Err(BudgetBreach::Nodes { nodes: self.nodes });
        }
        Ok(())
    }

    fn record_anchor(&mut self, anchor_id: usize) -> Result<(), BudgetBreach> {
        if anchor_id != 0 && self.defined_anchors.insert(anchor_id) {
            let anchors = self.defined_anchors.len();
            if anchors > self.budget.max_anchors {
                return Err(BudgetBreach::Anchors { anchors });
            }
        }
        Ok(())
    }
}
