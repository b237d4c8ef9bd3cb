//! Per-document anchor table.
//!
//! Anchored nodes are recorded once their value is complete. Aliases to complete anchors get
//! a shared clone of the value. Aliases to anchors that are still being deserialized
//! (self-references) or not seen yet (forward aliases in recorded streams) get a
//! [`ValuePromise`] that is resolved when the anchor completes.

use ahash::{AHashMap, AHashSet};

use crate::error::Error;
use crate::location::Location;
use crate::promise::ValuePromise;
use crate::value::{NodeValue, Value};

#[derive(Default)]
pub(crate) struct AnchorTable {
    resolved: AHashMap<usize, Value>,
    in_progress: AHashSet<usize>,
    waiting: AHashMap<usize, Vec<ValuePromise>>,
}

impl AnchorTable {
    /// Mark `id` as being deserialized.
    pub(crate) fn begin(&mut self, id: usize) {
        self.in_progress.insert(id);
    }

    /// Resolve an alias at `location`.
    ///
    /// `allow_forward` decides whether an alias to an anchor that is neither complete nor in
    /// progress yields a promise or an immediate [`Error::UnknownAnchor`].
    pub(crate) fn lookup(
        &mut self,
        id: usize,
        location: Location,
        allow_forward: bool,
    ) -> Result<NodeValue, Error> {
        if let Some(value) = self.resolved.get(&id) {
            return Ok(NodeValue::Ready(value.clone()));
        }
        if !allow_forward && !self.in_progress.contains(&id) {
            return Err(Error::unknown_anchor(id).with_location(location));
        }
        tracing::trace!(anchor = id, ?location, "alias deferred until anchor completes");
        let promise = ValuePromise::new(id, location);
        self.waiting.entry(id).or_default().push(promise.clone());
        Ok(NodeValue::Pending(promise))
    }

    /// Record the final value of `id` and resolve every promise waiting for it.
    ///
    /// Promises are resolved in the order the aliases were read. A later definition of the
    /// same anchor replaces the value for aliases that follow it.
    pub(crate) fn define(&mut self, id: usize, value: Value) -> Result<(), Error> {
        self.in_progress.remove(&id);
        self.resolved.insert(id, value.clone());
        if let Some(promises) = self.waiting.remove(&id) {
            tracing::debug!(anchor = id, count = promises.len(), "resolving deferred aliases");
            for promise in promises {
                promise.resolve(value.clone())?;
            }
        }
        Ok(())
    }

    /// Fail if any alias is still waiting; called at the end of a document.
    pub(crate) fn finish(&mut self) -> Result<(), Error> {
        let first = self
            .waiting
            .values()
            .flatten()
            .min_by_key(|promise| promise.location().offset());
        match first {
            Some(promise) => {
                tracing::debug!(anchor = promise.anchor(), "alias never resolved");
                Err(Error::unknown_anchor(promise.anchor()).with_location(promise.location()))
            }
            None => Ok(()),
        }
    }
}
