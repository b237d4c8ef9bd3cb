//! One-shot notification for values that an anchor has not produced yet.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::error::Error;
use crate::location::Location;
use crate::value::Value;

type Callback = Box<dyn FnOnce(Value) -> Result<(), Error>>;

enum State {
    Waiting(SmallVec<[Callback; 1]>),
    Resolved,
}

struct Inner {
    anchor: usize,
    location: Location,
    state: RefCell<State>,
}

/// Handle to a value that becomes available later in the same deserialization pass.
///
/// Subscribers registered with [`ValuePromise::on_available`] are called exactly once,
/// in registration order, when the anchor the promise waits for is resolved.
/// Clones share state.
#[derive(Clone)]
pub struct ValuePromise(Rc<Inner>);

impl ValuePromise {
    /// Create a promise for the anchor `anchor`, referenced by an alias at `location`.
    pub fn new(anchor: usize, location: Location) -> Self {
        ValuePromise(Rc::new(Inner {
            anchor,
            location,
            state: RefCell::new(State::Waiting(SmallVec::new())),
        }))
    }

    /// Anchor id this promise waits for.
    pub fn anchor(&self) -> usize {
        self.0.anchor
    }

    /// Location of the alias that created the promise.
    pub fn location(&self) -> Location {
        self.0.location
    }

    pub fn is_resolved(&self) -> bool {
        matches!(*self.0.state.borrow(), State::Resolved)
    }

    /// Subscribe to the final value.
    ///
    /// Subscribing to an already resolved promise is a programming error in the caller
    /// (the value is gone); the callback is dropped and an error is returned.
    pub fn on_available(
        &self,
        callback: impl FnOnce(Value) -> Result<(), Error> + 'static,
    ) -> Result<(), Error> {
        match &mut *self.0.state.borrow_mut() {
            State::Waiting(callbacks) => {
                callbacks.push(Box::new(callback));
                Ok(())
            }
            State::Resolved => Err(Error::msg(format!(
                "promise for anchor id {} is already resolved",
                self.0.anchor
            ))
            .with_location(self.0.location)),
        }
    }

    /// Deliver the value to every subscriber.
    ///
    /// Resolving twice is a no-op. The first subscriber error stops delivery and is
    /// returned; the promise counts as resolved either way.
    pub fn resolve(&self, value: Value) -> Result<(), Error> {
        let callbacks = match std::mem::replace(&mut *self.0.state.borrow_mut(), State::Resolved) {
            State::Waiting(callbacks) => callbacks,
            State::Resolved => return Ok(()),
        };
        // The state borrow is released before subscribers run; they may touch other promises.
        for callback in callbacks {
            callback(value.clone())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ValuePromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuePromise")
            .field("anchor", &self.0.anchor)
            .field("location", &self.0.location)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
