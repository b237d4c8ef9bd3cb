//! Uniform list access over the two collection shapes a sequence can be read into.
//!
//! The sequence loop is written once against [`ListAccess`]. [`NativeList`] forwards to an
//! instance that implements the untyped list protocol itself; [`GenericCollectionAdapter`]
//! covers instances that only offer typed append, and typed positional assignment when
//! their type declares it.
//!
//! All methods take `&self`: mutation goes through the shared [`Sequence`] handle, so a
//! deferred alias callback can hold its own clone of the target and patch a slot after the
//! loop that reserved it has returned.

use crate::error::Error;
use crate::value::{Sequence, Value};

/// Append / count / positional access over a collection being deserialized.
pub trait ListAccess {
    /// Name of the underlying collection type, for diagnostics.
    fn type_name(&self) -> String;

    /// Append `value` and return its position.
    fn append(&self, value: Value) -> Result<usize, Error>;

    fn count(&self) -> usize;

    fn get_at(&self, index: usize) -> Option<Value>;

    /// Overwrite the slot at `index`. Fails with [`Error::Unsupported`] when
    /// [`ListAccess::supports_set_at`] is false.
    fn set_at(&self, index: usize, value: Value) -> Result<(), Error>;

    fn supports_set_at(&self) -> bool;
}

/// Target whose instance is natively an untyped list.
#[derive(Clone, Debug)]
pub struct NativeList {
    seq: Sequence,
}

impl NativeList {
    /// Wrap `seq`, which must expose [`crate::Collection::as_raw_list`].
    pub fn new(seq: Sequence) -> Result<Self, Error> {
        let native = seq.borrow_mut().as_raw_list().is_some();
        if native {
            Ok(Self { seq })
        } else {
            Err(Error::unsupported("the untyped list protocol", seq.type_name()))
        }
    }
}

impl ListAccess for NativeList {
    fn type_name(&self) -> String {
        self.seq.type_name()
    }

    fn append(&self, value: Value) -> Result<usize, Error> {
        let mut inner = self.seq.borrow_mut();
        let type_name = inner.type_name().to_owned();
        match inner.as_raw_list() {
            Some(list) => list.append(value),
            None => Err(Error::unsupported("the untyped list protocol", type_name)),
        }
    }

    fn count(&self) -> usize {
        self.seq.len()
    }

    fn get_at(&self, index: usize) -> Option<Value> {
        self.seq.get(index)
    }

    fn set_at(&self, index: usize, value: Value) -> Result<(), Error> {
        let mut inner = self.seq.borrow_mut();
        let type_name = inner.type_name().to_owned();
        match inner.as_raw_list() {
            Some(list) => list.set_at(index, value),
            None => Err(Error::unsupported("the untyped list protocol", type_name)),
        }
    }

    fn supports_set_at(&self) -> bool {
        true
    }
}

/// Target whose instance only offers typed append, optionally typed positional assignment.
#[derive(Clone, Debug)]
pub struct GenericCollectionAdapter {
    seq: Sequence,
    index_assignable: bool,
}

impl GenericCollectionAdapter {
    /// Wrap `seq`. `index_assignable` states whether its type declares typed positional
    /// assignment; without it, [`ListAccess::set_at`] is unsupported.
    pub fn new(seq: Sequence, index_assignable: bool) -> Self {
        Self {
            seq,
            index_assignable,
        }
    }
}

impl ListAccess for GenericCollectionAdapter {
    fn type_name(&self) -> String {
        self.seq.type_name()
    }

    fn append(&self, value: Value) -> Result<usize, Error> {
        let mut inner = self.seq.borrow_mut();
        let index = inner.len();
        inner.add(value)?;
        Ok(index)
    }

    fn count(&self) -> usize {
        self.seq.len()
    }

    fn get_at(&self, index: usize) -> Option<Value> {
        self.seq.get(index)
    }

    fn set_at(&self, index: usize, value: Value) -> Result<(), Error> {
        let mut inner = self.seq.borrow_mut();
        let type_name = inner.type_name().to_owned();
        if !self.index_assignable {
            return Err(Error::unsupported("positional assignment", type_name));
        }
        match inner.as_generic_list() {
            Some(list) => list.set(index, value),
            None => Err(Error::unsupported("positional assignment", type_name)),
        }
    }

    fn supports_set_at(&self) -> bool {
        self.index_assignable
    }
}
