//! Allocation of empty collection instances for sequence targets.

use std::borrow::Cow;

use ahash::AHashMap;

use crate::collections::{
    AppendOnlyCollection, IndexedCollection, TypedList, UntypedList,
};
use crate::error::Error;
use crate::types::{SeqKind, SeqType, ValueType};
use crate::value::{Sequence, Value};

/// Creates empty instances of target types.
pub trait ObjectFactory {
    fn create(&self, ty: &ValueType) -> Result<Value, Error>;
}

type Constructor = Box<dyn Fn(&SeqType) -> Sequence>;

/// Factory for the built-in collections plus user-registered sequence types.
///
/// ```rust
/// use saphyr_nodes::{Capabilities, DefaultObjectFactory, ObjectFactory, SeqType, Sequence,
///     UntypedList, ValueType};
///
/// let mut factory = DefaultObjectFactory::new();
/// factory.register("Stack", |_| Sequence::new(UntypedList::new()));
///
/// let caps = Capabilities { raw_list: true, ..Capabilities::default() };
/// let value = factory.create(&ValueType::Seq(SeqType::custom("Stack", None, caps))).unwrap();
/// assert!(value.as_seq().is_some_and(|s| s.is_empty()));
/// ```
#[derive(Default)]
pub struct DefaultObjectFactory {
    constructors: AHashMap<Cow<'static, str>, Constructor>,
}

impl DefaultObjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the constructor for [`SeqType::custom`] types named `name`.
    ///
    /// The constructor must return an instance whose protocols match the capabilities the
    /// type declares; the collection node deserializer relies on them.
    pub fn register(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        constructor: impl Fn(&SeqType) -> Sequence + 'static,
    ) -> &mut Self {
        self.constructors.insert(name.into(), Box::new(constructor));
        self
    }
}

impl ObjectFactory for DefaultObjectFactory {
    fn create(&self, ty: &ValueType) -> Result<Value, Error> {
        let ValueType::Seq(seq) = ty else {
            return Err(Error::msg(format!("cannot create an instance of {ty}")));
        };
        let item = || seq.item().cloned().unwrap_or(ValueType::Any);
        let sequence = match seq.kind {
            SeqKind::List => Sequence::new(TypedList::new(item())),
            SeqKind::Untyped => Sequence::new(UntypedList::new()),
            SeqKind::AppendOnly => Sequence::new(AppendOnlyCollection::new(item())),
            SeqKind::Indexed => Sequence::new(IndexedCollection::new(item())),
            SeqKind::Custom => {
                let constructor = self.constructors.get(seq.name()).ok_or_else(|| {
                    Error::msg(format!(
                        "cannot create an instance of {}: no constructor registered",
                        seq.name()
                    ))
                })?;
                constructor(seq)
            }
        };
        Ok(Value::Seq(sequence))
    }
}
