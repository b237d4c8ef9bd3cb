//! Sequence targets: capability classification and the sequence loop.

use std::rc::Rc;

use crate::convert::TypeConverter;
use crate::de::adapter::{GenericCollectionAdapter, ListAccess, NativeList};
use crate::de::{NodeDeserializer, ValueDeserializer};
use crate::error::Error;
use crate::events::{EventKind, EventReader};
use crate::factory::ObjectFactory;
use crate::types::ValueType;
use crate::value::{NodeValue, Sequence, Value};

/// How a target type can be filled from a sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    /// The type is a typed collection of `item_type`.
    GenericListLike {
        item_type: ValueType,
        /// Instances are natively untyped lists as well.
        raw_list: bool,
        /// Instances support typed positional assignment.
        index_assignable: bool,
    },
    /// The type is an untyped list; items are `Any`.
    RawListLike,
    /// Not a collection this deserializer can fill.
    Unsupported,
}

/// Classify `ty` from the capabilities it declares. The typed protocol wins over the
/// untyped one when a type declares both.
pub fn classify(ty: &ValueType) -> Classification {
    let ValueType::Seq(seq) = ty else {
        return Classification::Unsupported;
    };
    let caps = seq.capabilities();
    if caps.generic_collection {
        Classification::GenericListLike {
            item_type: seq.item().cloned().unwrap_or(ValueType::Any),
            raw_list: caps.raw_list,
            index_assignable: caps.generic_list,
        }
    } else if caps.raw_list {
        Classification::RawListLike
    } else {
        Classification::Unsupported
    }
}

/// Node deserializer for sequence targets.
pub struct CollectionNodeDeserializer {
    factory: Rc<dyn ObjectFactory>,
    converter: Rc<dyn TypeConverter>,
}

impl CollectionNodeDeserializer {
    pub fn new(factory: Rc<dyn ObjectFactory>, converter: Rc<dyn TypeConverter>) -> Self {
        Self { factory, converter }
    }

    fn create(&self, reader: &mut EventReader<'_>, ty: &ValueType) -> Result<(Value, Sequence), Error> {
        let location = reader.current()?.start();
        let value = self
            .factory
            .create(ty)
            .map_err(|err| err.with_location(location))?;
        let seq = match &value {
            Value::Seq(seq) => seq.clone(),
            other => {
                return Err(Error::msg(format!(
                    "object factory returned a {} for {ty}",
                    other.kind()
                ))
                .with_location(location));
            }
        };
        Ok((value, seq))
    }
}

impl NodeDeserializer for CollectionNodeDeserializer {
    fn deserialize(
        &self,
        reader: &mut EventReader<'_>,
        expected: &ValueType,
        nested: &mut dyn ValueDeserializer,
    ) -> Result<Option<NodeValue>, Error> {
        let (value, item_type, target, can_patch_by_index): (_, _, Rc<dyn ListAccess>, _) =
            match classify(expected) {
                Classification::GenericListLike {
                    item_type,
                    index_assignable,
                    ..
                } => {
                    let (value, seq) = self.create(reader, expected)?;
                    // The instance decides: a typed list that is natively untyped as well
                    // takes every write directly.
                    match NativeList::new(seq.clone()) {
                        Ok(native) => (value, item_type, Rc::new(native), true),
                        Err(_) => (
                            value,
                            item_type,
                            Rc::new(GenericCollectionAdapter::new(seq, index_assignable)),
                            index_assignable,
                        ),
                    }
                }
                Classification::RawListLike => {
                    let (value, seq) = self.create(reader, expected)?;
                    let location = reader.current()?.start();
                    let native = NativeList::new(seq).map_err(|err| {
                        Error::msg(format!("object factory returned an unusable {expected}: {err}"))
                            .with_location(location)
                    })?;
                    (value, ValueType::Any, Rc::new(native), true)
                }
                Classification::Unsupported => return Ok(None),
            };

        deserialize_sequence(
            reader,
            &item_type,
            nested,
            target,
            can_patch_by_index,
            &self.converter,
        )?;
        Ok(Some(NodeValue::Ready(value)))
    }
}

/// Read one sequence into `target`.
///
/// Each element is produced by `nested` for `item_type`. Ready values are converted and
/// appended. Pending values reserve a slot holding the zero value of `item_type` and are
/// written there once their promise fires, which may be after this function returned.
/// When `can_patch_by_index` is false a pending element fails the whole sequence with
/// [`Error::ForwardAnchorNotSupported`].
pub fn deserialize_sequence(
    reader: &mut EventReader<'_>,
    item_type: &ValueType,
    nested: &mut dyn ValueDeserializer,
    target: Rc<dyn ListAccess>,
    can_patch_by_index: bool,
    converter: &Rc<dyn TypeConverter>,
) -> Result<(), Error> {
    reader.expect(EventKind::SequenceStart)?;
    while !reader.accept(EventKind::SequenceEnd)? {
        let (start, end) = {
            let current = reader.current()?;
            (current.start(), current.end())
        };

        match nested.deserialize_value(reader, item_type)? {
            NodeValue::Ready(value) => {
                let value = converter
                    .change_type(value, item_type)
                    .map_err(|err| err.with_location(start))?;
                target.append(value).map_err(|err| err.with_location(start))?;
            }
            NodeValue::Pending(promise) if can_patch_by_index => {
                let index = target
                    .append(item_type.zero_value())
                    .map_err(|err| err.with_location(start))?;
                tracing::trace!(index, anchor = promise.anchor(), "reserved pending slot");

                let target = Rc::clone(&target);
                let converter = Rc::clone(converter);
                let item_type = item_type.clone();
                promise.on_available(move |resolved| {
                    let value = converter
                        .change_type(resolved, &item_type)
                        .map_err(|err| err.with_location(start))?;
                    target.set_at(index, value)
                })?;
            }
            NodeValue::Pending(_) => {
                return Err(Error::ForwardAnchorNotSupported {
                    start,
                    end,
                    msg: format!(
                        "forward alias references are not allowed because {} cannot be patched \
                         after insertion; forward references require positional mutability",
                        target.type_name()
                    ),
                });
            }
        }
    }
    reader.expect(EventKind::SequenceEnd)?;
    Ok(())
}
