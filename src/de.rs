//! Event-driven deserialization of YAML nodes into runtime-typed [`Value`]s.
//!
//! A [`Deserializer`] owns a chain of [`NodeDeserializer`]s. For every node it asks them in
//! order; the first one that returns `Some` wins. Nested nodes (sequence elements) go back
//! through the per-document [`Session`], which is where anchors and aliases are handled:
//! an alias yields either a shared clone of a completed value or a
//! [`crate::ValuePromise`] that fires when the anchored node completes.
//!
//! Multiple documents:
//! - `from_str*` rejects multiple docs.
//! - `from_multiple*` returns one value per document; anchors never cross documents.

mod adapter;
mod collection;
mod scalar;

use std::borrow::Cow;
use std::rc::Rc;

pub use adapter::{GenericCollectionAdapter, ListAccess, NativeList};
pub use collection::{Classification, CollectionNodeDeserializer, classify, deserialize_sequence};
pub use scalar::{NullNodeDeserializer, ScalarNodeDeserializer};

use crate::anchors::AnchorTable;
use crate::convert::{DefaultTypeConverter, TypeConverter};
use crate::error::Error;
use crate::events::{Ev, EventKind, EventReader, Events};
use crate::factory::{DefaultObjectFactory, ObjectFactory};
use crate::live_events::LiveEvents;
use crate::options::Options;
use crate::types::{SeqType, ValueType};
use crate::value::{NodeValue, Value};

/// Deserializes the node under the cursor, including aliases. Passed to node deserializers
/// so they can read their children.
pub trait ValueDeserializer {
    fn deserialize_value(
        &mut self,
        reader: &mut EventReader<'_>,
        ty: &ValueType,
    ) -> Result<NodeValue, Error>;
}

/// One strategy in the deserializer chain.
///
/// Returns `Ok(None)` when it does not handle `expected` or the node under the cursor; in
/// that case it must not have consumed any event.
pub trait NodeDeserializer {
    fn deserialize(
        &self,
        reader: &mut EventReader<'_>,
        expected: &ValueType,
        nested: &mut dyn ValueDeserializer,
    ) -> Result<Option<NodeValue>, Error>;
}

/// Configured deserializer; reusable across documents and inputs.
///
/// ```rust
/// use saphyr_nodes::{Deserializer, EventBuffer, Ev, Options, SeqType, Value, ValueType};
///
/// let mut events = EventBuffer::new(vec![
///     Ev::seq_start(),
///     Ev::scalar("1"),
///     Ev::scalar("2"),
///     Ev::seq_end(),
/// ]);
/// let de = Deserializer::new(Options::default());
/// let value = de
///     .deserialize(&mut events, &ValueType::Seq(SeqType::list(ValueType::Int)))
///     .unwrap();
/// assert_eq!(value.as_seq().unwrap().to_vec(), vec![Value::Int(1), Value::Int(2)]);
/// ```
pub struct Deserializer {
    options: Options,
    node_deserializers: Vec<Box<dyn NodeDeserializer>>,
    converter: Rc<dyn TypeConverter>,
}

impl Deserializer {
    /// Default chain: null, scalar, collection; default factory and converter.
    pub fn new(options: Options) -> Self {
        let converter = DefaultTypeConverter {
            strict_booleans: options.strict_booleans,
            legacy_octal_numbers: options.legacy_octal_numbers,
        };
        Self::with_components(options, Rc::new(DefaultObjectFactory::new()), Rc::new(converter))
    }

    /// Default chain over a caller-supplied factory and converter.
    pub fn with_components(
        options: Options,
        factory: Rc<dyn ObjectFactory>,
        converter: Rc<dyn TypeConverter>,
    ) -> Self {
        let scalars = ScalarNodeDeserializer {
            legacy_octal_numbers: options.legacy_octal_numbers,
        };
        Self {
            node_deserializers: vec![
                Box::new(NullNodeDeserializer),
                Box::new(scalars),
                Box::new(CollectionNodeDeserializer::new(factory, Rc::clone(&converter))),
            ],
            options,
            converter,
        }
    }

    /// Put `node` in front of the chain.
    pub fn with_node_deserializer(mut self, node: impl NodeDeserializer + 'static) -> Self {
        self.node_deserializers.insert(0, Box::new(node));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Deserialize the next node of `events` as one document of type `ty`.
    ///
    /// Fails with [`Error::Eof`] when there is no node, and with [`Error::UnknownAnchor`]
    /// when an alias of the document was never resolved.
    pub fn deserialize(&self, events: &mut dyn Events, ty: &ValueType) -> Result<Value, Error> {
        let mut reader = EventReader::new(events);
        let start = reader.current()?.start();
        tracing::debug!(target_type = %ty, ?start, "deserializing document");

        let mut session = Session::new(self);
        let node = session.deserialize_value(&mut reader, ty)?;
        session.anchors.finish()?;
        match node {
            NodeValue::Ready(value) => self
                .converter
                .change_type(value, ty)
                .map_err(|err| err.with_location(start)),
            NodeValue::Pending(promise) => {
                Err(Error::unknown_anchor(promise.anchor()).with_location(promise.location()))
            }
        }
    }
}

/// State of one document: the deserializer and its anchor table.
struct Session<'d> {
    de: &'d Deserializer,
    anchors: AnchorTable,
}

impl<'d> Session<'d> {
    fn new(de: &'d Deserializer) -> Self {
        Self {
            de,
            anchors: AnchorTable::default(),
        }
    }
}

impl ValueDeserializer for Session<'_> {
    fn deserialize_value(
        &mut self,
        reader: &mut EventReader<'_>,
        ty: &ValueType,
    ) -> Result<NodeValue, Error> {
        let (kind, anchor, start) = {
            let current = reader.current()?;
            (current.kind(), current.anchor(), current.start())
        };

        if let Ev::Alias { id, .. } = reader.current()? {
            let id = *id;
            reader.skip()?;
            return self
                .anchors
                .lookup(id, start, self.de.options.allow_forward_aliases);
        }

        let ty: Cow<'_, ValueType> = match (ty, kind) {
            (ValueType::Any, EventKind::SequenceStart) => {
                Cow::Owned(ValueType::Seq(SeqType::untyped()))
            }
            _ => Cow::Borrowed(ty),
        };

        if let Some(id) = anchor {
            self.anchors.begin(id);
        }

        let de = self.de;
        let mut handled = None;
        for node in &de.node_deserializers {
            if let Some(value) = node.deserialize(reader, &ty, &mut *self)? {
                handled = Some(value);
                break;
            }
        }
        let Some(value) = handled else {
            return Err(Error::msg(format!(
                "no node deserializer accepts a {} for {ty}",
                kind.name()
            ))
            .with_location(start));
        };

        let Some(id) = anchor else {
            return Ok(value);
        };
        match value {
            NodeValue::Ready(value) => {
                // Aliases see the converted value, not the raw scalar text.
                let value = de
                    .converter
                    .change_type(value, &ty)
                    .map_err(|err| err.with_location(start))?;
                self.anchors.define(id, value.clone())?;
                Ok(NodeValue::Ready(value))
            }
            NodeValue::Pending(_) => Err(Error::msg(format!(
                "anchored {} produced no value for anchor id {id}",
                kind.name()
            ))
            .with_location(start)),
        }
    }
}

/// Deserialize a single YAML document into a value of type `ty`.
///
/// ```rust
/// use saphyr_nodes::{from_str, SeqType, Value, ValueType};
///
/// let ty = ValueType::Seq(SeqType::list(ValueType::Int));
/// let value = from_str("[1, 2, 3]", &ty).unwrap();
/// assert_eq!(
///     value.as_seq().unwrap().to_vec(),
///     vec![Value::Int(1), Value::Int(2), Value::Int(3)]
/// );
/// ```
pub fn from_str(input: &str, ty: &ValueType) -> Result<Value, Error> {
    from_str_with_options(input, ty, Options::default())
}

/// Deserialize a single YAML document with configurable [`Options`].
///
/// Fails with [`Error::MultipleDocuments`] if the input holds more than one document.
pub fn from_str_with_options(
    input: &str,
    ty: &ValueType,
    options: Options,
) -> Result<Value, Error> {
    let mut src = LiveEvents::new(input, options.budget.clone());
    let de = Deserializer::new(options);
    let value = de.deserialize(&mut src, ty)?;
    if let Some(ev) = src.peek()? {
        return Err(Error::MultipleDocuments {
            location: ev.start(),
        });
    }
    Ok(value)
}

/// Deserialize every document of `input` as `ty`.
///
/// ```rust
/// use saphyr_nodes::{from_multiple, Value, ValueType};
///
/// let values = from_multiple("1\n---\n2\n", &ValueType::Int).unwrap();
/// assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
/// ```
pub fn from_multiple(input: &str, ty: &ValueType) -> Result<Vec<Value>, Error> {
    from_multiple_with_options(input, ty, Options::default())
}

/// Deserialize every document of `input` as `ty` with configurable [`Options`].
pub fn from_multiple_with_options(
    input: &str,
    ty: &ValueType,
    options: Options,
) -> Result<Vec<Value>, Error> {
    let mut src = LiveEvents::new(input, options.budget.clone());
    let de = Deserializer::new(options);
    let mut values = Vec::new();
    while src.peek()?.is_some() {
        values.push(de.deserialize(&mut src, ty)?);
    }
    tracing::debug!(documents = src.documents(), "finished stream");
    Ok(values)
}

/// Deserialize one document from a pre-recorded or custom event source with default options.
pub fn from_events(events: &mut dyn Events, ty: &ValueType) -> Result<Value, Error> {
    Deserializer::new(Options::default()).deserialize(events, ty)
}
