//! Aliases whose anchor is not complete when the alias is read.
//!
//! The live parser rejects aliases to anchors it has not seen, so true forward references
//! are exercised through recorded event streams and a scripted nested deserializer.

use std::rc::Rc;

use ahash::AHashMap;
use saphyr_nodes::{
    AppendOnlyCollection, DefaultTypeConverter, Deserializer, Error, Ev, EventBuffer, EventKind,
    EventReader, Events, GenericCollectionAdapter, ListAccess, NativeList, NodeValue, Options,
    SeqType, Sequence, TypeConverter, TypedList, Value, ValueDeserializer, ValuePromise,
    ValueType, from_events, options,
};

fn int_list() -> ValueType {
    ValueType::Seq(SeqType::list(ValueType::Int))
}

/// `[1, *a, &a 2]`: the alias precedes its anchor.
fn alias_before_anchor() -> Vec<Ev> {
    vec![
        Ev::seq_start(),
        Ev::scalar("1"),
        Ev::alias(1),
        Ev::scalar("2").with_anchor(1),
        Ev::seq_end(),
    ]
}

#[test]
fn forward_alias_is_patched_in_place() -> anyhow::Result<()> {
    let value = from_events(&mut EventBuffer::new(alias_before_anchor()), &int_list())?;
    assert_eq!(
        value.as_seq().unwrap().to_vec(),
        vec![Value::Int(1), Value::Int(2), Value::Int(2)]
    );
    Ok(())
}

#[test]
fn indexed_collections_are_patched_through_the_adapter() -> anyhow::Result<()> {
    let ty = ValueType::Seq(SeqType::indexed(ValueType::Int));
    let value = from_events(&mut EventBuffer::new(alias_before_anchor()), &ty)?;
    let seq = value.as_seq().unwrap();
    assert_eq!(seq.type_name(), "Indexed<int>");
    assert_eq!(
        seq.to_vec(),
        vec![Value::Int(1), Value::Int(2), Value::Int(2)]
    );
    Ok(())
}

#[test]
fn append_only_collection_rejects_forward_alias() {
    let ty = ValueType::Seq(SeqType::append_only(ValueType::Int));
    let mut events = EventBuffer::new(alias_before_anchor());
    let err = Deserializer::new(Options::default())
        .deserialize(&mut events, &ty)
        .unwrap_err();

    match &err {
        Error::ForwardAnchorNotSupported { start, msg, .. } => {
            // The alias is the third recorded event.
            assert_eq!(start.line(), 3);
            assert!(msg.contains("AppendOnly<int>"), "{msg}");
            assert!(msg.contains("positional mutability"), "{msg}");
        }
        other => panic!("expected ForwardAnchorNotSupported, got {other:?}"),
    }
    assert_eq!(err.location().map(|l| l.line()), Some(3));

    // Nothing after the alias was read.
    let next = events.next().unwrap().expect("remaining events");
    assert_eq!(next.kind(), EventKind::Scalar);
    assert_eq!(next.anchor(), Some(1));
}

#[test]
fn append_only_rejects_even_after_concrete_items() {
    let ty = ValueType::Seq(SeqType::append_only(ValueType::Str));
    let events = vec![
        Ev::seq_start(),
        Ev::scalar("a"),
        Ev::scalar("b"),
        Ev::scalar("c"),
        Ev::alias(4),
        Ev::seq_end(),
    ];
    let err = from_events(&mut EventBuffer::new(events), &ty).unwrap_err();
    assert!(matches!(err, Error::ForwardAnchorNotSupported { .. }), "{err:?}");
    assert_eq!(err.location().map(|l| l.line()), Some(5));
}

#[test]
fn positions_survive_out_of_order_resolution() -> anyhow::Result<()> {
    let events = vec![
        Ev::seq_start(),
        Ev::alias(1),
        Ev::scalar("mid"),
        Ev::alias(2),
        Ev::scalar("x").with_anchor(2),
        Ev::scalar("y").with_anchor(1),
        Ev::seq_end(),
    ];
    let ty = ValueType::Seq(SeqType::list(ValueType::Str));
    let value = from_events(&mut EventBuffer::new(events), &ty)?;
    assert_eq!(value.to_string(), r#"["y", "mid", "x", "x", "y"]"#);
    Ok(())
}

#[test]
fn forward_aliases_can_be_disabled() {
    let de = Deserializer::new(options! { allow_forward_aliases: false });
    let err = de
        .deserialize(&mut EventBuffer::new(alias_before_anchor()), &int_list())
        .unwrap_err();
    match err {
        Error::UnknownAnchor { id, location } => {
            assert_eq!(id, 1);
            assert_eq!(location.line(), 3);
        }
        other => panic!("expected UnknownAnchor, got {other:?}"),
    }
}

#[test]
fn alias_that_never_resolves() {
    let events = vec![Ev::seq_start(), Ev::scalar("1"), Ev::alias(7), Ev::seq_end()];
    let err = from_events(&mut EventBuffer::new(events), &int_list()).unwrap_err();
    match err {
        Error::UnknownAnchor { id, location } => {
            assert_eq!(id, 7);
            assert_eq!(location.line(), 3);
        }
        other => panic!("expected UnknownAnchor, got {other:?}"),
    }
}

/// Nested deserializer that answers every alias with a promise and leaves resolving them
/// to the test.
#[derive(Default)]
struct Scripted {
    promises: AHashMap<usize, ValuePromise>,
}

impl ValueDeserializer for Scripted {
    fn deserialize_value(
        &mut self,
        reader: &mut EventReader<'_>,
        _ty: &ValueType,
    ) -> Result<NodeValue, Error> {
        match reader.skip()? {
            Ev::Alias { id, start, .. } => {
                let promise = self
                    .promises
                    .entry(id)
                    .or_insert_with(|| ValuePromise::new(id, start))
                    .clone();
                Ok(NodeValue::Pending(promise))
            }
            Ev::Scalar { value, .. } => Ok(NodeValue::Ready(Value::String(value))),
            other => panic!("unexpected event {other:?}"),
        }
    }
}

/// `[1, &a 2, *a]` where `*a` is only resolved after the sequence was read.
fn late_resolved_alias() -> Vec<Ev> {
    vec![
        Ev::seq_start(),
        Ev::scalar("1"),
        Ev::scalar("2").with_anchor(1),
        Ev::alias(1),
        Ev::seq_end(),
    ]
}

fn converter() -> Rc<dyn TypeConverter> {
    Rc::new(DefaultTypeConverter::default())
}

#[test]
fn placeholder_is_patched_when_the_promise_fires() -> anyhow::Result<()> {
    let mut events = EventBuffer::new(late_resolved_alias());
    let mut reader = EventReader::new(&mut events);
    let mut nested = Scripted::default();
    let seq = Sequence::new(TypedList::new(ValueType::Int));
    let target: Rc<dyn ListAccess> = Rc::new(NativeList::new(seq.clone())?);

    saphyr_nodes::deserialize_sequence(
        &mut reader,
        &ValueType::Int,
        &mut nested,
        target,
        true,
        &converter(),
    )?;
    assert!(reader.is_at_end()?);
    assert_eq!(seq.to_vec(), vec![Value::Int(1), Value::Int(2), Value::Int(0)]);

    nested.promises[&1].resolve(Value::Int(2))?;
    assert_eq!(seq.to_vec(), vec![Value::Int(1), Value::Int(2), Value::Int(2)]);
    Ok(())
}

#[test]
fn late_alias_into_append_only_collection_fails_at_the_alias() {
    let mut events = EventBuffer::new(late_resolved_alias());
    let mut reader = EventReader::new(&mut events);
    let seq = Sequence::new(AppendOnlyCollection::new(ValueType::Int));
    let target: Rc<dyn ListAccess> = Rc::new(GenericCollectionAdapter::new(seq.clone(), false));

    let err = saphyr_nodes::deserialize_sequence(
        &mut reader,
        &ValueType::Int,
        &mut Scripted::default(),
        target,
        false,
        &converter(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ForwardAnchorNotSupported { .. }), "{err:?}");
    assert_eq!(err.location().map(|l| l.line()), Some(4));
    // Items before the alias were appended; nothing after it.
    assert_eq!(seq.to_vec(), vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn coercion_failure_surfaces_from_resolution() -> anyhow::Result<()> {
    let mut events = EventBuffer::new(vec![Ev::seq_start(), Ev::alias(3), Ev::seq_end()]);
    let mut reader = EventReader::new(&mut events);
    let mut nested = Scripted::default();
    let seq = Sequence::new(TypedList::new(ValueType::Int));
    let target: Rc<dyn ListAccess> = Rc::new(NativeList::new(seq.clone())?);

    saphyr_nodes::deserialize_sequence(
        &mut reader,
        &ValueType::Int,
        &mut nested,
        target,
        true,
        &converter(),
    )?;

    let err = nested.promises[&3]
        .resolve(Value::from("three"))
        .unwrap_err();
    assert!(matches!(err, Error::Coercion { .. }), "{err:?}");
    assert_eq!(err.location().map(|l| l.line()), Some(2));
    assert_eq!(seq.to_vec(), vec![Value::Int(0)]);
    Ok(())
}
