//! Event streams that break the sequence grammar.

use std::rc::Rc;

use saphyr_nodes::{
    DefaultTypeConverter, Error, Ev, EventBuffer, EventKind, EventReader, ListAccess, NativeList,
    NodeValue, SeqType, Sequence, TypeConverter, TypedList, Value, ValueDeserializer, ValueType,
    deserialize_sequence, from_events,
};

fn int_list() -> ValueType {
    ValueType::Seq(SeqType::list(ValueType::Int))
}

/// Reads scalars as strings and nothing else.
struct Scalars;

impl ValueDeserializer for Scalars {
    fn deserialize_value(
        &mut self,
        reader: &mut EventReader<'_>,
        _ty: &ValueType,
    ) -> Result<NodeValue, Error> {
        match reader.expect(EventKind::Scalar)? {
            Ev::Scalar { value, .. } => Ok(NodeValue::Ready(Value::String(value))),
            _ => unreachable!("expect returned another kind"),
        }
    }
}

fn read_ints(events: Vec<Ev>) -> (Sequence, Result<(), Error>) {
    let mut events = EventBuffer::new(events);
    let mut reader = EventReader::new(&mut events);
    let seq = Sequence::new(TypedList::new(ValueType::Int));
    let target: Rc<dyn ListAccess> = Rc::new(NativeList::new(seq.clone()).unwrap());
    let converter: Rc<dyn TypeConverter> = Rc::new(DefaultTypeConverter::default());
    let result = deserialize_sequence(
        &mut reader,
        &ValueType::Int,
        &mut Scalars,
        target,
        true,
        &converter,
    );
    (seq, result)
}

#[test]
fn unterminated_sequence_is_end_of_input() {
    let (seq, result) = read_ints(vec![Ev::seq_start(), Ev::scalar("1")]);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Eof { .. }), "{err:?}");
    assert_eq!(seq.to_vec(), vec![Value::Int(1)]);
}

#[test]
fn sequence_must_open_with_its_start_event() {
    let (seq, result) = read_ints(vec![Ev::scalar("1"), Ev::seq_end()]);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Unexpected { .. }), "{err:?}");
    assert!(seq.is_empty());
}

#[test]
fn mapping_end_where_an_element_belongs() {
    let (_, result) = read_ints(vec![Ev::seq_start(), Ev::scalar("1"), Ev::map_end()]);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Unexpected { .. }), "{err:?}");
    assert_eq!(err.location().map(|l| l.line()), Some(3));
}

#[test]
fn unterminated_document_is_end_of_input() {
    let mut events = EventBuffer::new(vec![Ev::seq_start(), Ev::scalar("1")]);
    let err = from_events(&mut events, &int_list()).unwrap_err();
    assert!(matches!(err, Error::Eof { .. }), "{err:?}");
}

#[test]
fn mapping_end_inside_a_document_sequence() {
    let mut events = EventBuffer::new(vec![Ev::seq_start(), Ev::scalar("1"), Ev::map_end()]);
    let err = from_events(&mut events, &int_list()).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("mapping end"), "{text}");
    assert_eq!(err.location().map(|l| l.line()), Some(3));
}
