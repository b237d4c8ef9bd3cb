use indoc::indoc;
use saphyr_nodes::{Error, SeqType, Value, ValueType, from_str};

fn list_of(item: ValueType) -> ValueType {
    ValueType::Seq(SeqType::list(item))
}

#[test]
fn int_list_in_stream_order() -> anyhow::Result<()> {
    let value = from_str("[1, 2, 3]", &list_of(ValueType::Int))?;
    let seq = value.as_seq().expect("a sequence");
    assert_eq!(seq.type_name(), "List<int>");
    assert_eq!(seq.to_vec(), vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    Ok(())
}

#[test]
fn block_sequence_items_are_coerced() -> anyhow::Result<()> {
    let yaml = indoc! {"
        - 1
        - 2.5
        - 1e2
    "};
    let value = from_str(yaml, &list_of(ValueType::Float))?;
    assert_eq!(
        value.as_seq().unwrap().to_vec(),
        vec![Value::Float(1.0), Value::Float(2.5), Value::Float(100.0)]
    );
    Ok(())
}

#[test]
fn empty_sequences_for_every_builtin_kind() -> anyhow::Result<()> {
    let targets = [
        SeqType::list(ValueType::Int),
        SeqType::untyped(),
        SeqType::append_only(ValueType::Str),
        SeqType::indexed(ValueType::Bool),
    ];
    for target in targets {
        let name = target.name().to_owned();
        let value = from_str("[]", &ValueType::Seq(target))?;
        let seq = value.as_seq().expect("a sequence");
        assert!(seq.is_empty(), "{name} should be empty");
        assert_eq!(seq.type_name(), name);
    }
    Ok(())
}

#[test]
fn append_only_and_indexed_collections_take_concrete_values() -> anyhow::Result<()> {
    let yaml = "[a, b, c]";
    for target in [
        SeqType::append_only(ValueType::Str),
        SeqType::indexed(ValueType::Str),
    ] {
        let value = from_str(yaml, &ValueType::Seq(target))?;
        assert_eq!(
            value.as_seq().unwrap().to_vec(),
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }
    Ok(())
}

#[test]
fn nested_sequences_recurse() -> anyhow::Result<()> {
    let yaml = indoc! {"
        - [1, 2]
        - []
        - - 3
    "};
    let value = from_str(yaml, &list_of(list_of(ValueType::Int)))?;
    let outer = value.as_seq().unwrap().to_vec();
    assert_eq!(outer.len(), 3);
    assert_eq!(
        outer[0].as_seq().unwrap().to_vec(),
        vec![Value::Int(1), Value::Int(2)]
    );
    assert!(outer[1].as_seq().unwrap().is_empty());
    assert_eq!(outer[2].as_seq().unwrap().to_vec(), vec![Value::Int(3)]);
    Ok(())
}

#[test]
fn untyped_targets_infer_scalars() -> anyhow::Result<()> {
    let value = from_str("[1, x, 2.5, true, ~, '3']", &ValueType::Any)?;
    assert_eq!(value.to_string(), r#"[1, "x", 2.5, true, null, "3"]"#);
    assert_eq!(value.as_seq().unwrap().type_name(), "List");
    Ok(())
}

#[test]
fn null_items_fill_reference_slots() -> anyhow::Result<()> {
    let value = from_str("[a, ~, null]", &list_of(ValueType::Str))?;
    assert_eq!(
        value.as_seq().unwrap().to_vec(),
        vec![Value::from("a"), Value::Null, Value::Null]
    );
    Ok(())
}

#[test]
fn null_items_do_not_fit_value_kinds() {
    let err = from_str("[1, ~]", &list_of(ValueType::Int)).unwrap_err();
    assert!(matches!(err, Error::Coercion { .. }), "{err:?}");
}

#[test]
fn coercion_errors_point_at_the_item() {
    let yaml = indoc! {"
        - 1
        - two
    "};
    let err = from_str(yaml, &list_of(ValueType::Int)).unwrap_err();
    match &err {
        Error::Coercion { value, target, .. } => {
            assert_eq!(value, "two");
            assert_eq!(target, "int");
        }
        other => panic!("expected a coercion error, got {other:?}"),
    }
    let location = err.location().expect("located");
    assert_eq!((location.line(), location.column()), (2, 3));
}

#[test]
fn scalar_where_sequence_expected() {
    let err = from_str("5", &list_of(ValueType::Int)).unwrap_err();
    assert!(matches!(err, Error::Unexpected { .. }), "{err:?}");
    assert!(err.to_string().contains("scalar"), "{err}");
}

#[test]
fn mappings_are_not_handled() {
    let err = from_str("{a: 1}", &ValueType::Any).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("no node deserializer accepts a mapping start"), "{text}");
    assert!(text.contains("line 1"), "{text}");
}

#[test]
fn sequence_where_scalar_expected() {
    let err = from_str("[1]", &ValueType::Int).unwrap_err();
    assert!(err.to_string().contains("sequence start"), "{err}");
}
