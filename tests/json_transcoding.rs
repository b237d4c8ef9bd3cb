use indoc::indoc;
use saphyr_nodes::{Location, ValueType, from_str};

#[test]
fn values_transcode_to_json() -> anyhow::Result<()> {
    let yaml = indoc! {"
        - 1
        - [two, 3.5]
        - ~
        - true
    "};
    let value = from_str(yaml, &ValueType::Any)?;
    let json = serde_json::to_string(&value)?;
    assert_eq!(json, r#"[1,["two",3.5],null,true]"#);
    Ok(())
}

#[test]
fn shared_sequences_are_written_out_each_time() -> anyhow::Result<()> {
    let value = from_str("[&a [1], *a]", &ValueType::Any)?;
    assert_eq!(serde_json::to_string(&value)?, "[[1],[1]]");
    Ok(())
}

#[test]
fn recursive_sequences_cannot_be_serialized() -> anyhow::Result<()> {
    let value = from_str("&a [1, *a]", &ValueType::Any)?;
    let err = serde_json::to_string(&value).unwrap_err();
    assert!(err.to_string().contains("recursive"), "{err}");
    Ok(())
}

#[test]
fn locations_serialize_as_records() -> anyhow::Result<()> {
    let json = serde_json::to_value(Location::new(2, 5, 17))?;
    assert_eq!(json, serde_json::json!({"line": 2, "column": 5, "offset": 17}));
    Ok(())
}
