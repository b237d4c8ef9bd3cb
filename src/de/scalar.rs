//! Scalar and null nodes.

use saphyr_parser::ScalarStyle;

use crate::de::{NodeDeserializer, ValueDeserializer};
use crate::error::Error;
use crate::events::{Ev, EventKind, EventReader};
use crate::parse_scalars::{
    is_null_literal, looks_like_float, parse_float, parse_int, parse_yaml12_bool,
};
use crate::tags::ScalarTag;
use crate::types::ValueType;
use crate::value::{NodeValue, Value};

/// Plain null literals and `!!null` scalars, for targets that can hold null.
///
/// Value kinds (`Bool`, `Int`, `Float`) are declined so that the scalar deserializer
/// reports the conversion failure.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNodeDeserializer;

impl NodeDeserializer for NullNodeDeserializer {
    fn deserialize(
        &self,
        reader: &mut EventReader<'_>,
        expected: &ValueType,
        _nested: &mut dyn ValueDeserializer,
    ) -> Result<Option<NodeValue>, Error> {
        if expected.is_value_kind() {
            return Ok(None);
        }
        let is_null = match reader.current()? {
            Ev::Scalar {
                value, tag, style, ..
            } => match ScalarTag::of(tag.as_deref()) {
                ScalarTag::Null => true,
                ScalarTag::None => *style == ScalarStyle::Plain && is_null_literal(value),
                _ => false,
            },
            _ => false,
        };
        if !is_null {
            return Ok(None);
        }
        reader.expect(EventKind::Scalar)?;
        Ok(Some(NodeValue::Ready(Value::Null)))
    }
}

/// Scalars for scalar and `Any` targets.
///
/// `Any` targets are resolved by the YAML 1.2 core schema. Concrete targets receive the
/// raw text; converting it is left to the [`crate::TypeConverter`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarNodeDeserializer {
    /// Accept `00`-prefixed octal when inferring integers.
    pub legacy_octal_numbers: bool,
}

impl ScalarNodeDeserializer {
    fn infer(&self, value: String, tag: ScalarTag, style: ScalarStyle) -> Result<Value, Error> {
        let invalid = |value: &str, target: &str| Error::coercion(value, target);
        match tag {
            ScalarTag::Str => Ok(Value::String(value)),
            ScalarTag::Null => Ok(Value::Null),
            ScalarTag::Bool => parse_yaml12_bool(&value)
                .map(Value::Bool)
                .ok_or_else(|| invalid(&value, "bool")),
            ScalarTag::Int => parse_int(&value, self.legacy_octal_numbers)
                .map(Value::Int)
                .ok_or_else(|| invalid(&value, "int")),
            ScalarTag::Float => parse_float(&value)
                .map(Value::Float)
                .ok_or_else(|| invalid(&value, "float")),
            ScalarTag::None if style != ScalarStyle::Plain => Ok(Value::String(value)),
            ScalarTag::None => Ok(self.infer_plain(value)),
        }
    }

    fn infer_plain(&self, value: String) -> Value {
        if is_null_literal(&value) {
            Value::Null
        } else if let Some(b) = parse_yaml12_bool(&value) {
            Value::Bool(b)
        } else if let Some(i) = parse_int(&value, self.legacy_octal_numbers) {
            Value::Int(i)
        } else if looks_like_float(&value) {
            parse_float(&value).map_or(Value::String(value), Value::Float)
        } else {
            Value::String(value)
        }
    }
}

impl NodeDeserializer for ScalarNodeDeserializer {
    fn deserialize(
        &self,
        reader: &mut EventReader<'_>,
        expected: &ValueType,
        _nested: &mut dyn ValueDeserializer,
    ) -> Result<Option<NodeValue>, Error> {
        if matches!(expected, ValueType::Seq(_)) || !reader.accept(EventKind::Scalar)? {
            return Ok(None);
        }
        let Ev::Scalar {
            value,
            tag,
            style,
            start,
            ..
        } = reader.expect(EventKind::Scalar)?
        else {
            return Ok(None);
        };

        let value = match expected {
            ValueType::Any => self
                .infer(value, ScalarTag::of(tag.as_deref()), style)
                .map_err(|err| err.with_location(start))?,
            _ => Value::String(value),
        };
        Ok(Some(NodeValue::Ready(value)))
    }
}
