//! Value-to-type coercion.

use crate::error::Error;
use crate::parse_scalars::{parse_float, parse_int, parse_yaml11_bool, parse_yaml12_bool};
use crate::types::ValueType;
use crate::value::Value;

/// Converts a deserialized value into the representation a target type requires.
///
/// Errors carry no location; callers attach the location of the node they converted.
pub trait TypeConverter {
    fn change_type(&self, value: Value, target: &ValueType) -> Result<Value, Error>;
}

/// Conversions between the core schema kinds.
///
/// | target  | accepted sources                                              |
/// |---------|---------------------------------------------------------------|
/// | `Any`   | everything, unchanged                                         |
/// | `Int`   | int, integral float in range, bool (1/0), integer text        |
/// | `Float` | float, int, float text                                        |
/// | `Bool`  | bool, int (non-zero is true), boolean text                    |
/// | `Str`   | string, int, float, bool rendered as text                     |
/// | `Seq`   | sequences whose element type fits the item type               |
///
/// `Null` converts to the zero value of the target.
#[derive(Clone, Copy, Debug)]
pub struct DefaultTypeConverter {
    /// Accept only `true`/`false` when converting text to bool.
    pub strict_booleans: bool,
    /// Accept `00`-prefixed octal when converting text to int.
    pub legacy_octal_numbers: bool,
}

impl Default for DefaultTypeConverter {
    fn default() -> Self {
        Self {
            strict_booleans: true,
            legacy_octal_numbers: false,
        }
    }
}

impl DefaultTypeConverter {
    fn parse_bool(&self, s: &str) -> Option<bool> {
        if self.strict_booleans {
            parse_yaml12_bool(s)
        } else {
            parse_yaml11_bool(s)
        }
    }
}

// i64::MAX is not representable as f64; 2^63 is the first float out of range.
const I64_RANGE_END: f64 = 9_223_372_036_854_775_808.0;

impl TypeConverter for DefaultTypeConverter {
    fn change_type(&self, value: Value, target: &ValueType) -> Result<Value, Error> {
        if value.is_null() {
            return Ok(target.zero_value());
        }
        let converted = match (target, &value) {
            (ValueType::Any, _) => Some(value.clone()),

            (ValueType::Int, Value::Int(_)) => Some(value.clone()),
            (ValueType::Int, Value::Float(f))
                if f.fract() == 0.0 && *f >= -I64_RANGE_END && *f < I64_RANGE_END =>
            {
                Some(Value::Int(*f as i64))
            }
            (ValueType::Int, Value::Bool(b)) => Some(Value::Int(i64::from(*b))),
            (ValueType::Int, Value::String(s)) => {
                parse_int(s, self.legacy_octal_numbers).map(Value::Int)
            }

            (ValueType::Float, Value::Float(_)) => Some(value.clone()),
            (ValueType::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (ValueType::Float, Value::String(s)) => parse_float(s).map(Value::Float),

            (ValueType::Bool, Value::Bool(_)) => Some(value.clone()),
            (ValueType::Bool, Value::Int(i)) => Some(Value::Bool(*i != 0)),
            (ValueType::Bool, Value::String(s)) => self.parse_bool(s).map(Value::Bool),

            (ValueType::Str, Value::String(_)) => Some(value.clone()),
            (ValueType::Str, Value::Int(_) | Value::Float(_) | Value::Bool(_)) => {
                Some(Value::String(value.to_string()))
            }

            (ValueType::Seq(_), Value::Seq(_)) if target.accepts(&value) => Some(value.clone()),
            _ => None,
        };
        converted.ok_or_else(|| {
            let shown = match &value {
                Value::Seq(seq) => seq.type_name(),
                other => other.to_string(),
            };
            Error::coercion(shown, target.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::TypedList;
    use crate::types::SeqType;
    use crate::value::Sequence;

    fn convert(value: impl Into<Value>, target: &ValueType) -> Result<Value, Error> {
        DefaultTypeConverter::default().change_type(value.into(), target)
    }

    #[test]
    fn null_becomes_zero_value() {
        let c = DefaultTypeConverter::default();
        assert_eq!(c.change_type(Value::Null, &ValueType::Int).unwrap(), Value::Int(0));
        assert_eq!(c.change_type(Value::Null, &ValueType::Str).unwrap(), Value::Null);
    }

    #[test]
    fn text_is_parsed_for_numeric_targets() {
        assert_eq!(convert("0x10", &ValueType::Int).unwrap(), Value::Int(16));
        assert_eq!(convert("2.5", &ValueType::Float).unwrap(), Value::Float(2.5));
        assert!(matches!(
            convert("ten", &ValueType::Int),
            Err(Error::Coercion { .. })
        ));
    }

    #[test]
    fn integral_floats_convert_to_int() {
        assert_eq!(convert(4.0, &ValueType::Int).unwrap(), Value::Int(4));
        assert!(convert(4.5, &ValueType::Int).is_err());
        assert!(convert(1e300, &ValueType::Int).is_err());
    }

    #[test]
    fn scalars_render_as_strings() {
        assert_eq!(convert(7_i64, &ValueType::Str).unwrap(), Value::from("7"));
        assert_eq!(convert(true, &ValueType::Str).unwrap(), Value::from("true"));
    }

    #[test]
    fn yaml11_booleans_need_relaxed_mode() {
        assert!(convert("yes", &ValueType::Bool).is_err());
        let relaxed = DefaultTypeConverter {
            strict_booleans: false,
            ..DefaultTypeConverter::default()
        };
        assert_eq!(
            relaxed.change_type(Value::from("yes"), &ValueType::Bool).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn sequences_only_convert_to_sequences() {
        assert!(convert(1_i64, &ValueType::Seq(SeqType::untyped())).is_err());
        assert!(convert("x", &ValueType::Seq(SeqType::untyped())).is_err());
    }

    #[test]
    fn sequences_keep_their_element_type() {
        let ints = Value::Seq(Sequence::new(TypedList::new(ValueType::Int)));
        let list_of_list = ValueType::Seq(SeqType::list(ValueType::Seq(SeqType::list(
            ValueType::Int,
        ))));
        match convert(ints.clone(), &list_of_list) {
            Err(Error::Coercion { value, target, .. }) => {
                assert_eq!(value, "List<int>");
                assert_eq!(target, "List<List<int>>");
            }
            other => panic!("expected a coercion error, got {other:?}"),
        }
        let same = convert(ints.clone(), &ValueType::Seq(SeqType::list(ValueType::Int))).unwrap();
        assert!(same.as_seq().unwrap().ptr_eq(ints.as_seq().unwrap()));
    }
}
