//! Runtime descriptions of deserialization targets.
//!
//! A [`ValueType`] is what the caller asks for. Sequence targets carry a [`SeqType`] that
//! declares which collection protocols its instances implement; the collection node
//! deserializer classifies a target from these declarations alone.

use std::borrow::Cow;
use std::fmt;

use crate::value::Value;

/// Target type of one deserialization.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueType {
    /// Any value; scalars are inferred by the YAML 1.2 core schema.
    Any,
    Bool,
    Int,
    Float,
    Str,
    Seq(SeqType),
}

impl ValueType {
    /// Bool, integer and float targets are value kinds: they have a non-null zero value.
    pub fn is_value_kind(&self) -> bool {
        matches!(self, ValueType::Bool | ValueType::Int | ValueType::Float)
    }

    /// The value a freshly reserved slot of this type holds.
    pub fn zero_value(&self) -> Value {
        match self {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Any | ValueType::Str | ValueType::Seq(_) => Value::Null,
        }
    }

    /// Whether `value` may be stored in a slot of this type without conversion.
    ///
    /// `Null` is accepted everywhere so that pending slots of reference kinds can hold it.
    /// A sequence fits a sequence type when its declared element type fits the item type,
    /// recursively.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (ValueType::Any, _) | (_, Value::Null) => true,
            (ValueType::Bool, Value::Bool(_))
            | (ValueType::Int, Value::Int(_))
            | (ValueType::Float, Value::Float(_))
            | (ValueType::Str, Value::String(_)) => true,
            (ValueType::Seq(seq), Value::Seq(items)) => seq.holds_items_of(items.item_type()),
            _ => false,
        }
    }

    /// Whether every value of type `source` is also a value of this type.
    fn holds(&self, source: &ValueType) -> bool {
        match (self, source) {
            (ValueType::Any, _) => true,
            (ValueType::Seq(target), ValueType::Seq(source)) => {
                target.holds_items_of(source.item())
            }
            _ => self == source,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Any => f.write_str("any"),
            ValueType::Bool => f.write_str("bool"),
            ValueType::Int => f.write_str("int"),
            ValueType::Float => f.write_str("float"),
            ValueType::Str => f.write_str("string"),
            ValueType::Seq(seq) => f.write_str(&seq.name),
        }
    }
}

/// Collection protocols implemented by instances of a sequence type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Untyped mutable list: add, count, index get and index set over any value.
    pub raw_list: bool,
    /// Typed collection: append values of the item type.
    pub generic_collection: bool,
    /// Typed list: index get and index set on top of the typed collection.
    pub generic_list: bool,
}

/// Description of a sequence target.
#[derive(Clone, Debug, PartialEq)]
pub struct SeqType {
    pub(crate) name: Cow<'static, str>,
    pub(crate) item: Option<Box<ValueType>>,
    pub(crate) capabilities: Capabilities,
    pub(crate) kind: SeqKind,
}

/// Which constructor the default object factory uses for a [`SeqType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SeqKind {
    List,
    Untyped,
    AppendOnly,
    Indexed,
    Custom,
}

impl SeqType {
    /// Growable typed list: natively an untyped list as well, so every slot is assignable.
    pub fn list(item: ValueType) -> Self {
        Self {
            name: Cow::Owned(format!("List<{item}>")),
            item: Some(Box::new(item)),
            capabilities: Capabilities {
                raw_list: true,
                generic_collection: true,
                generic_list: true,
            },
            kind: SeqKind::List,
        }
    }

    /// Untyped list holding values of any type.
    pub fn untyped() -> Self {
        Self {
            name: Cow::Borrowed("List"),
            item: None,
            capabilities: Capabilities {
                raw_list: true,
                generic_collection: false,
                generic_list: false,
            },
            kind: SeqKind::Untyped,
        }
    }

    /// Typed collection that can only be appended to.
    pub fn append_only(item: ValueType) -> Self {
        Self {
            name: Cow::Owned(format!("AppendOnly<{item}>")),
            item: Some(Box::new(item)),
            capabilities: Capabilities {
                raw_list: false,
                generic_collection: true,
                generic_list: false,
            },
            kind: SeqKind::AppendOnly,
        }
    }

    /// Typed list with positional assignment, without the untyped list protocol.
    pub fn indexed(item: ValueType) -> Self {
        Self {
            name: Cow::Owned(format!("Indexed<{item}>")),
            item: Some(Box::new(item)),
            capabilities: Capabilities {
                raw_list: false,
                generic_collection: true,
                generic_list: true,
            },
            kind: SeqKind::Indexed,
        }
    }

    /// User-defined sequence type, instantiated by a constructor registered under `name`
    /// on [`crate::DefaultObjectFactory`].
    ///
    /// `item` is only meaningful when `capabilities.generic_collection` is set.
    pub fn custom(
        name: impl Into<Cow<'static, str>>,
        item: Option<ValueType>,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            name: name.into(),
            item: item.map(Box::new),
            capabilities,
            kind: SeqKind::Custom,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared item type, `None` for untyped sequences.
    pub fn item(&self) -> Option<&ValueType> {
        self.item.as_deref()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Untyped sequence types and `Any` items hold every sequence; otherwise the source
    /// must declare an element type this item type holds.
    fn holds_items_of(&self, source_item: Option<&ValueType>) -> bool {
        match self.item() {
            None | Some(ValueType::Any) => true,
            Some(item) => source_item.is_some_and(|source| item.holds(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_follow_kind() {
        assert_eq!(ValueType::Int.zero_value(), Value::Int(0));
        assert_eq!(ValueType::Bool.zero_value(), Value::Bool(false));
        assert_eq!(ValueType::Str.zero_value(), Value::Null);
        assert_eq!(
            ValueType::Seq(SeqType::untyped()).zero_value(),
            Value::Null
        );
    }

    #[test]
    fn names_include_item_types() {
        let nested = SeqType::list(ValueType::Seq(SeqType::append_only(ValueType::Str)));
        assert_eq!(nested.name(), "List<AppendOnly<string>>");
    }

    #[test]
    fn sequence_values_are_checked_by_element_type() {
        use crate::collections::{TypedList, UntypedList};
        use crate::value::Sequence;

        let ints = Value::Seq(Sequence::new(TypedList::new(ValueType::Int)));
        let nested = Value::Seq(Sequence::new(TypedList::new(ValueType::Seq(SeqType::list(
            ValueType::Int,
        )))));
        let untyped = Value::Seq(Sequence::new(UntypedList::new()));

        let list_of_int = ValueType::Seq(SeqType::list(ValueType::Int));
        assert!(list_of_int.accepts(&ints));
        assert!(!list_of_int.accepts(&nested));
        assert!(!list_of_int.accepts(&untyped));

        let list_of_list = ValueType::Seq(SeqType::list(list_of_int.clone()));
        assert!(list_of_list.accepts(&nested));
        assert!(!list_of_list.accepts(&ints));

        for open in [SeqType::untyped(), SeqType::list(ValueType::Any)] {
            let open = ValueType::Seq(open);
            assert!(open.accepts(&ints) && open.accepts(&nested) && open.accepts(&untyped));
        }
    }
}
