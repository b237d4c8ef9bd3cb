//! In-memory values produced by the node deserializers.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::collections::Collection;
use crate::promise::ValuePromise;
use crate::types::ValueType;

/// A deserialized value.
///
/// Sequences are shared handles: cloning a `Value::Seq` clones the handle, not the
/// elements, and an alias to an anchored sequence yields the very same instance.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Seq(Sequence),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Sequence> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Seq(_) => "sequence",
        }
    }
}

/// Equality is structural; two handles to the same sequence are equal without looking
/// at their elements.
///
/// A pair of sequences met again while it is still being compared counts as equal, so
/// distinct self-referencing sequences of the same shape compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        eq_tracked(self, other, &mut Vec::new())
    }
}

fn eq_tracked(a: &Value, b: &Value, open: &mut Vec<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Seq(a), Value::Seq(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            let pair = (a.address(), b.address());
            if open.contains(&pair) {
                return true;
            }
            let (left, right) = (a.to_vec(), b.to_vec());
            if left.len() != right.len() {
                return false;
            }
            open.push(pair);
            let equal = left
                .iter()
                .zip(&right)
                .all(|(x, y)| eq_tracked(x, y, open));
            open.pop();
            equal
        }
        _ => false,
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Seq(seq)
    }
}

/// Shared handle to a collection instance.
///
/// The element type is read once at construction, so it stays available while the
/// collection is mutably borrowed.
#[derive(Clone)]
pub struct Sequence {
    inner: Rc<RefCell<dyn Collection>>,
    item: Option<Rc<ValueType>>,
}

impl Sequence {
    pub fn new<C: Collection + 'static>(collection: C) -> Self {
        let item = collection.item_type().cloned().map(Rc::new);
        Sequence {
            inner: Rc::new(RefCell::new(collection)),
            item,
        }
    }

    /// Name of the concrete collection type.
    pub fn type_name(&self) -> String {
        self.inner.borrow().type_name().to_owned()
    }

    /// Declared element type, `None` for untyped collections.
    pub fn item_type(&self) -> Option<&ValueType> {
        self.item.as_deref()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.borrow().get(index)
    }

    /// Snapshot of the elements in order.
    pub fn to_vec(&self) -> Vec<Value> {
        let inner = self.inner.borrow();
        (0..inner.len()).filter_map(|i| inner.get(i)).collect()
    }

    /// Whether both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn borrow_mut(&self) -> RefMut<'_, dyn Collection> {
        self.inner.borrow_mut()
    }

    fn address(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }
}

/// Prints type name and length only; the element graph may be cyclic.
impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("Sequence")
                .field("type", &inner.type_name())
                .field("len", &inner.len())
                .finish(),
            Err(_) => f.write_str("Sequence { <borrowed> }"),
        }
    }
}

/// Flow-style rendering, e.g. `[1, "two", [3.5, null]]`.
///
/// A sequence that contains itself is rendered as `*recursive*` at the repeated position.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_flow(self, f, &mut Vec::new())
    }
}

fn fmt_flow(value: &Value, f: &mut fmt::Formatter<'_>, open: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(x) if x.is_nan() => f.write_str(".nan"),
        Value::Float(x) if x.is_infinite() => {
            f.write_str(if *x > 0.0 { ".inf" } else { "-.inf" })
        }
        Value::Float(x) => write!(f, "{x:?}"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Seq(seq) => {
            let address = seq.address();
            if open.contains(&address) {
                return f.write_str("*recursive*");
            }
            open.push(address);
            f.write_str("[")?;
            for (i, item) in seq.to_vec().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_flow(item, f, open)?;
            }
            open.pop();
            f.write_str("]")
        }
    }
}

/// Serializes scalars as themselves and sequences as serde sequences.
///
/// Fails on self-referencing sequences.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Tracked {
            value: self,
            open: &RefCell::new(Vec::new()),
        }
        .serialize(serializer)
    }
}

struct Tracked<'a> {
    value: &'a Value,
    open: &'a RefCell<Vec<usize>>,
}

impl Serialize for Tracked<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::String(s) => serializer.serialize_str(s),
            Value::Seq(seq) => {
                let address = seq.address();
                if self.open.borrow().contains(&address) {
                    return Err(S::Error::custom("cannot serialize a recursive sequence"));
                }
                self.open.borrow_mut().push(address);
                let items = seq.to_vec();
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    out.serialize_element(&Tracked {
                        value: item,
                        open: self.open,
                    })?;
                }
                self.open.borrow_mut().pop();
                out.end()
            }
        }
    }
}

/// Result of deserializing one node: a value, or a promise for a value that an anchor
/// has not produced yet.
#[derive(Debug)]
pub enum NodeValue {
    Ready(Value),
    Pending(ValuePromise),
}

impl From<Value> for NodeValue {
    fn from(value: Value) -> Self {
        NodeValue::Ready(value)
    }
}
