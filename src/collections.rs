//! Collection protocols and the built-in collections the default object factory creates.
//!
//! A collection always supports typed append and positional reads ([`Collection`]). Two
//! further protocols are optional and discovered through the `as_*` accessors:
//!
//! - [`RawList`]: untyped list. Append returns the new position; any slot may be overwritten.
//! - [`GenericList`]: typed positional assignment on top of typed append.
//!
//! The four built-ins cover every combination the sequence deserializer distinguishes:
//!
//! | type                    | `RawList` | `GenericList` |
//! |-------------------------|-----------|---------------|
//! | [`TypedList`]           | yes       | yes           |
//! | [`UntypedList`]         | yes       | no            |
//! | [`IndexedCollection`]   | no        | yes           |
//! | [`AppendOnlyCollection`]| no        | no            |

use crate::error::Error;
use crate::types::ValueType;
use crate::value::Value;

/// A collection instance: typed append, length and positional reads.
pub trait Collection {
    /// Name used in diagnostics, e.g. `List<int>`.
    fn type_name(&self) -> &str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` when out of range.
    fn get(&self, index: usize) -> Option<Value>;

    /// Append a value of the item type.
    fn add(&mut self, value: Value) -> Result<(), Error>;

    /// Declared element type; `None` when any value may be stored.
    fn item_type(&self) -> Option<&ValueType> {
        None
    }

    /// The untyped list protocol, when the instance implements it natively.
    fn as_raw_list(&mut self) -> Option<&mut dyn RawList> {
        None
    }

    /// Typed positional assignment, when the instance implements it.
    fn as_generic_list(&mut self) -> Option<&mut dyn GenericList> {
        None
    }
}

/// Untyped mutable list.
pub trait RawList {
    /// Append and return the position of the new element.
    fn append(&mut self, value: Value) -> Result<usize, Error>;

    fn count(&self) -> usize;

    fn get_at(&self, index: usize) -> Option<Value>;

    fn set_at(&mut self, index: usize, value: Value) -> Result<(), Error>;
}

/// Typed positional assignment.
pub trait GenericList {
    fn set(&mut self, index: usize, value: Value) -> Result<(), Error>;
}

fn check_item(type_name: &str, item: &ValueType, value: &Value) -> Result<(), Error> {
    if item.accepts(value) {
        Ok(())
    } else {
        Err(Error::msg(format!(
            "a {} value cannot be stored in {type_name}",
            value.kind()
        )))
    }
}

fn set_slot(type_name: &str, items: &mut [Value], index: usize, value: Value) -> Result<(), Error> {
    let len = items.len();
    let slot = items.get_mut(index).ok_or_else(|| {
        Error::msg(format!(
            "index {index} is out of range for {type_name} of length {len}"
        ))
    })?;
    *slot = value;
    Ok(())
}

/// Growable typed list; natively an untyped list as well.
#[derive(Debug)]
pub struct TypedList {
    name: String,
    item: ValueType,
    items: Vec<Value>,
}

impl TypedList {
    pub fn new(item: ValueType) -> Self {
        Self {
            name: format!("List<{item}>"),
            item,
            items: Vec::new(),
        }
    }
}

impl Collection for TypedList {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn item_type(&self) -> Option<&ValueType> {
        Some(&self.item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn add(&mut self, value: Value) -> Result<(), Error> {
        self.append(value).map(|_| ())
    }

    fn as_raw_list(&mut self) -> Option<&mut dyn RawList> {
        Some(self)
    }

    fn as_generic_list(&mut self) -> Option<&mut dyn GenericList> {
        Some(self)
    }
}

impl RawList for TypedList {
    fn append(&mut self, value: Value) -> Result<usize, Error> {
        check_item(&self.name, &self.item, &value)?;
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn get_at(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn set_at(&mut self, index: usize, value: Value) -> Result<(), Error> {
        check_item(&self.name, &self.item, &value)?;
        set_slot(&self.name, &mut self.items, index, value)
    }
}

impl GenericList for TypedList {
    fn set(&mut self, index: usize, value: Value) -> Result<(), Error> {
        self.set_at(index, value)
    }
}

/// Untyped list of arbitrary values.
#[derive(Debug, Default)]
pub struct UntypedList {
    items: Vec<Value>,
}

impl UntypedList {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collection for UntypedList {
    fn type_name(&self) -> &str {
        "List"
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn add(&mut self, value: Value) -> Result<(), Error> {
        self.items.push(value);
        Ok(())
    }

    fn as_raw_list(&mut self) -> Option<&mut dyn RawList> {
        Some(self)
    }
}

impl RawList for UntypedList {
    fn append(&mut self, value: Value) -> Result<usize, Error> {
        self.items.push(value);
        Ok(self.items.len() - 1)
    }

    fn count(&self) -> usize {
        self.items.len()
    }

    fn get_at(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn set_at(&mut self, index: usize, value: Value) -> Result<(), Error> {
        set_slot("List", &mut self.items, index, value)
    }
}

/// Typed collection that can only grow at the end.
#[derive(Debug)]
pub struct AppendOnlyCollection {
    name: String,
    item: ValueType,
    items: Vec<Value>,
}

impl AppendOnlyCollection {
    pub fn new(item: ValueType) -> Self {
        Self {
            name: format!("AppendOnly<{item}>"),
            item,
            items: Vec::new(),
        }
    }
}

impl Collection for AppendOnlyCollection {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn item_type(&self) -> Option<&ValueType> {
        Some(&self.item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn add(&mut self, value: Value) -> Result<(), Error> {
        check_item(&self.name, &self.item, &value)?;
        self.items.push(value);
        Ok(())
    }
}

/// Typed collection with positional assignment but without the untyped list protocol.
#[derive(Debug)]
pub struct IndexedCollection {
    name: String,
    item: ValueType,
    items: Vec<Value>,
}

impl IndexedCollection {
    pub fn new(item: ValueType) -> Self {
        Self {
            name: format!("Indexed<{item}>"),
            item,
            items: Vec::new(),
        }
    }
}

impl Collection for IndexedCollection {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn item_type(&self) -> Option<&ValueType> {
        Some(&self.item)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<Value> {
        self.items.get(index).cloned()
    }

    fn add(&mut self, value: Value) -> Result<(), Error> {
        check_item(&self.name, &self.item, &value)?;
        self.items.push(value);
        Ok(())
    }

    fn as_generic_list(&mut self) -> Option<&mut dyn GenericList> {
        Some(self)
    }
}

impl GenericList for IndexedCollection {
    fn set(&mut self, index: usize, value: Value) -> Result<(), Error> {
        check_item(&self.name, &self.item, &value)?;
        set_slot(&self.name, &mut self.items, index, value)
    }
}
