pub use budget::{Budget, BudgetBreach};
pub use collections::{
    AppendOnlyCollection, Collection, GenericList, IndexedCollection, RawList, TypedList,
    UntypedList,
};
pub use convert::{DefaultTypeConverter, TypeConverter};
pub use de::{
    Classification, CollectionNodeDeserializer, Deserializer, GenericCollectionAdapter,
    ListAccess, NativeList, NodeDeserializer, NullNodeDeserializer, ScalarNodeDeserializer,
    ValueDeserializer, classify, deserialize_sequence, from_events, from_multiple,
    from_multiple_with_options, from_str, from_str_with_options,
};
pub use error::Error;
pub use events::{Ev, EventBuffer, EventKind, EventReader, Events};
pub use factory::{DefaultObjectFactory, ObjectFactory};
pub use live_events::LiveEvents;
pub use location::Location;
pub use options::Options;
pub use promise::ValuePromise;
pub use saphyr_parser::ScalarStyle;
pub use types::{Capabilities, SeqType, ValueType};
pub use value::{NodeValue, Sequence, Value};

mod anchors;
pub mod budget;
mod collections;
mod convert;
mod de;
mod error;
mod events;
mod factory;
mod live_events;
mod location;
#[macro_use]
mod macros;
mod options;
mod parse_scalars;
mod promise;
mod tags;
mod types;
mod value;
