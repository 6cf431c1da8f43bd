//! # objverify-core — Foundational Types for objverify
//!
//! This crate defines everything the validation engine needs to know about
//! the objects it inspects, without knowing anything about schemas. It
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value model.** [`Value`] is a sum type over every runtime
//!    value the engine can see. `Value::kind()` is the only notion of
//!    "type of" in the system, and [`Kind`] equality is exact: a `Bool` is
//!    never an `Int`, and a derived [`RecordType`] never equals its base.
//!
//! 2. **Reflection behind a trait.** The engine never enumerates struct
//!    members itself. Anything implementing [`Reflect`] can be validated;
//!    [`instance_fields`] and [`class_attributes`] are the only two
//!    primitives the engine consumes, and both apply [`ReservedPrefix`]
//!    filtering before the engine sees a name.
//!
//! 3. **Computed class attributes are distinguishable.** A
//!    [`ClassAttribute`] is either a stored value or an [`Accessor`] that is
//!    resolved against a concrete instance.
//!
//! 4. **Declarative fixtures.** [`Record`] wraps a plain mapping (or a JSON
//!    object) into a reflectable object, recursively.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `objverify-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod kind;
pub mod record;
pub mod reflect;
pub mod value;

pub use error::CoreError;
pub use kind::{Accessor, ClassAttribute, Kind, RecordType, RecordTypeBuilder};
pub use record::Record;
pub use reflect::{
    class_attributes, instance_fields, AttributeMap, FieldMap, Reflect, ReservedPrefix,
    DEFAULT_RESERVED_PREFIX,
};
pub use value::{Callable, Number, Value};
