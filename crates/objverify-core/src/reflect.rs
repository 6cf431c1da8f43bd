//! # Reflection Adapter
//!
//! The engine is reflection-agnostic: it consumes exactly two primitives,
//! [`instance_fields`] and [`class_attributes`], both of which hide names
//! starting with the [`ReservedPrefix`].
//!
//! Any type can take part in validation by implementing [`Reflect`]. The
//! generic [`Record`](crate::Record) implements it for declarative data;
//! application structs implement it by listing their public state.

use std::collections::BTreeMap;
use std::fmt;

use crate::kind::{ClassAttribute, RecordType};
use crate::value::Value;

/// Instance fields keyed by name.
pub type FieldMap = BTreeMap<String, Value>;

/// Class attributes keyed by name.
pub type AttributeMap = BTreeMap<String, ClassAttribute>;

/// Prefix hiding private state from validation, by convention `_`.
pub const DEFAULT_RESERVED_PREFIX: &str = "_";

/// An object whose named members can be enumerated.
pub trait Reflect: fmt::Debug + Send + Sync {
    /// The object's exact kind. Class attributes are read from it.
    fn record_type(&self) -> RecordType;

    /// Every per-instance named value, reserved names included.
    fn fields(&self) -> FieldMap;

    /// A single field by name, reserved names included.
    ///
    /// The default builds the whole map through [`Reflect::fields`] and
    /// takes one entry out of it. Implementors with direct access to their
    /// members should override it; [`Record`](crate::Record) does.
    fn field(&self, name: &str) -> Option<Value> {
        self.fields().remove(name)
    }
}

/// Names beginning with this prefix are invisible to the engine.
///
/// An empty prefix reserves nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedPrefix(String);

impl ReservedPrefix {
    /// Create a reserved prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// The prefix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when `name` is hidden from validation.
    pub fn is_reserved(&self, name: &str) -> bool {
        !self.0.is_empty() && name.starts_with(&self.0)
    }
}

impl Default for ReservedPrefix {
    fn default() -> Self {
        Self::new(DEFAULT_RESERVED_PREFIX)
    }
}

/// Reflect the visible instance fields of `object`.
pub fn instance_fields(object: &dyn Reflect, prefix: &ReservedPrefix) -> FieldMap {
    let mut fields = object.fields();
    fields.retain(|name, _| !prefix.is_reserved(name));
    fields
}

/// Reflect the visible class attributes of `object`'s kind.
pub fn class_attributes(object: &dyn Reflect, prefix: &ReservedPrefix) -> AttributeMap {
    object
        .record_type()
        .attributes()
        .iter()
        .filter(|(name, _)| !prefix.is_reserved(name))
        .map(|(name, attr)| (name.clone(), attr.clone()))
        .collect()
}
