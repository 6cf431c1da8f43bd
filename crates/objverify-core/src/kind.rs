//! # Kinds and Class Attributes
//!
//! A [`Kind`] is the exact runtime type of a [`Value`]. Built-in kinds are
//! plain enum variants; user-defined record kinds are described by a shared
//! [`RecordType`] descriptor that also carries the kind's class attributes.
//!
//! ## Exactness
//!
//! Kind equality never considers inheritance. A `RecordType` may name a base
//! kind, and [`RecordType::is_subkind_of`] can walk that chain, but two
//! kinds are equal only when they are the same descriptor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::reflect::Reflect;
use crate::value::{Callable, Value};

/// The exact runtime kind of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Kind of `Value::Null`.
    Null,
    /// Kind of `Value::Bool`.
    Bool,
    /// Kind of `Value::Int`.
    Int,
    /// Kind of `Value::Float`.
    Float,
    /// Kind of `Value::Str`.
    Str,
    /// Kind of `Value::List`.
    List,
    /// Kind of `Value::Callable`.
    Callable,
    /// A user-defined record kind.
    Record(RecordType),
}

impl Kind {
    /// Human-readable kind name, used in log output.
    pub fn name(&self) -> &str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Str => "str",
            Kind::List => "list",
            Kind::Callable => "callable",
            Kind::Record(ty) => ty.name(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Class attributes
// ---------------------------------------------------------------------------

type AccessorFn = dyn Fn(&dyn Reflect) -> Value + Send + Sync;

/// A zero-argument accessor bound to instances of a record kind.
///
/// Resolving it against an instance yields the derived value.
#[derive(Clone)]
pub struct Accessor(Arc<AccessorFn>);

impl Accessor {
    /// Wrap an accessor function.
    pub fn new(func: impl Fn(&dyn Reflect) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(func))
    }

    /// Compute the attribute for a concrete instance.
    pub fn resolve(&self, instance: &dyn Reflect) -> Value {
        (self.0)(instance)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

/// A named member shared by every instance of a record kind.
#[derive(Debug, Clone)]
pub enum ClassAttribute {
    /// A plain stored value (constants, methods).
    Stored(Value),
    /// A computed property, resolved per instance.
    Computed(Accessor),
}

impl ClassAttribute {
    /// Returns true for computed attributes.
    pub fn is_computed(&self) -> bool {
        matches!(self, ClassAttribute::Computed(_))
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct RecordTypeInner {
    name: String,
    base: Option<RecordType>,
    attributes: BTreeMap<String, ClassAttribute>,
}

/// Shared descriptor of a user-defined record kind.
///
/// Cloning is cheap. Equality is descriptor identity, so two separately
/// built types with the same name are still different kinds.
#[derive(Clone)]
pub struct RecordType(Arc<RecordTypeInner>);

impl RecordType {
    /// Start describing a new record kind.
    pub fn builder(name: impl Into<String>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            base: None,
            attributes: BTreeMap::new(),
        }
    }

    /// The kind shared by every [`Record`](crate::Record) built without an
    /// explicit type. It declares no class attributes.
    pub fn generic() -> RecordType {
        static GENERIC: OnceLock<RecordType> = OnceLock::new();
        GENERIC
            .get_or_init(|| RecordType::builder("Object").build())
            .clone()
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The kind this one derives from, if any.
    pub fn base(&self) -> Option<&RecordType> {
        self.0.base.as_ref()
    }

    /// Class attributes declared directly on this kind, reserved names
    /// included. Attributes of base kinds are not merged in.
    pub fn attributes(&self) -> &BTreeMap<String, ClassAttribute> {
        &self.0.attributes
    }

    /// True when `self` is `other` or derives from it through base links.
    pub fn is_subkind_of(&self, other: &RecordType) -> bool {
        let mut current = Some(self);
        while let Some(ty) = current {
            if ty == other {
                return true;
            }
            current = ty.base();
        }
        false
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RecordType {}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.0.name).finish()
    }
}

/// Builder for [`RecordType`].
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: String,
    base: Option<RecordType>,
    attributes: BTreeMap<String, ClassAttribute>,
}

impl RecordTypeBuilder {
    /// Declare the base kind.
    pub fn base(mut self, base: &RecordType) -> Self {
        self.base = Some(base.clone());
        self
    }

    /// Add a stored class attribute.
    pub fn stored(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .insert(name.into(), ClassAttribute::Stored(value.into()));
        self
    }

    /// Add a method. The stored value is a [`Callable`] named after the
    /// attribute.
    pub fn method(
        self,
        name: impl Into<String>,
        func: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        let name = name.into();
        let callable = Callable::new(name.as_str(), func);
        self.stored(name, callable)
    }

    /// Add a computed attribute.
    pub fn computed(
        mut self,
        name: impl Into<String>,
        func: impl Fn(&dyn Reflect) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.attributes
            .insert(name.into(), ClassAttribute::Computed(Accessor::new(func)));
        self
    }

    /// Finish the descriptor.
    pub fn build(self) -> RecordType {
        RecordType(Arc::new(RecordTypeInner {
            name: self.name,
            base: self.base,
            attributes: self.attributes,
        }))
    }
}
