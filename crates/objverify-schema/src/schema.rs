//! # Schema
//!
//! A [`Schema`] pairs an optional set of instance-field constraints with an
//! optional set of class-attribute constraints. An absent half places no
//! constraint on that dimension. A present half is closed-world: the object
//! may not expose names the schema does not declare.
//!
//! Schemas are immutable once built and cheap to clone, so one schema can be
//! shared by every verification in a process.

use std::sync::Arc;

use objverify_core::Reflect;

use crate::constraint::{CollectionBounds, Constraint, Range, StringBounds};
use crate::error::SchemaError;
use crate::verify::Verifier;

/// Insertion-ordered map from names to constraints.
///
/// Inserting an existing name replaces its constraint in place, so the map
/// never holds duplicates.
#[derive(Debug, Clone, Default)]
pub struct ConstraintMap {
    entries: Vec<(String, Constraint)>,
}

impl ConstraintMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the constraint for `name`.
    pub fn insert(&mut self, name: impl Into<String>, constraint: impl Into<Constraint>) {
        let name = name.into();
        let constraint = constraint.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = constraint,
            None => self.entries.push((name, constraint)),
        }
    }

    /// Look up the constraint for `name`.
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, c)| c)
    }

    /// Returns true if `name` is declared.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no names are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Constraint)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }
}

impl<K, C> FromIterator<(K, C)> for ConstraintMap
where
    K: Into<String>,
    C: Into<Constraint>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut map = ConstraintMap::new();
        for (name, constraint) in iter {
            map.insert(name, constraint);
        }
        map
    }
}

#[derive(Debug, Default)]
struct SchemaInner {
    fields: Option<ConstraintMap>,
    class_attributes: Option<ConstraintMap>,
}

/// Expected shape of an object: its instance fields and the class
/// attributes of its kind.
#[derive(Debug, Clone, Default)]
pub struct Schema(Arc<SchemaInner>);

impl Schema {
    /// Build a schema from its two halves. `None` disables that half.
    pub fn new(fields: Option<ConstraintMap>, class_attributes: Option<ConstraintMap>) -> Self {
        Self(Arc::new(SchemaInner {
            fields,
            class_attributes,
        }))
    }

    /// Start a schema builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Instance-field constraints, if any.
    pub fn fields(&self) -> Option<&ConstraintMap> {
        self.0.fields.as_ref()
    }

    /// Class-attribute constraints, if any.
    pub fn class_attributes(&self) -> Option<&ConstraintMap> {
        self.0.class_attributes.as_ref()
    }

    /// Check `object` against both halves with the default verifier.
    pub fn verify(&self, object: &dyn Reflect) -> bool {
        Verifier::default().verify(self, object)
    }

    /// Check `object`'s instance fields with the default verifier.
    pub fn verify_fields(&self, object: &dyn Reflect) -> bool {
        Verifier::default().verify_fields(self, object)
    }

    /// Check `object`'s class attributes with the default verifier.
    pub fn verify_class_attributes(&self, object: &dyn Reflect) -> bool {
        Verifier::default().verify_class_attributes(self, object)
    }

    /// Audit the schema for bounds that no value can satisfy.
    ///
    /// Construction never rejects such schemas; they just fail every
    /// candidate. Call this at startup to catch them early.
    ///
    /// # Errors
    ///
    /// Returns the first inverted length or range bound found, with a
    /// dotted path such as `stats.DOB` or `class.rank`.
    pub fn check_bounds(&self) -> Result<(), SchemaError> {
        check_schema_bounds(self, "")
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_schema_bounds(schema: &Schema, prefix: &str) -> Result<(), SchemaError> {
    if let Some(fields) = schema.fields() {
        for (name, constraint) in fields.iter() {
            check_constraint_bounds(constraint, &join(prefix, name))?;
        }
    }
    if let Some(attrs) = schema.class_attributes() {
        let class_prefix = join(prefix, "class");
        for (name, constraint) in attrs.iter() {
            check_constraint_bounds(constraint, &join(&class_prefix, name))?;
        }
    }
    Ok(())
}

fn check_range(range: &Range, path: &str) -> Result<(), SchemaError> {
    match (range.low, range.high) {
        (Some(low), Some(high)) if low > high => Err(SchemaError::InvertedRange {
            path: path.to_string(),
            low,
            high,
        }),
        _ => Ok(()),
    }
}

fn check_length(min_len: usize, max_len: Option<usize>, path: &str) -> Result<(), SchemaError> {
    match max_len {
        Some(max_len) if min_len > max_len => Err(SchemaError::InvertedLength {
            path: path.to_string(),
            min_len,
            max_len,
        }),
        _ => Ok(()),
    }
}

fn check_constraint_bounds(constraint: &Constraint, path: &str) -> Result<(), SchemaError> {
    match constraint {
        Constraint::Any | Constraint::ExactType(_) => Ok(()),
        Constraint::NumberRange(r) | Constraint::IntRange(r) | Constraint::FloatRange(r) => {
            check_range(r, path)
        }
        Constraint::BoundedString(StringBounds {
            min_len, max_len, ..
        }) => check_length(*min_len, *max_len, path),
        Constraint::BoundedCollection(CollectionBounds {
            min_len,
            max_len,
            element,
        }) => {
            check_length(*min_len, *max_len, path)?;
            match element {
                Some(element) => check_constraint_bounds(element, &join(path, "*")),
                None => Ok(()),
            }
        }
        Constraint::NestedSchema(schema) => check_schema_bounds(schema, path),
        Constraint::PositionalSequence(elements) => {
            for (i, element) in elements.iter().enumerate() {
                check_constraint_bounds(element, &join(path, &i.to_string()))?;
            }
            Ok(())
        }
    }
}

/// Builder for [`Schema`].
///
/// A half stays absent until the first constraint is added to it.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Option<ConstraintMap>,
    class_attributes: Option<ConstraintMap>,
}

impl SchemaBuilder {
    /// Declare an instance field.
    pub fn field(mut self, name: impl Into<String>, constraint: impl Into<Constraint>) -> Self {
        self.fields
            .get_or_insert_with(ConstraintMap::new)
            .insert(name, constraint);
        self
    }

    /// Declare a class attribute.
    pub fn class_attribute(
        mut self,
        name: impl Into<String>,
        constraint: impl Into<Constraint>,
    ) -> Self {
        self.class_attributes
            .get_or_insert_with(ConstraintMap::new)
            .insert(name, constraint);
        self
    }

    /// Declare that the object has no visible instance fields.
    pub fn no_fields(mut self) -> Self {
        self.fields.get_or_insert_with(ConstraintMap::new);
        self
    }

    /// Declare that the object's kind has no visible class attributes.
    pub fn no_class_attributes(mut self) -> Self {
        self.class_attributes.get_or_insert_with(ConstraintMap::new);
        self
    }

    /// Finish the schema.
    pub fn build(self) -> Schema {
        Schema::new(self.fields, self.class_attributes)
    }
}
