//! # Verification Engine
//!
//! Recursive matching of a [`Schema`] against a reflectable object.
//!
//! ## Field phase
//!
//! 1. No field constraints: pass.
//! 2. Reflect the visible instance fields.
//! 3. More visible fields than declared constraints: fail.
//! 4. For each declared field in declaration order, fail if it is missing,
//!    otherwise dispatch on the constraint. The first failure stops the
//!    walk.
//!
//! ## Class phase
//!
//! Same arity and presence rules over the kind's class attributes.
//! Computed attributes are resolved against the instance and then checked
//! like a field; stored attributes accept `NestedSchema` (class-level
//! recursion into the attribute's own kind) and `ExactType`.
//!
//! ## Synthetic views
//!
//! Positional sequences, element checks, and computed attributes re-enter
//! the field phase through a borrowed field view over the candidate. The
//! caller's data is never copied or mutated.

use std::borrow::Cow;
use std::collections::BTreeMap;

use objverify_core::{
    class_attributes, instance_fields, ClassAttribute, Number, Reflect, ReservedPrefix, Value,
};

use crate::config::VerifierConfig;
use crate::constraint::{CollectionBounds, Constraint, Range, StringBounds};
use crate::schema::Schema;

/// Borrowed name → value view that the field phase walks.
type FieldView<'v> = BTreeMap<Cow<'v, str>, &'v Value>;

/// Field name used when a single element is checked on its own.
const ELEMENT_FIELD: &str = "elem";

/// Field name used when a computed class attribute is checked.
const COMPUTED_FIELD: &str = "prop";

fn reject(field: &str, reason: &'static str) -> bool {
    tracing::trace!(field, reason, "constraint rejected value");
    false
}

/// Schema verifier.
///
/// Holds no state besides its configuration, so one verifier can be shared
/// freely across threads and calls.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerifierConfig,
    prefix: ReservedPrefix,
}

impl Verifier {
    /// Create a verifier from a configuration.
    pub fn new(config: VerifierConfig) -> Self {
        let prefix = config.reserved_prefix();
        Self { config, prefix }
    }

    /// The active configuration.
    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Check both the instance fields and the class attributes of `object`.
    ///
    /// Both phases run even when the field phase fails, unless
    /// `short_circuit_phases` is configured. The verdict is the same either
    /// way.
    pub fn verify(&self, schema: &Schema, object: &dyn Reflect) -> bool {
        let fields_ok = self.verify_fields(schema, object);
        let verdict = if !fields_ok && self.config.short_circuit_phases {
            false
        } else {
            let class_ok = self.verify_class_attributes(schema, object);
            fields_ok && class_ok
        };
        let kind = object.record_type();
        tracing::debug!(
            kind = kind.name(),
            verdict,
            "verified object"
        );
        verdict
    }

    /// [`Verifier::verify`] for a value that must be an object.
    pub fn verify_value(&self, schema: &Schema, value: &Value) -> bool {
        match value.as_object() {
            Some(object) => self.verify(schema, object),
            None => reject("<root>", "value is not an object"),
        }
    }

    /// Check the visible instance fields of `object`.
    pub fn verify_fields(&self, schema: &Schema, object: &dyn Reflect) -> bool {
        let Some(declared) = schema.fields() else {
            return true;
        };
        let props = instance_fields(object, &self.prefix);
        let view: FieldView<'_> = props
            .iter()
            .map(|(name, value)| (Cow::Borrowed(name.as_str()), value))
            .collect();
        self.check_field_set(
            declared.iter().map(|(name, c)| (Cow::Borrowed(name), c)),
            &view,
        )
    }

    /// Check the visible class attributes of `object`'s kind.
    pub fn verify_class_attributes(&self, schema: &Schema, object: &dyn Reflect) -> bool {
        let Some(declared) = schema.class_attributes() else {
            return true;
        };
        let attrs = class_attributes(object, &self.prefix);
        if attrs.len() > declared.len() {
            tracing::debug!(
                found = attrs.len(),
                declared = declared.len(),
                "undeclared class attributes"
            );
            return false;
        }

        for (name, constraint) in declared.iter() {
            let Some(attr) = attrs.get(name) else {
                return reject(name, "class attribute missing");
            };
            let ok = match attr {
                ClassAttribute::Computed(accessor) => {
                    let resolved = accessor.resolve(object);
                    self.check_singleton(COMPUTED_FIELD, constraint, &resolved)
                }
                ClassAttribute::Stored(value) => self.check_stored_attribute(name, constraint, value),
            };
            if !ok {
                tracing::trace!(attribute = name, "class attribute failed");
                return false;
            }
        }
        true
    }

    fn check_stored_attribute(&self, name: &str, constraint: &Constraint, value: &Value) -> bool {
        match constraint {
            Constraint::Any => true,
            Constraint::ExactType(kind) => {
                value.kind() == *kind || reject(name, "class attribute kind mismatch")
            }
            // Only the class half applies, so a fields-only schema passes.
            Constraint::NestedSchema(schema) => match value.as_object() {
                Some(object) => self.verify_class_attributes(schema, object),
                None => reject(name, "class attribute is not an object"),
            },
            Constraint::NumberRange(_)
            | Constraint::IntRange(_)
            | Constraint::FloatRange(_)
            | Constraint::BoundedCollection(_)
            | Constraint::BoundedString(_)
            | Constraint::PositionalSequence(_) => {
                reject(name, "stored class attributes only match kinds")
            }
        }
    }

    /// Arity check, then presence and dispatch per declared name.
    fn check_field_set<'c, I>(&self, declared: I, props: &FieldView<'_>) -> bool
    where
        I: ExactSizeIterator<Item = (Cow<'c, str>, &'c Constraint)>,
    {
        if props.len() > declared.len() {
            tracing::debug!(
                found = props.len(),
                declared = declared.len(),
                "undeclared fields"
            );
            return false;
        }

        for (name, constraint) in declared {
            let Some(value) = props.get(&*name) else {
                return reject(&name, "field missing");
            };
            if !self.check_value(&name, constraint, value) {
                tracing::trace!(
                    field = &*name,
                    constraint = constraint.variant_name(),
                    "field failed"
                );
                return false;
            }
        }
        true
    }

    /// Re-enter the field phase with a one-field view.
    fn check_singleton(&self, name: &str, constraint: &Constraint, value: &Value) -> bool {
        let view = FieldView::from([(Cow::Borrowed(name), value)]);
        self.check_field_set(std::iter::once((Cow::Borrowed(name), constraint)), &view)
    }

    fn check_value(&self, name: &str, constraint: &Constraint, value: &Value) -> bool {
        match constraint {
            Constraint::Any => true,
            Constraint::ExactType(kind) => {
                value.kind() == *kind || reject(name, "kind mismatch")
            }
            Constraint::NumberRange(range) => match value.as_number() {
                Some(n) => check_range(name, range, n),
                None => reject(name, "not a number"),
            },
            Constraint::IntRange(range) => match value {
                Value::Int(i) => check_range(name, range, Number::Int(*i)),
                _ => reject(name, "not an int"),
            },
            Constraint::FloatRange(range) => match value {
                Value::Float(f) => check_range(name, range, Number::Float(*f)),
                _ => reject(name, "not a float"),
            },
            Constraint::BoundedString(bounds) => check_string(name, bounds, value),
            Constraint::BoundedCollection(bounds) => self.check_collection(name, bounds, value),
            Constraint::NestedSchema(schema) => match value.as_object() {
                Some(object) => self.verify_fields(schema, object),
                None => reject(name, "not an object"),
            },
            Constraint::PositionalSequence(elements) => {
                let Some(items) = value.as_list() else {
                    return reject(name, "not a list");
                };
                let view: FieldView<'_> = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| (Cow::Owned(i.to_string()), item))
                    .collect();
                let declared = elements
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (Cow::Owned(i.to_string()), c));
                self.check_field_set(declared, &view) || reject(name, "sequence mismatch")
            }
        }
    }

    fn check_collection(&self, name: &str, bounds: &CollectionBounds, value: &Value) -> bool {
        let Some(len) = value.length() else {
            return reject(name, "value has no length");
        };
        if !bounds.length_ok(len) {
            return reject(name, "length out of bounds");
        }
        let Some(element) = bounds.element.as_deref() else {
            return true;
        };

        match value {
            Value::List(items) => items
                .iter()
                .all(|item| self.check_singleton(ELEMENT_FIELD, element, item)),
            Value::Str(s) => s
                .chars()
                .all(|ch| self.check_singleton(ELEMENT_FIELD, element, &Value::Str(ch.to_string()))),
            _ => reject(name, "value is not iterable"),
        }
    }
}

fn check_range(name: &str, range: &Range, n: Number) -> bool {
    range.contains(n) || reject(name, "number out of range")
}

fn check_string(name: &str, bounds: &StringBounds, value: &Value) -> bool {
    let Some(text) = value.as_str() else {
        return reject(name, "not a string");
    };
    if !bounds.substring_ok(text) {
        return reject(name, "no required substring");
    }
    bounds.length_ok(text.chars().count()) || reject(name, "length out of bounds")
}

/// Check instance fields with the default verifier.
pub fn verify_fields(schema: &Schema, object: &dyn Reflect) -> bool {
    Verifier::default().verify_fields(schema, object)
}

/// Check class attributes with the default verifier.
pub fn verify_class_attributes(schema: &Schema, object: &dyn Reflect) -> bool {
    Verifier::default().verify_class_attributes(schema, object)
}

/// Check fields and class attributes with the default verifier.
pub fn verify(schema: &Schema, object: &dyn Reflect) -> bool {
    Verifier::default().verify(schema, object)
}
