//! # Constraint Model
//!
//! A closed set of constraint variants. Each variant carries its own
//! parameters and nothing else; all behavior lives in the engine
//! ([`crate::verify`]), which matches on [`Constraint`] exhaustively.
//!
//! ## Length semantics
//!
//! Lengths are inclusive on both ends. `min_len` defaults to zero and
//! always applies; an absent `max_len` means unbounded.

use objverify_core::{Kind, Number, RecordType};

use crate::schema::{ConstraintMap, Schema};

/// A single expectation about a value.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Matches every value.
    Any,
    /// The value's kind must equal this kind exactly; derived kinds fail.
    ExactType(Kind),
    /// Any `Int` or `Float` inside the range.
    NumberRange(Range),
    /// An `Int` inside the range.
    IntRange(Range),
    /// A `Float` inside the range.
    FloatRange(Range),
    /// A sized value (list or string) within length bounds, optionally with
    /// a constraint every element must satisfy.
    BoundedCollection(CollectionBounds),
    /// A string within length bounds, optionally containing one of a set of
    /// substrings.
    BoundedString(StringBounds),
    /// An object satisfying the field constraints of a sub-schema.
    NestedSchema(Schema),
    /// A list whose element `i` satisfies constraint `i`. Lengths must be
    /// equal.
    PositionalSequence(Vec<Constraint>),
}

impl Constraint {
    /// Exact-kind constraint.
    pub fn exact(kind: Kind) -> Self {
        Constraint::ExactType(kind)
    }

    /// A nested mapping of field constraints, wrapped into a fields-only
    /// sub-schema.
    pub fn nested<K, C>(fields: impl IntoIterator<Item = (K, C)>) -> Self
    where
        K: Into<String>,
        C: Into<Constraint>,
    {
        Constraint::NestedSchema(Schema::new(Some(fields.into_iter().collect()), None))
    }

    /// Positional list constraint.
    pub fn sequence<C: Into<Constraint>>(elements: impl IntoIterator<Item = C>) -> Self {
        Constraint::PositionalSequence(elements.into_iter().map(Into::into).collect())
    }

    /// Variant name, used in log output.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Constraint::Any => "Any",
            Constraint::ExactType(_) => "ExactType",
            Constraint::NumberRange(_) => "NumberRange",
            Constraint::IntRange(_) => "IntRange",
            Constraint::FloatRange(_) => "FloatRange",
            Constraint::BoundedCollection(_) => "BoundedCollection",
            Constraint::BoundedString(_) => "BoundedString",
            Constraint::NestedSchema(_) => "NestedSchema",
            Constraint::PositionalSequence(_) => "PositionalSequence",
        }
    }
}

impl From<Kind> for Constraint {
    fn from(kind: Kind) -> Self {
        Constraint::ExactType(kind)
    }
}

impl From<RecordType> for Constraint {
    fn from(ty: RecordType) -> Self {
        Constraint::ExactType(Kind::Record(ty))
    }
}

impl From<Schema> for Constraint {
    fn from(schema: Schema) -> Self {
        Constraint::NestedSchema(schema)
    }
}

impl From<ConstraintMap> for Constraint {
    fn from(fields: ConstraintMap) -> Self {
        Constraint::NestedSchema(Schema::new(Some(fields), None))
    }
}

impl From<StringBounds> for Constraint {
    fn from(bounds: StringBounds) -> Self {
        Constraint::BoundedString(bounds)
    }
}

impl From<CollectionBounds> for Constraint {
    fn from(bounds: CollectionBounds) -> Self {
        Constraint::BoundedCollection(bounds)
    }
}

// ---------------------------------------------------------------------------
// Numeric ranges
// ---------------------------------------------------------------------------

/// Inclusive numeric bounds. An absent bound is unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Range {
    /// Smallest accepted value.
    pub low: Option<Number>,
    /// Largest accepted value.
    pub high: Option<Number>,
}

impl Range {
    /// No bounds at all; only the kind is checked.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// `low <= value <= high`.
    pub fn between(low: impl Into<Number>, high: impl Into<Number>) -> Self {
        Self {
            low: Some(low.into()),
            high: Some(high.into()),
        }
    }

    /// `low <= value`.
    pub fn at_least(low: impl Into<Number>) -> Self {
        Self {
            low: Some(low.into()),
            high: None,
        }
    }

    /// `value <= high`.
    pub fn at_most(high: impl Into<Number>) -> Self {
        Self {
            low: None,
            high: Some(high.into()),
        }
    }

    /// Returns true unless `value` is strictly below `low` or strictly
    /// above `high`. NaN is never outside a bound.
    pub fn contains(&self, value: Number) -> bool {
        let below = self.low.is_some_and(|low| value < low);
        let above = self.high.is_some_and(|high| value > high);
        !below && !above
    }
}

// ---------------------------------------------------------------------------
// Length bounds
// ---------------------------------------------------------------------------

fn length_within(len: usize, min_len: usize, max_len: Option<usize>) -> bool {
    len >= min_len && max_len.map_or(true, |max| len <= max)
}

/// Length bounds for strings, with an optional substring requirement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StringBounds {
    /// Minimum length in characters.
    pub min_len: usize,
    /// Maximum length in characters.
    pub max_len: Option<usize>,
    /// When set, at least one of these must occur in the value. An empty
    /// set can never be satisfied.
    pub contains_any: Option<Vec<String>>,
}

impl StringBounds {
    /// Any string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum length.
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set the maximum length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Require at least one of `needles` as a substring.
    pub fn contains_any<S: Into<String>>(mut self, needles: impl IntoIterator<Item = S>) -> Self {
        self.contains_any = Some(needles.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if `len` characters is within bounds.
    pub fn length_ok(&self, len: usize) -> bool {
        length_within(len, self.min_len, self.max_len)
    }

    /// Returns true if the substring requirement is absent or met.
    pub fn substring_ok(&self, text: &str) -> bool {
        match &self.contains_any {
            Some(needles) => needles.iter().any(|needle| text.contains(needle.as_str())),
            None => true,
        }
    }
}

/// Length bounds for sized values, with an optional element constraint.
#[derive(Debug, Clone, Default)]
pub struct CollectionBounds {
    /// Minimum number of elements.
    pub min_len: usize,
    /// Maximum number of elements.
    pub max_len: Option<usize>,
    /// Constraint applied to every element.
    pub element: Option<Box<Constraint>>,
}

impl CollectionBounds {
    /// Any sized value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum length.
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Set the maximum length.
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Require every element to satisfy `element`.
    pub fn elements(mut self, element: impl Into<Constraint>) -> Self {
        self.element = Some(Box::new(element.into()));
        self
    }

    /// Returns true if `len` elements is within bounds.
    pub fn length_ok(&self, len: usize) -> bool {
        length_within(len, self.min_len, self.max_len)
    }
}
