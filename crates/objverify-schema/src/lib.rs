//! # objverify-schema — Structural Schema Validation
//!
//! Answers one question: does this object have the shape the schema
//! describes? The answer is a plain `bool`; there are no diagnostics, no
//! partial results, and the object is never modified.
//!
//! ## Building schemas (`constraint`, `schema`)
//!
//! A [`Schema`] holds optional instance-field constraints and optional
//! class-attribute constraints. Each constraint is one variant of the closed
//! [`Constraint`] enum: exact kinds, numeric ranges, length-bounded strings
//! and collections, nested schemas, and positional sequences.
//!
//! ```
//! use objverify_core::{record, Kind, RecordType, Record, Value};
//! use objverify_schema::{Constraint, Range, Schema, StringBounds};
//!
//! let person_t = Schema::builder()
//!     .field("name", StringBounds::new().max_len(12))
//!     .field("age", Constraint::IntRange(Range::between(20, 100)))
//!     .field(
//!         "stats",
//!         Constraint::nested([(
//!             "DOB",
//!             StringBounds::new().min_len(6).max_len(8).contains_any(["/"]),
//!         )]),
//!     )
//!     .class_attribute("say_hello", Kind::Callable)
//!     .build();
//!
//! let person_kind = RecordType::builder("Person")
//!     .method("say_hello", |_| Value::Null)
//!     .build();
//! let person = Record::with_type(person_kind, [
//!     ("name", Value::from("John Smith")),
//!     ("age", Value::from(23)),
//!     ("stats", record! { "DOB" => "1/12/22" }.into_value()),
//! ]);
//!
//! assert!(person_t.verify(&person));
//! ```
//!
//! ## Verifying (`verify`)
//!
//! [`Verifier`] runs the field phase and then the class phase. The free
//! functions [`verify_fields`], [`verify_class_attributes`] and [`verify`]
//! use a default verifier; build one from a [`VerifierConfig`] to change the
//! reserved-name prefix.
//!
//! ## Crate Policy
//!
//! - Depends only on `objverify-core` internally.
//! - Schemas are immutable and hold no reference to validated objects, so
//!   concurrent verification against one schema is safe.
//! - Every rejection emits a `tracing` event at `trace` or `debug` level
//!   naming the field and the reason.

pub mod config;
pub mod constraint;
pub mod error;
pub mod schema;
pub mod verify;

pub use config::VerifierConfig;
pub use constraint::{CollectionBounds, Constraint, Range, StringBounds};
pub use error::{ConfigError, SchemaError};
pub use schema::{ConstraintMap, Schema, SchemaBuilder};
pub use verify::{verify, verify_class_attributes, verify_fields, Verifier};
