//! Shared fixtures for the cross-crate integration tests.
//!
//! [`Person`] is an application struct that opts into validation by
//! implementing [`Reflect`] by hand, the way a host type would.

#![allow(dead_code)]

use std::sync::OnceLock;

use objverify_core::{record, FieldMap, Kind, RecordType, Reflect, Value};
use objverify_schema::{Constraint, Range, Schema, StringBounds};

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The `Person` kind: one public method plus a reserved constructor.
pub fn person_type() -> RecordType {
    static PERSON: OnceLock<RecordType> = OnceLock::new();
    PERSON
        .get_or_init(|| {
            RecordType::builder("Person")
                .method("__init__", |_| Value::Null)
                .method("say_hello", |args| match args.first() {
                    Some(Value::Str(name)) => Value::Str(format!("Hello! My name is {name}.")),
                    _ => Value::Null,
                })
                .build()
        })
        .clone()
}

/// A person with a nested stats object and a derived positional array.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub dob: String,
    greetings: u32,
}

impl Person {
    pub fn new(name: &str, age: i64, dob: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            dob: dob.to_string(),
            greetings: 0,
        }
    }
}

impl Reflect for Person {
    fn record_type(&self) -> RecordType {
        person_type()
    }

    fn fields(&self) -> FieldMap {
        let prefix: String = self.name.chars().take(3).collect();
        let mut fields = FieldMap::new();
        fields.insert("name".into(), self.name.clone().into());
        fields.insert("age".into(), self.age.into());
        fields.insert("stats".into(), record! { "DOB" => self.dob.as_str() }.into());
        fields.insert(
            "array".into(),
            Value::List(vec![
                Value::Float(self.age as f64 - 0.35),
                Value::Str(prefix),
                Value::Bool(true),
            ]),
        );
        fields.insert("_greetings".into(), i64::from(self.greetings).into());
        fields
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(self.name.clone().into()),
            "age" => Some(self.age.into()),
            "_greetings" => Some(i64::from(self.greetings).into()),
            _ => self.fields().remove(name),
        }
    }
}

/// Schema every valid [`Person`] satisfies.
pub fn person_schema() -> Schema {
    Schema::builder()
        .field("name", StringBounds::new().max_len(12))
        .field("age", Constraint::IntRange(Range::between(20, 100)))
        .field(
            "stats",
            Constraint::nested([(
                "DOB",
                StringBounds::new().min_len(6).max_len(8).contains_any(["/"]),
            )]),
        )
        .field(
            "array",
            Constraint::sequence([
                Constraint::FloatRange(Range::between(19.65, 99.65)),
                StringBounds::new().max_len(3).into(),
                Kind::Bool.into(),
            ]),
        )
        .class_attribute("say_hello", Kind::Callable)
        .build()
}
