//! End-to-end: a hand-reflected application struct checked against a
//! schema with nested, positional, ranged, and class-level constraints.

mod common;

use common::{init_tracing, person_schema, person_type, Person};
use objverify_core::{record, Kind, Record, RecordType, Reflect, Value};
use objverify_schema::{
    verify, verify_class_attributes, verify_fields, Constraint, Range, Schema, StringBounds,
    Verifier, VerifierConfig,
};

#[test]
fn valid_person_passes() {
    init_tracing();
    let person = Person::new("John Smith", 23, "1/12/22");
    assert!(verify(&person_schema(), &person));
    assert!(person_schema().verify(&person));
}

#[test]
fn age_above_range_fails() {
    init_tracing();
    let person = Person::new("John Smith", 101, "1/12/22");
    assert!(!verify(&person_schema(), &person));
    assert!(!verify_fields(&person_schema(), &person));
    assert!(verify_class_attributes(&person_schema(), &person));
}

#[test]
fn dob_without_slash_fails() {
    init_tracing();
    let person = Person::new("John Smith", 23, "19990101");
    assert!(!verify(&person_schema(), &person));
}

#[test]
fn name_too_long_fails() {
    let person = Person::new("Johnathan Smithers", 23, "1/12/22");
    assert!(!verify(&person_schema(), &person));
}

#[test]
fn age_boundaries_are_inclusive() {
    // Age 20 puts array[0] at 19.65, the low edge of the float range.
    assert!(verify(&person_schema(), &Person::new("Ann", 20, "1/12/22")));
    // Age 100 is in range for the field but pushes array[0] to 99.65.
    assert!(verify(&person_schema(), &Person::new("Ann", 100, "1/12/22")));
    assert!(!verify(&person_schema(), &Person::new("Ann", 19, "1/12/22")));
}

#[test]
fn reserved_field_is_invisible_until_prefix_changes() {
    let person = Person::new("John Smith", 23, "1/12/22");
    assert_eq!(person.fields().len(), 5);

    let no_reserved = Verifier::new(VerifierConfig {
        reserved_prefix: String::new(),
        ..VerifierConfig::default()
    });
    // `_greetings` becomes an undeclared field and `__init__` an undeclared
    // class attribute.
    assert!(!no_reserved.verify_fields(&person_schema(), &person));
    assert!(!no_reserved.verify_class_attributes(&person_schema(), &person));
}

#[test]
fn missing_method_fails_class_phase() {
    let bare_kind = RecordType::builder("Person").build();
    let impostor = Record::with_type(
        bare_kind,
        [
            ("name", Value::from("John Smith")),
            ("age", Value::from(23)),
            ("stats", record! { "DOB" => "1/12/22" }.into_value()),
            (
                "array",
                Value::List(vec![Value::from(22.65), Value::from("Joh"), Value::from(true)]),
            ),
        ],
    );
    assert!(verify_fields(&person_schema(), &impostor));
    assert!(!verify_class_attributes(&person_schema(), &impostor));
    assert!(!verify(&person_schema(), &impostor));
}

#[test]
fn method_with_wrong_kind_fails() {
    let kind = RecordType::builder("Person").stored("say_hello", "hello").build();
    let obj = Record::with_type(kind, Vec::<(String, Value)>::new());
    let schema = Schema::builder().class_attribute("say_hello", Kind::Callable).build();
    assert!(!verify_class_attributes(&schema, &obj));
}

#[test]
fn json_fixture_matches_struct_fixture() {
    let json = serde_json::json!({
        "name": "John Smith",
        "age": 23,
        "stats": { "DOB": "1/12/22" },
        "array": [22.65, "Joh", true],
    });
    let from_json = Record::from_json(json).unwrap();
    // Generic records carry no class attributes, so only the field phase
    // can pass.
    assert!(verify_fields(&person_schema(), &from_json));
    assert!(!verify_class_attributes(&person_schema(), &from_json));

    let typed = Record::with_type(person_type(), from_json.fields());
    assert!(verify(&person_schema(), &typed));
}

#[test]
fn fewer_fields_than_schema_fail_on_presence() {
    let partial = record! { "name" => "John Smith", "age" => 23 };
    assert!(!verify_fields(&person_schema(), &partial));
}

#[test]
fn schemas_are_shared_across_threads() {
    let schema = person_schema();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || {
                let ok = Person::new("John Smith", 23 + i, "1/12/22");
                let bad = Person::new("John Smith", 200 + i, "1/12/22");
                verify(&schema, &ok) && !verify(&schema, &bad)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn deeply_nested_schemas_compose() {
    let leaf = Schema::builder()
        .field("value", Constraint::NumberRange(Range::at_least(0)))
        .build();
    let mid = Schema::builder().field("leaf", leaf).build();
    let root = Schema::builder()
        .field("mid", mid)
        .field("tags", Constraint::sequence([StringBounds::new().min_len(1)]))
        .build();

    let good = Record::from_json(serde_json::json!({
        "mid": { "leaf": { "value": 0.5 } },
        "tags": ["x"],
    }))
    .unwrap();
    let bad = Record::from_json(serde_json::json!({
        "mid": { "leaf": { "value": -1 } },
        "tags": ["x"],
    }))
    .unwrap();
    assert!(verify(&root, &good));
    assert!(!verify(&root, &bad));
}

#[test]
fn direct_field_lookup_agrees_with_reflected_map() {
    let person = Person::new("John Smith", 23, "1/12/22");
    let fields = person.fields();
    for name in ["name", "age", "_greetings", "stats", "array"] {
        let direct = person.field(name).map(|v| v.to_string());
        assert_eq!(direct, fields.get(name).map(|v| v.to_string()), "{name}");
    }
    assert!(person.field("missing").is_none());
}
