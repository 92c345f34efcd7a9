//! Purpose: Lock the public `Document` contract with end-to-end property checks.
//! Exports: Integration tests only (no runtime exports).
//! Role: Exercise the library through `dyndoc::api` the way callers do.
//! Invariants: Null writes never leave a stored null; parse/serialize round-trips.
//! Invariants: Accessor failures carry the documented error kinds.

use dyndoc::api::{Document, DocumentType, Error, ErrorKind};
use serde_json::{Value, json};

#[derive(Debug, Default)]
struct Address(Document);

impl DocumentType for Address {
    const TYPE_NAME: &'static str = "Address";

    fn construct() -> Result<Self, Error> {
        Ok(Self::default())
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.0
    }
}

struct NoDefault(Document);

impl DocumentType for NoDefault {
    const TYPE_NAME: &'static str = "NoDefault";

    fn construct() -> Result<Self, Error> {
        Err(Error::new(ErrorKind::Construction).with_message("NoDefault needs arguments"))
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.0
    }
}

#[test]
fn appended_values_read_back_equal() {
    let values = [
        json!("text"),
        json!(12),
        json!(-3.5),
        json!(true),
        json!([1, "two", null]),
        json!({"nested": {"deep": [false]}}),
    ];
    let mut document = Document::new();
    for (idx, value) in values.iter().enumerate() {
        let key = format!("k{idx}");
        document.append(key.as_str(), value.clone());
        assert_eq!(document.get(&key), Some(value));
    }
    assert_eq!(document.len(), values.len());

    document.append("k0", Value::Null).append("never-set", Value::Null);
    assert!(!document.contains_key("k0"));
    assert!(!document.contains_key("never-set"));
    assert_eq!(document.len(), values.len() - 1);
}

#[test]
fn serialization_round_trips() {
    let mut document = Document::with_entry("name", "doc");
    document
        .append("count", 3)
        .append("ratio", 0.25)
        .append("tags", vec!["a", "b"])
        .append("inner", Document::with_entry("ok", true));

    let text = document.to_json().expect("serialize");
    let reparsed = Document::parse(&text).expect("parse");
    assert_eq!(reparsed, document);
    let keys: Vec<&str> = reparsed.keys().collect();
    assert_eq!(keys, ["name", "count", "ratio", "tags", "inner"]);
}

#[test]
fn integer_access_coerces_numeric_strings() {
    let document = Document::parse(r#"{"int":"42","float":"3.14","word":"abc"}"#).expect("parse");
    assert_eq!(document.get_i32("int").expect("int"), Some(42));

    let err = document.get_i32("float").expect_err("fraction as integer");
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    let double = document.get_f64("float").expect("double").expect("present");
    assert_eq!(double.to_string(), "3.14");

    let err = document.get_i32("word").expect_err("not numeric");
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(err.key(), Some("word"));
}

#[test]
fn list_defaults_and_null_defaults() {
    let document = Document::new();
    let default = vec![1_i64, 2];
    assert_eq!(
        document.get_list_or("absent", default.clone()).expect("default"),
        default
    );
    let err = document
        .get_list_value_or("absent", Value::Null)
        .expect_err("null default");
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn nested_objects_materialize_as_typed_views() {
    let document = Document::parse(r#"{"address":{"city":"X"}}"#).expect("parse");
    let address: Address = document
        .get_object("address")
        .expect("materialize")
        .expect("present");
    assert_eq!(address.0.get_string("city").as_deref(), Some("X"));
}

#[test]
fn failed_construction_is_reported() {
    let document = Document::parse(r#"{"items":[{"a":1}]}"#).expect("parse");
    let err = document
        .get_documents::<NoDefault>("items")
        .err()
        .expect("construction error");
    assert_eq!(err.kind(), ErrorKind::Construction);
    assert_eq!(err.message(), Some("NoDefault needs arguments"));
}

#[test]
fn append_all_with_null_removes_key() {
    let mut document = Document::parse(r#"{"a":1,"b":[1,2,3]}"#).expect("parse");
    document.append_all([("b", Value::Null)]);
    assert_eq!(document.to_json().expect("serialize"), r#"{"a":1}"#);

    document.append_all(Vec::<(String, Value)>::new());
    assert_eq!(document.len(), 1);
}

#[test]
fn single_scalar_is_promoted_to_list() {
    let document = Document::parse(r#"{"tags":"x"}"#).expect("parse");
    assert_eq!(
        document.get_list::<String>("tags").expect("list"),
        Some(vec!["x".to_string()])
    );
}

#[test]
fn malformed_text_is_a_decode_error() {
    let err = Document::parse(r#"{"a":"#).expect_err("truncated");
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert!(std::error::Error::source(&err).is_some());

    let err: Error = "42".parse::<Document>().expect_err("scalar top level");
    assert_eq!(err.kind(), ErrorKind::Decode);
}
