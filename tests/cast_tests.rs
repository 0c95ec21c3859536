use aqb::{cast, obj, value, AqlError, AqlValue, Collection, Expr, ToAql};
use serde_json::json;

#[test]
fn test_cast_is_idempotent_on_nodes() {
    let node = value(42).unwrap();
    assert_eq!(cast(&node).unwrap(), node);

    let node = value("doc.attr").unwrap();
    assert_eq!(cast(node.clone()).unwrap(), node);
}

#[test]
fn test_cast_null() {
    assert_eq!(value(serde_json::Value::Null).unwrap(), Expr::Null);
    assert_eq!(value(serde_json::Value::Null).unwrap().to_aql(), "null");
}

#[test]
fn test_cast_booleans() {
    assert_eq!(value(true).unwrap().to_aql(), "true");
    assert_eq!(value(false).unwrap().to_aql(), "false");
}

#[test]
fn test_cast_numbers() {
    assert_eq!(value(42).unwrap(), Expr::Integer(42));
    assert_eq!(value(-7i64).unwrap().to_aql(), "-7");
    assert_eq!(value(2.0).unwrap(), Expr::Integer(2));
    assert_eq!(value(1.5).unwrap(), Expr::Float(1.5));
    assert_eq!(value(1.5).unwrap().to_aql(), "1.5");
}

#[test]
fn test_cast_rejects_non_finite_numbers() {
    assert!(matches!(
        value(f64::NAN),
        Err(AqlError::MalformedLiteral(_))
    ));
    assert!(matches!(
        value(f64::NEG_INFINITY),
        Err(AqlError::MalformedLiteral(_))
    ));
}

#[test]
fn test_cast_numeric_strings() {
    assert_eq!(value("42").unwrap(), Expr::Integer(42));
    assert_eq!(value("+7").unwrap(), Expr::Integer(7));
    assert_eq!(value("-3.25").unwrap(), Expr::Float(-3.25));
}

#[test]
fn test_cast_quoted_strings() {
    assert_eq!(value("\"hello\"").unwrap(), Expr::String("hello".to_string()));
    assert_eq!(value("\"hello\"").unwrap().to_aql(), "\"hello\"");
    // Date-like values arrive as JSON strings and stay string literals.
    assert_eq!(
        value("\"2016-01-01T00:00:00.000Z\"").unwrap().to_aql(),
        "\"2016-01-01T00:00:00.000Z\""
    );
}

#[test]
fn test_cast_range_strings() {
    assert_eq!(value("1..3").unwrap().to_aql(), "1..3");
    assert_eq!(value("0..100").unwrap().to_aql(), "0..100");
}

#[test]
fn test_cast_identifier_strings() {
    assert_eq!(value("x").unwrap(), Expr::Identifier("x".to_string()));
    assert_eq!(value("@bindVar").unwrap().to_aql(), "@bindVar");
    assert_eq!(value("@@collection").unwrap().to_aql(), "@@collection");
}

#[test]
fn test_cast_reference_strings() {
    assert_eq!(value("a.b").unwrap(), Expr::Reference("a.b".to_string()));
    assert_eq!(value("a.b[*]").unwrap().to_aql(), "a.b[*]");
}

#[test]
fn test_cast_rejects_malformed_strings() {
    for malformed in ["", "-x", "a..b", "a.b..c", "bad.1", "bad[1]", "also bad"] {
        assert!(
            matches!(value(malformed), Err(AqlError::MalformedToken(_))),
            "expected {:?} to be rejected",
            malformed
        );
    }
}

#[test]
fn test_cast_arrays() {
    assert_eq!(value(vec![1, 2, 3]).unwrap().to_aql(), "[1, 2, 3]");
    assert_eq!(
        value(json!([null, true, "x"])).unwrap().to_aql(),
        "[null, true, x]"
    );
    let nested: Vec<Vec<i64>> = vec![vec![1], vec![2, 3]];
    assert_eq!(value(nested).unwrap().to_aql(), "[[1], [2, 3]]");
}

#[test]
fn test_cast_objects() {
    // JSON maps serialize with deterministic key order.
    assert_eq!(
        value(json!({"b": 2, "a": 1})).unwrap().to_aql(),
        "{a: 1, b: 2}"
    );
    // Explicit pair lists keep caller order.
    assert_eq!(
        obj(vec![("b", 2), ("a", 1)]).unwrap().to_aql(),
        "{b: 2, a: 1}"
    );
}

#[test]
fn test_object_key_quoting() {
    assert_eq!(obj(vec![("a b", 1)]).unwrap().to_aql(), "{\"a b\": 1}");
    assert_eq!(obj(vec![("1", 1)]).unwrap().to_aql(), "{1: 1}");
    assert_eq!(obj(vec![("042", 1)]).unwrap().to_aql(), "{\"042\": 1}");
}

#[test]
fn test_object_dynamic_keys() {
    assert_eq!(
        obj(vec![(":dynamicName", "x")]).unwrap().to_aql(),
        "{[dynamicName]: x}"
    );
    assert!(matches!(
        obj(vec![(":not valid", "x")]),
        Err(AqlError::MalformedToken(_))
    ));
}

struct UsersCollection;

impl Collection for UsersCollection {
    fn name(&self) -> &str {
        "users"
    }
}

#[test]
fn test_cast_collection_handles() {
    let expr = value(AqlValue::collection(&UsersCollection)).unwrap();
    assert_eq!(expr, Expr::Identifier("users".to_string()));
    assert_eq!(expr.to_aql(), "users");
}

#[test]
fn test_object_values_are_normalized() {
    let expr = obj(vec![
        ("active", AqlValue::from(true)),
        ("name", "doc.name".into()),
    ])
    .unwrap();
    assert_eq!(expr.to_aql(), "{active: true, name: doc.name}");
}
