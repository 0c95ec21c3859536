//! Host value normalization.
//!
//! [`AqlValue`] is the closed set of host values the builder accepts:
//! JSON data, lists and key/value pair lists of further values, existing
//! expression or statement nodes, and collection handles. [`cast`] turns
//! any of them into an [`Expr`], recursively normalizing nested
//! structure. Casting an existing node is the identity.
//!
//! Bare strings are sniffed in a fixed order: numeric literal, quoted
//! string, range, bare identifier, and finally dotted path reference. A
//! string that fits none of these fails with a malformed-token error.
//! Values that must stay string literals should be built with
//! [`crate::str_`] or passed in quoted form.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as Json;

use crate::ast::expressions::IDENTIFIER_RE;
use crate::ast::{Expr, Statement};
use crate::error::AqlError;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?[0-9]+(\.[0-9]+)?$").expect("number pattern"));

static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.\.([0-9]+)$").expect("range pattern"));

/// A handle that names the collection it refers to.
///
/// Any such value normalizes to an identifier rather than a generic
/// mapping, so driver-level collection objects can be passed directly
/// wherever a collection or variable name is expected.
pub trait Collection {
    fn name(&self) -> &str;
}

/// A host value prior to normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum AqlValue {
    /// Any JSON value (null, boolean, number, string, array, object)
    Json(Json),
    /// A float, kept apart from JSON numbers so non-finite input can be
    /// rejected with a proper error instead of being unrepresentable
    Float(f64),
    /// A list that may mix plain values and nodes
    List(Vec<AqlValue>),
    /// An ordered key/value pair list that may hold nodes as values
    Pairs(Vec<(String, AqlValue)>),
    /// An already-normalized expression node
    Node(Expr),
    /// A statement chain, usable in expression position as a subquery
    Chain(Statement),
    /// The name extracted from a [`Collection`] handle
    Collection(String),
}

impl AqlValue {
    /// Wrap a collection handle.
    pub fn collection<C: Collection + ?Sized>(collection: &C) -> AqlValue {
        AqlValue::Collection(collection.name().to_string())
    }

    /// Build an ordered object value from key/value pairs.
    pub fn object<K, V, I>(pairs: I) -> AqlValue
    where
        K: Into<String>,
        V: Into<AqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        AqlValue::Pairs(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<Json> for AqlValue {
    fn from(value: Json) -> Self {
        AqlValue::Json(value)
    }
}

impl From<bool> for AqlValue {
    fn from(value: bool) -> Self {
        AqlValue::Json(Json::Bool(value))
    }
}

impl From<i32> for AqlValue {
    fn from(value: i32) -> Self {
        AqlValue::Json(Json::from(value))
    }
}

impl From<i64> for AqlValue {
    fn from(value: i64) -> Self {
        AqlValue::Json(Json::from(value))
    }
}

impl From<u64> for AqlValue {
    fn from(value: u64) -> Self {
        AqlValue::Json(Json::from(value))
    }
}

impl From<f64> for AqlValue {
    fn from(value: f64) -> Self {
        AqlValue::Float(value)
    }
}

impl From<&str> for AqlValue {
    fn from(value: &str) -> Self {
        AqlValue::Json(Json::String(value.to_string()))
    }
}

impl From<String> for AqlValue {
    fn from(value: String) -> Self {
        AqlValue::Json(Json::String(value))
    }
}

impl From<Expr> for AqlValue {
    fn from(value: Expr) -> Self {
        AqlValue::Node(value)
    }
}

impl From<&Expr> for AqlValue {
    fn from(value: &Expr) -> Self {
        AqlValue::Node(value.clone())
    }
}

impl From<Statement> for AqlValue {
    fn from(value: Statement) -> Self {
        AqlValue::Chain(value)
    }
}

impl From<&Statement> for AqlValue {
    fn from(value: &Statement) -> Self {
        AqlValue::Chain(value.clone())
    }
}

impl<T: Into<AqlValue>> From<Vec<T>> for AqlValue {
    fn from(values: Vec<T>) -> Self {
        AqlValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Normalize a host value into an expression node.
///
/// Idempotent on node input: an [`Expr`] passes through unchanged, and a
/// statement chain is carried as a subquery with its content untouched.
pub fn cast(value: impl Into<AqlValue>) -> Result<Expr, AqlError> {
    cast_value(value.into())
}

pub(crate) fn cast_value(value: AqlValue) -> Result<Expr, AqlError> {
    match value {
        AqlValue::Node(expr) => Ok(expr),
        AqlValue::Chain(statement) => Ok(Expr::Subquery(Box::new(statement))),
        AqlValue::Collection(name) => Expr::identifier(&name),
        AqlValue::Float(value) => number_expr(value),
        AqlValue::List(items) => Ok(Expr::Array(
            items
                .into_iter()
                .map(cast_value)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        AqlValue::Pairs(pairs) => Expr::object_from_pairs(pairs),
        AqlValue::Json(json) => cast_json(json),
    }
}

fn cast_json(json: Json) -> Result<Expr, AqlError> {
    match json {
        Json::Null => Ok(Expr::Null),
        Json::Bool(value) => Ok(Expr::Boolean(value)),
        Json::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(Expr::Integer(int));
            }
            let float = number.as_f64().ok_or_else(|| {
                AqlError::MalformedLiteral(format!("Expected value to be a finite number: {}", number))
            })?;
            number_expr(float)
        }
        Json::String(value) => cast_string(&value),
        Json::Array(items) => Ok(Expr::Array(
            items
                .into_iter()
                .map(cast_json)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Json::Object(map) => Expr::object_from_pairs(
            map.into_iter()
                .map(|(key, value)| (key, AqlValue::Json(value)))
                .collect(),
        ),
    }
}

/// Cast a number the way the builder does everywhere: exactly integral
/// values become integer literals, the rest stay floats.
pub(crate) fn number_expr(value: f64) -> Result<Expr, AqlError> {
    if !value.is_finite() {
        return Err(AqlError::MalformedLiteral(format!(
            "Expected value to be a finite number: {}",
            value
        )));
    }
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Ok(Expr::Integer(value as i64))
    } else {
        Ok(Expr::Float(value))
    }
}

pub(crate) fn is_quoted_string(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn cast_string(value: &str) -> Result<Expr, AqlError> {
    if NUMBER_RE.is_match(value) {
        let number: f64 = value.parse().map_err(|_| {
            AqlError::MalformedLiteral(format!("Expected value to be a finite number: {}", value))
        })?;
        return number_expr(number);
    }
    if is_quoted_string(value) {
        let unquoted: String = serde_json::from_str(value).map_err(|_| {
            AqlError::MalformedLiteral(format!("Expected value to be a quoted string: {}", value))
        })?;
        return Ok(Expr::String(unquoted));
    }
    if let Some(captures) = RANGE_RE.captures(value) {
        let start: f64 = captures[1].parse().unwrap_or(f64::NAN);
        let end: f64 = captures[2].parse().unwrap_or(f64::NAN);
        return Ok(Expr::Range {
            start: Box::new(number_expr(start)?),
            end: Box::new(number_expr(end)?),
        });
    }
    if IDENTIFIER_RE.is_match(value) {
        return Ok(Expr::Identifier(value.to_string()));
    }
    Expr::reference(value)
}

#[test]
fn test_cast_sniffs_strings() {
    assert_eq!(cast("42").unwrap(), Expr::Integer(42));
    assert_eq!(cast("-1.5").unwrap(), Expr::Float(-1.5));
    assert_eq!(cast("\"hi\"").unwrap(), Expr::String("hi".to_string()));
    assert_eq!(
        cast("1..3").unwrap(),
        Expr::Range {
            start: Box::new(Expr::Integer(1)),
            end: Box::new(Expr::Integer(3)),
        }
    );
    assert_eq!(cast("x").unwrap(), Expr::Identifier("x".to_string()));
    assert_eq!(cast("a.b").unwrap(), Expr::Reference("a.b".to_string()));
}

#[test]
fn test_cast_rejects_non_finite() {
    assert!(matches!(
        cast(f64::NAN),
        Err(AqlError::MalformedLiteral(_))
    ));
    assert!(matches!(
        cast(f64::INFINITY),
        Err(AqlError::MalformedLiteral(_))
    ));
}
