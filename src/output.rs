//! AQL text production.
//!
//! Every node type implements [`ToAql`], the single serialization
//! operation. Serialization is pure and deterministic: the same node
//! always yields the same text, strings are escaped with strict JSON
//! rules, reserved or hyphenated identifiers are wrapped in backticks,
//! and keywords are emitted upper-cased.
//!
//! Composite nodes call [`wrap_aql`] on their children so that compound
//! operations and embedded statement chains keep their grouping when
//! spliced into a larger expression. Leaf nodes never wrap themselves.

use crate::ast::Expr;
use crate::registry::is_keyword;

/// Produce the canonical AQL text for a node.
pub trait ToAql {
    fn to_aql(&self) -> String;
}

/// Serialize a child expression, parenthesized if it is a compound
/// operation or a statement chain used as a subquery.
pub(crate) fn wrap_aql(expr: &Expr) -> String {
    match expr {
        Expr::BinaryOp { .. }
        | Expr::Conditional { .. }
        | Expr::NaryOp { .. }
        | Expr::Subquery(_) => format!("({})", expr.to_aql()),
        _ => expr.to_aql(),
    }
}

/// Escape a single bare identifier.
///
/// Identifiers collide with reserved keywords case-insensitively;
/// hyphenated names are legal in the builder but must be quoted in the
/// output. Everything else is emitted verbatim, including `@` bind
/// parameter prefixes.
pub(crate) fn escape_identifier(value: &str) -> String {
    if is_keyword(value) || value.contains('-') {
        format!("`{}`", value)
    } else {
        value.to_string()
    }
}

/// Escape a dotted path reference segment by segment.
///
/// Segments that arrive already backticked pass through untouched; the
/// rest follow the identifier rule independently.
pub(crate) fn escape_reference(value: &str) -> String {
    value
        .split('.')
        .map(|segment| {
            if !segment.starts_with('`') && (is_keyword(segment) || segment.contains('-')) {
                format!("`{}`", segment)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Quote a string with strict JSON escaping.
pub(crate) fn json_quote(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

#[test]
fn test_escape_identifier() {
    assert_eq!(escape_identifier("x"), "x");
    assert_eq!(escape_identifier("for"), "`for`");
    assert_eq!(escape_identifier("RETURN"), "`RETURN`");
    assert_eq!(escape_identifier("totally-radical"), "`totally-radical`");
    assert_eq!(escape_identifier("@bind"), "@bind");
}

#[test]
fn test_escape_reference() {
    assert_eq!(escape_reference("a.b"), "a.b");
    assert_eq!(escape_reference("a.for"), "a.`for`");
    assert_eq!(escape_reference("`for`.x"), "`for`.x");
    assert_eq!(escape_reference("a[*].b"), "a[*].b");
}

#[test]
fn test_json_quote() {
    assert_eq!(json_quote("a\"b"), "\"a\\\"b\"");
    assert_eq!(json_quote("line\nbreak"), "\"line\\nbreak\"");
}
