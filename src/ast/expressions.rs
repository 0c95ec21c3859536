//! Expression nodes.
//!
//! [`Expr`] is the closed set of value-producing nodes. Instances are
//! immutable: every operator method borrows the receiver and returns a
//! fresh node, so any expression can be reused as a building block in
//! unrelated queries.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::operators::{BinaryOp, NaryOp, UnaryOp};
use crate::ast::Statement;
use crate::error::AqlError;
use crate::output::{escape_identifier, escape_reference, json_quote, wrap_aql, ToAql};
use crate::value::{cast, is_quoted_string, AqlValue};

pub(crate) static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[_@a-z][-_@0-9a-z]*$").expect("identifier pattern"));

pub(crate) static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([_@a-z][-_@0-9a-z]*|`[_@a-z][-_@0-9a-z]*`)(\.[_@a-z][-_@0-9a-z]*|\.`[_@a-z][-_@0-9a-z]*`|\[\*\])*$",
    )
    .expect("reference pattern")
});

pub(crate) static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[_a-z][_0-9a-z]*$").expect("keyword pattern"));

pub(crate) static FUNCTION_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[_a-z][_0-9a-z]*(::[_a-z][_0-9a-z]*)*$").expect("function name pattern")
});

/// An expression node.
///
/// Composable via the operator methods below; serialized with
/// [`ToAql::to_aql`]. Compound operations and subqueries are wrapped in
/// parentheses by their parent node, never by themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Verbatim passthrough, emitted exactly as given
    Raw(String),

    /// Null literal
    Null,

    /// Boolean literal
    Boolean(bool),

    /// Floating point literal (always finite)
    Float(f64),

    /// Integer literal
    Integer(i64),

    /// String literal, serialized with strict JSON escaping
    String(String),

    /// List literal
    Array(Vec<Expr>),

    /// Object literal; keys are stored in their final emitted form
    Object(Vec<(String, Expr)>),

    /// Range (`start..end`)
    Range { start: Box<Expr>, end: Box<Expr> },

    /// Chained bracket indexing (`base[key][key]`)
    PropertyAccess { object: Box<Expr>, keys: Vec<Expr> },

    /// A keyword, emitted upper-cased
    Keyword(String),

    /// A bare identifier, backtick-escaped on collision with a keyword
    /// or when it contains a hyphen
    Identifier(String),

    /// A dotted path reference; each segment escapes independently
    Reference(String),

    /// Unary operation
    UnaryOp { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation
    BinaryOp {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Conditional (`cond ? then : otherwise`)
    Conditional {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },

    /// N-ary operation, operands joined left to right
    NaryOp { op: NaryOp, operands: Vec<Expr> },

    /// Function call
    FunctionCall { name: String, args: Vec<Expr> },

    /// A statement chain embedded in expression position
    Subquery(Box<Statement>),
}

/// Validate a bare identifier name.
pub(crate) fn valid_identifier(value: &str) -> Result<String, AqlError> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(AqlError::MalformedToken(format!(
            "Not a valid identifier: {}",
            value
        )))
    }
}

/// Render an object literal key into its emitted form.
///
/// Keys starting with `:` are computed property names and become
/// `[name]`; keys that are neither bare identifiers nor plain numerals
/// are JSON-quoted; already-quoted keys pass through.
fn object_key(key: &str) -> Result<String, AqlError> {
    if let Some(dynamic) = key.strip_prefix(':') {
        if !REFERENCE_RE.is_match(dynamic) {
            return Err(AqlError::MalformedToken(format!(
                "Expected key to be a well-formed dynamic property name: {}",
                key
            )));
        }
        return Ok(format!("[{}]", dynamic));
    }
    if is_quoted_string(key) || IDENTIFIER_RE.is_match(key) || is_plain_numeral(key) {
        return Ok(key.to_string());
    }
    Ok(json_quote(key))
}

fn is_plain_numeral(key: &str) -> bool {
    key.parse::<f64>()
        .map(|number| format!("{}", number) == key)
        .unwrap_or(false)
}

impl Expr {
    /// Build a validated bare identifier (a `@`-prefixed one is a bind
    /// parameter).
    pub fn identifier(value: &str) -> Result<Expr, AqlError> {
        Ok(Expr::Identifier(valid_identifier(value)?))
    }

    /// Build a validated dotted path reference such as `doc.attr[*]`.
    pub fn reference(value: &str) -> Result<Expr, AqlError> {
        if REFERENCE_RE.is_match(value) {
            Ok(Expr::Reference(value.to_string()))
        } else {
            Err(AqlError::MalformedToken(format!(
                "Not a valid simple reference: {}",
                value
            )))
        }
    }

    /// Build a validated keyword, emitted upper-cased.
    pub fn keyword(value: &str) -> Result<Expr, AqlError> {
        if KEYWORD_RE.is_match(value) {
            Ok(Expr::Keyword(value.to_string()))
        } else {
            Err(AqlError::MalformedToken(format!(
                "Not a valid keyword: {}",
                value
            )))
        }
    }

    /// Build a float literal; non-finite values are rejected.
    pub fn float(value: f64) -> Result<Expr, AqlError> {
        if value.is_finite() {
            Ok(Expr::Float(value))
        } else {
            Err(AqlError::MalformedLiteral(format!(
                "Expected value to be a finite number: {}",
                value
            )))
        }
    }

    /// Build a list literal, normalizing every element.
    pub fn list(items: Vec<AqlValue>) -> Result<Expr, AqlError> {
        Ok(Expr::Array(
            items
                .into_iter()
                .map(cast)
                .collect::<Result<Vec<_>, _>>()?,
        ))
    }

    pub(crate) fn object_from_pairs(pairs: Vec<(String, AqlValue)>) -> Result<Expr, AqlError> {
        let mut rendered = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            rendered.push((object_key(&key)?, cast(value)?));
        }
        Ok(Expr::Object(rendered))
    }

    /// Build a validated function call without arity constraints.
    pub fn function_call(name: &str, args: Vec<AqlValue>) -> Result<Expr, AqlError> {
        if !FUNCTION_NAME_RE.is_match(name) {
            return Err(AqlError::MalformedToken(format!(
                "Not a valid function name: {}",
                name
            )));
        }
        Ok(Expr::FunctionCall {
            name: name.to_string(),
            args: args
                .into_iter()
                .map(cast)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn binary(&self, op: BinaryOp, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        Ok(Expr::BinaryOp {
            op,
            left: Box::new(self.clone()),
            right: Box::new(cast(other)?),
        })
    }

    fn nary<I>(&self, op: NaryOp, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        let mut operands = vec![self.clone()];
        for value in others {
            operands.push(cast(value)?);
        }
        Ok(Expr::NaryOp { op, operands })
    }

    /// Range from this expression to `end`.
    pub fn to(&self, end: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        Ok(Expr::Range {
            start: Box::new(self.clone()),
            end: Box::new(cast(end)?),
        })
    }

    /// Alias for [`Expr::to`].
    pub fn range(&self, end: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.to(end)
    }

    /// Chained bracket indexing, one `[key]` per supplied key.
    pub fn get<I>(&self, keys: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        Ok(Expr::PropertyAccess {
            object: Box::new(self.clone()),
            keys: keys
                .into_iter()
                .map(cast)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    pub fn and<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::And, others)
    }

    pub fn or<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Or, others)
    }

    pub fn add<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Add, others)
    }

    pub fn sub<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Sub, others)
    }

    pub fn mul<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Mul, others)
    }

    pub fn div<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Div, others)
    }

    pub fn mod_<I>(&self, others: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        self.nary(NaryOp::Mod, others)
    }

    pub fn eq(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Eq, other)
    }

    pub fn neq(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Neq, other)
    }

    pub fn gt(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Gt, other)
    }

    pub fn gte(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Gte, other)
    }

    pub fn lt(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Lt, other)
    }

    pub fn lte(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Lte, other)
    }

    pub fn in_(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::In, other)
    }

    pub fn not_in(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::NotIn, other)
    }

    pub fn matches(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::Match, other)
    }

    pub fn not_matches(&self, other: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.binary(BinaryOp::NotMatch, other)
    }

    pub fn not(&self) -> Expr {
        Expr::UnaryOp {
            op: UnaryOp::Not,
            operand: Box::new(self.clone()),
        }
    }

    pub fn neg(&self) -> Expr {
        Expr::UnaryOp {
            op: UnaryOp::Neg,
            operand: Box::new(self.clone()),
        }
    }

    pub fn like(&self) -> Expr {
        Expr::UnaryOp {
            op: UnaryOp::Like,
            operand: Box::new(self.clone()),
        }
    }

    /// First stage of a conditional; finish with [`Then::else_`].
    pub fn then(&self, then: impl Into<AqlValue>) -> Result<Then, AqlError> {
        Ok(Then {
            cond: self.clone(),
            then: cast(then)?,
        })
    }
}

/// A conditional with its condition and then-branch fixed, waiting for
/// the else-branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Then {
    cond: Expr,
    then: Expr,
}

impl Then {
    pub fn else_(&self, otherwise: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        Ok(Expr::Conditional {
            cond: Box::new(self.cond.clone()),
            then: Box::new(self.then.clone()),
            otherwise: Box::new(cast(otherwise)?),
        })
    }

    /// Alias for [`Then::else_`].
    pub fn otherwise(&self, otherwise: impl Into<AqlValue>) -> Result<Expr, AqlError> {
        self.else_(otherwise)
    }
}

impl ToAql for Expr {
    fn to_aql(&self) -> String {
        match self {
            Expr::Raw(value) => value.clone(),
            Expr::Null => "null".to_string(),
            Expr::Boolean(value) => value.to_string(),
            Expr::Float(value) => value.to_string(),
            Expr::Integer(value) => value.to_string(),
            Expr::String(value) => json_quote(value),
            Expr::Array(items) => {
                let items: Vec<String> = items.iter().map(wrap_aql).collect();
                format!("[{}]", items.join(", "))
            }
            Expr::Object(pairs) => {
                let items: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, wrap_aql(value)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            }
            Expr::Range { start, end } => {
                format!("{}..{}", wrap_aql(start), wrap_aql(end))
            }
            Expr::PropertyAccess { object, keys } => {
                let keys: Vec<String> = keys
                    .iter()
                    .map(|key| format!("[{}]", wrap_aql(key)))
                    .collect();
                format!("{}{}", wrap_aql(object), keys.join(""))
            }
            Expr::Keyword(value) => value.to_ascii_uppercase(),
            Expr::Identifier(value) => escape_identifier(value),
            Expr::Reference(value) => escape_reference(value),
            Expr::UnaryOp { op, operand } => {
                if op.is_word() {
                    format!("{} {}", op.symbol(), wrap_aql(operand))
                } else {
                    format!("{}{}", op.symbol(), wrap_aql(operand))
                }
            }
            Expr::BinaryOp { op, left, right } => {
                format!("{} {} {}", wrap_aql(left), op.symbol(), wrap_aql(right))
            }
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => format!(
                "{} ? {} : {}",
                wrap_aql(cond),
                wrap_aql(then),
                wrap_aql(otherwise)
            ),
            Expr::NaryOp { op, operands } => {
                let operands: Vec<String> = operands.iter().map(wrap_aql).collect();
                operands.join(&format!(" {} ", op.symbol()))
            }
            Expr::FunctionCall { name, args } => {
                let args: Vec<String> = args.iter().map(wrap_aql).collect();
                format!("{}({})", name, args.join(", "))
            }
            Expr::Subquery(statement) => statement.to_aql(),
        }
    }
}
