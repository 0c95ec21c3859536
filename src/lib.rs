//! # aqb - a compositional AQL query builder
//!
//! Build syntactically valid ArangoDB Query Language statements from
//! plain Rust values and composable nodes, without assembling strings by
//! hand. Host values are normalized into typed expression nodes, clause
//! ordering and operator arity are enforced while the query is being
//! built, and the finished tree serializes to exact AQL text on demand
//! via [`ToAql::to_aql`].
//!
//! ```
//! use aqb::{for_, ref_, PartialStatement, ToAql};
//!
//! let adults = for_("u")
//!     .in_("users")?
//!     .filter(ref_("u.age")?.gte(18)?)?
//!     .sort(vec!["u.name"])?
//!     .limit(10)?
//!     .return_("u")?;
//! assert_eq!(
//!     adults.to_aql(),
//!     "FOR u IN users FILTER (u.age >= 18) SORT u.name LIMIT 10 RETURN u"
//! );
//! # Ok::<(), aqb::AqlError>(())
//! ```
//!
//! Nodes are immutable: every builder method borrows its receiver and
//! returns a new node, so partially built chains can be shared and
//! extended in different directions without interference. All
//! validation happens at construction time and fails with [`AqlError`];
//! a node that exists always serializes.
//!
//! The builder is one-directional (values in, AQL text out). It does
//! not parse AQL and it does not talk to a server.

pub mod ast;
pub mod error;
pub mod functions;
pub mod output;
pub mod registry;
pub mod value;

pub use ast::{
    BinaryOp, Collect, CollectInto, CollectIntoExpr, CollectKeep, CollectTarget, CollectWithCount,
    Definitions, Expr, Filter, For, ForIn, Insert, InsertInto, Let, Limit, NaryOp,
    PartialStatement, Remove, RemoveInto, Replace, ReplaceInto, ReplaceWithInto, Return, Sort,
    SortArg, Statement, Then, UnaryOp, Update, UpdateInto, UpdateWithInto, Upsert, UpsertInsert,
    UpsertInto, UpsertUpdate,
};
pub use error::AqlError;
pub use output::ToAql;
pub use registry::{Arity, Builtin, CustomFunction, DeprecationHandler, Registry};
pub use value::{cast, AqlValue, Collection};

use ast::query;

/// Normalize any supported host value into an expression node.
///
/// This is the general-purpose ingestion point; see [`cast`] for the
/// normalization rules. Use the named constructors below for values
/// that should bypass string sniffing.
pub fn value(val: impl Into<AqlValue>) -> Result<Expr, AqlError> {
    cast(val)
}

/// A boolean literal.
pub fn bool_(value: bool) -> Expr {
    Expr::Boolean(value)
}

/// A float literal; non-finite input is rejected.
pub fn num(value: f64) -> Result<Expr, AqlError> {
    Expr::float(value)
}

/// An integer literal.
pub fn int_(value: i64) -> Expr {
    Expr::Integer(value)
}

/// A string literal, bypassing string sniffing.
pub fn str_(value: impl Into<String>) -> Expr {
    Expr::String(value.into())
}

/// A list literal; every element is normalized.
pub fn list<I>(items: I) -> Result<Expr, AqlError>
where
    I: IntoIterator,
    I::Item: Into<AqlValue>,
{
    Expr::list(items.into_iter().map(Into::into).collect())
}

/// An object literal from ordered key/value pairs.
pub fn obj<K, V, I>(pairs: I) -> Result<Expr, AqlError>
where
    K: Into<String>,
    V: Into<AqlValue>,
    I: IntoIterator<Item = (K, V)>,
{
    cast(AqlValue::object(pairs))
}

/// An identifier or dotted path reference, bypassing string sniffing.
pub fn ref_(value: &str) -> Result<Expr, AqlError> {
    Expr::identifier(value).or_else(|_| Expr::reference(value))
}

/// A raw passthrough expression, emitted verbatim and never validated.
pub fn raw(value: impl Into<String>) -> Expr {
    Expr::Raw(value.into())
}

/// A conditional expression (`cond ? then : otherwise`).
pub fn if_(
    cond: impl Into<AqlValue>,
    then: impl Into<AqlValue>,
    otherwise: impl Into<AqlValue>,
) -> Result<Expr, AqlError> {
    cast(cond)?.then(then)?.else_(otherwise)
}

/// A user-defined function constructor with an optional arity spec.
pub fn fn_(name: &str, arity: Option<Vec<Arity>>) -> Result<CustomFunction, AqlError> {
    CustomFunction::new(name, arity)
}

macro_rules! unary_helpers {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
        $(#[$meta])*
        pub fn $name(value: impl Into<AqlValue>) -> Result<Expr, AqlError> {
            Ok(cast(value)?.$name())
        }
        )+
    };
}

macro_rules! binary_helpers {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
        $(#[$meta])*
        pub fn $name(
            left: impl Into<AqlValue>,
            right: impl Into<AqlValue>,
        ) -> Result<Expr, AqlError> {
            cast(left)?.$name(right)
        }
        )+
    };
}

macro_rules! nary_helpers {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
        $(#[$meta])*
        pub fn $name<I>(values: I) -> Result<Expr, AqlError>
        where
            I: IntoIterator,
            I::Item: Into<AqlValue>,
        {
            let mut values = values.into_iter();
            let first = values.next().ok_or_else(|| {
                AqlError::Structural("Expected at least one operand".to_string())
            })?;
            cast(first)?.$name(values)
        }
        )+
    };
}

unary_helpers! {
    /// Logical negation of a value.
    not,
    /// Arithmetic negation of a value.
    neg,
}

binary_helpers! {
    /// `left == right`
    eq,
    /// `left != right`
    neq,
    /// `left > right`
    gt,
    /// `left >= right`
    gte,
    /// `left < right`
    lt,
    /// `left <= right`
    lte,
    /// `left in right`
    in_,
    /// `left not in right`
    not_in,
    /// `left =~ right`
    matches,
    /// `left !~ right`
    not_matches,
}

nary_helpers! {
    /// All values joined by `&&`.
    and,
    /// All values joined by `||`.
    or,
    /// All values joined by `+`.
    add,
    /// All values joined by `-`.
    sub,
    /// All values joined by `*`.
    mul,
    /// All values joined by `/`.
    div,
    /// All values joined by `%`.
    mod_,
}

/// Start a chain with an iteration clause; finish it with
/// [`ForIn::in_`].
pub fn for_(varname: &str) -> ForIn {
    query::build_for(None, varname)
}

/// Start a chain with a filter clause.
pub fn filter(condition: impl Into<AqlValue>) -> Result<Filter, AqlError> {
    query::build_filter(None, condition.into())
}

/// Start a chain with a single-definition binding clause.
pub fn let_(name: &str, val: impl Into<AqlValue>) -> Result<Let, AqlError> {
    query::build_let(None, vec![(name.to_string(), val.into())])
}

/// Start a chain with a multi-definition binding clause.
pub fn let_many<K, V, I>(dfns: I) -> Result<Let, AqlError>
where
    K: Into<String>,
    V: Into<AqlValue>,
    I: IntoIterator<Item = (K, V)>,
{
    query::build_let(None, query::collect_pairs(dfns))
}

/// Start a chain with a single-definition aggregation clause.
pub fn collect(name: &str, val: impl Into<AqlValue>) -> Result<Collect, AqlError> {
    query::build_collect(None, vec![(name.to_string(), val.into())])
}

/// Start a chain with a multi-definition aggregation clause.
pub fn collect_many<K, V, I>(dfns: I) -> Result<Collect, AqlError>
where
    K: Into<String>,
    V: Into<AqlValue>,
    I: IntoIterator<Item = (K, V)>,
{
    query::build_collect(None, query::collect_pairs(dfns))
}

/// Start a chain with a counting aggregation clause.
pub fn collect_with_count_into(varname: &str) -> Result<CollectWithCount, AqlError> {
    query::build_collect_with_count(None, None, varname)
}

/// Start a chain with an ordering clause.
pub fn sort<I>(args: I) -> Result<Sort, AqlError>
where
    I: IntoIterator,
    I::Item: Into<AqlValue>,
{
    query::build_sort(None, args.into_iter().map(Into::into).collect())
}

/// Start a chain with a limit clause.
pub fn limit(count: impl Into<AqlValue>) -> Result<Limit, AqlError> {
    query::build_limit(None, None, count.into())
}

/// Start a chain with an offset/count limit clause.
pub fn limit_offset(
    offset: impl Into<AqlValue>,
    count: impl Into<AqlValue>,
) -> Result<Limit, AqlError> {
    query::build_limit(None, Some(offset.into()), count.into())
}

/// A bare return clause.
pub fn return_(val: impl Into<AqlValue>) -> Result<Return, AqlError> {
    query::build_return(None, val.into(), false)
}

/// A bare `RETURN DISTINCT` clause.
pub fn return_distinct(val: impl Into<AqlValue>) -> Result<Return, AqlError> {
    query::build_return(None, val.into(), true)
}

/// Start a remove clause; finish it with [`RemoveInto::in_`].
pub fn remove(expr: impl Into<AqlValue>) -> Result<RemoveInto, AqlError> {
    query::build_remove(None, expr.into())
}

/// Start an insert clause; finish it with [`InsertInto::in_`].
pub fn insert(expr: impl Into<AqlValue>) -> Result<InsertInto, AqlError> {
    query::build_insert(None, expr.into())
}

/// Start an update clause; finish it with [`UpdateInto::in_`].
pub fn update(expr: impl Into<AqlValue>) -> Result<UpdateInto, AqlError> {
    query::build_update(None, expr.into())
}

/// Start a replace clause; finish it with [`ReplaceInto::in_`].
pub fn replace(expr: impl Into<AqlValue>) -> Result<ReplaceInto, AqlError> {
    query::build_replace(None, expr.into())
}

/// Start the four-stage upsert continuation.
pub fn upsert(match_expr: impl Into<AqlValue>) -> Result<UpsertInsert, AqlError> {
    query::build_upsert(None, match_expr.into())
}
