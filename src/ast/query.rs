//! The typed clause-chain builder.
//!
//! Each clause position is its own type, and each type only offers the
//! continuations that are grammatical there: intermediate clauses carry
//! the full [`PartialStatement`] continuation set, multi-part clauses
//! (`FOR .. IN`, the mutation targets, `UPSERT`'s four stages, the
//! aggregation INTO forms) are curried through small continuation
//! structs, and terminal clauses offer nothing beyond their modifiers.
//! Illegal clause sequences simply do not type-check.
//!
//! Every method borrows its receiver and returns a new node, so a chain
//! prefix can be extended in several directions independently.

use serde_json::Value as Json;

use crate::ast::expressions::valid_identifier;
use crate::ast::statements::{CollectTarget, Definitions, SortArg, Statement};
use crate::ast::Expr;
use crate::error::AqlError;
use crate::output::ToAql;
use crate::value::{cast_value, AqlValue};

macro_rules! clauses {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(pub(crate) Statement);

        impl ToAql for $name {
            fn to_aql(&self) -> String {
                self.0.to_aql()
            }
        }

        impl From<$name> for Statement {
            fn from(clause: $name) -> Statement {
                clause.0
            }
        }

        impl From<$name> for AqlValue {
            fn from(clause: $name) -> AqlValue {
                AqlValue::Chain(clause.0)
            }
        }

        impl From<&$name> for AqlValue {
            fn from(clause: &$name) -> AqlValue {
                AqlValue::Chain(clause.0.clone())
            }
        }
        )+
    };
}

macro_rules! chainable {
    ($($name:ident),+ $(,)?) => {
        $(
        impl PartialStatement for $name {
            fn to_statement(&self) -> Statement {
                self.0.clone()
            }
        }
        )+
    };
}

macro_rules! with_options {
    ($($name:ident),+ $(,)?) => {
        $(
        impl $name {
            /// Attach an OPTIONS object, returning a new node.
            pub fn options(&self, options: impl Into<AqlValue>) -> Result<$name, AqlError> {
                Ok($name(set_options(&self.0, options.into())?))
            }
        }
        )+
    };
}

clauses! {
    /// An iteration clause (`FOR var IN expr`)
    For,
    /// A filter clause (`FILTER condition`)
    Filter,
    /// A binding clause (`LET a = x`)
    Let,
    /// A plain aggregation clause, before any INTO form is chosen
    Collect,
    /// An aggregation clause with a bare INTO variable
    CollectInto,
    /// An aggregation clause with `INTO var = expr`
    CollectIntoExpr,
    /// An aggregation clause with `INTO var KEEP ..`
    CollectKeep,
    /// An aggregation clause counting group members (`WITH COUNT INTO`)
    CollectWithCount,
    /// An ordering clause (`SORT ..`)
    Sort,
    /// A limit clause (`LIMIT [offset,] count`)
    Limit,
    /// A terminal return clause (`RETURN [DISTINCT] value`)
    Return,
    /// A terminal remove clause (`REMOVE expr IN collection`)
    Remove,
    /// A terminal insert clause (`INSERT expr INTO collection`)
    Insert,
    /// A terminal update clause (`UPDATE expr [WITH ..] IN collection`)
    Update,
    /// A terminal replace clause (`REPLACE expr [WITH ..] IN collection`)
    Replace,
    /// A terminal upsert clause (`UPSERT .. INSERT .. UPDATE|REPLACE .. IN ..`)
    Upsert,
}

chainable! {
    For,
    Filter,
    Let,
    Collect,
    CollectInto,
    CollectIntoExpr,
    CollectKeep,
    CollectWithCount,
    Sort,
    Limit,
}

with_options! {
    Collect,
    CollectInto,
    CollectIntoExpr,
    CollectKeep,
    CollectWithCount,
    Remove,
    Insert,
    Update,
    Replace,
    Upsert,
}

/// The continuation set shared by every chainable clause position.
///
/// `to_statement` snapshots the accumulated chain; the provided methods
/// append one clause each and hand back the next position. The crate
/// root exposes the same set as free functions for starting a chain.
pub trait PartialStatement {
    fn to_statement(&self) -> Statement;

    /// Start an iteration clause; finish it with [`ForIn::in_`].
    fn for_(&self, varname: &str) -> ForIn {
        build_for(Some(self.to_statement()), varname)
    }

    fn filter(&self, condition: impl Into<AqlValue>) -> Result<Filter, AqlError> {
        build_filter(Some(self.to_statement()), condition.into())
    }

    fn let_(&self, name: &str, value: impl Into<AqlValue>) -> Result<Let, AqlError> {
        build_let(
            Some(self.to_statement()),
            vec![(name.to_string(), value.into())],
        )
    }

    fn let_many<K, V, I>(&self, dfns: I) -> Result<Let, AqlError>
    where
        K: Into<String>,
        V: Into<AqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        build_let(Some(self.to_statement()), collect_pairs(dfns))
    }

    fn collect(&self, name: &str, value: impl Into<AqlValue>) -> Result<Collect, AqlError> {
        build_collect(
            Some(self.to_statement()),
            vec![(name.to_string(), value.into())],
        )
    }

    fn collect_many<K, V, I>(&self, dfns: I) -> Result<Collect, AqlError>
    where
        K: Into<String>,
        V: Into<AqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        build_collect(Some(self.to_statement()), collect_pairs(dfns))
    }

    fn collect_with_count_into(&self, varname: &str) -> Result<CollectWithCount, AqlError> {
        build_collect_with_count(Some(self.to_statement()), None, varname)
    }

    fn sort<I>(&self, args: I) -> Result<Sort, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        build_sort(
            Some(self.to_statement()),
            args.into_iter().map(Into::into).collect(),
        )
    }

    fn limit(&self, count: impl Into<AqlValue>) -> Result<Limit, AqlError> {
        build_limit(Some(self.to_statement()), None, count.into())
    }

    fn limit_offset(
        &self,
        offset: impl Into<AqlValue>,
        count: impl Into<AqlValue>,
    ) -> Result<Limit, AqlError> {
        build_limit(Some(self.to_statement()), Some(offset.into()), count.into())
    }

    fn return_(&self, value: impl Into<AqlValue>) -> Result<Return, AqlError> {
        build_return(Some(self.to_statement()), value.into(), false)
    }

    fn return_distinct(&self, value: impl Into<AqlValue>) -> Result<Return, AqlError> {
        build_return(Some(self.to_statement()), value.into(), true)
    }

    /// Start a remove clause; finish it with [`RemoveInto::in_`].
    fn remove(&self, expr: impl Into<AqlValue>) -> Result<RemoveInto, AqlError> {
        build_remove(Some(self.to_statement()), expr.into())
    }

    /// Start an insert clause; finish it with [`InsertInto::in_`].
    fn insert(&self, expr: impl Into<AqlValue>) -> Result<InsertInto, AqlError> {
        build_insert(Some(self.to_statement()), expr.into())
    }

    /// Start an update clause; finish it with [`UpdateInto::in_`],
    /// optionally routing through [`UpdateInto::with_`].
    fn update(&self, expr: impl Into<AqlValue>) -> Result<UpdateInto, AqlError> {
        build_update(Some(self.to_statement()), expr.into())
    }

    /// Start a replace clause; finish it with [`ReplaceInto::in_`],
    /// optionally routing through [`ReplaceInto::with_`].
    fn replace(&self, expr: impl Into<AqlValue>) -> Result<ReplaceInto, AqlError> {
        build_replace(Some(self.to_statement()), expr.into())
    }

    /// Start the four-stage upsert continuation.
    fn upsert(&self, match_expr: impl Into<AqlValue>) -> Result<UpsertInsert, AqlError> {
        build_upsert(Some(self.to_statement()), match_expr.into())
    }
}

pub(crate) fn collect_pairs<K, V, I>(dfns: I) -> Vec<(String, AqlValue)>
where
    K: Into<String>,
    V: Into<AqlValue>,
    I: IntoIterator<Item = (K, V)>,
{
    dfns.into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

fn boxed(prev: Option<Statement>) -> Option<Box<Statement>> {
    prev.map(Box::new)
}

/// Resolve a value that must name a collection: a string, an
/// identifier node or a [`crate::value::Collection`] handle.
fn collection_name(value: AqlValue) -> Result<String, AqlError> {
    match value {
        AqlValue::Collection(name) => valid_identifier(&name),
        AqlValue::Json(Json::String(name)) => valid_identifier(&name),
        AqlValue::Node(Expr::Identifier(name)) => Ok(name),
        other => Err(AqlError::UnsupportedValue(format!(
            "Expected collection to be an identifier: {:?}",
            other
        ))),
    }
}

fn options_literal(value: AqlValue) -> Result<Expr, AqlError> {
    match cast_value(value)? {
        object @ Expr::Object(_) => Ok(object),
        other => Err(AqlError::MalformedLiteral(format!(
            "Expected options to be an object: {:?}",
            other
        ))),
    }
}

fn set_options(statement: &Statement, options: AqlValue) -> Result<Statement, AqlError> {
    let options = options_literal(options)?;
    let mut statement = statement.clone();
    match &mut statement {
        Statement::Collect { options: slot, .. }
        | Statement::CollectWithCount { options: slot, .. }
        | Statement::Remove { options: slot, .. }
        | Statement::Insert { options: slot, .. }
        | Statement::Update { options: slot, .. }
        | Statement::Replace { options: slot, .. }
        | Statement::Upsert { options: slot, .. } => *slot = Some(options),
        _ => {}
    }
    Ok(statement)
}

/// Splice `LET var = NEW|OLD RETURN var` onto a mutation terminal.
fn splice_return(statement: Statement, varname: &str, pseudo: &str) -> Result<Return, AqlError> {
    let dfns = Definitions::single(varname, AqlValue::Node(Expr::Identifier(pseudo.to_string())))?;
    let bound = Statement::Let {
        prev: Some(Box::new(statement)),
        dfns,
    };
    build_return(Some(bound), AqlValue::from(varname), false)
}

pub(crate) fn build_for(prev: Option<Statement>, varname: &str) -> ForIn {
    ForIn {
        prev,
        varname: varname.to_string(),
    }
}

pub(crate) fn build_filter(prev: Option<Statement>, condition: AqlValue) -> Result<Filter, AqlError> {
    Ok(Filter(Statement::Filter {
        prev: boxed(prev),
        expr: cast_value(condition)?,
    }))
}

pub(crate) fn build_let(
    prev: Option<Statement>,
    dfns: Vec<(String, AqlValue)>,
) -> Result<Let, AqlError> {
    Ok(Let(Statement::Let {
        prev: boxed(prev),
        dfns: Definitions::new(dfns)?,
    }))
}

pub(crate) fn build_collect(
    prev: Option<Statement>,
    dfns: Vec<(String, AqlValue)>,
) -> Result<Collect, AqlError> {
    Ok(Collect(Statement::Collect {
        prev: boxed(prev),
        dfns: Definitions::new(dfns)?,
        target: None,
        options: None,
    }))
}

pub(crate) fn build_collect_with_count(
    prev: Option<Statement>,
    dfns: Option<Definitions>,
    varname: &str,
) -> Result<CollectWithCount, AqlError> {
    Ok(CollectWithCount(Statement::CollectWithCount {
        prev: boxed(prev),
        dfns,
        varname: valid_identifier(varname)?,
        options: None,
    }))
}

fn sort_direction(value: &AqlValue) -> Option<String> {
    if let AqlValue::Json(Json::String(keyword)) = value {
        if keyword.eq_ignore_ascii_case("asc") || keyword.eq_ignore_ascii_case("desc") {
            return Some(keyword.clone());
        }
    }
    None
}

fn keyword_node_name(value: &AqlValue) -> Option<String> {
    if let AqlValue::Node(Expr::Keyword(keyword)) = value {
        Some(keyword.clone())
    } else {
        None
    }
}

pub(crate) fn build_sort(prev: Option<Statement>, args: Vec<AqlValue>) -> Result<Sort, AqlError> {
    if args.is_empty() {
        return Err(AqlError::Structural(
            "Expected sort list not to be empty".to_string(),
        ));
    }
    let mut terms = Vec::with_capacity(args.len());
    let mut allow_keyword = false;
    for (index, arg) in args.into_iter().enumerate() {
        let direction = sort_direction(&arg);
        if !allow_keyword {
            if let Some(keyword) = direction.clone().or_else(|| keyword_node_name(&arg)) {
                return Err(AqlError::Structural(format!(
                    "Unexpected keyword {} at offset {}",
                    keyword, index
                )));
            }
        }
        match direction {
            Some(keyword) => {
                allow_keyword = false;
                terms.push(SortArg::Direction(keyword));
            }
            None => {
                allow_keyword = true;
                terms.push(SortArg::Term(cast_value(arg)?));
            }
        }
    }
    Ok(Sort(Statement::Sort {
        prev: boxed(prev),
        args: terms,
    }))
}

pub(crate) fn build_limit(
    prev: Option<Statement>,
    offset: Option<AqlValue>,
    count: AqlValue,
) -> Result<Limit, AqlError> {
    Ok(Limit(Statement::Limit {
        prev: boxed(prev),
        offset: offset.map(cast_value).transpose()?,
        count: cast_value(count)?,
    }))
}

pub(crate) fn build_return(
    prev: Option<Statement>,
    value: AqlValue,
    distinct: bool,
) -> Result<Return, AqlError> {
    Ok(Return(Statement::Return {
        prev: boxed(prev),
        value: cast_value(value)?,
        distinct,
    }))
}

pub(crate) fn build_remove(prev: Option<Statement>, expr: AqlValue) -> Result<RemoveInto, AqlError> {
    Ok(RemoveInto {
        prev,
        expr: cast_value(expr)?,
    })
}

pub(crate) fn build_insert(prev: Option<Statement>, expr: AqlValue) -> Result<InsertInto, AqlError> {
    Ok(InsertInto {
        prev,
        expr: cast_value(expr)?,
    })
}

pub(crate) fn build_update(prev: Option<Statement>, expr: AqlValue) -> Result<UpdateInto, AqlError> {
    Ok(UpdateInto {
        prev,
        expr: cast_value(expr)?,
    })
}

pub(crate) fn build_replace(
    prev: Option<Statement>,
    expr: AqlValue,
) -> Result<ReplaceInto, AqlError> {
    Ok(ReplaceInto {
        prev,
        expr: cast_value(expr)?,
    })
}

pub(crate) fn build_upsert(
    prev: Option<Statement>,
    match_expr: AqlValue,
) -> Result<UpsertInsert, AqlError> {
    Ok(UpsertInsert {
        prev,
        match_expr: cast_value(match_expr)?,
    })
}

impl Collect {
    fn with_target(&self, target: CollectTarget) -> Statement {
        let mut statement = self.0.clone();
        if let Statement::Collect { target: slot, .. } = &mut statement {
            *slot = Some(target);
        }
        statement
    }

    /// `INTO varname`, collecting the group members; [`CollectInto::keep`]
    /// can then restrict which variables are kept.
    pub fn into_(&self, varname: &str) -> Result<CollectInto, AqlError> {
        Ok(CollectInto(
            self.with_target(CollectTarget::Var(valid_identifier(varname)?)),
        ))
    }

    /// `INTO varname = source`, collecting a projection instead of the
    /// full group members.
    pub fn into_expr(
        &self,
        varname: &str,
        source: impl Into<AqlValue>,
    ) -> Result<CollectIntoExpr, AqlError> {
        Ok(CollectIntoExpr(self.with_target(CollectTarget::VarExpr(
            valid_identifier(varname)?,
            cast_value(source.into())?,
        ))))
    }

    /// Switch to the counting form: `COLLECT dfns WITH COUNT INTO var`.
    pub fn with_count_into(&self, varname: &str) -> Result<CollectWithCount, AqlError> {
        match &self.0 {
            Statement::Collect {
                prev,
                dfns,
                options,
                ..
            } => Ok(CollectWithCount(Statement::CollectWithCount {
                prev: prev.clone(),
                dfns: Some(dfns.clone()),
                varname: valid_identifier(varname)?,
                options: options.clone(),
            })),
            _ => unreachable!(),
        }
    }
}

impl CollectInto {
    /// Restrict the collected group members to the named variables.
    pub fn keep<I>(&self, names: I) -> Result<CollectKeep, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(AqlError::Structural(
                "Expected keep list not to be empty".to_string(),
            ));
        }
        let names = names
            .iter()
            .map(|name| valid_identifier(name))
            .collect::<Result<Vec<_>, _>>()?;
        let mut statement = self.0.clone();
        if let Statement::Collect { target, .. } = &mut statement {
            if let Some(CollectTarget::Var(varname)) = target.take() {
                *target = Some(CollectTarget::VarKeep(varname, names));
            }
        }
        Ok(CollectKeep(statement))
    }
}

impl Remove {
    /// Bind the removed document and return it:
    /// `.. LET var = OLD RETURN var`.
    pub fn return_old(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "OLD")
    }
}

impl Insert {
    /// Bind the inserted document and return it:
    /// `.. LET var = NEW RETURN var`.
    pub fn return_new(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "NEW")
    }
}

impl Update {
    pub fn return_new(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "NEW")
    }

    pub fn return_old(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "OLD")
    }
}

impl Replace {
    pub fn return_new(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "NEW")
    }

    pub fn return_old(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "OLD")
    }
}

impl Upsert {
    pub fn return_new(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "NEW")
    }

    pub fn return_old(&self, varname: &str) -> Result<Return, AqlError> {
        splice_return(self.0.clone(), varname, "OLD")
    }
}

/// An iteration clause waiting for its range expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ForIn {
    prev: Option<Statement>,
    varname: String,
}

impl ForIn {
    pub fn in_(&self, expr: impl Into<AqlValue>) -> Result<For, AqlError> {
        Ok(For(Statement::For {
            prev: boxed(self.prev.clone()),
            varname: valid_identifier(&self.varname)?,
            expr: cast_value(expr.into())?,
        }))
    }
}

/// A remove clause waiting for its target collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveInto {
    prev: Option<Statement>,
    expr: Expr,
}

impl RemoveInto {
    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Remove, AqlError> {
        Ok(Remove(Statement::Remove {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`RemoveInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Remove, AqlError> {
        self.in_(collection)
    }
}

/// An insert clause waiting for its target collection.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertInto {
    prev: Option<Statement>,
    expr: Expr,
}

impl InsertInto {
    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Insert, AqlError> {
        Ok(Insert(Statement::Insert {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`InsertInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Insert, AqlError> {
        self.in_(collection)
    }
}

/// An update clause waiting for a WITH expression or its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInto {
    prev: Option<Statement>,
    expr: Expr,
}

impl UpdateInto {
    pub fn with_(&self, with_expr: impl Into<AqlValue>) -> Result<UpdateWithInto, AqlError> {
        Ok(UpdateWithInto {
            prev: self.prev.clone(),
            expr: self.expr.clone(),
            with_expr: cast_value(with_expr.into())?,
        })
    }

    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Update, AqlError> {
        Ok(Update(Statement::Update {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            with_expr: None,
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`UpdateInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Update, AqlError> {
        self.in_(collection)
    }
}

/// An update clause with its WITH expression fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateWithInto {
    prev: Option<Statement>,
    expr: Expr,
    with_expr: Expr,
}

impl UpdateWithInto {
    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Update, AqlError> {
        Ok(Update(Statement::Update {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            with_expr: Some(self.with_expr.clone()),
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`UpdateWithInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Update, AqlError> {
        self.in_(collection)
    }
}

/// A replace clause waiting for a WITH expression or its collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceInto {
    prev: Option<Statement>,
    expr: Expr,
}

impl ReplaceInto {
    pub fn with_(&self, with_expr: impl Into<AqlValue>) -> Result<ReplaceWithInto, AqlError> {
        Ok(ReplaceWithInto {
            prev: self.prev.clone(),
            expr: self.expr.clone(),
            with_expr: cast_value(with_expr.into())?,
        })
    }

    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Replace, AqlError> {
        Ok(Replace(Statement::Replace {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            with_expr: None,
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`ReplaceInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Replace, AqlError> {
        self.in_(collection)
    }
}

/// A replace clause with its WITH expression fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceWithInto {
    prev: Option<Statement>,
    expr: Expr,
    with_expr: Expr,
}

impl ReplaceWithInto {
    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Replace, AqlError> {
        Ok(Replace(Statement::Replace {
            prev: boxed(self.prev.clone()),
            expr: self.expr.clone(),
            with_expr: Some(self.with_expr.clone()),
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`ReplaceWithInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Replace, AqlError> {
        self.in_(collection)
    }
}

/// An upsert clause waiting for its INSERT expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertInsert {
    prev: Option<Statement>,
    match_expr: Expr,
}

impl UpsertInsert {
    pub fn insert(&self, insert_expr: impl Into<AqlValue>) -> Result<UpsertUpdate, AqlError> {
        Ok(UpsertUpdate {
            prev: self.prev.clone(),
            match_expr: self.match_expr.clone(),
            insert_expr: cast_value(insert_expr.into())?,
        })
    }
}

/// An upsert clause waiting for its UPDATE or REPLACE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertUpdate {
    prev: Option<Statement>,
    match_expr: Expr,
    insert_expr: Expr,
}

impl UpsertUpdate {
    pub fn update(&self, update_expr: impl Into<AqlValue>) -> Result<UpsertInto, AqlError> {
        self.finish(update_expr.into(), false)
    }

    pub fn replace(&self, update_expr: impl Into<AqlValue>) -> Result<UpsertInto, AqlError> {
        self.finish(update_expr.into(), true)
    }

    fn finish(&self, update_expr: AqlValue, replace: bool) -> Result<UpsertInto, AqlError> {
        Ok(UpsertInto {
            prev: self.prev.clone(),
            match_expr: self.match_expr.clone(),
            insert_expr: self.insert_expr.clone(),
            replace,
            update_expr: cast_value(update_expr)?,
        })
    }
}

/// An upsert clause waiting for its target collection.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertInto {
    prev: Option<Statement>,
    match_expr: Expr,
    insert_expr: Expr,
    replace: bool,
    update_expr: Expr,
}

impl UpsertInto {
    pub fn in_(&self, collection: impl Into<AqlValue>) -> Result<Upsert, AqlError> {
        Ok(Upsert(Statement::Upsert {
            prev: boxed(self.prev.clone()),
            match_expr: self.match_expr.clone(),
            insert_expr: self.insert_expr.clone(),
            replace: self.replace,
            update_expr: self.update_expr.clone(),
            collection: collection_name(collection.into())?,
            options: None,
        }))
    }

    /// Alias for [`UpsertInto::in_`].
    pub fn into_(&self, collection: impl Into<AqlValue>) -> Result<Upsert, AqlError> {
        self.in_(collection)
    }
}
