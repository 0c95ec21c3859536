//! Clause-chain nodes.
//!
//! A [`Statement`] is one clause of a query plus an ownership link to
//! the clause before it, forming a singly-linked, append-only chain.
//! Serializing any node serializes the whole chain, each clause joined
//! to the previous one by a single space.
//!
//! Legal clause ordering is not enforced here; the typed builder in
//! [`crate::ast::query`] is the only way to grow a chain, and it only
//! offers the continuations that are grammatical at each position.

use crate::ast::Expr;
use crate::error::AqlError;
use crate::output::{escape_identifier, wrap_aql, ToAql};
use crate::value::{cast_value, AqlValue};

use super::expressions::valid_identifier;

/// One clause of a statement chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `FOR var IN expr`
    For {
        prev: Option<Box<Statement>>,
        varname: String,
        expr: Expr,
    },

    /// `FILTER expr`
    Filter {
        prev: Option<Box<Statement>>,
        expr: Expr,
    },

    /// `LET a = x, b = y`
    Let {
        prev: Option<Box<Statement>>,
        dfns: Definitions,
    },

    /// `COLLECT a = x [INTO g [= expr | KEEP a, b]] [OPTIONS {..}]`
    Collect {
        prev: Option<Box<Statement>>,
        dfns: Definitions,
        target: Option<CollectTarget>,
        options: Option<Expr>,
    },

    /// `COLLECT [a = x] WITH COUNT INTO total [OPTIONS {..}]`
    CollectWithCount {
        prev: Option<Box<Statement>>,
        dfns: Option<Definitions>,
        varname: String,
        options: Option<Expr>,
    },

    /// `SORT x ASC, y DESC`
    Sort {
        prev: Option<Box<Statement>>,
        args: Vec<SortArg>,
    },

    /// `LIMIT [offset,] count`
    Limit {
        prev: Option<Box<Statement>>,
        offset: Option<Expr>,
        count: Expr,
    },

    /// `RETURN [DISTINCT] expr`
    Return {
        prev: Option<Box<Statement>>,
        value: Expr,
        distinct: bool,
    },

    /// `REMOVE expr IN collection [OPTIONS {..}]`
    Remove {
        prev: Option<Box<Statement>>,
        expr: Expr,
        collection: String,
        options: Option<Expr>,
    },

    /// `INSERT expr INTO collection [OPTIONS {..}]`
    Insert {
        prev: Option<Box<Statement>>,
        expr: Expr,
        collection: String,
        options: Option<Expr>,
    },

    /// `UPDATE expr [WITH expr] IN collection [OPTIONS {..}]`
    Update {
        prev: Option<Box<Statement>>,
        expr: Expr,
        with_expr: Option<Expr>,
        collection: String,
        options: Option<Expr>,
    },

    /// `REPLACE expr [WITH expr] IN collection [OPTIONS {..}]`
    Replace {
        prev: Option<Box<Statement>>,
        expr: Expr,
        with_expr: Option<Expr>,
        collection: String,
        options: Option<Expr>,
    },

    /// `UPSERT m INSERT i UPDATE|REPLACE u IN collection [OPTIONS {..}]`
    Upsert {
        prev: Option<Box<Statement>>,
        match_expr: Expr,
        insert_expr: Expr,
        replace: bool,
        update_expr: Expr,
        collection: String,
        options: Option<Expr>,
    },
}

/// The INTO target of an aggregation clause; the three forms are
/// mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectTarget {
    /// `INTO groups`
    Var(String),
    /// `INTO groups = expr`
    VarExpr(String, Expr),
    /// `INTO groups KEEP a, b`
    VarKeep(String, Vec<String>),
}

/// One term of a sort list: an expression, or a direction keyword
/// attached to the expression before it.
#[derive(Debug, Clone, PartialEq)]
pub enum SortArg {
    Term(Expr),
    Direction(String),
}

/// A non-empty list of `name = value` definitions for binding and
/// aggregation clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct Definitions(Vec<(String, Expr)>);

impl Definitions {
    pub(crate) fn new(pairs: Vec<(String, AqlValue)>) -> Result<Self, AqlError> {
        if pairs.is_empty() {
            return Err(AqlError::Structural(
                "Expected definitions not to be empty".to_string(),
            ));
        }
        let mut dfns = Vec::with_capacity(pairs.len());
        for (name, value) in pairs {
            dfns.push((valid_identifier(&name)?, cast_value(value)?));
        }
        Ok(Definitions(dfns))
    }

    pub(crate) fn single(name: &str, value: AqlValue) -> Result<Self, AqlError> {
        Self::new(vec![(name.to_string(), value)])
    }
}

impl ToAql for Definitions {
    fn to_aql(&self) -> String {
        let dfns: Vec<String> = self
            .0
            .iter()
            .map(|(name, value)| format!("{} = {}", escape_identifier(name), wrap_aql(value)))
            .collect();
        dfns.join(", ")
    }
}

fn prefix(prev: &Option<Box<Statement>>) -> String {
    match prev {
        Some(statement) => format!("{} ", statement.to_aql()),
        None => String::new(),
    }
}

fn options_suffix(options: &Option<Expr>) -> String {
    match options {
        Some(options) => format!(" OPTIONS {}", wrap_aql(options)),
        None => String::new(),
    }
}

impl ToAql for Statement {
    fn to_aql(&self) -> String {
        match self {
            Statement::For {
                prev,
                varname,
                expr,
            } => format!(
                "{}FOR {} IN {}",
                prefix(prev),
                escape_identifier(varname),
                wrap_aql(expr)
            ),
            Statement::Filter { prev, expr } => {
                format!("{}FILTER {}", prefix(prev), wrap_aql(expr))
            }
            Statement::Let { prev, dfns } => {
                format!("{}LET {}", prefix(prev), dfns.to_aql())
            }
            Statement::Collect {
                prev,
                dfns,
                target,
                options,
            } => {
                let mut out = format!("{}COLLECT {}", prefix(prev), dfns.to_aql());
                match target {
                    Some(CollectTarget::Var(varname)) => {
                        out.push_str(&format!(" INTO {}", escape_identifier(varname)));
                    }
                    Some(CollectTarget::VarExpr(varname, expr)) => {
                        out.push_str(&format!(
                            " INTO {} = {}",
                            escape_identifier(varname),
                            wrap_aql(expr)
                        ));
                    }
                    Some(CollectTarget::VarKeep(varname, keep)) => {
                        let keep: Vec<String> =
                            keep.iter().map(|name| escape_identifier(name)).collect();
                        out.push_str(&format!(
                            " INTO {} KEEP {}",
                            escape_identifier(varname),
                            keep.join(", ")
                        ));
                    }
                    None => {}
                }
                out.push_str(&options_suffix(options));
                out
            }
            Statement::CollectWithCount {
                prev,
                dfns,
                varname,
                options,
            } => {
                let dfns = match dfns {
                    Some(dfns) => format!(" {}", dfns.to_aql()),
                    None => String::new(),
                };
                format!(
                    "{}COLLECT{} WITH COUNT INTO {}{}",
                    prefix(prev),
                    dfns,
                    escape_identifier(varname),
                    options_suffix(options)
                )
            }
            Statement::Sort { prev, args } => {
                let mut terms: Vec<String> = Vec::new();
                for arg in args {
                    match arg {
                        SortArg::Term(expr) => terms.push(wrap_aql(expr)),
                        SortArg::Direction(keyword) => {
                            if let Some(last) = terms.last_mut() {
                                last.push(' ');
                                last.push_str(&keyword.to_ascii_uppercase());
                            }
                        }
                    }
                }
                format!("{}SORT {}", prefix(prev), terms.join(", "))
            }
            Statement::Limit {
                prev,
                offset,
                count,
            } => match offset {
                Some(offset) => format!(
                    "{}LIMIT {}, {}",
                    prefix(prev),
                    wrap_aql(offset),
                    wrap_aql(count)
                ),
                None => format!("{}LIMIT {}", prefix(prev), wrap_aql(count)),
            },
            Statement::Return {
                prev,
                value,
                distinct,
            } => format!(
                "{}RETURN{} {}",
                prefix(prev),
                if *distinct { " DISTINCT" } else { "" },
                wrap_aql(value)
            ),
            Statement::Remove {
                prev,
                expr,
                collection,
                options,
            } => format!(
                "{}REMOVE {} IN {}{}",
                prefix(prev),
                wrap_aql(expr),
                escape_identifier(collection),
                options_suffix(options)
            ),
            Statement::Insert {
                prev,
                expr,
                collection,
                options,
            } => format!(
                "{}INSERT {} INTO {}{}",
                prefix(prev),
                wrap_aql(expr),
                escape_identifier(collection),
                options_suffix(options)
            ),
            Statement::Update {
                prev,
                expr,
                with_expr,
                collection,
                options,
            } => {
                let with_expr = match with_expr {
                    Some(with_expr) => format!(" WITH {}", wrap_aql(with_expr)),
                    None => String::new(),
                };
                format!(
                    "{}UPDATE {}{} IN {}{}",
                    prefix(prev),
                    wrap_aql(expr),
                    with_expr,
                    escape_identifier(collection),
                    options_suffix(options)
                )
            }
            Statement::Replace {
                prev,
                expr,
                with_expr,
                collection,
                options,
            } => {
                let with_expr = match with_expr {
                    Some(with_expr) => format!(" WITH {}", wrap_aql(with_expr)),
                    None => String::new(),
                };
                format!(
                    "{}REPLACE {}{} IN {}{}",
                    prefix(prev),
                    wrap_aql(expr),
                    with_expr,
                    escape_identifier(collection),
                    options_suffix(options)
                )
            }
            Statement::Upsert {
                prev,
                match_expr,
                insert_expr,
                replace,
                update_expr,
                collection,
                options,
            } => format!(
                "{}UPSERT {} INSERT {} {} {} IN {}{}",
                prefix(prev),
                wrap_aql(match_expr),
                wrap_aql(insert_expr),
                if *replace { "REPLACE" } else { "UPDATE" },
                wrap_aql(update_expr),
                escape_identifier(collection),
                options_suffix(options)
            ),
        }
    }
}
