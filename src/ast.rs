//! # AQL Abstract Syntax Tree
//!
//! This module defines the node types produced by the query builder and
//! the typed clause-chain machinery that composes them.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[expressions]** - Expression nodes (literals, references,
//!   operations, function calls) and their operator methods
//! - **[operators]** - Unary, binary and n-ary operator sets
//! - **[statements]** - Clause-chain nodes and their serialization
//! - **[query]** - The [`PartialStatement`] continuation set and the
//!   typestate structs that enforce clause grammar
//!
//! ## Core Concepts
//!
//! Every node is immutable once built; builder methods borrow their
//! receiver and return fresh nodes, so any prefix of a query can be
//! shared between unrelated constructions. Validation happens when a
//! node is created, never when it is serialized: `to_aql` is total on
//! every node that exists.
//!
//! A chain like
//!
//! ```text
//! FOR x IN [1, 2, 3] FILTER (x > 1) RETURN x
//! ```
//!
//! is built clause by clause, each clause holding the one before it:
//!
//! ```
//! use aqb::{for_, PartialStatement, ToAql};
//!
//! let q = for_("x")
//!     .in_(vec![1, 2, 3])?
//!     .filter(aqb::ref_("x")?.gt(1)?)?
//!     .return_("x")?;
//! assert_eq!(q.to_aql(), "FOR x IN [1, 2, 3] FILTER (x > 1) RETURN x");
//! # Ok::<(), aqb::AqlError>(())
//! ```

pub mod expressions;
pub mod operators;
pub mod query;
pub mod statements;

pub use expressions::{Expr, Then};
pub use operators::{BinaryOp, NaryOp, UnaryOp};
pub use query::{
    Collect, CollectInto, CollectIntoExpr, CollectKeep, CollectWithCount, Filter, For, ForIn,
    Insert, InsertInto, Let, Limit, PartialStatement, Remove, RemoveInto, Replace, ReplaceInto,
    ReplaceWithInto, Return, Sort, Update, UpdateInto, UpdateWithInto, Upsert, UpsertInsert,
    UpsertInto, UpsertUpdate,
};
pub use statements::{CollectTarget, Definitions, SortArg, Statement};
