//! Reserved keywords and the builtin function registry.
//!
//! Both tables are plain data, initialized once and never mutated, so
//! they are safe to share across any number of concurrent callers. The
//! [`Registry`] validates argument counts against a builtin's arity
//! alternatives before a function-call node is created, and routes the
//! deprecation diagnostic for flagged entries through an injectable
//! handler (the default handler logs through `tracing`).

use std::collections::HashMap;

use crate::ast::Expr;
use crate::error::AqlError;
use crate::functions::BUILTINS;
use crate::value::AqlValue;

/// Reserved words that force backtick-escaping when used as identifiers.
pub const KEYWORDS: &[&str] = &[
    "asc", "collect", "desc", "distinct", "false", "filter", "for", "in", "insert", "into", "new",
    "let", "limit", "old", "null", "remove", "replace", "return", "sort", "true", "update", "with",
];

/// Case-insensitive reserved-keyword check.
pub fn is_keyword(value: &str) -> bool {
    KEYWORDS.contains(&value.to_ascii_lowercase().as_str())
}

/// One alternative of an arity specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments
    Exactly(usize),
    /// Between `min` and `max` arguments, inclusive
    Between(usize, usize),
    /// At least this many arguments (variadic)
    AtLeast(usize),
}

impl Arity {
    pub fn matches(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::Between(min, max) => count >= min && count <= max,
            Arity::AtLeast(min) => count >= min,
        }
    }
}

/// A builtin function entry: its name, its arity alternatives and
/// whether calling it should emit a deprecation diagnostic.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: &'static [Arity],
    pub deprecated: bool,
}

fn check_arity(name: &str, arity: &[Arity], count: usize) -> Result<(), AqlError> {
    if arity.iter().any(|alternative| alternative.matches(count)) {
        Ok(())
    } else {
        Err(AqlError::ArityMismatch(format!(
            "Invalid number of arguments for function {}: {}",
            name, count
        )))
    }
}

/// The sink deprecation diagnostics are routed through.
pub type DeprecationHandler = Box<dyn Fn(&str) + Send + Sync>;

/// The read-only name → arity-spec table plus a deprecation channel.
pub struct Registry {
    builtins: HashMap<&'static str, &'static Builtin>,
    deprecation_handler: DeprecationHandler,
}

impl Registry {
    /// A registry whose deprecation diagnostics go to `tracing::warn!`.
    pub fn new() -> Self {
        Self::with_deprecation_handler(Box::new(|message| tracing::warn!("{}", message)))
    }

    /// A registry with a caller-supplied deprecation handler, letting
    /// embedders capture, redirect or suppress the diagnostic.
    pub fn with_deprecation_handler(handler: DeprecationHandler) -> Self {
        Registry {
            builtins: BUILTINS.iter().map(|builtin| (builtin.name, builtin)).collect(),
            deprecation_handler: handler,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name).copied()
    }

    /// Validate the argument count for `name` and build the call node.
    ///
    /// Accepts when any arity alternative matches. Deprecated entries
    /// additionally emit a non-fatal diagnostic; the returned node is
    /// unaffected by it.
    pub fn call(&self, name: &str, args: Vec<AqlValue>) -> Result<Expr, AqlError> {
        let builtin = self.builtins.get(name).ok_or_else(|| {
            AqlError::MalformedToken(format!("Unknown builtin function: {}", name))
        })?;
        check_arity(builtin.name, builtin.arity, args.len())?;
        if builtin.deprecated {
            (self.deprecation_handler)(&format!("The AQL function {} is deprecated", name));
        }
        Expr::function_call(name, args)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// A user-defined function with an optional arity specification.
///
/// Built via [`crate::fn_`]; calling it validates the argument count
/// (when a spec was given) and the `name::spaced` function-name grammar
/// before producing a call node.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFunction {
    name: String,
    arity: Option<Vec<Arity>>,
}

impl CustomFunction {
    pub fn new(name: &str, arity: Option<Vec<Arity>>) -> Result<Self, AqlError> {
        // Validate the name up front so every later call is cheap.
        Expr::function_call(name, Vec::new())?;
        Ok(CustomFunction {
            name: name.to_string(),
            arity,
        })
    }

    pub fn call<I>(&self, args: I) -> Result<Expr, AqlError>
    where
        I: IntoIterator,
        I::Item: Into<AqlValue>,
    {
        let args: Vec<AqlValue> = args.into_iter().map(Into::into).collect();
        if let Some(arity) = &self.arity {
            check_arity(&self.name, arity, args.len())?;
        }
        Expr::function_call(&self.name, args)
    }
}

#[test]
fn test_arity_matching() {
    assert!(Arity::Exactly(2).matches(2));
    assert!(!Arity::Exactly(2).matches(3));
    assert!(Arity::Between(3, 7).matches(3));
    assert!(Arity::Between(3, 7).matches(7));
    assert!(!Arity::Between(3, 7).matches(8));
    assert!(Arity::AtLeast(1).matches(100));
    assert!(!Arity::AtLeast(1).matches(0));
}

#[test]
fn test_is_keyword() {
    assert!(is_keyword("for"));
    assert!(is_keyword("RETURN"));
    assert!(!is_keyword("x"));
}
