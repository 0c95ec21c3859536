/// Errors raised while constructing query nodes.
///
/// Every fallible constructor in this crate fails with `AqlError` and
/// nothing else, so callers can catch malformed query construction
/// separately from unrelated failures. Validation happens synchronously
/// at construction time: a node that exists always serializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AqlError {
    /// A literal received a non-finite number or a value of the wrong shape
    MalformedLiteral(String),

    /// An identifier, reference, keyword or function name failed its pattern
    MalformedToken(String),

    /// An empty or malformed definitions, sort or keep list
    Structural(String),

    /// A function call whose argument count matches no allowed alternative
    ArityMismatch(String),

    /// A host value that cannot be used in this position
    UnsupportedValue(String),
}

impl std::fmt::Display for AqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AqlError::MalformedLiteral(msg) => write!(f, "Malformed literal: {}", msg),
            AqlError::MalformedToken(msg) => write!(f, "Malformed token: {}", msg),
            AqlError::Structural(msg) => write!(f, "Structural error: {}", msg),
            AqlError::ArityMismatch(msg) => write!(f, "Arity mismatch: {}", msg),
            AqlError::UnsupportedValue(msg) => write!(f, "Unsupported value: {}", msg),
        }
    }
}

impl std::error::Error for AqlError {}
