use thiserror::Error;

/// Errors raised by the arithmetic layers and the text front end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyError {
    /// The text does not follow the coefficient/monomial/polynomial notation.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Division by, or inversion of, the additive identity.
    #[error("division by zero")]
    DivideByZero,
    /// A value that would break a data-model invariant was rejected at construction.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// A fixed-width coefficient left its representable range.
    #[error("overflow in {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, PolyError>;
