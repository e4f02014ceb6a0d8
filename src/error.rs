//! Error types for the metacircular evaluator

use thiserror::Error;

/// Evaluation errors
///
/// Every failure aborts the current `evaluate` call; nothing in the evaluator
/// recovers locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Reference to a symbol that no frame binds
    ///
    /// **Triggered by:** Evaluating a symbol absent from every frame of the environment
    /// **Example:** `x` (when x was never bound)
    #[error("Unbound variable: {name}")]
    UnboundVariable {
        /// Symbol name
        name: String,
    },

    /// Read of a `letrec` binding before its initializer has been patched in
    ///
    /// **Triggered by:** An initializer that reads a sibling binding directly instead of
    /// through a closure
    /// **Example:** `(letrec ((a b) (b 1)) a)`
    #[error("Variable used before initialization: {name}")]
    UnassignedVariable {
        /// Symbol name
        name: String,
    },

    /// Operation the evaluator deliberately does not support
    ///
    /// **Triggered by:** `cons` onto a non-list (no dotted pairs), integer overflow
    /// **Example:** `(cons 1 2)`
    #[error("Unsupported operation: {op} - {reason}")]
    UnsupportedOperation {
        /// Operation name
        op: String,
        /// Why it is unsupported
        reason: String,
    },

    /// Parameter/argument count mismatch
    #[error("Arity mismatch: expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Expected argument count (description, e.g. "2")
        expected: String,
        /// Actual argument count
        got: usize,
    },

    /// `car`/`cdr` on the empty list
    #[error("Empty list access: {op} of nil")]
    EmptyListAccess {
        /// Operation name
        op: String,
    },

    /// Type mismatch error
    ///
    /// **Triggered by:** A primitive receiving a value of the wrong type
    /// **Example:** `(+ true 1)`, `(car 5)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Attempt to apply a non-callable value
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Type of the non-callable value
        type_name: String,
    },

    /// Special form or application with an invalid shape
    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    /// Nested evaluation exceeded the configured depth
    #[error("Recursion limit exceeded (max depth: {limit})")]
    RecursionLimit {
        /// Configured maximum depth
        limit: usize,
    },
}

impl Error {
    /// Create an unbound variable error
    pub fn unbound(name: impl Into<String>) -> Self {
        Error::UnboundVariable { name: name.into() }
    }

    /// Create a malformed expression error with a message
    pub fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedExpression(msg.into())
    }

    /// Create a type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(op: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            op: op.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for evaluator operations
pub type Result<T> = std::result::Result<T, Error>;
