//! # metacircular
//!
//! A metacircular evaluator for a minimal Scheme-like language. Programs are
//! homoiconic expression trees (numbers, symbols, nested sequences) that the
//! caller builds directly or decodes from JSON; there is no textual reader.
//!
//! The language has numeric literals, variable references, application, and
//! five special forms: `lambda`, `let`, `letrec`, `if`, `define`.
//!
//! ```rust
//! use metacircular::{evaluate, global_env, Expression, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let expr: Expression = serde_json::from_str(
//!     r#"[["lambda", ["x", "y"], ["+", "x", "y"]], 3, 2]"#,
//! )?;
//!
//! let result = evaluate(&expr, &global_env())?;
//! assert_eq!(result, Value::int(5));
//! # Ok(())
//! # }
//! ```
//!
//! ## Environments
//!
//! An [`Environment`] is a chain of shared, mutable [`Frame`]s. Closures hold
//! the environment they were created in by reference, so a later `define` or a
//! `letrec` patch is visible through every closure sharing those frames:
//!
//! ```rust
//! use metacircular::{Evaluator, Expression, Value};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let program: Vec<Expression> = serde_json::from_value(json!([
//!     ["define", ["f"], ["g"]],
//!     ["define", ["g"], 7],
//!     ["f"]
//! ]))?;
//!
//! let mut evaluator = Evaluator::new();
//! assert_eq!(evaluator.execute(&program)?, Value::int(7));
//! # Ok(())
//! # }
//! ```
//!
//! ## Global environment
//!
//! [`global_env`] composes three frames, searched in this order:
//!
//! - lists: `nil`, `null?`, `cons`, `car`, `cdr`, `list`
//! - arithmetic and comparison: `+ - * > >= < <= ==`
//! - booleans: `true`, `false`
//!
//! ## Errors
//!
//! Evaluation is fail-fast: the first [`Error`] aborts the whole `evaluate`
//! call.
//!
//! ```rust
//! use metacircular::{evaluate, global_env, Error, Expression};
//!
//! let expr = Expression::list(vec![
//!     Expression::sym("cons"),
//!     Expression::int(1),
//!     Expression::int(2),
//! ]);
//! match evaluate(&expr, &global_env()) {
//!     Err(Error::UnsupportedOperation { op, .. }) => assert_eq!(op, "cons"),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

/// Version of the evaluator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod error;
pub mod primitives;
pub mod runtime;

// Re-export main types
pub use ast::{Expression, Number};
pub use error::{Error, Result};
pub use primitives::{global_env, Arity, Primitive, PrimitiveTable};
pub use runtime::{evaluate, EvalConfig, Environment, Evaluator, Frame, SpecialForm, Value};
