//! Homoiconic expression trees
//!
//! Code and list data share one shape: a number, a symbol, or an ordered
//! sequence of expressions. The serde representation mirrors that shape
//! directly, so `[["lambda", ["x"], "x"], 1]` in JSON decodes to the
//! application `((lambda (x) x) 1)`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Native numeric literal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// 64-bit integer
    Int(i64),
    /// 64-bit floating-point value
    Float(f64),
}

impl Number {
    /// Widens to a float for mixed-type arithmetic and comparison
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Numeric equality across int/float (`1 == 1.0`)
    pub fn numeric_eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }

    /// Numeric ordering; `None` only when a NaN is involved
    pub fn numeric_cmp(self, other: Number) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{:?}", x),
        }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    /// Self-evaluating numeric literal
    Number(Number),
    /// Identifier or special-form keyword
    Symbol(String),
    /// Ordered sequence; the empty sequence is nil
    Sequence(Vec<Expression>),
}

impl Expression {
    /// Integer literal
    pub fn int(n: i64) -> Self {
        Expression::Number(Number::Int(n))
    }

    /// Float literal
    pub fn float(x: f64) -> Self {
        Expression::Number(Number::Float(x))
    }

    /// Symbol
    pub fn sym(name: impl Into<String>) -> Self {
        Expression::Symbol(name.into())
    }

    /// Sequence of expressions
    pub fn list(items: Vec<Expression>) -> Self {
        Expression::Sequence(items)
    }

    /// Returns the symbol name if this is a symbol
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expression::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence
    pub fn as_sequence(&self) -> Option<&[Expression]> {
        match self {
            Expression::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<i64> for Expression {
    fn from(n: i64) -> Self {
        Expression::int(n)
    }
}

impl From<f64> for Expression {
    fn from(x: f64) -> Self {
        Expression::float(x)
    }
}

impl From<&str> for Expression {
    fn from(name: &str) -> Self {
        Expression::sym(name)
    }
}

impl From<Vec<Expression>> for Expression {
    fn from(items: Vec<Expression>) -> Self {
        Expression::Sequence(items)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(n) => write!(f, "{}", n),
            Expression::Symbol(name) => write!(f, "{}", name),
            Expression::Sequence(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
