use std::fmt;
use std::rc::Rc;

use crate::ast::{Expression, Number};
use crate::error::{Error, Result};
use crate::primitives::Primitive;
use crate::runtime::Environment;

/// Runtime value representation
#[derive(Clone)]
pub enum Value {
    /// Native number
    Number(Number),
    /// Boolean value
    Bool(bool),
    /// List of values (reference-counted)
    List(Rc<Vec<Value>>),

    /// Lambda function value (closure)
    Closure {
        /// Parameter names
        params: Rc<Vec<String>>,
        /// Body expression
        body: Rc<Expression>,
        /// Environment active when the closure was created. Shared, not copied:
        /// later `define`s and `letrec` patches into its frames are visible here.
        env: Environment,
    },

    /// Native operation reachable through the environment
    Primitive(Rc<dyn Primitive>),

    /// Result of `define`; carries no usable value
    Unit,
    /// Placeholder held by a `letrec` binding until its initializer is patched in
    Unassigned,
}

impl Value {
    /// Creates an integer value
    pub fn int(n: i64) -> Self {
        Value::Number(Number::Int(n))
    }

    /// Creates a float value
    pub fn float(x: f64) -> Self {
        Value::Number(Number::Float(x))
    }

    /// Creates a list value from a vector of values
    pub fn list(values: Vec<Value>) -> Self {
        Value::List(Rc::new(values))
    }

    /// The empty list
    pub fn nil() -> Self {
        Value::List(Rc::new(Vec::new()))
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> String {
        match self {
            Value::Number(Number::Int(_)) => "int".to_string(),
            Value::Number(Number::Float(_)) => "float".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Closure { .. } => "closure".to_string(),
            Value::Primitive(_) => "primitive".to_string(),
            Value::Unit => "unit".to_string(),
            Value::Unassigned => "unassigned".to_string(),
        }
    }

    /// Returns true if the value selects the `then` branch of an `if`
    ///
    /// Only `false`, `Unit` and the letrec placeholder are falsy; `0` and the
    /// empty list are truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Unit | Value::Unassigned)
    }

    /// Converts value to a number
    pub fn as_number(&self) -> Result<Number> {
        match self {
            Value::Number(n) => Ok(*n),
            _ => Err(Error::type_mismatch("number", self.type_name())),
        }
    }

    /// Returns the list elements
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Value::List(items) => Ok(items),
            _ => Err(Error::type_mismatch("list", self.type_name())),
        }
    }

    /// Returns true for the empty list
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::List(items) if items.is_empty())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.numeric_eq(*b),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (
                Value::Closure {
                    body: b1, env: e1, ..
                },
                Value::Closure {
                    body: b2, env: e2, ..
                },
            ) => Rc::ptr_eq(b1, b2) && e1.ptr_eq(e2),
            (Value::Primitive(a), Value::Primitive(b)) => Rc::ptr_eq(a, b),
            (Value::Unit, Value::Unit) => true,
            (Value::Unassigned, Value::Unassigned) => true,
            _ => false,
        }
    }
}

// Closures are printed without their environment: a recursive closure's
// environment contains the closure itself.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({:?})", n),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Closure { params, body, .. } => f
                .debug_struct("Closure")
                .field("params", params)
                .field("body", &body.to_string())
                .finish_non_exhaustive(),
            Value::Primitive(p) => write!(f, "Primitive({})", p.name()),
            Value::Unit => write!(f, "Unit"),
            Value::Unassigned => write!(f, "Unassigned"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Closure { params, .. } => write!(f, "#<closure ({})>", params.join(" ")),
            Value::Primitive(p) => write!(f, "#<primitive {}>", p.name()),
            Value::Unit => write!(f, "#<unspecified>"),
            Value::Unassigned => write!(f, "#<unassigned>"),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}
