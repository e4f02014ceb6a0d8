//! Primitive table
//!
//! Native operations exposed to programs as callable values, and the frames
//! that compose the global environment.

pub mod arithmetic;
pub mod lists;

use crate::error::{Error, Result};
use crate::runtime::{Environment, Frame, Value};
use std::collections::HashMap;
use std::rc::Rc;

/// Number of arguments a primitive accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments
    Exact(usize),
    /// Any number of arguments
    Variadic,
}

impl Arity {
    /// Fails with `ArityMismatch` when `got` is not accepted
    pub fn check(self, got: usize) -> Result<()> {
        match self {
            Arity::Exact(n) if n != got => Err(Error::ArityMismatch {
                expected: n.to_string(),
                got,
            }),
            _ => Ok(()),
        }
    }
}

/// Primitive trait - every native operation implements this
pub trait Primitive {
    /// Name the primitive is bound to
    fn name(&self) -> &str;

    /// Invoke the native operation. Fails with `ArityMismatch` on a wrong
    /// argument count.
    fn call(&self, args: &[Value]) -> Result<Value>;

    /// Accepted argument count
    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }
}

/// Borrows exactly `N` arguments, or fails with `ArityMismatch`
pub(crate) fn fixed_args<const N: usize>(args: &[Value]) -> Result<&[Value; N]> {
    args.try_into().map_err(|_| Error::ArityMismatch {
        expected: N.to_string(),
        got: args.len(),
    })
}

/// Builder for one frame of the global environment
#[derive(Default)]
pub struct PrimitiveTable {
    entries: HashMap<String, Value>,
}

impl PrimitiveTable {
    /// Creates an empty table
    pub fn new() -> Self {
        PrimitiveTable::default()
    }

    /// Register a primitive under its own name
    pub fn register<P: Primitive + 'static>(&mut self, primitive: P) {
        let name = primitive.name().to_string();
        self.entries.insert(name, Value::Primitive(Rc::new(primitive)));
    }

    /// Bind a plain value (e.g. `nil`)
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Check if a name is registered
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all registered names
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    /// Finish into a frame
    pub fn into_frame(self) -> Frame {
        Frame::from_bindings(self.entries)
    }
}

/// Frame holding `true` and `false`
pub fn boolean_frame() -> Frame {
    let mut table = PrimitiveTable::new();
    table.bind("true", Value::Bool(true));
    table.bind("false", Value::Bool(false));
    table.into_frame()
}

/// Builds a fresh global environment
///
/// Lookup order: list primitives, then arithmetic/comparison primitives, then
/// booleans.
pub fn global_env() -> Environment {
    Environment::from_frames(vec![
        lists::frame(),
        arithmetic::frame(),
        boolean_frame(),
    ])
}
