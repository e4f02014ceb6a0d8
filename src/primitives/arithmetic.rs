//! Arithmetic and comparison primitives

use std::cmp::Ordering;

use crate::ast::Number;
use crate::error::{Error, Result};
use crate::primitives::{fixed_args, Primitive, PrimitiveTable};
use crate::runtime::{Frame, Value};

/// Frame with `+ - * > >= < <= ==`
pub fn frame() -> Frame {
    let mut table = PrimitiveTable::new();
    register(&mut table);
    table.into_frame()
}

/// Register arithmetic and comparison primitives
pub fn register(table: &mut PrimitiveTable) {
    table.register(Arithmetic {
        name: "+",
        int_op: i64::checked_add,
        float_op: |a, b| a + b,
    });
    table.register(Arithmetic {
        name: "-",
        int_op: i64::checked_sub,
        float_op: |a, b| a - b,
    });
    table.register(Arithmetic {
        name: "*",
        int_op: i64::checked_mul,
        float_op: |a, b| a * b,
    });
    table.register(Comparison {
        name: ">",
        accepts: Ordering::is_gt,
    });
    table.register(Comparison {
        name: ">=",
        accepts: Ordering::is_ge,
    });
    table.register(Comparison {
        name: "<",
        accepts: Ordering::is_lt,
    });
    table.register(Comparison {
        name: "<=",
        accepts: Ordering::is_le,
    });
    table.register(Equal);
}

/// Binary numeric operation
///
/// Two ints stay int (overflow is an error, there is no bignum fallback);
/// anything involving a float is computed in floating point.
pub struct Arithmetic {
    name: &'static str,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
}

impl Primitive for Arithmetic {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [a, b] = fixed_args::<2>(args)?;
        let (a, b) = (a.as_number()?, b.as_number()?);
        let result = match (a, b) {
            (Number::Int(x), Number::Int(y)) => {
                Number::Int((self.int_op)(x, y).ok_or_else(|| {
                    Error::unsupported(self.name, format!("integer overflow on {} and {}", x, y))
                })?)
            }
            (x, y) => Number::Float((self.float_op)(x.as_f64(), y.as_f64())),
        };
        Ok(Value::Number(result))
    }
}

/// Numeric ordering test
pub struct Comparison {
    name: &'static str,
    accepts: fn(Ordering) -> bool,
}

impl Primitive for Comparison {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [a, b] = fixed_args::<2>(args)?;
        let (a, b) = (a.as_number()?, b.as_number()?);
        // NaN compares false under every ordering
        let holds = a.numeric_cmp(b).map(self.accepts).unwrap_or(false);
        Ok(Value::Bool(holds))
    }
}

/// `==`: structural equality on any two values
pub struct Equal;

impl Primitive for Equal {
    fn name(&self) -> &str {
        "=="
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [a, b] = fixed_args::<2>(args)?;
        Ok(Value::Bool(a == b))
    }
}
