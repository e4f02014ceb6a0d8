//! List primitives: `null?`, `cons`, `car`, `cdr`, `list`
//!
//! Lists are proper only. There are no dotted pairs, so `cons` demands a list
//! as its second argument.

use crate::error::{Error, Result};
use crate::primitives::{fixed_args, Arity, Primitive, PrimitiveTable};
use crate::runtime::{Frame, Value};

/// Frame with `nil` and the list primitives
pub fn frame() -> Frame {
    let mut table = PrimitiveTable::new();
    register(&mut table);
    table.into_frame()
}

/// Register list primitives
pub fn register(table: &mut PrimitiveTable) {
    table.bind("nil", Value::nil());
    table.register(NullP);
    table.register(Cons);
    table.register(Car);
    table.register(Cdr);
    table.register(List);
}

/// `(null? x)` - true iff x is the empty list
pub struct NullP;

impl Primitive for NullP {
    fn name(&self) -> &str {
        "null?"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [x] = fixed_args::<1>(args)?;
        Ok(Value::Bool(x.is_nil()))
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }
}

/// `(cons a b)` - prepend a to the list b
pub struct Cons;

impl Primitive for Cons {
    fn name(&self) -> &str {
        "cons"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [head, tail] = fixed_args::<2>(args)?;
        let tail = match tail {
            Value::List(items) => items,
            other => {
                return Err(Error::unsupported(
                    "cons",
                    format!("second argument must be a list, got {}", other.type_name()),
                ))
            }
        };

        let mut items = Vec::with_capacity(tail.len() + 1);
        items.push(head.clone());
        items.extend(tail.iter().cloned());
        Ok(Value::list(items))
    }
}

/// `(car list)` - first element
pub struct Car;

impl Primitive for Car {
    fn name(&self) -> &str {
        "car"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [list] = fixed_args::<1>(args)?;
        list.as_list()?
            .first()
            .cloned()
            .ok_or_else(|| Error::EmptyListAccess {
                op: "car".to_string(),
            })
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }
}

/// `(cdr list)` - all but the first element
pub struct Cdr;

impl Primitive for Cdr {
    fn name(&self) -> &str {
        "cdr"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        let [list] = fixed_args::<1>(args)?;
        match list.as_list()? {
            [] => Err(Error::EmptyListAccess {
                op: "cdr".to_string(),
            }),
            [_, rest @ ..] => Ok(Value::list(rest.to_vec())),
        }
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }
}

/// `(list a b ...)` - collect arguments into a list
pub struct List;

impl Primitive for List {
    fn name(&self) -> &str {
        "list"
    }

    fn call(&self, args: &[Value]) -> Result<Value> {
        Ok(Value::list(args.to_vec()))
    }

    fn arity(&self) -> Arity {
        Arity::Variadic
    }
}
