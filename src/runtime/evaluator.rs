use std::rc::Rc;

use tracing::{debug, trace};

use crate::ast::Expression;
use crate::error::{Error, Result};
use crate::primitives::global_env;
use crate::runtime::special_forms::SpecialForm;
use crate::runtime::{Environment, Value};

/// Evaluates `expr` against `env` with the default configuration
pub fn evaluate(expr: &Expression, env: &Environment) -> Result<Value> {
    Evaluator::with_environment(env.clone()).evaluate(expr)
}

/// Evaluator configuration
#[derive(Clone, Debug, Default)]
pub struct EvalConfig {
    /// Maximum nesting of `eval` calls. `None` leaves the host stack as the
    /// only bound.
    ///
    /// Each non-tail call in a program costs about three nested `eval`s. On a
    /// 2 MiB thread stack an unoptimized build overflows after roughly 300
    /// such calls, which aborts the process. Set a limit (a few hundred in
    /// debug builds) when evaluating untrusted or deeply recursive programs
    /// to get `Error::RecursionLimit` instead.
    pub max_depth: Option<usize>,
}

/// Evaluator for homoiconic expression trees
///
/// Dispatches numbers, symbols, the special forms `lambda`, `let`, `letrec`,
/// `if` and `define`, and generic application.
pub struct Evaluator {
    /// Top-level environment used by `evaluate` and `execute`
    env: Environment,
    config: EvalConfig,
    /// Current nesting of `eval` calls
    depth: usize,
}

impl Evaluator {
    /// Creates an evaluator over a fresh global environment
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    /// Creates an evaluator over a fresh global environment with custom configuration
    pub fn with_config(config: EvalConfig) -> Self {
        debug!(max_depth = ?config.max_depth, "creating evaluator");
        Evaluator {
            env: global_env(),
            config,
            depth: 0,
        }
    }

    /// Creates an evaluator over a caller-supplied environment
    pub fn with_environment(env: Environment) -> Self {
        Evaluator {
            env,
            config: EvalConfig::default(),
            depth: 0,
        }
    }

    /// Replaces the configuration
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// The top-level environment
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Evaluate one expression in the top-level environment
    pub fn evaluate(&mut self, expr: &Expression) -> Result<Value> {
        let env = self.env.clone();
        self.depth = 0;
        self.eval(expr, &env)
    }

    /// Evaluate top-level forms in order, returning the last value
    ///
    /// An empty program evaluates to `Unit`.
    pub fn execute(&mut self, program: &[Expression]) -> Result<Value> {
        let mut last_val = Value::Unit;

        for expr in program {
            last_val = self.evaluate(expr)?;
        }

        Ok(last_val)
    }

    /// Evaluate an expression in `env`
    pub(crate) fn eval(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        if let Some(limit) = self.config.max_depth {
            if self.depth >= limit {
                return Err(Error::RecursionLimit { limit });
            }
        }

        self.depth += 1;
        let result = self.eval_inner(expr, env);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: &Expression, env: &Environment) -> Result<Value> {
        match expr {
            Expression::Number(n) => Ok(Value::Number(*n)),

            Expression::Symbol(name) => env.lookup_var(name),

            Expression::Sequence(items) => {
                let (head, rest) = items
                    .split_first()
                    .ok_or_else(|| Error::malformed("cannot evaluate an empty sequence"))?;

                if let Some(form) = head.as_symbol().and_then(SpecialForm::from_keyword) {
                    trace!(?form, "special form");
                    return self.eval_special_form(form, expr, env);
                }

                let func = self.eval(head, env)?;
                let args = self.eval_list(rest, env)?;
                self.apply(func, args)
            }
        }
    }

    /// Evaluate each expression left-to-right
    pub(crate) fn eval_list(
        &mut self,
        exprs: &[Expression],
        env: &Environment,
    ) -> Result<Vec<Value>> {
        exprs.iter().map(|e| self.eval(e, env)).collect()
    }

    /// Apply a function value to evaluated arguments
    pub fn apply(&mut self, func: Value, args: Vec<Value>) -> Result<Value> {
        match func {
            Value::Primitive(primitive) => {
                trace!(primitive = primitive.name(), argc = args.len(), "apply primitive");
                primitive.arity().check(args.len())?;
                primitive.call(&args)
            }
            Value::Closure { params, body, env } => self.lambda_apply(&params, &body, &env, args),
            other => Err(Error::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Evaluate a closure body in its captured environment extended with the arguments
    fn lambda_apply(
        &mut self,
        params: &[String],
        body: &Rc<Expression>,
        env: &Environment,
        args: Vec<Value>,
    ) -> Result<Value> {
        trace!(?params, argc = args.len(), "apply closure");
        let new_env = env.extend_env(params, args)?;
        self.eval(body, &new_env)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
