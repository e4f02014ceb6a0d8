//! Special forms: `lambda`, `let`, `letrec`, `if`, `define`
//!
//! `let` and `letrec` are rewritten into an immediate application of a
//! `lambda`, so both share the closure application path.

use std::rc::Rc;

use tracing::debug;

use crate::ast::Expression;
use crate::error::{Error, Result};
use crate::runtime::{Environment, Evaluator, Value};

/// Keyword recognized at the head of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(lambda params body)`
    Lambda,
    /// `(let ((p a) ...) body)`
    Let,
    /// `(letrec ((p a) ...) body)`
    Letrec,
    /// `(if cond then else)`
    If,
    /// `(define var val)` / `(define (var params...) body)`
    Define,
}

impl SpecialForm {
    /// Recognizes a special-form keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "lambda" => Some(SpecialForm::Lambda),
            "let" => Some(SpecialForm::Let),
            "letrec" => Some(SpecialForm::Letrec),
            "if" => Some(SpecialForm::If),
            "define" => Some(SpecialForm::Define),
            _ => None,
        }
    }

    /// The keyword as written
    pub fn keyword(self) -> &'static str {
        match self {
            SpecialForm::Lambda => "lambda",
            SpecialForm::Let => "let",
            SpecialForm::Letrec => "letrec",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
        }
    }
}

/// Parameter names and initializer expressions of a `let`/`letrec` binding list
struct Bindings<'a> {
    params: Vec<String>,
    inits: Vec<&'a Expression>,
}

impl Evaluator {
    pub(crate) fn eval_special_form(
        &mut self,
        form: SpecialForm,
        expr: &Expression,
        env: &Environment,
    ) -> Result<Value> {
        let items = expr.as_sequence().unwrap_or_default();
        match form {
            SpecialForm::Lambda => eval_lambda(items, env),
            SpecialForm::Let => self.eval_let(items, env),
            SpecialForm::Letrec => self.eval_letrec(items, env),
            SpecialForm::If => self.eval_if(items, env),
            SpecialForm::Define => self.eval_define(items, env),
        }
    }

    /// (let ((x v)...) body) - evaluated as ((lambda (x...) body) v...)
    ///
    /// Initializers run in the outer environment and cannot see each other.
    fn eval_let(&mut self, items: &[Expression], env: &Environment) -> Result<Value> {
        let (bindings, body) = parse_binding_form(SpecialForm::Let, items)?;
        let application = immediate_application(&bindings, body);
        self.eval(&application, env)
    }

    /// (letrec ((f v)...) body) - two-phase binding for self and mutual recursion
    fn eval_letrec(&mut self, items: &[Expression], env: &Environment) -> Result<Value> {
        let (bindings, body) = parse_binding_form(SpecialForm::Letrec, items)?;

        // Phase 1: every name is bound to a placeholder in a fresh frame
        let placeholders = vec![Value::Unassigned; bindings.params.len()];
        let ext_env = env.extend_env(&bindings.params, placeholders)?;

        // Phase 2: initializers see that frame, so closures created here capture it
        let mut values = Vec::with_capacity(bindings.inits.len());
        for init in &bindings.inits {
            values.push(self.eval(init, &ext_env)?);
        }
        debug!(names = ?bindings.params, "letrec patching placeholders");
        ext_env.patch_head_frame(&bindings.params, values)?;

        let application = immediate_application(&bindings, body);
        self.eval(&application, &ext_env)
    }

    /// (if cond then else) - evaluates exactly one branch
    fn eval_if(&mut self, items: &[Expression], env: &Environment) -> Result<Value> {
        let [_, cond, then_branch, else_branch] = items else {
            return Err(Error::malformed(format!(
                "if expects (if cond then else), got {} parts",
                items.len()
            )));
        };

        if self.eval(cond, env)?.is_truthy() {
            self.eval(then_branch, env)
        } else {
            self.eval(else_branch, env)
        }
    }

    /// (define var value) / (define (var params...) body)
    ///
    /// Rebinds in place when some frame already binds `var`; otherwise
    /// prepends a new frame to `env` itself.
    fn eval_define(&mut self, items: &[Expression], env: &Environment) -> Result<Value> {
        let [_, target, value_expr] = items else {
            return Err(Error::malformed(format!(
                "define expects 2 arguments, got {}",
                items.len().saturating_sub(1)
            )));
        };

        let (name, value_expr) = match target {
            Expression::Symbol(name) => (name.clone(), value_expr.clone()),
            Expression::Sequence(signature) => {
                let (name, params) = signature
                    .split_first()
                    .ok_or_else(|| Error::malformed("define requires a function name"))?;
                let name = name
                    .as_symbol()
                    .ok_or_else(|| Error::malformed("define requires a function name"))?;
                let lambda = Expression::list(vec![
                    Expression::sym(SpecialForm::Lambda.keyword()),
                    Expression::list(params.to_vec()),
                    value_expr.clone(),
                ]);
                (name.to_string(), lambda)
            }
            Expression::Number(_) => {
                return Err(Error::malformed("define requires a variable name"));
            }
        };

        let existing = env.lookup_var_ref(&name);
        let value = self.eval(&value_expr, env)?;
        debug!(name = %name, rebind = existing.is_some(), "define");

        match existing {
            Some(frame) => frame.set(name, value),
            None => env.extend_env_in_place(&[name], vec![value])?,
        }
        Ok(Value::Unit)
    }
}

/// (lambda params body) - captures `env` by reference; body is not evaluated
fn eval_lambda(items: &[Expression], env: &Environment) -> Result<Value> {
    let [_, params, body] = items else {
        return Err(Error::malformed(format!(
            "lambda expects (lambda params body), got {} parts",
            items.len()
        )));
    };

    Ok(Value::Closure {
        params: Rc::new(parse_params(params)?),
        body: Rc::new(body.clone()),
        env: env.clone(),
    })
}

fn parse_params(params: &Expression) -> Result<Vec<String>> {
    let params = params
        .as_sequence()
        .ok_or_else(|| Error::malformed("lambda parameters must be a list"))?;

    params
        .iter()
        .map(|p| {
            p.as_symbol()
                .map(str::to_string)
                .ok_or_else(|| Error::malformed(format!("parameter must be a symbol, got {}", p)))
        })
        .collect()
}

/// Splits `(let ((p a) ...) body)` into names, initializers and body
fn parse_binding_form(
    form: SpecialForm,
    items: &[Expression],
) -> Result<(Bindings<'_>, &Expression)> {
    let [_, binding_list, body] = items else {
        return Err(Error::malformed(format!(
            "{} expects ({} ((var value)...) body), got {} parts",
            form.keyword(),
            form.keyword(),
            items.len()
        )));
    };

    let pairs = binding_list.as_sequence().ok_or_else(|| {
        Error::malformed(format!("{} requires a bindings list", form.keyword()))
    })?;

    let mut bindings = Bindings {
        params: Vec::with_capacity(pairs.len()),
        inits: Vec::with_capacity(pairs.len()),
    };
    for pair in pairs {
        match pair.as_sequence() {
            Some([Expression::Symbol(name), init]) => {
                bindings.params.push(name.clone());
                bindings.inits.push(init);
            }
            _ => {
                return Err(Error::malformed(format!(
                    "{} bindings must be pairs: (var value), got {}",
                    form.keyword(),
                    pair
                )))
            }
        }
    }

    Ok((bindings, body))
}

/// Builds ((lambda (p...) body) a...)
fn immediate_application(bindings: &Bindings<'_>, body: &Expression) -> Expression {
    let lambda = Expression::list(vec![
        Expression::sym(SpecialForm::Lambda.keyword()),
        Expression::list(
            bindings
                .params
                .iter()
                .map(|p| Expression::sym(p.as_str()))
                .collect(),
        ),
        body.clone(),
    ]);

    let mut application = Vec::with_capacity(bindings.inits.len() + 1);
    application.push(lambda);
    application.extend(bindings.inits.iter().map(|init| (*init).clone()));
    Expression::list(application)
}
