//! Property-based tests for the evaluator
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. Integer arithmetic through the evaluator agrees with native arithmetic
//! 2. `list` followed by `car`/`cdr` recovers the elements
//! 3. `let` and an immediate lambda application are interchangeable
//! 4. Arbitrary small trees never panic the evaluator

use metacircular::{evaluate, global_env, Error, EvalConfig, Evaluator, Expression, Value};
use proptest::prelude::*;

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Arithmetic trees over small integers, paired with their expected value
fn arith_expr() -> impl Strategy<Value = (Expression, i64)> {
    let leaf = (-10i64..10).prop_map(|n| (Expression::int(n), n));
    // At most 8 leaves, so products stay far from overflow
    leaf.prop_recursive(3, 16, 2, |inner| {
        (
            prop_oneof![Just("+"), Just("-"), Just("*")],
            inner.clone(),
            inner,
        )
            .prop_map(|(op, (a, x), (b, y))| {
                let value = match op {
                    "+" => x + y,
                    "-" => x - y,
                    _ => x * y,
                };
                (Expression::list(vec![Expression::sym(op), a, b]), value)
            })
    })
}

/// Arbitrary expression trees built from a small vocabulary
fn any_expr() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        (-10i64..10).prop_map(Expression::int),
        prop_oneof![
            Just("x"),
            Just("nil"),
            Just("true"),
            Just("car"),
            Just("cons"),
            Just("+"),
            Just("lambda"),
            Just("let"),
            Just("letrec"),
            Just("if"),
            Just("define"),
        ]
        .prop_map(Expression::sym),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(Expression::list)
    })
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn arithmetic_matches_native((expr, expected) in arith_expr()) {
        let result = evaluate(&expr, &global_env()).unwrap();
        prop_assert_eq!(result, Value::int(expected));
    }

    #[test]
    fn list_car_cdr_recover_elements(items in prop::collection::vec(-1000i64..1000, 1..10)) {
        let mut call = vec![Expression::sym("list")];
        call.extend(items.iter().map(|&n| Expression::int(n)));
        let list_expr = Expression::list(call);

        let env = global_env();
        let car = evaluate(&Expression::list(vec![Expression::sym("car"), list_expr.clone()]), &env).unwrap();
        let cdr = evaluate(&Expression::list(vec![Expression::sym("cdr"), list_expr]), &env).unwrap();

        prop_assert_eq!(car, Value::int(items[0]));
        prop_assert_eq!(cdr, Value::list(items[1..].iter().map(|&n| Value::int(n)).collect()));
    }

    #[test]
    fn let_equals_immediate_application(a in -50i64..50, b in -50i64..50) {
        let body = Expression::list(vec![Expression::sym("-"), Expression::sym("p"), Expression::sym("q")]);
        let let_form = Expression::list(vec![
            Expression::sym("let"),
            Expression::list(vec![
                Expression::list(vec![Expression::sym("p"), Expression::int(a)]),
                Expression::list(vec![Expression::sym("q"), Expression::int(b)]),
            ]),
            body.clone(),
        ]);
        let application = Expression::list(vec![
            Expression::list(vec![
                Expression::sym("lambda"),
                Expression::list(vec![Expression::sym("p"), Expression::sym("q")]),
                body,
            ]),
            Expression::int(a),
            Expression::int(b),
        ]);

        let env = global_env();
        prop_assert_eq!(evaluate(&let_form, &env).unwrap(), evaluate(&application, &env).unwrap());
    }

    #[test]
    fn evaluator_never_panics(expr in any_expr()) {
        // Any outcome is fine as long as it is a value or a typed error.
        // Self-application like ((lambda (x) (x x)) ...) is reachable, so bound the depth.
        let mut evaluator = Evaluator::with_environment(global_env()).config(EvalConfig {
            max_depth: Some(256),
        });
        let _: Result<Value, Error> = evaluator.evaluate(&expr);
    }
}
