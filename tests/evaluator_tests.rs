//! End-to-end evaluation over the global environment
//!
//! Programs are written as JSON trees and decoded into expressions, the same
//! shape a caller would hand the evaluator.

use metacircular::{evaluate, global_env, Error, Evaluator, Expression, Value};
use serde_json::json;

fn expr(value: serde_json::Value) -> Expression {
    serde_json::from_value(value).expect("valid expression tree")
}

fn run(program: serde_json::Value) -> metacircular::Result<Value> {
    let program: Vec<Expression> = serde_json::from_value(program).expect("valid program");
    Evaluator::new().execute(&program)
}

fn ints(ns: &[i64]) -> Value {
    Value::list(ns.iter().map(|&n| Value::int(n)).collect())
}

#[test]
fn test_number_self_evaluates_in_any_environment() {
    assert_eq!(evaluate(&expr(json!(3)), &global_env()).unwrap(), Value::int(3));
    assert_eq!(
        evaluate(&expr(json!(3)), &metacircular::Environment::new()).unwrap(),
        Value::int(3)
    );
}

#[test]
fn test_unbound_variable() {
    assert_eq!(
        evaluate(&expr(json!("x")), &global_env()),
        Err(Error::UnboundVariable {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_lambda_application() {
    let result = evaluate(
        &expr(json!([["lambda", ["x", "y"], ["+", "x", "y"]], 3, 2])),
        &global_env(),
    );
    assert_eq!(result.unwrap(), Value::int(5));
}

#[test]
fn test_hand_built_tree_matches_decoded_tree() {
    let built = Expression::list(vec![
        Expression::list(vec![
            Expression::sym("lambda"),
            Expression::list(vec![Expression::sym("x"), Expression::sym("y")]),
            Expression::list(vec![
                Expression::sym("+"),
                Expression::sym("x"),
                Expression::sym("y"),
            ]),
        ]),
        Expression::int(3),
        Expression::int(2),
    ]);
    let decoded = expr(json!([["lambda", ["x", "y"], ["+", "x", "y"]], 3, 2]));

    assert_eq!(built, decoded);
    assert_eq!(
        evaluate(&built, &global_env()).unwrap(),
        evaluate(&decoded, &global_env()).unwrap()
    );
}

#[test]
fn test_list_primitives() {
    let env = global_env();
    let pair = json!(["cons", 1, ["cons", 2, "nil"]]);

    assert_eq!(evaluate(&expr(pair.clone()), &env).unwrap(), ints(&[1, 2]));
    assert_eq!(
        evaluate(&expr(json!(["car", pair.clone()])), &env).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        evaluate(&expr(json!(["cdr", pair])), &env).unwrap(),
        ints(&[2])
    );
    assert_eq!(
        evaluate(&expr(json!(["null?", "nil"])), &env).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate(&expr(json!(["null?", ["list", 1]])), &env).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_cons_onto_non_list_is_unsupported() {
    let result = evaluate(&expr(json!(["cons", 1, 2])), &global_env());
    assert!(matches!(result, Err(Error::UnsupportedOperation { ref op, .. }) if op == "cons"));
}

#[test]
fn test_car_cdr_of_nil() {
    let env = global_env();
    assert_eq!(
        evaluate(&expr(json!(["car", "nil"])), &env),
        Err(Error::EmptyListAccess {
            op: "car".to_string()
        })
    );
    assert_eq!(
        evaluate(&expr(json!(["cdr", "nil"])), &env),
        Err(Error::EmptyListAccess {
            op: "cdr".to_string()
        })
    );
}

#[test]
fn test_list_is_variadic() {
    assert_eq!(
        evaluate(&expr(json!(["list", 1, ["+", 1, 1], 3])), &global_env()).unwrap(),
        ints(&[1, 2, 3])
    );
    assert_eq!(
        evaluate(&expr(json!(["list"])), &global_env()).unwrap(),
        Value::nil()
    );
}

#[test]
fn test_closure_arity_mismatch_is_an_error() {
    // Missing arguments are never padded with a placeholder
    let result = evaluate(
        &expr(json!([["lambda", ["x", "y"], "x"], 1])),
        &global_env(),
    );
    assert_eq!(
        result,
        Err(Error::ArityMismatch {
            expected: "2".to_string(),
            got: 1
        })
    );
}

#[test]
fn test_primitive_arity_mismatch_is_an_error() {
    let result = evaluate(&expr(json!(["car", "nil", "nil"])), &global_env());
    assert_eq!(
        result,
        Err(Error::ArityMismatch {
            expected: "1".to_string(),
            got: 2
        })
    );
}

#[test]
fn test_comparisons_and_equality() {
    let env = global_env();
    let cases = [
        (json!([">", 3, 2]), true),
        (json!([">=", 2, 3]), false),
        (json!(["<", 1, 2.5]), true),
        (json!(["<=", 2, 2]), true),
        (json!(["==", ["list", 1, 2], ["cons", 1, ["cons", 2, "nil"]]]), true),
        (json!(["==", "true", "false"]), false),
    ];
    for (source, expected) in cases {
        assert_eq!(
            evaluate(&expr(source.clone()), &env).unwrap(),
            Value::Bool(expected),
            "{}",
            source
        );
    }
}

#[test]
fn test_closures_see_later_definitions() {
    let result = run(json!([
        ["define", ["f", "n"], ["g", "n"]],
        ["define", ["g", "n"], ["*", "n", 10]],
        ["f", 4]
    ]));
    assert_eq!(result.unwrap(), Value::int(40));
}

#[test]
fn test_rebinding_is_seen_by_existing_closures() {
    let result = run(json!([
        ["define", "scale", 2],
        ["define", ["scaled", "n"], ["*", "n", "scale"]],
        ["define", "scale", 3],
        ["scaled", 5]
    ]));
    assert_eq!(result.unwrap(), Value::int(15));
}

#[test]
fn test_define_inside_body_does_not_leak() {
    let mut evaluator = Evaluator::new();
    let program: Vec<Expression> = serde_json::from_value(json!([
        ["define", ["f"], ["define", "local", 1]],
        ["f"]
    ]))
    .unwrap();
    assert_eq!(evaluator.execute(&program).unwrap(), Value::Unit);
    assert!(matches!(
        evaluator.evaluate(&expr(json!("local"))),
        Err(Error::UnboundVariable { .. })
    ));
}

#[test]
fn test_primitives_can_be_redefined() {
    let result = run(json!([
        ["define", "+", "*"],
        ["+", 3, 4]
    ]));
    assert_eq!(result.unwrap(), Value::int(12));
}

#[test]
fn test_display_of_results() {
    let env = global_env();
    let list = evaluate(&expr(json!(["list", 1, ["list", 2, 3]])), &env).unwrap();
    assert_eq!(list.to_string(), "(1 (2 3))");

    let closure = evaluate(&expr(json!(["lambda", ["a", "b"], "a"])), &env).unwrap();
    assert_eq!(closure.to_string(), "#<closure (a b)>");

    let car = evaluate(&expr(json!("car")), &env).unwrap();
    assert_eq!(car.to_string(), "#<primitive car>");
}
