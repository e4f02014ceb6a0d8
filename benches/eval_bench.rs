use criterion::{black_box, criterion_group, criterion_main, Criterion};
use metacircular::{evaluate, global_env, Expression};
use serde_json::json;

// Each iteration leaks the letrec frame and its closure through an Rc cycle,
// so resident memory grows for the length of the run.
fn letrec_factorial_benchmark(c: &mut Criterion) {
    let expr: Expression = serde_json::from_value(json!([
        "letrec",
        [[
            "fact",
            ["lambda", ["n"], ["if", ["<", "n", 1], 1, ["*", "n", ["fact", ["-", "n", 1]]]]]
        ]],
        ["fact", 20]
    ]))
    .unwrap();
    let env = global_env();

    c.bench_function("letrec factorial 20", |b| {
        b.iter(|| evaluate(black_box(&expr), &env).unwrap())
    });
}

fn lambda_application_benchmark(c: &mut Criterion) {
    let expr: Expression =
        serde_json::from_value(json!([["lambda", ["x", "y"], ["+", "x", "y"]], 3, 2])).unwrap();
    let env = global_env();

    c.bench_function("apply lambda", |b| {
        b.iter(|| evaluate(black_box(&expr), &env).unwrap())
    });
}

criterion_group!(benches, letrec_factorial_benchmark, lambda_application_benchmark);
criterion_main!(benches);
