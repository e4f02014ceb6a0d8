//! Evaluates `((lambda (x y) (+ x y)) 3 2)` and prints the result.
//!
//! An expression tree may also be passed as JSON on the command line:
//!
//! ```text
//! cargo run --example apply_lambda -- '[["lambda", ["n"], ["*", "n", "n"]], 7]'
//! ```

use anyhow::Context;
use metacircular::{evaluate, global_env, Expression};

fn main() -> anyhow::Result<()> {
    let source = std::env::args()
        .nth(1)
        .unwrap_or_else(|| r#"[["lambda", ["x", "y"], ["+", "x", "y"]], 3, 2]"#.to_string());

    let expr: Expression =
        serde_json::from_str(&source).context("expression must be a JSON expression tree")?;

    let result = evaluate(&expr, &global_env()).with_context(|| format!("evaluating {}", expr))?;
    println!("{}", result);

    Ok(())
}
