//! Runtime: environments, values, and the `eval`/`apply` core

mod environment;
mod evaluator;
mod special_forms;
mod value;

pub use environment::{Environment, Frame};
pub use evaluator::{evaluate, EvalConfig, Evaluator};
pub use special_forms::SpecialForm;
pub use value::Value;
