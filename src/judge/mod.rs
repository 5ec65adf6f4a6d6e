//! Evaluation protocol.
//!
//! An evaluator runs a solution through the execution layer and scores the
//! run. Runs that fail short-circuit to 0.0; runs that succeed are scored
//! either by exact comparison with the reference or by an external checker.
//! Checker misbehavior is always an error, never a score.

pub mod diff;
pub mod evaluator;
pub mod external;
#[cfg(test)]
pub(crate) mod fakes;
pub mod registry;

pub use diff::ExactDiffEvaluator;
pub use evaluator::{evaluate_offline, Evaluator};
pub use external::ExternalCheckerEvaluator;
pub use registry::judge_for;
