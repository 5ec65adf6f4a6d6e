//! scorebox: scoring contestant programs for competitive-programming tasks
//!
//! A solution is run on an input file, then its output is scored in
//! [0.0, 1.0] together with a verdict explaining the score.
//!
//! # Architecture
//!
//! ## Evaluation ([`judge`])
//! - [`judge::evaluator`]: Evaluator trait and the shared run-then-score skeleton
//! - [`judge::diff`]: Exact line comparison against a reference output
//! - [`judge::external`]: Scoring delegated to a checker program
//! - [`judge::registry`]: Evaluator selection from the task configuration
//!
//! ## Verdict ([`verdict`])
//! - [`verdict::verdict`]: Verdict, Score and Evaluation value types
//!
//! ## Execution ([`exec`])
//! - [`exec::executor`]: Process spawning with wall clock and memory limits
//! - [`exec::languages`]: Per-language compile and run commands
//! - [`exec::program`]: Programs of a task directory, compiled once
//! - [`exec::solution`]: Solutions run on input files
//! - [`exec::generator`]: Online and offline test generators
//! - [`exec::runner`]: Contracts the evaluators see the execution layer through
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: Run outcomes, run configuration, error kinds
//! - [`config::task`]: Per-task `scorebox.json`
//!
//! ## Utilities ([`utils`])
//! - [`utils::compare`]: Line-oriented output comparison
//! - [`utils::paths`]: Task directory layout and file naming
//!
//! # Checker protocol
//!
//! A checker is called as `checker <input> [<reference>] <output>`. It must
//! exit with 0 and print the score on the first line of stdout; the first
//! line of stderr becomes the verdict message. Anything else fails the
//! evaluation with an error rather than a score.

// Evaluation
pub mod judge;

// Verdict
pub mod verdict;

// Execution
pub mod exec;

// Configuration
pub mod config;

// Utilities
pub mod utils;

// CLI entrypoint for the scorebox binary
pub mod cli;

// Re-export commonly used types for convenience
pub use config::types::*;
pub use judge::{judge_for, Evaluator, ExactDiffEvaluator, ExternalCheckerEvaluator};
pub use verdict::{Evaluation, Score, Verdict};
