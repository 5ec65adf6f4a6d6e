//! Verdicts and scores
//!
//! Immutable report values returned by every evaluation.

pub mod verdict;

pub use verdict::{Evaluation, Score, Verdict};
