//! Execution layer
//!
//! Compiles and runs task programs with limits, and classifies how they ended.
//! Evaluators only see it through the [`runner`] traits.

pub mod adapter;
pub mod executor;
pub mod generator;
pub mod languages;
pub mod program;
pub mod runner;
pub mod solution;
