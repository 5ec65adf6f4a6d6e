//! Configuration and shared types
//!
//! Closed outcome taxonomy, error kinds, run overrides and per-task settings.

pub mod task;
pub mod types;
