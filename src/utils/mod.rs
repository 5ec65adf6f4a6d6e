//! Utilities
//!
//! Output comparison and task directory bookkeeping.

pub mod compare;
pub mod paths;
