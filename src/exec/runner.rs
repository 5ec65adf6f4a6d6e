use crate::config::types::{Result, RunConfig, RunOutcome};
use crate::exec::executor::ProcessResult;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result of running a solution on one input file
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionRun {
    pub outcome: RunOutcome,
    /// Output artifact; present exactly when `outcome` is `Ok`
    pub output: Option<PathBuf>,
}

/// Execution-layer contract the evaluators rely on for solutions.
pub trait SolutionRunner: Send + Sync {
    fn name(&self) -> &str;
    fn run_on_file(&self, input: &Path, config: &RunConfig) -> Result<SolutionRun>;
}

/// Execution-layer contract the evaluators rely on for checker programs.
pub trait CheckerRunner: Send + Sync {
    /// Run with positional `args`, capturing stdout, stderr and the exit code
    fn run_captured(&self, args: &[String], timeout: Option<Duration>) -> Result<ProcessResult>;
}
