use crate::config::types::{JudgeError, Result, RunConfig};
use crate::exec::runner::SolutionRunner;
use crate::verdict::Evaluation;
use std::path::Path;

/// Evaluator contract: turn one run of a solution into a score and verdict.
///
/// Implementations hold no per-call state, so one instance serves every
/// (solution, input) pair of a task.
pub trait Evaluator: Send + Sync {
    /// Run `solution` on `input` and score the result.
    ///
    /// `reference` is the known-correct output, if the task has one.
    /// `run_config` is handed to the execution layer untouched; `None`
    /// means the default configuration.
    fn evaluate(
        &self,
        solution: &dyn SolutionRunner,
        input: &Path,
        reference: Option<&Path>,
        run_config: Option<&RunConfig>,
    ) -> Result<Evaluation>;
}

/// Shared two-phase skeleton of every evaluator.
///
/// Runs the solution; a run that did not end with `Ok` scores 0.0 with its
/// outcome as the verdict and `score_output` is never called. Otherwise the
/// produced output file goes to `score_output`, whose result is returned
/// as is.
pub fn evaluate_offline<F>(
    score_output: F,
    solution: &dyn SolutionRunner,
    input: &Path,
    run_config: Option<&RunConfig>,
) -> Result<Evaluation>
where
    F: FnOnce(&Path) -> Result<Evaluation>,
{
    let default_config = RunConfig::default();
    let run = solution.run_on_file(input, run_config.unwrap_or(&default_config))?;

    if !run.outcome.is_ok() {
        return Ok(Evaluation::failed_run(run.outcome));
    }

    let output = run.output.ok_or_else(|| {
        JudgeError::Process(format!(
            "{} finished with OK on {} but produced no output file",
            solution.name(),
            input.display()
        ))
    })?;

    score_output(&output)
}
