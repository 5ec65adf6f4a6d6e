use crate::config::types::{JudgeError, Result, RunConfig};
use crate::exec::runner::SolutionRunner;
use crate::judge::evaluator::{evaluate_offline, Evaluator};
use crate::utils::compare::files_are_equal;
use crate::verdict::Evaluation;
use std::path::Path;

/// Full score when the output matches the reference line by line.
///
/// Whitespace at either end of a line is ignored, the number of lines is
/// not. No partial credit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactDiffEvaluator;

impl ExactDiffEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ExactDiffEvaluator {
    fn evaluate(
        &self,
        solution: &dyn SolutionRunner,
        input: &Path,
        reference: Option<&Path>,
        run_config: Option<&RunConfig>,
    ) -> Result<Evaluation> {
        // Checked before the run so a misconfigured task never executes anything
        let reference = reference.ok_or_else(|| {
            JudgeError::Config(format!(
                "diff evaluation of {} on {} needs a reference output",
                solution.name(),
                input.display()
            ))
        })?;

        evaluate_offline(
            |output| {
                if files_are_equal(output, reference)? {
                    Ok(Evaluation::accepted())
                } else {
                    Ok(Evaluation::wrong_answer())
                }
            },
            solution,
            input,
            run_config,
        )
    }
}
