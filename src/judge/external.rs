use crate::config::types::{JudgeError, Result, RunConfig, RunOutcome};
use crate::exec::executor::ProcessResult;
use crate::exec::program::Program;
use crate::exec::runner::{CheckerRunner, SolutionRunner};
use crate::judge::evaluator::{evaluate_offline, Evaluator};
use crate::utils::paths::path_string;
use crate::verdict::{Evaluation, Score, Verdict};
use std::path::Path;
use std::time::Duration;

/// Delegates scoring to a checker program.
///
/// The checker is called as `checker <input> [<reference>] <output>` and must
/// exit with 0, print the score in [0.0, 1.0] on the first line of stdout and
/// may print a comment on the first line of stderr. Anything else is an
/// error carrying the checker's exit code and streams.
#[derive(Debug)]
pub struct ExternalCheckerEvaluator<C: CheckerRunner = Program> {
    checker: C,
    timeout: Option<Duration>,
}

impl<C: CheckerRunner> ExternalCheckerEvaluator<C> {
    pub fn new(checker: C) -> Self {
        Self {
            checker,
            timeout: None,
        }
    }

    /// Kill the checker after `timeout`; a checker that hits it fails the evaluation
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    fn score_output(
        &self,
        input: &Path,
        reference: Option<&Path>,
        output: &Path,
    ) -> Result<Evaluation> {
        let args = checker_args(input, reference, output);
        let result = self.checker.run_captured(&args, self.timeout)?;
        interpret_checker_result(&result, self.timeout)
    }
}

impl<C: CheckerRunner> Evaluator for ExternalCheckerEvaluator<C> {
    fn evaluate(
        &self,
        solution: &dyn SolutionRunner,
        input: &Path,
        reference: Option<&Path>,
        run_config: Option<&RunConfig>,
    ) -> Result<Evaluation> {
        evaluate_offline(
            |output| self.score_output(input, reference, output),
            solution,
            input,
            run_config,
        )
    }
}

/// Positional checker arguments; the reference slot is omitted, not left empty
pub fn checker_args(input: &Path, reference: Option<&Path>, output: &Path) -> Vec<String> {
    let mut args = Vec::with_capacity(3);
    args.push(path_string(input));
    if let Some(reference) = reference {
        args.push(path_string(reference));
    }
    args.push(path_string(output));
    args
}

/// Apply the checker protocol to a finished checker run
pub fn interpret_checker_result(
    result: &ProcessResult,
    timeout: Option<Duration>,
) -> Result<Evaluation> {
    if let (RunOutcome::Timeout, Some(limit)) = (result.outcome, timeout) {
        return Err(JudgeError::CheckerTimeout { limit });
    }

    let stdout = result.stdout_lossy();
    let stderr = result.stderr_lossy();

    if result.exit_code != Some(0) {
        return Err(JudgeError::CheckerFailed {
            exit_code: result.exit_code,
            stdout,
            stderr,
        });
    }

    let score = parse_score(&stdout)?;
    let message = first_line(&stderr).to_string();
    Ok(Evaluation::new(
        score,
        Verdict::new(RunOutcome::Ok, Some(message)),
    ))
}

/// Score from the first stdout line. Surrounding whitespace is allowed.
pub fn parse_score(stdout: &str) -> Result<Score> {
    let value: f64 = first_line(stdout)
        .trim()
        .parse()
        .map_err(|_| JudgeError::ScoreParse {
            raw: stdout.to_string(),
        })?;
    Score::try_from(value)
}

/// Text before the first `\n`, or all of it
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or("")
}
