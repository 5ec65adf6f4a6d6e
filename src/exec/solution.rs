/// Contestant solutions: run on an input file, output stored under data/
use crate::config::task::DEFAULT_TIMEOUT_SECS;
use crate::config::types::{JudgeError, Result, RunConfig, RunOutcome};
use crate::exec::executor::{OutputSink, ProcessIo, ProcessLimits, StdinSource};
use crate::exec::program::Program;
use crate::exec::runner::{SolutionRun, SolutionRunner};
use crate::utils::paths::{data_dir, is_directly_in, output_name, tagged_output_name};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug)]
pub struct Solution {
    program: Program,
}

impl Solution {
    pub fn new(task_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            program: Program::new(task_dir, name),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Where the output for `input` is written.
    ///
    /// Inputs inside `data/` give `data/<stem>.<solution>.out`; inputs from
    /// anywhere else carry a tag of their directory, so distinct
    /// (solution, input) pairs never share a file. Two concurrent runs of
    /// the same pair do share one and must not overlap.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let data = data_dir(self.program.task_dir());
        let name = if is_directly_in(input, &data) {
            output_name(input, self.program.name())
        } else {
            tagged_output_name(input, self.program.name())
        };
        data.join(name)
    }

    fn limits(config: &RunConfig) -> Result<ProcessLimits> {
        let memory_limit_bytes = match config.memory_limit_mb {
            Some(mb) => Some(mb.checked_mul(1024 * 1024).ok_or_else(|| {
                JudgeError::Config(format!("memory limit of {} MB is too large", mb))
            })?),
            None => None,
        };
        Ok(ProcessLimits {
            wall_time: Some(
                config
                    .timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            ),
            memory_limit_bytes,
        })
    }
}

impl SolutionRunner for Solution {
    fn name(&self) -> &str {
        self.program.name()
    }

    /// Feed `input` on stdin and store stdout in the data directory.
    /// The output path is only handed back when the run finished with `Ok`.
    fn run_on_file(&self, input: &Path, config: &RunConfig) -> Result<SolutionRun> {
        let limits = Self::limits(config)?;
        std::fs::create_dir_all(data_dir(self.program.task_dir()))?;
        let output = self.output_path(input);

        let io = ProcessIo {
            stdin: StdinSource::File(input.to_path_buf()),
            stdout: OutputSink::File(output.clone()),
            stderr: OutputSink::Capture,
        };
        let result = self.program.run_with(&[], &io, &limits)?;

        if result.outcome != RunOutcome::Ok {
            log::debug!(
                "{} on {}: {} after {:?}, stderr: {}",
                self.program.name(),
                input.display(),
                result.outcome,
                result.wall_time,
                result.stderr_lossy().trim()
            );
            return Ok(SolutionRun {
                outcome: result.outcome,
                output: None,
            });
        }

        Ok(SolutionRun {
            outcome: RunOutcome::Ok,
            output: Some(output),
        })
    }
}
