//! In-memory stand-ins for the execution layer, used by evaluator tests

use crate::config::types::{Result, RunConfig, RunOutcome};
use crate::exec::executor::ProcessResult;
use crate::exec::runner::{CheckerRunner, SolutionRun, SolutionRunner};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Solution returning a fixed run, recording every call
pub struct FakeSolution {
    run: SolutionRun,
    calls: Mutex<Vec<(PathBuf, RunConfig)>>,
}

impl FakeSolution {
    pub fn new(run: SolutionRun) -> Self {
        Self {
            run,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(output: impl Into<PathBuf>) -> Self {
        Self::new(SolutionRun {
            outcome: RunOutcome::Ok,
            output: Some(output.into()),
        })
    }

    pub fn failing(outcome: RunOutcome) -> Self {
        Self::new(SolutionRun {
            outcome,
            output: None,
        })
    }

    /// Reports `Ok` without an output file
    pub fn broken_contract() -> Self {
        Self::new(SolutionRun {
            outcome: RunOutcome::Ok,
            output: None,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn seen_inputs(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn seen_configs(&self) -> Vec<RunConfig> {
        self.calls.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }
}

impl SolutionRunner for FakeSolution {
    fn name(&self) -> &str {
        "fake"
    }

    fn run_on_file(&self, input: &Path, config: &RunConfig) -> Result<SolutionRun> {
        self.calls
            .lock()
            .unwrap()
            .push((input.to_path_buf(), config.clone()));
        Ok(self.run.clone())
    }
}

/// Checker answering with canned exit code and streams, recording arguments
pub struct FakeChecker {
    exit_code: Option<i32>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    outcome_override: Option<RunOutcome>,
    calls: Mutex<Vec<(Vec<String>, Option<Duration>)>>,
}

impl FakeChecker {
    pub fn new(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
            outcome_override: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Checker that did not finish within its limit
    pub fn timed_out() -> Self {
        Self {
            exit_code: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
            outcome_override: Some(RunOutcome::Timeout),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().iter().map(|(a, _)| a.clone()).collect()
    }

    pub fn timeouts(&self) -> Vec<Option<Duration>> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

impl CheckerRunner for FakeChecker {
    fn run_captured(&self, args: &[String], timeout: Option<Duration>) -> Result<ProcessResult> {
        self.calls.lock().unwrap().push((args.to_vec(), timeout));
        let outcome = self.outcome_override.unwrap_or(match self.exit_code {
            Some(0) => RunOutcome::Ok,
            Some(_) => RunOutcome::NonzeroExitCode,
            None => RunOutcome::Signaled,
        });
        Ok(ProcessResult {
            outcome,
            exit_code: self.exit_code,
            signal: None,
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
            wall_time: Duration::ZERO,
        })
    }
}
