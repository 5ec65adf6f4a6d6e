/// Programs living in a task directory: lookup, compilation, execution
use crate::config::types::{JudgeError, Result, RunOutcome};
use crate::exec::executor::{run_process, OutputSink, ProcessIo, ProcessLimits, ProcessResult};
use crate::exec::languages::adapter_for_source;
use crate::exec::runner::CheckerRunner;
use crate::utils::paths::{build_dir, resolve_extension};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for a single compiler invocation
const COMPILE_TIMEOUT: Duration = Duration::from_secs(60);

/// A program identified by name inside a task directory.
///
/// The source is found by extension on first use and compiled once; the
/// resulting launch command is cached for the lifetime of the handle.
#[derive(Debug)]
pub struct Program {
    task_dir: PathBuf,
    name: String,
    launch: OnceCell<Vec<String>>,
}

impl Program {
    pub fn new(task_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            task_dir: task_dir.into(),
            name: name.into(),
            launch: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task_dir(&self) -> &Path {
        &self.task_dir
    }

    /// Resolve the source file and build it. Returns the launch command.
    pub fn compile(&self) -> Result<Vec<String>> {
        let filename = resolve_extension(&self.task_dir, &self.name).ok_or_else(|| {
            JudgeError::Program(format!(
                "Program {} does not exist in {}",
                self.name,
                self.task_dir.display()
            ))
        })?;
        let source = self.task_dir.join(&filename);
        let adapter = adapter_for_source(&source)?;

        let target = build_dir(&self.task_dir).join(artifact_name(&filename));
        let artifact = match adapter.compile_command(&source, &target) {
            Some(command) => {
                std::fs::create_dir_all(build_dir(&self.task_dir))?;
                log::info!("Compiling {} ({})", filename, adapter.language());
                let io = ProcessIo {
                    stdout: OutputSink::Capture,
                    stderr: OutputSink::Capture,
                    ..ProcessIo::default()
                };
                let result = run_process(
                    &command,
                    &io,
                    &ProcessLimits::with_wall_time(Some(COMPILE_TIMEOUT)),
                )?;
                if !result.success() {
                    return Err(JudgeError::Program(format!(
                        "Program {} failed to compile ({}): {}",
                        self.name,
                        result.outcome,
                        result.stderr_lossy().trim()
                    )));
                }
                target
            }
            None => source,
        };

        Ok(adapter.run_command(&artifact))
    }

    /// Launch command, compiling on first call only
    pub fn compile_if_needed(&self) -> Result<&[String]> {
        self.launch
            .get_or_try_init(|| self.compile())
            .map(Vec::as_slice)
    }

    fn command_with(&self, args: &[String]) -> Result<Vec<String>> {
        let mut command = self.compile_if_needed()?.to_vec();
        command.extend_from_slice(args);
        Ok(command)
    }

    /// Run with explicit stream wiring and limits
    pub fn run_with(
        &self,
        args: &[String],
        io: &ProcessIo,
        limits: &ProcessLimits,
    ) -> Result<ProcessResult> {
        let command = self.command_with(args)?;
        run_process(&command, io, limits)
    }

    /// Run attached to the caller's terminal, without redirections or limits
    pub fn run(&self, args: &[String]) -> Result<RunOutcome> {
        let result = self.run_with(args, &ProcessIo::inherit(), &ProcessLimits::unlimited())?;
        Ok(result.outcome)
    }
}

impl CheckerRunner for Program {
    fn run_captured(&self, args: &[String], timeout: Option<Duration>) -> Result<ProcessResult> {
        self.run_with(
            args,
            &ProcessIo::captured(),
            &ProcessLimits::with_wall_time(timeout),
        )
    }
}

/// Executable name for a source file: the file name without its extension
fn artifact_name(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_missing_program() {
        let dir = task_with(&[]);
        let program = Program::new(dir.path(), "solve");
        match program.compile_if_needed() {
            Err(JudgeError::Program(msg)) => assert!(msg.contains("solve")),
            other => panic!("expected program error, got {:?}", other),
        }
    }

    #[test]
    fn test_interpreted_program_runs_source_in_place() {
        let dir = task_with(&[("echo.sh", "echo \"$@\"\n")]);
        let program = Program::new(dir.path(), "echo");
        let launch = program.compile_if_needed().unwrap();
        assert_eq!(launch.last().map(String::as_str), dir.path().join("echo.sh").to_str());
        assert!(!build_dir(dir.path()).exists());
    }

    #[test]
    fn test_run_captured_passes_arguments() {
        let dir = task_with(&[("echo.sh", "echo \"$1|$2\"\necho note >&2\nexit 4\n")]);
        let program = Program::new(dir.path(), "echo");
        let result = program
            .run_captured(&["a b".to_string(), "c".to_string()], None)
            .unwrap();

        assert_eq!(result.stdout_lossy(), "a b|c\n");
        assert_eq!(result.stderr_lossy(), "note\n");
        assert_eq!(result.exit_code, Some(4));
        assert_eq!(result.outcome, RunOutcome::NonzeroExitCode);
    }

    #[test]
    fn test_run_reports_outcome() {
        let dir = task_with(&[("ok.sh", "exit 0\n"), ("fail.sh", "exit 1\n")]);
        assert_eq!(Program::new(dir.path(), "ok").run(&[]).unwrap(), RunOutcome::Ok);
        assert_eq!(
            Program::new(dir.path(), "fail").run(&[]).unwrap(),
            RunOutcome::NonzeroExitCode
        );
    }

    #[test]
    fn test_artifact_name() {
        assert_eq!(artifact_name("solve_6b.cpp"), "solve_6b");
        assert_eq!(artifact_name("gen.c"), "gen");
    }
}
