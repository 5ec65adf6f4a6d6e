/// Process execution with wall-clock and memory limits
use crate::config::types::{JudgeError, Result, RunOutcome};
use nix::sys::resource::{setrlimit, Resource};
use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use std::fs::File;
use std::io::Read;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Interval between `try_wait` polls while a limited process runs
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Where a child's stdin comes from
#[derive(Debug, Clone, Default)]
pub enum StdinSource {
    #[default]
    Null,
    Inherit,
    File(PathBuf),
}

/// Where a child's stdout/stderr goes
#[derive(Debug, Clone, Default)]
pub enum OutputSink {
    #[default]
    Capture,
    Inherit,
    Null,
    File(PathBuf),
}

/// Stream wiring for one process run
#[derive(Debug, Clone, Default)]
pub struct ProcessIo {
    pub stdin: StdinSource,
    pub stdout: OutputSink,
    pub stderr: OutputSink,
}

impl ProcessIo {
    /// Inherit all three streams from the parent
    pub fn inherit() -> Self {
        Self {
            stdin: StdinSource::Inherit,
            stdout: OutputSink::Inherit,
            stderr: OutputSink::Inherit,
        }
    }

    /// No stdin, stdout and stderr collected into memory
    pub fn captured() -> Self {
        Self::default()
    }
}

/// Limits applied to one process run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessLimits {
    /// Wall-clock limit; the whole process group is killed when exceeded
    pub wall_time: Option<Duration>,
    /// RLIMIT_AS applied in the child before exec
    pub memory_limit_bytes: Option<u64>,
}

impl ProcessLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_wall_time(wall_time: Option<Duration>) -> Self {
        Self {
            wall_time,
            memory_limit_bytes: None,
        }
    }
}

/// What happened to a finished process
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
    pub outcome: RunOutcome,
    /// Exit code, absent when the process died by a signal
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    /// Captured stdout (empty unless the sink was `Capture`)
    pub stdout: Vec<u8>,
    /// Captured stderr (empty unless the sink was `Capture`)
    pub stderr: Vec<u8>,
    pub wall_time: Duration,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

fn stdin_for(source: &StdinSource) -> Result<Stdio> {
    Ok(match source {
        StdinSource::Null => Stdio::null(),
        StdinSource::Inherit => Stdio::inherit(),
        StdinSource::File(path) => Stdio::from(File::open(path)?),
    })
}

fn sink_for(sink: &OutputSink) -> Result<Stdio> {
    Ok(match sink {
        OutputSink::Capture => Stdio::piped(),
        OutputSink::Inherit => Stdio::inherit(),
        OutputSink::Null => Stdio::null(),
        OutputSink::File(path) => Stdio::from(File::create(path)?),
    })
}

fn spawn_reader<R: Read + Send + 'static>(stream: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    stream.map(|mut stream| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = stream.read_to_end(&mut buffer);
            buffer
        })
    })
}

fn join_reader(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}

/// Run `command` (program followed by its arguments) to completion.
///
/// A process that outlives `limits.wall_time` is killed together with its
/// process group and reported as [`RunOutcome::Timeout`]. Failing to spawn
/// is an error; anything the process does after that is an outcome.
pub fn run_process(
    command: &[String],
    io: &ProcessIo,
    limits: &ProcessLimits,
) -> Result<ProcessResult> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| JudgeError::Config("Empty command provided".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(stdin_for(&io.stdin)?)
        .stdout(sink_for(&io.stdout)?)
        .stderr(sink_for(&io.stderr)?);

    // Own process group so a timeout also takes down anything the program forked.
    // Only when limited: a foreground program must keep the terminal.
    if limits.wall_time.is_some() {
        cmd.process_group(0);
    }

    if let Some(memory_limit) = limits.memory_limit_bytes {
        unsafe {
            cmd.pre_exec(move || {
                setrlimit(Resource::RLIMIT_AS, memory_limit, memory_limit).map_err(|e| {
                    std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("setrlimit failed: {}", e),
                    )
                })
            });
        }
    }

    log::debug!("Spawning {:?} with limits {:?}", command, limits);
    let start = Instant::now();
    let mut child = cmd
        .spawn()
        .map_err(|e| JudgeError::Process(format!("Failed to start {}: {}", program, e)))?;

    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let (status, timed_out) = wait_with_timeout(&mut child, limits.wall_time, start)?;
    let wall_time = start.elapsed();

    let stdout = join_reader(stdout_handle);
    let stderr = join_reader(stderr_handle);

    let outcome = if timed_out {
        RunOutcome::Timeout
    } else {
        classify_exit(&status)
    };

    log::debug!(
        "{} finished: {} (exit code {:?}, signal {:?}) in {:?}",
        program,
        outcome,
        status.code(),
        status.signal(),
        wall_time
    );

    Ok(ProcessResult {
        outcome,
        exit_code: status.code(),
        signal: status.signal(),
        stdout,
        stderr,
        wall_time,
    })
}

/// Map an exit status onto the closed outcome set
pub fn classify_exit(status: &ExitStatus) -> RunOutcome {
    match status.code() {
        Some(0) => RunOutcome::Ok,
        Some(_) => RunOutcome::NonzeroExitCode,
        None => RunOutcome::Signaled,
    }
}

/// Poll the child until it exits or the limit passes. Returns the exit
/// status and whether the limit was hit.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
    start: Instant,
) -> Result<(ExitStatus, bool)> {
    let timeout = match timeout {
        Some(timeout) => timeout,
        None => return Ok((child.wait()?, false)),
    };

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok((status, false));
        }

        if start.elapsed() >= timeout {
            log::debug!("Process {} exceeded {:?}, killing", child.id(), timeout);
            terminate_group(child);
            let status = child.wait()?;
            return Ok((status, true));
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn terminate_group(child: &mut Child) {
    let pgid = Pid::from_raw(child.id() as i32);
    if let Err(e) = killpg(pgid, Signal::SIGKILL) {
        log::warn!("killpg({}) failed: {}, killing child only", pgid, e);
        let _ = child.kill();
    }
}
