/// Test input generators
use crate::config::types::Result;
use crate::exec::executor::{OutputSink, ProcessIo, ProcessLimits};
use crate::exec::program::Program;
use crate::utils::paths::path_string;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Exclusive upper bound for randomly drawn seeds (four hex digits)
pub const RANDOM_SEED_BOUND: u64 = 16 * 16 * 16 * 16;

/// Generator run on request: one input per (seed, subtask), written to stdout.
///
/// Invoked as `<generator> <subtask> <seed in lowercase hex>`.
#[derive(Debug)]
pub struct OnlineGenerator {
    program: Program,
}

impl OnlineGenerator {
    pub fn new(task_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            program: Program::new(task_dir, name),
        }
    }

    /// Write the input for `(seed, subtask)` into `output_file`.
    /// Returns whether the generator exited with code 0.
    pub fn generate(
        &self,
        output_file: &Path,
        seed: u64,
        subtask: u32,
        timeout: Option<Duration>,
    ) -> Result<bool> {
        let args = vec![subtask.to_string(), format!("{:x}", seed)];
        let io = ProcessIo {
            stdout: OutputSink::File(output_file.to_path_buf()),
            stderr: OutputSink::Capture,
            ..ProcessIo::default()
        };
        let result = self
            .program
            .run_with(&args, &io, &ProcessLimits::with_wall_time(timeout))?;

        if !result.success() {
            log::warn!(
                "Generator {} failed for seed {:x}, subtask {}: {} {}",
                self.program.name(),
                seed,
                subtask,
                result.outcome,
                result.stderr_lossy().trim()
            );
        }
        Ok(result.success())
    }

    /// Like [`OnlineGenerator::generate`] with a random seed in
    /// `[0, RANDOM_SEED_BOUND)`. Returns the seed used and the success flag.
    pub fn generate_random(
        &self,
        output_file: &Path,
        subtask: u32,
        timeout: Option<Duration>,
    ) -> Result<(u64, bool)> {
        let seed = random_seed();
        let ok = self.generate(output_file, seed, subtask, timeout)?;
        Ok((seed, ok))
    }
}

/// Generator run once before the contest, writing every input into a directory.
///
/// Invoked as `<generator> <test_dir>`.
#[derive(Debug)]
pub struct OfflineGenerator {
    program: Program,
}

impl OfflineGenerator {
    pub fn new(task_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            program: Program::new(task_dir, name),
        }
    }

    pub fn generate(&self, test_dir: &Path) -> Result<bool> {
        std::fs::create_dir_all(test_dir)?;
        let outcome = self.program.run(&[path_string(test_dir)])?;
        Ok(outcome.is_ok())
    }
}

/// Seed in `[0, RANDOM_SEED_BOUND)`
pub fn random_seed() -> u64 {
    (uuid::Uuid::new_v4().as_u128() % RANDOM_SEED_BOUND as u128) as u64
}
