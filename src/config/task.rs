//! Task configuration loading from scorebox.json

use crate::config::types::{JudgeError, Result, RunConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Name of the per-task configuration file
pub const TASK_CONFIG_FILE: &str = "scorebox.json";

/// Default wall-clock limit for solution runs (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which evaluator a task uses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum JudgeKind {
    /// Compare output against the reference, line by line
    #[default]
    Diff,
    /// Ask an external checker program
    External,
}

/// Full scorebox.json structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    #[serde(default)]
    pub judge: JudgeKind,
    /// Program name of the checker, resolved inside the task directory
    #[serde(default)]
    pub checker: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub memory_limit_mb: Option<u64>,
    /// Opt-in wall-clock limit for the checker itself
    #[serde(default)]
    pub checker_timeout_secs: Option<u64>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            judge: JudgeKind::Diff,
            checker: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            memory_limit_mb: None,
            checker_timeout_secs: None,
        }
    }
}

impl TaskConfig {
    /// Load configuration from a scorebox.json file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| JudgeError::Config(format!("Failed to read task config: {}", e)))?;

        let config: TaskConfig = serde_json::from_str(&content)
            .map_err(|e| JudgeError::Config(format!("Failed to parse task config JSON: {}", e)))?;

        Ok(config)
    }

    /// Load `<task_dir>/scorebox.json`, which must exist
    pub fn load(task_dir: &Path) -> Result<Self> {
        let path = task_dir.join(TASK_CONFIG_FILE);
        if !path.exists() {
            return Err(JudgeError::Config(format!(
                "{} not found in {}",
                TASK_CONFIG_FILE,
                task_dir.display()
            )));
        }
        Self::load_from_file(path)
    }

    /// Like [`TaskConfig::load`], but a missing file yields the defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(task_dir: &Path) -> Result<Self> {
        if task_dir.join(TASK_CONFIG_FILE).exists() {
            let config = Self::load(task_dir)?;
            log::debug!("Loaded task config from {}: {:?}", task_dir.display(), config);
            Ok(config)
        } else {
            log::warn!(
                "No {} in {}, using defaults (diff judge, {}s timeout)",
                TASK_CONFIG_FILE,
                task_dir.display(),
                DEFAULT_TIMEOUT_SECS
            );
            Ok(Self::default())
        }
    }

    /// Run configuration derived from the task limits
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            timeout: Some(Duration::from_secs(self.timeout_secs)),
            memory_limit_mb: self.memory_limit_mb,
        }
    }

    pub fn checker_timeout(&self) -> Option<Duration> {
        self.checker_timeout_secs.map(Duration::from_secs)
    }
}
