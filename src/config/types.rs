/// Core types shared by the execution layer and the evaluators
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// How a process execution terminated - closed set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// Process finished with exit code 0 (or output judged correct)
    #[serde(rename = "OK")]
    Ok,
    /// Output did not match the reference
    #[serde(rename = "WA")]
    WrongAnswer,
    /// Process exited with a non-zero exit code
    #[serde(rename = "RE")]
    NonzeroExitCode,
    /// Wall-clock limit exceeded, process was killed
    #[serde(rename = "TLE")]
    Timeout,
    /// Process was terminated by a signal it did not ask for
    #[serde(rename = "SIG")]
    Signaled,
}

impl RunOutcome {
    pub fn is_ok(self) -> bool {
        matches!(self, RunOutcome::Ok)
    }

    /// Short code used in reports and serialized output
    pub fn code(self) -> &'static str {
        match self {
            RunOutcome::Ok => "OK",
            RunOutcome::WrongAnswer => "WA",
            RunOutcome::NonzeroExitCode => "RE",
            RunOutcome::Timeout => "TLE",
            RunOutcome::Signaled => "SIG",
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunOutcome::Ok => write!(f, "ok"),
            RunOutcome::WrongAnswer => write!(f, "wrong answer"),
            RunOutcome::NonzeroExitCode => write!(f, "nonzero exit code"),
            RunOutcome::Timeout => write!(f, "timeout"),
            RunOutcome::Signaled => write!(f, "killed by signal"),
        }
    }
}

/// Per-run overrides forwarded verbatim to the execution layer.
///
/// Evaluators never look inside; only [`crate::exec::solution::Solution`]
/// interprets these fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Wall-clock limit for the solution run
    #[serde(default, with = "optional_secs")]
    pub timeout: Option<Duration>,
    /// Address-space limit in MiB
    #[serde(default)]
    pub memory_limit_mb: Option<u64>,
}

impl RunConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_memory_limit_mb(mut self, limit: u64) -> Self {
        self.memory_limit_mb = Some(limit);
        self
    }
}

mod optional_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&d.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<f64>::deserialize(d)?;
        match secs {
            Some(s) if s.is_finite() && s >= 0.0 => Ok(Some(Duration::from_secs_f64(s))),
            Some(s) => Err(serde::de::Error::custom(format!("invalid timeout: {}", s))),
            None => Ok(None),
        }
    }
}

/// Errors raised by evaluation and the execution layer.
///
/// A solution that crashes or times out is not an error; it is folded into
/// the evaluation result. These variants mean the evaluation itself could
/// not be carried out.
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Program error: {0}")]
    Program(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error(
        "Checker failed with exit code {}. stdout: {stdout:?}, stderr: {stderr:?}",
        describe_exit_code(.exit_code)
    )]
    CheckerFailed {
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Checker printed {raw:?} instead of a score")]
    ScoreParse { raw: String },

    #[error("Checker awarded {value} points, outside the allowed range [0.0, 1.0]")]
    ScoreRange { value: f64 },

    #[error("Checker did not finish within {limit:?}")]
    CheckerTimeout { limit: Duration },
}

impl JudgeError {
    /// True for errors caused by a misbehaving checker program
    pub fn is_checker_violation(&self) -> bool {
        matches!(
            self,
            JudgeError::CheckerFailed { .. }
                | JudgeError::ScoreParse { .. }
                | JudgeError::ScoreRange { .. }
                | JudgeError::CheckerTimeout { .. }
        )
    }
}

fn describe_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "<killed by signal>".to_string(),
    }
}

/// Result type alias for scorebox operations
pub type Result<T> = std::result::Result<T, JudgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_codes_match_serde() {
        for outcome in [
            RunOutcome::Ok,
            RunOutcome::WrongAnswer,
            RunOutcome::NonzeroExitCode,
            RunOutcome::Timeout,
            RunOutcome::Signaled,
        ] {
            let json = serde_json::to_string(&outcome).unwrap();
            assert_eq!(json, format!("\"{}\"", outcome.code()));
        }
    }

    #[test]
    fn test_run_config_from_json() {
        let config: RunConfig =
            serde_json::from_str(r#"{"timeout": 2.5, "memory_limit_mb": 64}"#).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.memory_limit_mb, Some(64));

        let empty: RunConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, RunConfig::default());
    }

    #[test]
    fn test_run_config_rejects_negative_timeout() {
        let result = serde_json::from_str::<RunConfig>(r#"{"timeout": -1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_checker_failed_message_mentions_exit_code() {
        let err = JudgeError::CheckerFailed {
            exit_code: Some(1),
            stdout: "out".to_string(),
            stderr: "boom".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("exit code 1"));
        assert!(text.contains("boom"));
        assert!(err.is_checker_violation());
    }

    #[test]
    fn test_checker_failed_by_signal() {
        let err = JudgeError::CheckerFailed {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("killed by signal"));
    }
}
