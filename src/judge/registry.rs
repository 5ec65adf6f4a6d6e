use crate::config::task::{JudgeKind, TaskConfig};
use crate::config::types::{JudgeError, Result};
use crate::exec::program::Program;
use crate::judge::diff::ExactDiffEvaluator;
use crate::judge::evaluator::Evaluator;
use crate::judge::external::ExternalCheckerEvaluator;
use std::path::Path;

/// Build the evaluator a task is configured with
pub fn judge_for(task_dir: &Path, config: &TaskConfig) -> Result<Box<dyn Evaluator>> {
    match config.judge {
        JudgeKind::Diff => Ok(Box::new(ExactDiffEvaluator::new())),
        JudgeKind::External => {
            let name = config.checker.as_deref().ok_or_else(|| {
                JudgeError::Config("judge \"external\" requires a \"checker\" program".to_string())
            })?;
            let mut evaluator = ExternalCheckerEvaluator::new(Program::new(task_dir, name));
            if let Some(limit) = config.checker_timeout() {
                evaluator = evaluator.with_timeout(limit);
            }
            Ok(Box::new(evaluator))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::fakes::FakeSolution;
    use crate::verdict::Evaluation;

    #[test]
    fn test_diff_is_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("out"), "5\n").unwrap();
        std::fs::write(dir.path().join("ref"), "5\n").unwrap();

        let judge = judge_for(dir.path(), &TaskConfig::default()).unwrap();
        let solution = FakeSolution::succeeding(dir.path().join("out"));
        let eval = judge
            .evaluate(&solution, Path::new("1.in"), Some(&dir.path().join("ref")), None)
            .unwrap();
        assert_eq!(eval, Evaluation::accepted());
    }

    #[test]
    fn test_external_without_checker_is_config_error() {
        let config = TaskConfig {
            judge: JudgeKind::External,
            ..TaskConfig::default()
        };
        assert!(matches!(
            judge_for(Path::new("/tmp"), &config),
            Err(JudgeError::Config(_))
        ));
    }

    #[test]
    fn test_external_uses_checker_program() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("check.sh"),
            "echo 0.5\necho \"$#\" >&2\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("out"), "").unwrap();

        let config = TaskConfig {
            judge: JudgeKind::External,
            checker: Some("check".to_string()),
            ..TaskConfig::default()
        };
        let judge = judge_for(dir.path(), &config).unwrap();
        let solution = FakeSolution::succeeding(dir.path().join("out"));
        let eval = judge
            .evaluate(&solution, Path::new("1.in"), None, None)
            .unwrap();

        assert_eq!(eval.score.value(), 0.5);
        assert_eq!(eval.verdict.message(), Some("2"));
    }
}
