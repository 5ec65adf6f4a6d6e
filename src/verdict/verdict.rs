/// Verdicts, scores and the evaluation result that pairs them
use crate::config::types::{JudgeError, RunOutcome};
use serde::{Deserialize, Serialize};

/// Outcome classification plus optional free-text explanation.
///
/// Fields are private: a verdict is a report and is never changed after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    outcome: RunOutcome,
    message: Option<String>,
}

impl Verdict {
    pub fn new(outcome: RunOutcome, message: Option<String>) -> Self {
        Self { outcome, message }
    }

    /// Verdict without a message
    pub fn of(outcome: RunOutcome) -> Self {
        Self::new(outcome, None)
    }

    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) if !msg.is_empty() => write!(f, "{} ({})", self.outcome.code(), msg),
            _ => write!(f, "{}", self.outcome.code()),
        }
    }
}

/// Awarded credit, always within [0.0, 1.0]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const ZERO: Score = Score(0.0);
    pub const FULL: Score = Score(1.0);

    /// Validate a raw value. NaN and anything outside [0.0, 1.0] is rejected.
    pub fn new(value: f64) -> Option<Self> {
        if (0.0..=1.0).contains(&value) {
            Some(Score(value))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = JudgeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value).ok_or(JudgeError::ScoreRange { value })
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> f64 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score and verdict of one evaluation, always produced together
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: Score,
    pub verdict: Verdict,
}

impl Evaluation {
    pub fn new(score: Score, verdict: Verdict) -> Self {
        Self { score, verdict }
    }

    /// Zero points for a run that did not finish with `Ok`
    pub fn failed_run(outcome: RunOutcome) -> Self {
        Self::new(Score::ZERO, Verdict::of(outcome))
    }

    pub fn accepted() -> Self {
        Self::new(Score::FULL, Verdict::of(RunOutcome::Ok))
    }

    pub fn wrong_answer() -> Self {
        Self::new(Score::ZERO, Verdict::of(RunOutcome::WrongAnswer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_inclusive() {
        assert_eq!(Score::new(0.0), Some(Score::ZERO));
        assert_eq!(Score::new(1.0), Some(Score::FULL));
        assert_eq!(Score::new(0.25).map(Score::value), Some(0.25));
    }

    #[test]
    fn test_score_rejects_out_of_range() {
        assert!(Score::new(-0.0001).is_none());
        assert!(Score::new(1.5).is_none());
        assert!(Score::new(f64::NAN).is_none());
        assert!(Score::new(f64::INFINITY).is_none());

        match Score::try_from(1.5) {
            Err(JudgeError::ScoreRange { value }) => assert_eq!(value, 1.5),
            other => panic!("expected range error, got {:?}", other),
        }
    }

    #[test]
    fn test_score_deserialize_validates() {
        assert!(serde_json::from_str::<Score>("0.5").is_ok());
        assert!(serde_json::from_str::<Score>("2.0").is_err());
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::of(RunOutcome::WrongAnswer).to_string(), "WA");
        assert_eq!(
            Verdict::new(RunOutcome::Ok, Some("partial".to_string())).to_string(),
            "OK (partial)"
        );
        assert_eq!(Verdict::new(RunOutcome::Ok, Some(String::new())).to_string(), "OK");
    }

    #[test]
    fn test_failed_run_evaluation() {
        let eval = Evaluation::failed_run(RunOutcome::Timeout);
        assert_eq!(eval.score, Score::ZERO);
        assert_eq!(eval.verdict.outcome(), RunOutcome::Timeout);
        assert_eq!(eval.verdict.message(), None);
    }

    #[test]
    fn test_evaluation_serializes_flat_score() {
        let json = serde_json::to_value(Evaluation::accepted()).unwrap();
        assert_eq!(json["score"], serde_json::json!(1.0));
        assert_eq!(json["verdict"]["outcome"], serde_json::json!("OK"));
    }
}
