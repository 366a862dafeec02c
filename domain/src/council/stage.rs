//! Council run state machine
//!
//! ```text
//! Collecting ──► Ranking ──► Synthesizing ──► Done
//!      │
//!      └──► Failed   (stage 1 produced no answers)
//! ```

use crate::core::error::DomainError;
use crate::core::question::Question;
use serde::{Deserialize, Serialize};

/// Stage of a council run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouncilStage {
    /// Stage 1 - every panel member answers the question
    Collecting,
    /// Stage 2 - panel members rank the anonymized answers
    Ranking,
    /// Stage 3 - the chairman synthesizes a final answer
    Synthesizing,
    /// Terminal: a final answer (or chairman sentinel) exists
    Done,
    /// Terminal: no panel member answered in stage 1
    Failed,
}

impl CouncilStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CouncilStage::Collecting => "collecting",
            CouncilStage::Ranking => "ranking",
            CouncilStage::Synthesizing => "synthesizing",
            CouncilStage::Done => "done",
            CouncilStage::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CouncilStage::Collecting => "Stage 1: Collect Responses",
            CouncilStage::Ranking => "Stage 2: Peer Ranking",
            CouncilStage::Synthesizing => "Stage 3: Synthesis",
            CouncilStage::Done => "Done",
            CouncilStage::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilStage::Done | CouncilStage::Failed)
    }

    /// Whether `next` is a legal successor of this stage.
    pub fn can_transition_to(&self, next: CouncilStage) -> bool {
        matches!(
            (self, next),
            (CouncilStage::Collecting, CouncilStage::Ranking)
                | (CouncilStage::Collecting, CouncilStage::Failed)
                | (CouncilStage::Ranking, CouncilStage::Synthesizing)
                | (CouncilStage::Synthesizing, CouncilStage::Done)
        )
    }
}

impl std::fmt::Display for CouncilStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One council run (Entity)
///
/// Tracks the question and the current stage. Transitions are checked so a
/// run can never skip ranking or leave a terminal stage.
#[derive(Debug, Clone)]
pub struct CouncilRun {
    question: Question,
    stage: CouncilStage,
}

impl CouncilRun {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            stage: CouncilStage::Collecting,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn stage(&self) -> CouncilStage {
        self.stage
    }

    /// Move to `next`, rejecting illegal transitions.
    pub fn advance(&mut self, next: CouncilStage) -> Result<(), DomainError> {
        if !self.stage.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.stage.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.stage = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> CouncilRun {
        CouncilRun::new(Question::try_new("What is Rust?").unwrap())
    }

    #[test]
    fn test_happy_path() {
        let mut run = run();
        assert_eq!(run.stage(), CouncilStage::Collecting);
        run.advance(CouncilStage::Ranking).unwrap();
        run.advance(CouncilStage::Synthesizing).unwrap();
        run.advance(CouncilStage::Done).unwrap();
        assert!(run.stage().is_terminal());
    }

    #[test]
    fn test_failed_only_from_collecting() {
        let mut early = run();
        early.advance(CouncilStage::Failed).unwrap();
        assert_eq!(early.stage(), CouncilStage::Failed);

        let mut late = run();
        late.advance(CouncilStage::Ranking).unwrap();
        assert!(late.advance(CouncilStage::Failed).is_err());
    }

    #[test]
    fn test_cannot_skip_ranking() {
        let mut run = run();
        let err = run.advance(CouncilStage::Synthesizing).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(run.stage(), CouncilStage::Collecting);
    }

    #[test]
    fn test_terminal_stages_are_final() {
        for terminal in [CouncilStage::Done, CouncilStage::Failed] {
            for next in [
                CouncilStage::Collecting,
                CouncilStage::Ranking,
                CouncilStage::Synthesizing,
                CouncilStage::Done,
                CouncilStage::Failed,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(CouncilStage::Ranking.to_string(), "Stage 2: Peer Ranking");
        assert_eq!(CouncilStage::Synthesizing.as_str(), "synthesizing");
    }
}
