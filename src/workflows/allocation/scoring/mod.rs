mod config;
mod rules;
mod selection;

pub use config::{MatchMode, ScoringConfig, ScoringKey, ScoringKeyError};
pub use selection::{PairChoice, SelectionRejected};

use super::domain::{Mission, Priority};
use super::eligibility::{Eligibility, Violation};

/// Outcome of scoring one candidate against one mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitScore {
    Scored(i32),
    /// Never rankable, however large the priority bonus.
    Disqualified,
}

impl FitScore {
    pub fn value(self) -> Option<i32> {
        match self {
            FitScore::Scored(score) => Some(score),
            FitScore::Disqualified => None,
        }
    }
}

/// A candidate that survived disqualification, in pool order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCandidate {
    pub id: String,
    pub score: i32,
    /// Soft violations tolerated at a penalty.
    pub violations: Vec<Violation>,
}

/// Stateless scorer applying a [`ScoringConfig`] under a [`MatchMode`].
#[derive(Debug, Clone)]
pub struct FitScorer {
    config: ScoringConfig,
    mode: MatchMode,
}

impl FitScorer {
    pub fn new(config: ScoringConfig, mode: MatchMode) -> Self {
        Self { config, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn priority_bonus(&self, priority: Priority) -> i32 {
        rules::priority_bonus(&self.config, priority)
    }

    /// Priority bonus minus one penalty per tolerated violation, saturating at
    /// the `i32` bounds.
    pub fn score(&self, eligibility: &Eligibility, mission: &Mission) -> FitScore {
        if eligibility
            .reasons
            .iter()
            .any(|violation| rules::disqualifies(self.mode, *violation))
        {
            return FitScore::Disqualified;
        }

        let penalties = eligibility
            .reasons
            .iter()
            .map(|violation| rules::penalty(&self.config, *violation))
            .fold(0i32, i32::saturating_add);

        FitScore::Scored(self.priority_bonus(mission.priority).saturating_sub(penalties))
    }

    /// Scores a candidate and keeps it for ranking unless disqualified.
    pub fn rank(
        &self,
        id: &str,
        eligibility: &Eligibility,
        mission: &Mission,
    ) -> Option<RankedCandidate> {
        self.score(eligibility, mission)
            .value()
            .map(|score| RankedCandidate {
                id: id.to_string(),
                score,
                violations: eligibility.reasons.clone(),
            })
    }
}
