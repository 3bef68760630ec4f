use super::super::domain::Mission;
use super::{FitScorer, RankedCandidate};

/// Best pair found in the pools, as positions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairChoice {
    pub pilot: usize,
    pub drone: usize,
    pub combined_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRejected {
    EmptyPool,
    BelowThreshold { best: PairChoice, threshold: i32 },
}

impl FitScorer {
    /// Exhaustive pilot × drone search for the highest combined score.
    ///
    /// `combined = pilot.score + drone.score + bonus(mission)`, saturating at
    /// the `i32` bounds. Only a strictly higher score replaces the incumbent,
    /// so ties go to the earliest pilot in pool order and then the earliest
    /// drone.
    pub fn select_best(
        &self,
        mission: &Mission,
        pilots: &[RankedCandidate],
        drones: &[RankedCandidate],
    ) -> Result<PairChoice, SelectionRejected> {
        let bonus = self.priority_bonus(mission.priority);
        let mut best: Option<PairChoice> = None;

        for (pilot_index, pilot) in pilots.iter().enumerate() {
            for (drone_index, drone) in drones.iter().enumerate() {
                let combined_score =
                    pilot.score.saturating_add(drone.score).saturating_add(bonus);
                if best.map_or(true, |incumbent| combined_score > incumbent.combined_score) {
                    best = Some(PairChoice {
                        pilot: pilot_index,
                        drone: drone_index,
                        combined_score,
                    });
                }
            }
        }

        let best = best.ok_or(SelectionRejected::EmptyPool)?;
        let threshold = self.config.acceptance_threshold;
        if best.combined_score < threshold {
            return Err(SelectionRejected::BelowThreshold { best, threshold });
        }

        Ok(best)
    }
}
