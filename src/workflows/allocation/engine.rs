use super::conflicts::{self, ConflictReporter};
use super::domain::{Assignment, Conflict, ConflictKind, Mission, Priority, RawRow};
use super::eligibility::{evaluate_drone, evaluate_pilot, CoveragePolicy, Eligibility, EligibilityPolicy};
use super::ledger::ConsumptionLedger;
use super::records::{AllocationError, Collection, Snapshot};
use super::scoring::{FitScorer, MatchMode, RankedCandidate, ScoringConfig, SelectionRejected};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything an engine needs to know besides the input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub mode: MatchMode,
    pub coverage: CoveragePolicy,
    pub track_overlap: bool,
    pub scoring: ScoringConfig,
}

impl AllocationConfig {
    pub fn eligibility_policy(&self) -> EligibilityPolicy {
        EligibilityPolicy {
            coverage: self.coverage,
            track_overlap: self.track_overlap,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionState {
    Pending,
    Evaluating,
    Assigned,
    Conflicted,
}

impl MissionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Assigned | Self::Conflicted)
    }
}

/// Per-mission trail entry for every mission that reached matching, listed
/// in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionDecision {
    pub mission_id: String,
    pub priority: Priority,
    pub state: MissionState,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AllocationOutcome {
    pub assignments: Vec<Assignment>,
    pub conflicts: Vec<Conflict>,
    pub decisions: Vec<MissionDecision>,
}

enum MissionOutcome {
    Assigned(Assignment),
    Conflicted(Conflict),
}

/// Greedy, priority-first allocator.
///
/// Missions are processed one at a time; a resource committed to an earlier
/// mission is never reconsidered for a later one, even if that would yield a
/// better overall allocation.
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    scorer: FitScorer,
    policy: EligibilityPolicy,
}

impl AllocationEngine {
    pub fn new(config: AllocationConfig) -> Self {
        Self {
            scorer: FitScorer::new(config.scoring, config.mode),
            policy: config.eligibility_policy(),
        }
    }

    /// Normalizes raw rows and runs the allocation on the resulting snapshot.
    pub fn allocate(
        &self,
        pilots: &[RawRow],
        drones: &[RawRow],
        missions: &[RawRow],
    ) -> Result<(Snapshot, AllocationOutcome), AllocationError> {
        let snapshot = Snapshot::from_rows(pilots, drones, missions)?;
        let outcome = self.run(&snapshot);
        Ok((snapshot, outcome))
    }

    pub fn run(&self, snapshot: &Snapshot) -> AllocationOutcome {
        let order = priority_order(&snapshot.missions);
        info!(
            missions = order.len(),
            pilots = snapshot.pilots.len(),
            drones = snapshot.drones.len(),
            mode = ?self.scorer.mode(),
            coverage = ?self.policy.coverage,
            "allocation run started"
        );

        let mut outcome = AllocationOutcome {
            decisions: order
                .iter()
                .map(|mission| MissionDecision {
                    mission_id: mission.id.clone(),
                    priority: mission.priority,
                    state: MissionState::Pending,
                })
                .collect(),
            ..AllocationOutcome::default()
        };
        let mut ledger = ConsumptionLedger::new();

        for (position, mission) in order.into_iter().enumerate() {
            outcome.decisions[position].state = MissionState::Evaluating;

            let state = match self.evaluate(mission, snapshot, &ledger) {
                MissionOutcome::Assigned(assignment) => {
                    ledger.commit(&assignment.pilot_id, &assignment.drone_id, mission.window());
                    debug!(
                        mission = %mission.id,
                        pilot = %assignment.pilot_id,
                        drone = %assignment.drone_id,
                        score = assignment.score,
                        "mission assigned"
                    );
                    outcome.assignments.push(assignment);
                    MissionState::Assigned
                }
                MissionOutcome::Conflicted(conflict) => {
                    debug!(
                        mission = %mission.id,
                        kind = %conflict.kind,
                        reason = %conflict.reasons,
                        "mission conflicted"
                    );
                    outcome.conflicts.push(conflict);
                    MissionState::Conflicted
                }
            };
            outcome.decisions[position].state = state;
        }

        // Incomplete mission rows never reach matching but still need an outcome.
        for excluded in snapshot
            .excluded
            .iter()
            .filter(|row| row.collection == Collection::Missions)
        {
            if let Some(mission_id) = &excluded.id {
                outcome.conflicts.push(Conflict {
                    mission_id: mission_id.clone(),
                    kind: ConflictKind::NoViableAssignment,
                    reasons: conflicts::incomplete_record(excluded.missing_field),
                });
            }
        }

        info!(
            assigned = outcome.assignments.len(),
            conflicted = outcome.conflicts.len(),
            "allocation run finished"
        );
        outcome
    }

    fn evaluate(&self, mission: &Mission, snapshot: &Snapshot, ledger: &ConsumptionLedger) -> MissionOutcome {
        let (pilots, pilot_rejections) = self.build_pool(
            mission,
            &snapshot.pilots,
            |pilot| pilot.id.as_str(),
            |id| ledger.pilot_consumed(id),
            |pilot| evaluate_pilot(pilot, mission, ledger.pilot_windows(&pilot.id), self.policy),
        );
        if pilots.is_empty() {
            return conflict(
                mission,
                ConflictKind::NoEligiblePilot,
                pilot_rejections.render("no pilots on roster"),
            );
        }

        let (drones, drone_rejections) = self.build_pool(
            mission,
            &snapshot.drones,
            |drone| drone.id.as_str(),
            |id| ledger.drone_consumed(id),
            |drone| evaluate_drone(drone, mission, ledger.drone_windows(&drone.id), self.policy),
        );
        if drones.is_empty() {
            return conflict(
                mission,
                ConflictKind::NoEligibleDrone,
                drone_rejections.render("no drones on roster"),
            );
        }

        match self.scorer.select_best(mission, &pilots, &drones) {
            Ok(choice) => {
                let pilot = &pilots[choice.pilot];
                let drone = &drones[choice.drone];
                let violations = conflicts::tolerated(&pilot.id, &pilot.violations)
                    .chain(conflicts::tolerated(&drone.id, &drone.violations))
                    .collect();

                MissionOutcome::Assigned(Assignment {
                    mission_id: mission.id.clone(),
                    pilot_id: pilot.id.clone(),
                    drone_id: drone.id.clone(),
                    score: choice.combined_score,
                    violations,
                })
            }
            Err(SelectionRejected::BelowThreshold { best, threshold }) => conflict(
                mission,
                ConflictKind::NoViableAssignment,
                conflicts::below_threshold(
                    &pilots[best.pilot].id,
                    &drones[best.drone].id,
                    best,
                    threshold,
                ),
            ),
            // Both pools were checked non-empty above.
            Err(SelectionRejected::EmptyPool) => conflict(
                mission,
                ConflictKind::NoViableAssignment,
                "no candidate pair".to_string(),
            ),
        }
    }

    /// Narrows one resource collection to its rankable candidates.
    ///
    /// Without overlap tracking, consumed resources are skipped outright and
    /// reported with the fixed reason instead of being re-checked.
    fn build_pool<T>(
        &self,
        mission: &Mission,
        resources: &[T],
        id_of: impl Fn(&T) -> &str,
        consumed: impl Fn(&str) -> bool,
        evaluate: impl Fn(&T) -> Eligibility,
    ) -> (Vec<RankedCandidate>, ConflictReporter) {
        let mut pool = Vec::new();
        let mut rejections = ConflictReporter::new();

        for resource in resources {
            let id = id_of(resource);
            if !self.policy.track_overlap && consumed(id) {
                rejections.reject_consumed(id);
                continue;
            }

            let eligibility = evaluate(resource);
            match self.scorer.rank(id, &eligibility, mission) {
                Some(candidate) => pool.push(candidate),
                None => rejections.reject(id, &eligibility.reasons),
            }
        }

        (pool, rejections)
    }
}

fn conflict(mission: &Mission, kind: ConflictKind, reasons: String) -> MissionOutcome {
    MissionOutcome::Conflicted(Conflict {
        mission_id: mission.id.clone(),
        kind,
        reasons,
    })
}

/// Urgent before High before Standard, then earliest start; input order
/// breaks any remaining tie.
pub fn priority_order(missions: &[Mission]) -> Vec<&Mission> {
    let mut ordered: Vec<&Mission> = missions.iter().collect();
    ordered.sort_by_key(|mission| (mission.priority.rank(), mission.start_date));
    ordered
}
