//! Pilot and drone allocation for field missions.
//!
//! Raw rows are normalized into a [`Snapshot`], missions are ordered by
//! priority, and each mission is staffed with the best eligible pilot/drone
//! pair or reported as a [`Conflict`] with the reasons every candidate was
//! turned down.

pub mod conflicts;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod ledger;
pub mod normalizer;
pub mod records;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use conflicts::ConflictReporter;
pub use domain::{
    Assignment, Conflict, ConflictKind, DateWindow, Drone, DroneStatus, Mission, Pilot,
    PilotStatus, Priority, RawRow, TokenSet,
};
pub use eligibility::{
    evaluate_drone, evaluate_pilot, CoveragePolicy, Eligibility, EligibilityPolicy, Violation,
};
pub use engine::{
    priority_order, AllocationConfig, AllocationEngine, AllocationOutcome, MissionDecision,
    MissionState,
};
pub use ledger::ConsumptionLedger;
pub use normalizer::{parse_date, parse_set, DateFormatError, NO_VALUE_SENTINEL};
pub use records::{AllocationError, Collection, ExcludedRow, Snapshot};
pub use scoring::{
    FitScore, FitScorer, MatchMode, PairChoice, RankedCandidate, ScoringConfig, ScoringKey,
    ScoringKeyError, SelectionRejected,
};
