use super::common::*;
use crate::workflows::allocation::domain::{DroneStatus, Priority};
use crate::workflows::allocation::eligibility::{
    evaluate_drone, evaluate_pilot, Eligibility, EligibilityPolicy, Violation,
};
use crate::workflows::allocation::scoring::{
    FitScore, FitScorer, MatchMode, PairChoice, RankedCandidate, ScoringConfig, SelectionRejected,
};

fn scorer(mode: MatchMode) -> FitScorer {
    FitScorer::new(ScoringConfig::default(), mode)
}

fn ranked(id: &str, score: i32) -> RankedCandidate {
    RankedCandidate {
        id: id.to_string(),
        score,
        violations: Vec::new(),
    }
}

#[test]
fn location_mismatch_under_urgent_scores_thirty() {
    let target = mission("M1", Priority::Urgent, date(2024, 2, 1), date(2024, 2, 5));
    let eligibility = evaluate_pilot(
        &pilot("P1", "LA"),
        &target,
        &[],
        EligibilityPolicy::default(),
    );

    assert_eq!(scorer(MatchMode::Scored).score(&eligibility, &target), FitScore::Scored(30));
}

#[test]
fn penalties_stack_per_violated_category() {
    let target = mission("M1", Priority::High, date(2024, 2, 1), date(2024, 2, 5));
    let eligibility = Eligibility {
        ok: false,
        reasons: vec![
            Violation::LocationMismatch,
            Violation::MissingSkills,
            Violation::MissingCertifications,
        ],
    };

    assert_eq!(
        scorer(MatchMode::Scored).score(&eligibility, &target),
        FitScore::Scored(30 - 20 - 30 - 40)
    );
}

#[test]
fn strict_mode_disqualifies_any_failed_check() {
    let target = mission("M1", Priority::Urgent, date(2024, 2, 1), date(2024, 2, 5));
    let eligibility = evaluate_pilot(
        &pilot("P1", "LA"),
        &target,
        &[],
        EligibilityPolicy::default(),
    );

    assert_eq!(scorer(MatchMode::Strict).score(&eligibility, &target), FitScore::Disqualified);
}

#[test]
fn maintenance_is_never_rankable() {
    let target = mission("M1", Priority::Urgent, date(2024, 2, 1), date(2024, 2, 5));
    let mut candidate = drone("D1", "NYC");
    candidate.status = DroneStatus::Maintenance;
    let eligibility = evaluate_drone(&candidate, &target, &[], EligibilityPolicy::default());
    let generous = FitScorer::new(
        ScoringConfig {
            urgent_bonus: 10_000,
            ..ScoringConfig::default()
        },
        MatchMode::Scored,
    );

    assert_eq!(generous.score(&eligibility, &target), FitScore::Disqualified);
    assert!(generous.rank("D1", &eligibility, &target).is_none());
}

#[test]
fn scored_mode_keeps_status_and_availability_hard() {
    let target = standard_mission("M1");
    for reason in [
        Violation::PilotUnavailable,
        Violation::NotAvailableOnStart,
        Violation::PilotWindowOverlap,
        Violation::AlreadyAssigned,
    ] {
        let eligibility = Eligibility::rejected(reason);
        assert_eq!(
            scorer(MatchMode::Scored).score(&eligibility, &target),
            FitScore::Disqualified,
            "{reason} should disqualify"
        );
    }
}

#[test]
fn select_best_adds_bonus_once_more_for_the_pair() {
    let target = mission("M1", Priority::Urgent, date(2024, 2, 1), date(2024, 2, 5));
    let choice = scorer(MatchMode::Scored)
        .select_best(&target, &[ranked("P1", 30)], &[ranked("D1", 50)])
        .expect("pair accepted");

    assert_eq!(
        choice,
        PairChoice {
            pilot: 0,
            drone: 0,
            combined_score: 130,
        }
    );
}

#[test]
fn select_best_breaks_ties_by_pool_order() {
    let target = standard_mission("M1");
    let pilots = [ranked("P1", 0), ranked("P2", 0)];
    let drones = [ranked("D1", -30), ranked("D2", 0), ranked("D3", 0)];

    let choice = scorer(MatchMode::Scored)
        .select_best(&target, &pilots, &drones)
        .expect("pair accepted");

    assert_eq!((choice.pilot, choice.drone), (0, 1));
}

#[test]
fn select_best_prefers_higher_combined_score() {
    let target = standard_mission("M1");
    let pilots = [ranked("P1", -20), ranked("P2", 0)];
    let drones = [ranked("D1", 0)];

    let choice = scorer(MatchMode::Scored)
        .select_best(&target, &pilots, &drones)
        .expect("pair accepted");

    assert_eq!(choice.pilot, 1);
    assert_eq!(choice.combined_score, 0);
}

#[test]
fn select_best_rejects_below_threshold_and_empty_pools() {
    let target = standard_mission("M1");
    let scorer = scorer(MatchMode::Scored);

    match scorer.select_best(&target, &[ranked("P1", -20)], &[ranked("D1", -30)]) {
        Err(SelectionRejected::BelowThreshold { best, threshold }) => {
            assert_eq!(best.combined_score, -50);
            assert_eq!(threshold, 0);
        }
        other => panic!("expected threshold rejection, got {other:?}"),
    }

    assert_eq!(
        scorer.select_best(&target, &[], &[ranked("D1", 0)]),
        Err(SelectionRejected::EmptyPool)
    );
}
