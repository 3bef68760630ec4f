use mission_match::workflows::allocation::{
    AllocationConfig, AllocationEngine, AllocationError, Collection, ConflictKind, MatchMode,
    RawRow,
};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn pilot_row(id: &str, location: &str) -> RawRow {
    row(&[
        ("pilot_id", id),
        ("location", location),
        ("skills", "thermal"),
        ("certifications", ""),
        ("available_from", "2024-01-01"),
        ("status", "Available"),
    ])
}

fn drone_row(id: &str, location: &str) -> RawRow {
    row(&[
        ("drone_id", id),
        ("location", location),
        ("capabilities", "thermal"),
        ("status", "Available"),
    ])
}

fn mission_row(id: &str, start: &str, end: &str, priority: &str) -> RawRow {
    row(&[
        ("project_id", id),
        ("location", "NYC"),
        ("required_skills", "thermal"),
        ("required_certs", ""),
        ("start_date", start),
        ("end_date", end),
        ("priority", priority),
    ])
}

fn engine() -> AllocationEngine {
    AllocationEngine::new(AllocationConfig::default())
}

#[test]
fn matching_roster_produces_one_assignment() {
    let (_, outcome) = engine()
        .allocate(
            &[pilot_row("P1", "NYC")],
            &[drone_row("D1", "NYC")],
            &[mission_row("M1", "2024-02-01", "2024-02-05", "Standard")],
        )
        .expect("allocation runs");

    assert_eq!(outcome.assignments.len(), 1);
    let assignment = &outcome.assignments[0];
    assert_eq!(
        (
            assignment.mission_id.as_str(),
            assignment.pilot_id.as_str(),
            assignment.drone_id.as_str()
        ),
        ("M1", "P1", "D1")
    );
    assert!(outcome.conflicts.is_empty());
}

#[test]
fn pilot_in_wrong_city_is_reported() {
    let (_, outcome) = engine()
        .allocate(
            &[pilot_row("P1", "LA")],
            &[drone_row("D1", "NYC")],
            &[mission_row("M1", "2024-02-01", "2024-02-05", "Standard")],
        )
        .expect("allocation runs");

    assert!(outcome.assignments.is_empty());
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].mission_id, "M1");
    assert_eq!(outcome.conflicts[0].kind, ConflictKind::NoEligiblePilot);
    assert_eq!(outcome.conflicts[0].reasons, "P1: location mismatch");
}

#[test]
fn second_overlapping_mission_loses_the_only_pilot() {
    let (_, outcome) = engine()
        .allocate(
            &[pilot_row("P1", "NYC")],
            &[drone_row("D1", "NYC"), drone_row("D2", "NYC")],
            &[
                mission_row("M1", "2024-02-01", "2024-02-05", "Standard"),
                mission_row("M2", "2024-02-03", "2024-02-08", "Standard"),
            ],
        )
        .expect("allocation runs");

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].mission_id, "M1");
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].mission_id, "M2");
    assert_eq!(
        outcome.conflicts[0].reasons,
        "P1: already assigned to higher-priority mission"
    );
}

#[test]
fn incomplete_rows_are_excluded_not_fatal() {
    let mut incomplete = pilot_row("P2", "NYC");
    incomplete.remove("status");

    let (snapshot, outcome) = engine()
        .allocate(
            &[incomplete, pilot_row("P1", "NYC")],
            &[drone_row("D1", "NYC")],
            &[mission_row("M1", "2024-02-01", "2024-02-05", "High")],
        )
        .expect("allocation runs");

    assert_eq!(snapshot.pilots.len(), 1);
    assert_eq!(snapshot.excluded.len(), 1);
    assert_eq!(snapshot.excluded[0].collection, Collection::Pilots);
    assert_eq!(snapshot.excluded[0].row, 1);
    assert_eq!(snapshot.excluded[0].missing_field, "status");
    assert_eq!(outcome.assignments[0].pilot_id, "P1");
}

#[test]
fn malformed_inputs_abort_the_run() {
    let err = engine()
        .allocate(
            &[pilot_row("P1", "NYC")],
            &[drone_row("D1", "NYC")],
            &[mission_row("M1", "2024/02/01", "2024-02-05", "High")],
        )
        .expect_err("bad date rejected");
    assert!(matches!(
        err,
        AllocationError::InvalidDate {
            field: "start_date",
            ..
        }
    ));

    let err = engine()
        .allocate(
            &[],
            &[],
            &[mission_row("M1", "2024-02-01", "2024-02-05", "Critical")],
        )
        .expect_err("unknown priority rejected");
    assert!(matches!(err, AllocationError::InvalidPriority { row: 1, .. }));

    let err = engine()
        .allocate(
            &[],
            &[],
            &[mission_row("M1", "2024-02-05", "2024-02-01", "High")],
        )
        .expect_err("inverted window rejected");
    assert!(matches!(err, AllocationError::InvertedWindow { .. }));
}

#[test]
fn scored_mode_staffs_mission_despite_location_gap() {
    let engine = AllocationEngine::new(AllocationConfig {
        mode: MatchMode::Scored,
        ..AllocationConfig::default()
    });

    let (_, outcome) = engine
        .allocate(
            &[pilot_row("P1", "LA")],
            &[drone_row("D1", "NYC")],
            &[mission_row("M1", "2024-02-01", "2024-02-05", "High")],
        )
        .expect("allocation runs");

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].score, (30 - 20) + 30 + 30);
    assert_eq!(
        outcome.assignments[0].violations,
        vec!["P1: location mismatch".to_string()]
    );
}

#[test]
fn incomplete_mission_rows_still_resolve_to_a_conflict() {
    let mut no_location = mission_row("M2", "2024-02-01", "2024-02-05", "High");
    no_location.remove("location");
    let mut no_id = mission_row("", "2024-02-01", "2024-02-05", "High");
    no_id.remove("project_id");

    let (snapshot, outcome) = engine()
        .allocate(
            &[pilot_row("P1", "NYC")],
            &[drone_row("D1", "NYC")],
            &[
                mission_row("M1", "2024-02-01", "2024-02-05", "Standard"),
                no_location,
                no_id,
            ],
        )
        .expect("allocation runs");

    assert_eq!(snapshot.missions.len(), 1);
    assert_eq!(snapshot.excluded.len(), 2);
    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].mission_id, "M1");

    let identified_missions = snapshot.missions.len()
        + snapshot
            .excluded
            .iter()
            .filter(|row| row.collection == Collection::Missions && row.id.is_some())
            .count();
    assert_eq!(
        outcome.assignments.len() + outcome.conflicts.len(),
        identified_missions
    );
    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].mission_id, "M2");
    assert_eq!(outcome.conflicts[0].kind, ConflictKind::NoViableAssignment);
    assert_eq!(
        outcome.conflicts[0].reasons,
        "mission record missing required field location"
    );
}
