use mission_match::workflows::allocation::{AllocationConfig, AllocationEngine};
use mission_match::workflows::roster::{write_conflicts, RosterImportError, RosterImporter};
use std::io::Cursor;

const PILOTS: &str = "\u{feff}Pilot ID,Name,Skills,Certifications,Location,Status,Available From\n\
P001,Arjun,\"Mapping, Survey\",DGCA,Bangalore,Available,2026-02-01\n\
P002,Neha,\"Inspection, Thermal\",\"DGCA, Night Ops\",Mumbai,Available,2026-02-01\n\
P003,Rohit,Mapping,,Bangalore,,2026-02-01\n";

const DRONES: &str = "Drone ID,Model,Capabilities,Status,Location\n\
D001,DJI M300,\"LiDAR, Mapping\",Available,Bangalore\n\
D002,DJI Mavic 3,Thermal,Maintenance,Mumbai\n";

const MISSIONS: &str = "Project ID,Client,Location,Required Skills,Required Certs,Start Date,End Date,Priority\n\
PRJ001,Client A,Bangalore,Mapping,DGCA,2026-02-06,2026-02-08,High\n\
PRJ002,Client B,Mumbai,Thermal,Night Ops,2026-02-07,2026-02-09,Urgent\n";

#[test]
fn csv_exports_flow_through_the_engine() {
    let rows = RosterImporter::from_readers(
        Cursor::new(PILOTS),
        Cursor::new(DRONES),
        Cursor::new(MISSIONS),
    )
    .expect("csv imports");

    let snapshot = rows.snapshot().expect("rows normalize");
    assert_eq!(snapshot.pilots.len(), 2);
    assert_eq!(snapshot.excluded.len(), 1);
    assert_eq!(snapshot.excluded[0].id.as_deref(), Some("P003"));

    let outcome = AllocationEngine::new(AllocationConfig::default()).run(&snapshot);

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].mission_id, "PRJ001");
    assert_eq!(outcome.assignments[0].pilot_id, "P001");
    assert_eq!(outcome.assignments[0].drone_id, "D001");

    assert_eq!(outcome.conflicts.len(), 1);
    assert_eq!(outcome.conflicts[0].mission_id, "PRJ002");
    assert_eq!(outcome.conflicts[0].reasons, "D001: location mismatch, capability mismatch; D002: drone under maintenance");

    let mut buffer = Vec::new();
    write_conflicts(&mut buffer, &outcome.conflicts).expect("conflicts export");
    let text = String::from_utf8(buffer).expect("utf8");
    assert!(text.starts_with("mission,type,reason\nPRJ002,No eligible drone,"));
}

#[test]
fn invalid_dates_surface_as_allocation_errors() {
    let missions = "project_id,location,required_skills,required_certs,start_date,end_date,priority\n\
M1,NYC,,,06-02-2026,2026-02-08,High\n";

    let rows = RosterImporter::from_readers(
        Cursor::new("pilot_id,location,skills,certifications,status,available_from\n"),
        Cursor::new("drone_id,location,capabilities,status\n"),
        Cursor::new(missions),
    )
    .expect("csv imports");

    assert!(rows.snapshot().is_err());

    let dir = std::env::temp_dir().join(format!("mission-match-roster-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let pilots = dir.join("pilots.csv");
    let drones = dir.join("drones.csv");
    let missions_path = dir.join("missions.csv");
    std::fs::write(&pilots, "pilot_id,location,skills,certifications,status,available_from\n")
        .expect("write pilots");
    std::fs::write(&drones, "drone_id,location,capabilities,status\n").expect("write drones");
    std::fs::write(&missions_path, missions).expect("write missions");

    let err = RosterImporter::snapshot_from_paths(&pilots, &drones, &missions_path)
        .expect_err("bad date rejected");
    std::fs::remove_dir_all(&dir).ok();

    match err {
        RosterImportError::Allocation(_) => {}
        other => panic!("expected allocation error, got {other:?}"),
    }
}
