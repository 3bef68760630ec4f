use crate::workflows::allocation::{Assignment, Conflict};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct AssignmentRow<'a> {
    mission: &'a str,
    pilot_id: &'a str,
    drone_id: &'a str,
    score: i32,
    violations: String,
}

#[derive(Debug, Serialize)]
struct ConflictRow<'a> {
    mission: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    reason: &'a str,
}

/// Writes assignments as CSV; tolerated violations are joined with `"; "`.
pub fn write_assignments<W: Write>(writer: W, assignments: &[Assignment]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if assignments.is_empty() {
        csv_writer.write_record(["mission", "pilot_id", "drone_id", "score", "violations"])?;
    }

    for assignment in assignments {
        csv_writer.serialize(AssignmentRow {
            mission: &assignment.mission_id,
            pilot_id: &assignment.pilot_id,
            drone_id: &assignment.drone_id,
            score: assignment.score,
            violations: assignment.violations.join("; "),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn write_conflicts<W: Write>(writer: W, conflicts: &[Conflict]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if conflicts.is_empty() {
        csv_writer.write_record(["mission", "type", "reason"])?;
    }

    for conflict in conflicts {
        csv_writer.serialize(ConflictRow {
            mission: &conflict.mission_id,
            kind: conflict.kind.label(),
            reason: &conflict.reasons,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
