//! Conversion of raw data-source rows into typed, normalized records.
//!
//! Rows missing a required field are excluded from their pool and reported
//! on the [`Snapshot`]; malformed dates and priorities abort the whole run.

use super::domain::{Drone, DroneStatus, Mission, Pilot, PilotStatus, Priority, RawRow};
use super::normalizer::{parse_date, parse_set, DateFormatError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Pilots,
    Drones,
    Missions,
}

impl Collection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pilots => "pilots",
            Self::Drones => "drones",
            Self::Missions => "missions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("{collection} row {row}: invalid {field}: {source}")]
    InvalidDate {
        collection: Collection,
        row: usize,
        field: &'static str,
        #[source]
        source: DateFormatError,
    },
    #[error("missions row {row}: unknown priority '{value}' (expected Urgent, High or Standard)")]
    InvalidPriority { row: usize, value: String },
    #[error("mission {mission_id} ends on {end} before it starts on {start}")]
    InvertedWindow {
        mission_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// A row left out of its pool because a required field was absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRow {
    pub collection: Collection,
    /// 1-based position within the collection.
    pub row: usize,
    pub id: Option<String>,
    pub missing_field: &'static str,
}

/// Immutable, normalized input for a single allocation run.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub pilots: Vec<Pilot>,
    pub drones: Vec<Drone>,
    pub missions: Vec<Mission>,
    pub excluded: Vec<ExcludedRow>,
}

impl Snapshot {
    pub fn new(pilots: Vec<Pilot>, drones: Vec<Drone>, missions: Vec<Mission>) -> Self {
        Self {
            pilots,
            drones,
            missions,
            excluded: Vec::new(),
        }
    }

    pub fn from_rows(
        pilots: &[RawRow],
        drones: &[RawRow],
        missions: &[RawRow],
    ) -> Result<Self, AllocationError> {
        let mut snapshot = Snapshot::default();

        for (index, row) in pilots.iter().enumerate() {
            match pilot_from_row(index + 1, row)? {
                RowOutcome::Record(pilot) => snapshot.pilots.push(pilot),
                RowOutcome::Excluded(excluded) => snapshot.exclude(excluded),
            }
        }

        for (index, row) in drones.iter().enumerate() {
            match drone_from_row(index + 1, row)? {
                RowOutcome::Record(drone) => snapshot.drones.push(drone),
                RowOutcome::Excluded(excluded) => snapshot.exclude(excluded),
            }
        }

        for (index, row) in missions.iter().enumerate() {
            match mission_from_row(index + 1, row)? {
                RowOutcome::Record(mission) => snapshot.missions.push(mission),
                RowOutcome::Excluded(excluded) => snapshot.exclude(excluded),
            }
        }

        Ok(snapshot)
    }

    fn exclude(&mut self, excluded: ExcludedRow) {
        warn!(
            collection = %excluded.collection,
            row = excluded.row,
            id = excluded.id.as_deref().unwrap_or("<unknown>"),
            field = excluded.missing_field,
            "row excluded: required field missing"
        );
        self.excluded.push(excluded);
    }
}

enum RowOutcome<T> {
    Record(T),
    Excluded(ExcludedRow),
}

struct RowReader<'a> {
    collection: Collection,
    row: usize,
    id_field: &'static str,
    cells: &'a RawRow,
}

impl<'a> RowReader<'a> {
    fn new(collection: Collection, row: usize, id_field: &'static str, cells: &'a RawRow) -> Self {
        Self {
            collection,
            row,
            id_field,
            cells,
        }
    }

    /// Scalar field that must be present and non-blank.
    fn required(&self, field: &'static str) -> Result<&'a str, ExcludedRow> {
        match self.cells.get(field).map(|value| value.trim()) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.missing(field)),
        }
    }

    /// List field whose column must exist; a blank cell is an empty set.
    fn list(&self, field: &'static str) -> Result<&'a str, ExcludedRow> {
        self.cells
            .get(field)
            .map(String::as_str)
            .ok_or_else(|| self.missing(field))
    }

    fn date(&self, field: &'static str, raw: &str) -> Result<NaiveDate, AllocationError> {
        parse_date(raw).map_err(|source| AllocationError::InvalidDate {
            collection: self.collection,
            row: self.row,
            field,
            source,
        })
    }

    fn missing(&self, field: &'static str) -> ExcludedRow {
        let id = self
            .cells
            .get(self.id_field)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ExcludedRow {
            collection: self.collection,
            row: self.row,
            id,
            missing_field: field,
        }
    }
}

macro_rules! field {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(excluded) => return Ok(RowOutcome::Excluded(excluded)),
        }
    };
}

fn pilot_from_row(row: usize, cells: &RawRow) -> Result<RowOutcome<Pilot>, AllocationError> {
    let reader = RowReader::new(Collection::Pilots, row, "pilot_id", cells);

    let id = field!(reader.required("pilot_id"));
    let location = field!(reader.required("location"));
    let skills = field!(reader.list("skills"));
    let certifications = field!(reader.list("certifications"));
    let available_from = field!(reader.required("available_from"));
    let status = field!(reader.required("status"));

    Ok(RowOutcome::Record(Pilot {
        id: id.to_string(),
        location: location.to_string(),
        skills: parse_set(skills),
        certifications: parse_set(certifications),
        available_from: reader.date("available_from", available_from)?,
        status: PilotStatus::parse(status),
    }))
}

fn drone_from_row(row: usize, cells: &RawRow) -> Result<RowOutcome<Drone>, AllocationError> {
    let reader = RowReader::new(Collection::Drones, row, "drone_id", cells);

    let id = field!(reader.required("drone_id"));
    let location = field!(reader.required("location"));
    let capabilities = field!(reader.list("capabilities"));
    let status = field!(reader.required("status"));

    Ok(RowOutcome::Record(Drone {
        id: id.to_string(),
        location: location.to_string(),
        capabilities: parse_set(capabilities),
        status: DroneStatus::parse(status),
    }))
}

fn mission_from_row(row: usize, cells: &RawRow) -> Result<RowOutcome<Mission>, AllocationError> {
    let reader = RowReader::new(Collection::Missions, row, "project_id", cells);

    let id = field!(reader.required("project_id"));
    let location = field!(reader.required("location"));
    let required_skills = field!(reader.list("required_skills"));
    let required_certs = field!(reader.list("required_certs"));
    let start_date = field!(reader.required("start_date"));
    let end_date = field!(reader.required("end_date"));
    let priority = field!(reader.required("priority"));

    let start_date = reader.date("start_date", start_date)?;
    let end_date = reader.date("end_date", end_date)?;
    if end_date < start_date {
        return Err(AllocationError::InvertedWindow {
            mission_id: id.to_string(),
            start: start_date,
            end: end_date,
        });
    }

    let priority = Priority::parse(priority).ok_or_else(|| AllocationError::InvalidPriority {
        row,
        value: priority.to_string(),
    })?;

    Ok(RowOutcome::Record(Mission {
        id: id.to_string(),
        location: location.to_string(),
        required_skills: parse_set(required_skills),
        required_certs: parse_set(required_certs),
        start_date,
        end_date,
        priority,
    }))
}
