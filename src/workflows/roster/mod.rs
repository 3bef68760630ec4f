//! CSV-backed roster source: pilots, drones and missions in, assignments and
//! conflicts out.

mod export;
mod parser;

pub use export::{write_assignments, write_conflicts};

use crate::workflows::allocation::{AllocationError, RawRow, Snapshot};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Allocation(AllocationError),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Allocation(err) => {
                write!(f, "roster data could not be normalized: {}", err)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Allocation(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<AllocationError> for RosterImportError {
    fn from(err: AllocationError) -> Self {
        Self::Allocation(err)
    }
}

/// The three raw row collections, as exported by the data source.
#[derive(Debug, Clone, Default)]
pub struct RosterRows {
    pub pilots: Vec<RawRow>,
    pub drones: Vec<RawRow>,
    pub missions: Vec<RawRow>,
}

impl RosterRows {
    pub fn snapshot(&self) -> Result<Snapshot, AllocationError> {
        Snapshot::from_rows(&self.pilots, &self.drones, &self.missions)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_paths<P: AsRef<Path>>(
        pilots: P,
        drones: P,
        missions: P,
    ) -> Result<RosterRows, RosterImportError> {
        Self::from_readers(
            std::fs::File::open(pilots)?,
            std::fs::File::open(drones)?,
            std::fs::File::open(missions)?,
        )
    }

    pub fn from_readers<A: Read, B: Read, C: Read>(
        pilots: A,
        drones: B,
        missions: C,
    ) -> Result<RosterRows, RosterImportError> {
        Ok(RosterRows {
            pilots: parser::parse_rows(pilots)?,
            drones: parser::parse_rows(drones)?,
            missions: parser::parse_rows(missions)?,
        })
    }

    /// Reads all three exports and normalizes them in one step.
    pub fn snapshot_from_paths<P: AsRef<Path>>(
        pilots: P,
        drones: P,
        missions: P,
    ) -> Result<Snapshot, RosterImportError> {
        let rows = Self::from_paths(pilots, drones, missions)?;
        Ok(rows.snapshot()?)
    }
}
