use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A single input row as handed over by the data source: field name to raw cell.
pub type RawRow = BTreeMap<String, String>;

/// Canonical, lower-cased token set produced by the normalizer.
pub type TokenSet = BTreeSet<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotStatus {
    Available,
    Unavailable,
    Other(String),
}

impl PilotStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "available" => Self::Available,
            "unavailable" => Self::Unavailable,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroneStatus {
    Available,
    Maintenance,
    Other(String),
}

impl DroneStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "available" => Self::Available,
            "maintenance" => Self::Maintenance,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Mission urgency. Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    High,
    Standard,
}

impl Priority {
    pub const fn ordered() -> [Self; 3] {
        [Self::Urgent, Self::High, Self::Standard]
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Standard => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Standard => "Standard",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "urgent" => Some(Self::Urgent),
            "high" => Some(Self::High),
            "standard" => Some(Self::Standard),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive calendar window a mission occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Inclusive on both ends: windows sharing a single day overlap.
    pub fn overlaps(&self, other: &DateWindow) -> bool {
        !(other.end < self.start || self.end < other.start)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub id: String,
    pub location: String,
    pub skills: TokenSet,
    pub certifications: TokenSet,
    pub available_from: NaiveDate,
    pub status: PilotStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drone {
    pub id: String,
    pub location: String,
    pub capabilities: TokenSet,
    pub status: DroneStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub location: String,
    pub required_skills: TokenSet,
    pub required_certs: TokenSet,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub priority: Priority,
}

impl Mission {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }
}

/// A committed mission-to-resources pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "mission")]
    pub mission_id: String,
    pub pilot_id: String,
    pub drone_id: String,
    pub score: i32,
    /// Soft violations tolerated in the winning pair, rendered `"{id}: {code}"`.
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    #[serde(rename = "No eligible pilot")]
    NoEligiblePilot,
    #[serde(rename = "No eligible drone")]
    NoEligibleDrone,
    #[serde(rename = "No viable assignment")]
    NoViableAssignment,
}

impl ConflictKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoEligiblePilot => "No eligible pilot",
            Self::NoEligibleDrone => "No eligible drone",
            Self::NoViableAssignment => "No viable assignment",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mission that could not be staffed, with its joined diagnostic string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    #[serde(rename = "mission")]
    pub mission_id: String,
    #[serde(rename = "type")]
    pub kind: ConflictKind,
    #[serde(rename = "reason")]
    pub reasons: String,
}
