use super::domain::{DateWindow, Drone, DroneStatus, Mission, Pilot, TokenSet};
use super::normalizer::same_location;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a drone's capabilities must relate to the mission's required skills.
///
/// A run uses exactly one policy; the two are never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Every required skill appears in the capabilities.
    #[default]
    Subset,
    /// At least one required skill appears in the capabilities.
    Intersection,
}

impl CoveragePolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "subset" => Some(Self::Subset),
            "intersection" => Some(Self::Intersection),
            _ => None,
        }
    }

    pub fn covers(self, required: &TokenSet, capabilities: &TokenSet) -> bool {
        match self {
            Self::Subset => required.is_subset(capabilities),
            Self::Intersection => {
                required.is_empty() || !required.is_disjoint(capabilities)
            }
        }
    }
}

/// Knobs the hard checks depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EligibilityPolicy {
    pub coverage: CoveragePolicy,
    pub track_overlap: bool,
}

/// A single failed check of a candidate against a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    LocationMismatch,
    MissingSkills,
    MissingCertifications,
    NotAvailableOnStart,
    PilotUnavailable,
    DroneUnavailable,
    DroneInMaintenance,
    CapabilityMismatch,
    PilotWindowOverlap,
    DroneWindowOverlap,
    AlreadyAssigned,
}

impl Violation {
    pub const fn code(self) -> &'static str {
        match self {
            Self::LocationMismatch => "location mismatch",
            Self::MissingSkills => "missing required skills",
            Self::MissingCertifications => "missing required certifications",
            Self::NotAvailableOnStart => "not available on start date",
            Self::PilotUnavailable => "pilot not available",
            Self::DroneUnavailable => "drone not available",
            Self::DroneInMaintenance => "drone under maintenance",
            Self::CapabilityMismatch => "capability mismatch",
            Self::PilotWindowOverlap => "pilot already assigned during mission window",
            Self::DroneWindowOverlap => "drone already assigned during mission window",
            Self::AlreadyAssigned => "already assigned to higher-priority mission",
        }
    }

    /// Violations that scored mode may tolerate at a penalty.
    pub const fn is_soft(self) -> bool {
        matches!(
            self,
            Self::LocationMismatch
                | Self::MissingSkills
                | Self::MissingCertifications
                | Self::CapabilityMismatch
        )
    }

    /// Disqualifies in every mode, whatever else the candidate offers.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::DroneInMaintenance | Self::AlreadyAssigned)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of the hard checks: `ok` only when no check failed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eligibility {
    pub ok: bool,
    pub reasons: Vec<Violation>,
}

impl Eligibility {
    fn from_reasons(reasons: Vec<Violation>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }

    pub fn rejected(reason: Violation) -> Self {
        Self::from_reasons(vec![reason])
    }
}

/// Runs every pilot check without short-circuiting so all reasons surface.
///
/// `committed` holds the windows already given to this pilot in the current
/// run; it is consulted only when overlap tracking is enabled.
pub fn evaluate_pilot(
    pilot: &Pilot,
    mission: &Mission,
    committed: &[DateWindow],
    policy: EligibilityPolicy,
) -> Eligibility {
    let mut reasons = Vec::new();

    if !same_location(&pilot.location, &mission.location) {
        reasons.push(Violation::LocationMismatch);
    }
    if !mission.required_skills.is_subset(&pilot.skills) {
        reasons.push(Violation::MissingSkills);
    }
    if !mission.required_certs.is_subset(&pilot.certifications) {
        reasons.push(Violation::MissingCertifications);
    }
    if pilot.available_from > mission.start_date {
        reasons.push(Violation::NotAvailableOnStart);
    }
    if !pilot.status.is_available() {
        reasons.push(Violation::PilotUnavailable);
    }
    if policy.track_overlap && overlaps_any(&mission.window(), committed) {
        reasons.push(Violation::PilotWindowOverlap);
    }

    Eligibility::from_reasons(reasons)
}

pub fn evaluate_drone(
    drone: &Drone,
    mission: &Mission,
    committed: &[DateWindow],
    policy: EligibilityPolicy,
) -> Eligibility {
    let mut reasons = Vec::new();

    if !same_location(&drone.location, &mission.location) {
        reasons.push(Violation::LocationMismatch);
    }
    match drone.status {
        DroneStatus::Available => {}
        DroneStatus::Maintenance => reasons.push(Violation::DroneInMaintenance),
        DroneStatus::Other(_) => reasons.push(Violation::DroneUnavailable),
    }
    if !policy
        .coverage
        .covers(&mission.required_skills, &drone.capabilities)
    {
        reasons.push(Violation::CapabilityMismatch);
    }
    if policy.track_overlap && overlaps_any(&mission.window(), committed) {
        reasons.push(Violation::DroneWindowOverlap);
    }

    Eligibility::from_reasons(reasons)
}

fn overlaps_any(window: &DateWindow, committed: &[DateWindow]) -> bool {
    committed.iter().any(|existing| existing.overlaps(window))
}
