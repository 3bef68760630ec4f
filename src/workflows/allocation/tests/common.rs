use chrono::NaiveDate;

use crate::workflows::allocation::domain::{
    Drone, DroneStatus, Mission, Pilot, PilotStatus, Priority, TokenSet,
};
use crate::workflows::allocation::engine::{AllocationConfig, AllocationEngine};
use crate::workflows::allocation::records::Snapshot;
use crate::workflows::allocation::scoring::MatchMode;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn tokens(values: &[&str]) -> TokenSet {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn pilot(id: &str, location: &str) -> Pilot {
    Pilot {
        id: id.to_string(),
        location: location.to_string(),
        skills: tokens(&["thermal"]),
        certifications: TokenSet::new(),
        available_from: date(2024, 1, 1),
        status: PilotStatus::Available,
    }
}

pub(super) fn drone(id: &str, location: &str) -> Drone {
    Drone {
        id: id.to_string(),
        location: location.to_string(),
        capabilities: tokens(&["thermal"]),
        status: DroneStatus::Available,
    }
}

pub(super) fn mission(id: &str, priority: Priority, start: NaiveDate, end: NaiveDate) -> Mission {
    Mission {
        id: id.to_string(),
        location: "NYC".to_string(),
        required_skills: tokens(&["thermal"]),
        required_certs: TokenSet::new(),
        start_date: start,
        end_date: end,
        priority,
    }
}

pub(super) fn standard_mission(id: &str) -> Mission {
    mission(id, Priority::Standard, date(2024, 2, 1), date(2024, 2, 5))
}

pub(super) fn strict_engine() -> AllocationEngine {
    AllocationEngine::new(AllocationConfig::default())
}

pub(super) fn scored_engine() -> AllocationEngine {
    AllocationEngine::new(AllocationConfig {
        mode: MatchMode::Scored,
        ..AllocationConfig::default()
    })
}

pub(super) fn snapshot(pilots: Vec<Pilot>, drones: Vec<Drone>, missions: Vec<Mission>) -> Snapshot {
    Snapshot::new(pilots, drones, missions)
}
