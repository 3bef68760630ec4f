use super::domain::DateWindow;
use std::collections::HashMap;

/// Run-scoped record of which resources have been committed, and for when.
///
/// Owned by a single engine run and dropped with it; input records are never
/// marked.
#[derive(Debug, Default)]
pub struct ConsumptionLedger {
    pilots: HashMap<String, Vec<DateWindow>>,
    drones: HashMap<String, Vec<DateWindow>>,
}

impl ConsumptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pilot_consumed(&self, pilot_id: &str) -> bool {
        self.pilots.contains_key(pilot_id)
    }

    pub fn drone_consumed(&self, drone_id: &str) -> bool {
        self.drones.contains_key(drone_id)
    }

    pub fn pilot_windows(&self, pilot_id: &str) -> &[DateWindow] {
        self.pilots.get(pilot_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn drone_windows(&self, drone_id: &str) -> &[DateWindow] {
        self.drones.get(drone_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Marks both resources of a pair as taken for `window` in one step.
    pub fn commit(&mut self, pilot_id: &str, drone_id: &str, window: DateWindow) {
        self.pilots
            .entry(pilot_id.to_string())
            .or_default()
            .push(window);
        self.drones
            .entry(drone_id.to_string())
            .or_default()
            .push(window);
    }
}
