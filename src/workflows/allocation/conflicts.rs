use super::eligibility::Violation;
use super::scoring::PairChoice;

/// Collects per-candidate rejection reasons for one mission and one pool.
#[derive(Debug, Default)]
pub struct ConflictReporter {
    entries: Vec<String>,
}

impl ConflictReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `"{id}: {code, code, ...}"` for a rejected candidate.
    pub fn reject(&mut self, id: &str, reasons: &[Violation]) {
        let codes: Vec<&str> = reasons.iter().map(|reason| reason.code()).collect();
        self.entries.push(format!("{id}: {}", codes.join(", ")));
    }

    /// Consumed candidates are not re-checked; they get the fixed reason.
    pub fn reject_consumed(&mut self, id: &str) {
        self.reject(id, &[Violation::AlreadyAssigned]);
    }

    /// Joined diagnostic; `empty_note` stands in when nobody was rejected.
    pub fn render(&self, empty_note: &str) -> String {
        if self.entries.is_empty() {
            empty_note.to_string()
        } else {
            self.entries.join("; ")
        }
    }
}

pub fn below_threshold(pilot_id: &str, drone_id: &str, best: PairChoice, threshold: i32) -> String {
    format!(
        "{pilot_id}+{drone_id}: combined score {} below acceptance threshold {threshold}",
        best.combined_score
    )
}

/// Reason given to a mission row left out for a missing field.
pub fn incomplete_record(missing_field: &str) -> String {
    format!("mission record missing required field {missing_field}")
}

/// Renders tolerated soft violations for an assignment record.
pub fn tolerated<'a>(
    id: &str,
    violations: &'a [Violation],
) -> impl Iterator<Item = String> + 'a {
    let id = id.to_string();
    violations
        .iter()
        .map(move |violation| format!("{id}: {}", violation.code()))
}
