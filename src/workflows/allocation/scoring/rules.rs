use super::super::domain::Priority;
use super::super::eligibility::Violation;
use super::config::{MatchMode, ScoringConfig};

pub(crate) fn priority_bonus(config: &ScoringConfig, priority: Priority) -> i32 {
    match priority {
        Priority::Urgent => config.urgent_bonus,
        Priority::High => config.high_bonus,
        Priority::Standard => config.standard_bonus,
    }
}

/// Penalty magnitude for a tolerated violation; hard violations carry none.
pub(crate) fn penalty(config: &ScoringConfig, violation: Violation) -> i32 {
    match violation {
        Violation::LocationMismatch => config.location_mismatch_penalty,
        Violation::MissingSkills => config.missing_skill_penalty,
        Violation::MissingCertifications => config.missing_certification_penalty,
        Violation::CapabilityMismatch => config.capability_mismatch_penalty,
        _ => 0,
    }
}

pub(crate) fn disqualifies(mode: MatchMode, violation: Violation) -> bool {
    if violation.is_terminal() {
        return true;
    }

    match mode {
        MatchMode::Strict => true,
        MatchMode::Scored => !violation.is_soft(),
    }
}
