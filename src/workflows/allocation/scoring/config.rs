use serde::{Deserialize, Serialize};
use std::fmt;

/// Which failed checks a candidate may carry into ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Every failed check disqualifies; survivors rank on priority alone.
    #[default]
    Strict,
    /// Location, skill, certification and capability gaps cost penalties
    /// instead of disqualifying.
    Scored,
}

impl MatchMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "scored" => Some(Self::Scored),
            _ => None,
        }
    }
}

/// Bonus, penalty and threshold table injected into the scorer.
///
/// Penalties are magnitudes; the scorer subtracts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub urgent_bonus: i32,
    pub high_bonus: i32,
    pub standard_bonus: i32,
    pub location_mismatch_penalty: i32,
    pub missing_skill_penalty: i32,
    pub missing_certification_penalty: i32,
    pub capability_mismatch_penalty: i32,
    pub acceptance_threshold: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            urgent_bonus: 50,
            high_bonus: 30,
            standard_bonus: 0,
            location_mismatch_penalty: 20,
            missing_skill_penalty: 30,
            missing_certification_penalty: 40,
            capability_mismatch_penalty: 30,
            acceptance_threshold: 0,
        }
    }
}

impl ScoringConfig {
    pub fn get(&self, key: ScoringKey) -> i32 {
        match key {
            ScoringKey::UrgentBonus => self.urgent_bonus,
            ScoringKey::HighBonus => self.high_bonus,
            ScoringKey::StandardBonus => self.standard_bonus,
            ScoringKey::LocationMismatchPenalty => self.location_mismatch_penalty,
            ScoringKey::MissingSkillPenalty => self.missing_skill_penalty,
            ScoringKey::MissingCertificationPenalty => self.missing_certification_penalty,
            ScoringKey::CapabilityMismatchPenalty => self.capability_mismatch_penalty,
            ScoringKey::AcceptanceThreshold => self.acceptance_threshold,
        }
    }

    pub fn set(&mut self, key: ScoringKey, value: i32) {
        let slot = match key {
            ScoringKey::UrgentBonus => &mut self.urgent_bonus,
            ScoringKey::HighBonus => &mut self.high_bonus,
            ScoringKey::StandardBonus => &mut self.standard_bonus,
            ScoringKey::LocationMismatchPenalty => &mut self.location_mismatch_penalty,
            ScoringKey::MissingSkillPenalty => &mut self.missing_skill_penalty,
            ScoringKey::MissingCertificationPenalty => &mut self.missing_certification_penalty,
            ScoringKey::CapabilityMismatchPenalty => &mut self.capability_mismatch_penalty,
            ScoringKey::AcceptanceThreshold => &mut self.acceptance_threshold,
        };
        *slot = value;
    }

    /// Applies a textual `key = value` override, rejecting unknown keys.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ScoringKeyError> {
        let key = ScoringKey::parse(key).ok_or_else(|| ScoringKeyError::UnknownKey(key.to_string()))?;
        let parsed = value
            .trim()
            .parse::<i32>()
            .map_err(|_| ScoringKeyError::InvalidValue {
                key: key.name(),
                value: value.to_string(),
            })?;
        key.check(parsed)?;
        self.set(key, parsed);
        Ok(())
    }

    /// Rejects negative penalty magnitudes in a config built without `apply`,
    /// such as one deserialized from JSON.
    pub fn validate(&self) -> Result<(), ScoringKeyError> {
        ScoringKey::all()
            .into_iter()
            .try_for_each(|key| key.check(self.get(key)))
    }
}

/// The recognised scoring configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringKey {
    UrgentBonus,
    HighBonus,
    StandardBonus,
    LocationMismatchPenalty,
    MissingSkillPenalty,
    MissingCertificationPenalty,
    CapabilityMismatchPenalty,
    AcceptanceThreshold,
}

impl ScoringKey {
    pub const fn all() -> [Self; 8] {
        [
            Self::UrgentBonus,
            Self::HighBonus,
            Self::StandardBonus,
            Self::LocationMismatchPenalty,
            Self::MissingSkillPenalty,
            Self::MissingCertificationPenalty,
            Self::CapabilityMismatchPenalty,
            Self::AcceptanceThreshold,
        ]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::UrgentBonus => "urgent_bonus",
            Self::HighBonus => "high_bonus",
            Self::StandardBonus => "standard_bonus",
            Self::LocationMismatchPenalty => "location_mismatch_penalty",
            Self::MissingSkillPenalty => "missing_skill_penalty",
            Self::MissingCertificationPenalty => "missing_certification_penalty",
            Self::CapabilityMismatchPenalty => "capability_mismatch_penalty",
            Self::AcceptanceThreshold => "acceptance_threshold",
        }
    }

    pub const fn env_var(self) -> &'static str {
        match self {
            Self::UrgentBonus => "MATCH_URGENT_BONUS",
            Self::HighBonus => "MATCH_HIGH_BONUS",
            Self::StandardBonus => "MATCH_STANDARD_BONUS",
            Self::LocationMismatchPenalty => "MATCH_LOCATION_MISMATCH_PENALTY",
            Self::MissingSkillPenalty => "MATCH_MISSING_SKILL_PENALTY",
            Self::MissingCertificationPenalty => "MATCH_MISSING_CERTIFICATION_PENALTY",
            Self::CapabilityMismatchPenalty => "MATCH_CAPABILITY_MISMATCH_PENALTY",
            Self::AcceptanceThreshold => "MATCH_ACCEPTANCE_THRESHOLD",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::UrgentBonus => "added to every score computed for an Urgent mission",
            Self::HighBonus => "added to every score computed for a High mission",
            Self::StandardBonus => "added to every score computed for a Standard mission",
            Self::LocationMismatchPenalty => "subtracted when the candidate is based elsewhere",
            Self::MissingSkillPenalty => "subtracted when the pilot lacks required skills",
            Self::MissingCertificationPenalty => {
                "subtracted when the pilot lacks required certifications"
            }
            Self::CapabilityMismatchPenalty => {
                "subtracted when the drone does not cover the required skills"
            }
            Self::AcceptanceThreshold => "lowest combined pair score that may be assigned",
        }
    }

    pub const fn is_penalty(self) -> bool {
        matches!(
            self,
            Self::LocationMismatchPenalty
                | Self::MissingSkillPenalty
                | Self::MissingCertificationPenalty
                | Self::CapabilityMismatchPenalty
        )
    }

    fn check(self, value: i32) -> Result<(), ScoringKeyError> {
        if self.is_penalty() && value < 0 {
            return Err(ScoringKeyError::NegativePenalty {
                key: self.name(),
                value,
            });
        }
        Ok(())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::all().into_iter().find(|key| key.name() == wanted)
    }
}

impl fmt::Display for ScoringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringKeyError {
    #[error("unknown scoring key '{0}'")]
    UnknownKey(String),
    #[error("scoring key '{key}' expects an integer, got '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("scoring key '{key}' is a penalty magnitude and cannot be negative, got {value}")]
    NegativePenalty { key: &'static str, value: i32 },
}
