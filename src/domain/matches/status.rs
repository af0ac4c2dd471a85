//! Match status and transition policy

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::MatchValidationError;

/// Status of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Match is planned but not started
    #[default]
    Scheduled,
    /// Match is being played
    Ongoing,
    /// Match has a final score
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    /// Whether `next` follows this status in the forward-only lifecycle
    ///
    /// Staying on the same status is always allowed; `Scheduled -> Completed`
    /// covers results recorded after the fact.
    pub fn can_transition_to(&self, next: MatchStatus) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::Scheduled)
                | (Self::Ongoing, Self::Ongoing)
                | (Self::Completed, Self::Completed)
                | (Self::Scheduled, Self::Ongoing)
                | (Self::Ongoing, Self::Completed)
                | (Self::Scheduled, Self::Completed)
        )
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = MatchValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            other => Err(MatchValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// How status updates are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any status may overwrite any other
    #[default]
    Unrestricted,
    /// Only forward transitions from `MatchStatus::can_transition_to`
    Strict,
}

impl StatusPolicy {
    pub fn permits(&self, from: MatchStatus, to: MatchStatus) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Strict => from.can_transition_to(to),
        }
    }
}
