//! Team validation

use thiserror::Error;

/// Errors that can occur during team validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamValidationError {
    #[error("Team ID cannot be empty")]
    EmptyId,

    #[error("Team ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Team name cannot be empty")]
    EmptyName,

    #[error("Team name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Team description cannot be empty")]
    EmptyDescription,

    #[error("Max members must be between {min} and {max}, got {actual}")]
    MaxMembersOutOfRange { min: u32, max: u32, actual: i64 },

    #[error("Max members ({max_members}) cannot be lower than current members ({current_members})")]
    CapacityBelowMembership {
        max_members: u32,
        current_members: u32,
    },

    #[error("Current members cannot be negative, got {0}")]
    NegativeMembers(i64),

    #[error("Team is full ({max_members} members)")]
    TeamFull { max_members: u32 },
}

const MAX_TEAM_ID_LENGTH: usize = 50;
const MAX_TEAM_NAME_LENGTH: usize = 100;

/// Smallest capacity a team may declare
pub const MIN_TEAM_SIZE: u32 = 1;
/// Largest capacity a team may declare
pub const MAX_TEAM_SIZE: u32 = 20;

/// Validate a team ID
///
/// IDs are opaque; only blank and over-long values are refused.
pub fn validate_team_id(id: &str) -> Result<(), TeamValidationError> {
    if id.trim().is_empty() {
        return Err(TeamValidationError::EmptyId);
    }

    if id.chars().count() > MAX_TEAM_ID_LENGTH {
        return Err(TeamValidationError::IdTooLong(MAX_TEAM_ID_LENGTH));
    }

    Ok(())
}

/// Validate a team name
pub fn validate_team_name(name: &str) -> Result<(), TeamValidationError> {
    if name.trim().is_empty() {
        return Err(TeamValidationError::EmptyName);
    }

    if name.chars().count() > MAX_TEAM_NAME_LENGTH {
        return Err(TeamValidationError::NameTooLong(MAX_TEAM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a team description
pub fn validate_team_description(description: &str) -> Result<(), TeamValidationError> {
    if description.trim().is_empty() {
        return Err(TeamValidationError::EmptyDescription);
    }

    Ok(())
}

/// Validate a requested capacity and narrow it to `u32`
pub fn validate_max_members(max_members: i64) -> Result<u32, TeamValidationError> {
    if max_members < i64::from(MIN_TEAM_SIZE) || max_members > i64::from(MAX_TEAM_SIZE) {
        return Err(TeamValidationError::MaxMembersOutOfRange {
            min: MIN_TEAM_SIZE,
            max: MAX_TEAM_SIZE,
            actual: max_members,
        });
    }

    Ok(max_members as u32)
}

/// Capacity may never drop below the members already in the team
pub fn validate_capacity(max_members: u32, current_members: u32) -> Result<(), TeamValidationError> {
    if max_members < current_members {
        return Err(TeamValidationError::CapacityBelowMembership {
            max_members,
            current_members,
        });
    }

    Ok(())
}
