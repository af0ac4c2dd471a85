//! Team domain - registry entity, capacity rules and data gateway

mod entity;
mod repository;
mod validation;

pub use entity::{Team, TeamId, TeamRecord};
pub use repository::TeamRepository;
pub use validation::{
    MAX_TEAM_SIZE, MIN_TEAM_SIZE, TeamValidationError, validate_capacity, validate_max_members,
    validate_team_description, validate_team_id, validate_team_name,
};

#[cfg(test)]
pub use repository::MockTeamRepository;
