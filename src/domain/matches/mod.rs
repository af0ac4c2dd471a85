//! Match domain - ledger entity, scoring rules and data gateway

mod entity;
mod repository;
mod status;
mod validation;

pub use entity::{
    Match, MatchId, MatchInput, MatchRecord, MatchRecordError, MatchWithTeams, TeamSummary,
};
pub use repository::MatchRepository;
pub use status::{MatchStatus, StatusPolicy};
pub use validation::{
    MAX_SCORE, MatchValidationError, parse_match_date, validate_location, validate_match_id, validate_score,
};

#[cfg(test)]
pub use repository::MockMatchRepository;
