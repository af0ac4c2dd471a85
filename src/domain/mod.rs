//! Domain layer - Core business rules and entities

pub mod error;
pub mod matches;
pub mod team;

pub use error::{DomainError, ErrorKind};
pub use matches::{
    Match, MatchId, MatchRepository, MatchStatus, MatchValidationError, MatchWithTeams,
    StatusPolicy, TeamSummary,
};
pub use team::{Team, TeamId, TeamRepository, TeamValidationError};
