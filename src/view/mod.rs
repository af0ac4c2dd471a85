//! View state for the four screens
//!
//! Each screen owns the data it shows and re-fetches it after every
//! successful write.

mod matches;
mod navigator;
mod team_detail;
mod teams;

pub use matches::{MatchesMode, MatchesScreen};
pub use navigator::{Navigator, Page};
pub use team_detail::{DetailMode, TeamDetailScreen};
pub use teams::{TeamsMode, TeamsScreen};
