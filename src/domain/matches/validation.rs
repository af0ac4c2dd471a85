//! Match validation

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use super::status::MatchStatus;

/// Errors that can occur during match validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchValidationError {
    #[error("Match ID cannot be empty")]
    EmptyId,

    #[error("Match ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("{0} is required")]
    MissingTeam(&'static str),

    #[error("A team cannot play against itself")]
    SameTeam,

    #[error("Match location cannot be empty")]
    EmptyLocation,

    #[error("Match date is required")]
    MissingDate,

    #[error("Invalid match date '{0}'")]
    InvalidDate(String),

    #[error("{field} cannot be negative, got {value}")]
    NegativeScore { field: &'static str, value: i64 },

    #[error("Score {0} is too large")]
    ScoreTooLarge(i64),

    #[error("Unknown match status '{0}'")]
    UnknownStatus(String),

    #[error("Match status cannot change from {from} to {to}")]
    StatusTransition { from: MatchStatus, to: MatchStatus },
}

const MAX_MATCH_ID_LENGTH: usize = 50;

/// Highest score a match can record; scores are stored as 32-bit integers
pub const MAX_SCORE: i64 = i32::MAX as i64;

/// Validate a match ID; any non-blank value up to the column width is accepted
pub fn validate_match_id(id: &str) -> Result<(), MatchValidationError> {
    if id.trim().is_empty() {
        return Err(MatchValidationError::EmptyId);
    }

    if id.chars().count() > MAX_MATCH_ID_LENGTH {
        return Err(MatchValidationError::IdTooLong(MAX_MATCH_ID_LENGTH));
    }

    Ok(())
}

/// Validate a match location
pub fn validate_location(location: &str) -> Result<(), MatchValidationError> {
    if location.trim().is_empty() {
        return Err(MatchValidationError::EmptyLocation);
    }

    Ok(())
}

/// Validate a score and narrow it to `u32`
pub fn validate_score(field: &'static str, value: i64) -> Result<u32, MatchValidationError> {
    if value < 0 {
        return Err(MatchValidationError::NegativeScore { field, value });
    }

    if value > MAX_SCORE {
        return Err(MatchValidationError::ScoreTooLarge(value));
    }

    u32::try_from(value).map_err(|_| MatchValidationError::ScoreTooLarge(value))
}

/// Parse a match date
///
/// Accepts RFC 3339 timestamps and the zone-less `YYYY-MM-DDTHH:MM[:SS]` form
/// produced by datetime pickers, which is read as UTC.
pub fn parse_match_date(value: &str) -> Result<DateTime<Utc>, MatchValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(MatchValidationError::MissingDate);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| MatchValidationError::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_match_id() {
        assert!(validate_match_id("0b7e9d1c-1111-4c55-9a43-0f2d7c1e9b10").is_ok());
        assert_eq!(validate_match_id(""), Err(MatchValidationError::EmptyId));
        assert!(validate_match_id("import/2019_final").is_ok());
        assert_eq!(
            validate_match_id(&"m".repeat(51)),
            Err(MatchValidationError::IdTooLong(50))
        );
    }

    #[test]
    fn test_location() {
        assert!(validate_location("Berlin Arena").is_ok());
        assert_eq!(validate_location("  "), Err(MatchValidationError::EmptyLocation));
    }

    #[test]
    fn test_scores() {
        assert_eq!(validate_score("team1_score", 0), Ok(0));
        assert_eq!(validate_score("team1_score", 16), Ok(16));
        assert_eq!(
            validate_score("team2_score", -1),
            Err(MatchValidationError::NegativeScore {
                field: "team2_score",
                value: -1
            })
        );
        assert_eq!(validate_score("team1_score", MAX_SCORE), Ok(i32::MAX as u32));
        assert_eq!(
            validate_score("team1_score", 3_000_000_000),
            Err(MatchValidationError::ScoreTooLarge(3_000_000_000))
        );
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_match_date("2025-06-01T18:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 1, 16, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_picker_format() {
        let parsed = parse_match_date("2025-06-01T18:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 6, 1, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert_eq!(parse_match_date(""), Err(MatchValidationError::MissingDate));
        assert_eq!(
            parse_match_date("next tuesday"),
            Err(MatchValidationError::InvalidDate("next tuesday".to_string()))
        );
    }
}
