//! Team entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    TeamValidationError, validate_capacity, validate_max_members, validate_team_description,
    validate_team_id, validate_team_name,
};

/// Team identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Team entity
///
/// `current_members` never exceeds `max_members`; every constructor and
/// mutator checks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name
    name: String,
    /// Description
    description: String,
    /// Capacity, 1..=20
    max_members: u32,
    /// Members joined so far
    current_members: u32,
    /// Optional logo reference
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_url: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

/// Raw team columns as read back from the data gateway
#[derive(Debug, Clone)]
pub struct TeamRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub max_members: i64,
    pub current_members: i64,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new, empty team with a generated ID
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        max_members: i64,
    ) -> Result<Self, TeamValidationError> {
        Self::with_id(TeamId::generate(), name, description, max_members)
    }

    /// Create a new, empty team with a known ID
    pub fn with_id(
        id: TeamId,
        name: impl Into<String>,
        description: impl Into<String>,
        max_members: i64,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let description = description.into();
        validate_team_name(&name)?;
        validate_team_description(&description)?;
        let max_members = validate_max_members(max_members)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name,
            description,
            max_members,
            current_members: 0,
            logo_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set logo (builder pattern)
    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = normalize_logo(Some(logo_url.into()));
        self
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn max_members(&self) -> u32 {
        self.max_members
    }

    pub fn current_members(&self) -> u32 {
        self.current_members
    }

    pub fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the team has no open slots left
    pub fn is_full(&self) -> bool {
        self.current_members >= self.max_members
    }

    pub fn open_slots(&self) -> u32 {
        self.max_members.saturating_sub(self.current_members)
    }

    /// Fill ratio as a whole percentage, rounded
    pub fn fill_percent(&self) -> u32 {
        ((f64::from(self.current_members) / f64::from(self.max_members)) * 100.0).round() as u32
    }

    // Mutators

    /// Replace the editable metadata of the team
    ///
    /// The new capacity must still hold every current member.
    pub fn update_details(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        max_members: i64,
        logo_url: Option<String>,
    ) -> Result<(), TeamValidationError> {
        let name = name.into();
        let description = description.into();
        validate_team_name(&name)?;
        validate_team_description(&description)?;
        let max_members = validate_max_members(max_members)?;
        validate_capacity(max_members, self.current_members)?;

        self.name = name;
        self.description = description;
        self.max_members = max_members;
        self.logo_url = normalize_logo(logo_url);
        self.touch();
        Ok(())
    }

    /// Take one open slot
    pub fn add_member(&mut self) -> Result<(), TeamValidationError> {
        if self.is_full() {
            return Err(TeamValidationError::TeamFull {
                max_members: self.max_members,
            });
        }

        self.current_members += 1;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TryFrom<TeamRecord> for Team {
    type Error = TeamValidationError;

    fn try_from(record: TeamRecord) -> Result<Self, Self::Error> {
        let id = TeamId::new(record.id)?;
        validate_team_name(&record.name)?;
        let max_members = validate_max_members(record.max_members)?;
        let current_members = u32::try_from(record.current_members)
            .map_err(|_| TeamValidationError::NegativeMembers(record.current_members))?;
        validate_capacity(max_members, current_members)?;

        Ok(Self {
            id,
            name: record.name,
            description: record.description,
            max_members,
            current_members,
            logo_url: normalize_logo(record.logo_url),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn normalize_logo(logo_url: Option<String>) -> Option<String> {
    logo_url.filter(|url| !url.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(max_members: i64, current_members: i64) -> TeamRecord {
        let now = Utc::now();
        TeamRecord {
            id: "team-1".to_string(),
            name: "Alpha".to_string(),
            description: "desc".to_string(),
            max_members,
            current_members,
            logo_url: Some(String::new()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_team_id_generate_is_valid() {
        let id = TeamId::generate();
        assert!(TeamId::new(id.as_str()).is_ok());
        assert_ne!(TeamId::generate(), id);
    }

    #[test]
    fn test_team_creation_starts_empty() {
        let team = Team::new("Alpha", "desc", 5).unwrap();

        assert_eq!(team.name(), "Alpha");
        assert_eq!(team.description(), "desc");
        assert_eq!(team.max_members(), 5);
        assert_eq!(team.current_members(), 0);
        assert!(team.logo_url().is_none());
        assert!(!team.is_full());
        assert_eq!(team.open_slots(), 5);
    }

    #[test]
    fn test_team_creation_rejects_bad_input() {
        assert_eq!(
            Team::new("", "desc", 5).unwrap_err(),
            TeamValidationError::EmptyName
        );
        assert_eq!(
            Team::new("Alpha", "", 5).unwrap_err(),
            TeamValidationError::EmptyDescription
        );
        assert!(Team::new("Alpha", "desc", 0).is_err());
        assert!(Team::new("Alpha", "desc", 21).is_err());
    }

    #[test]
    fn test_add_member_until_full() {
        let mut team = Team::new("Alpha", "desc", 2).unwrap();

        team.add_member().unwrap();
        team.add_member().unwrap();
        assert!(team.is_full());
        assert_eq!(team.fill_percent(), 100);

        assert_eq!(
            team.add_member(),
            Err(TeamValidationError::TeamFull { max_members: 2 })
        );
        assert_eq!(team.current_members(), 2);
    }

    #[test]
    fn test_update_details_cannot_shrink_below_membership() {
        let mut team = Team::new("Alpha", "desc", 5).unwrap();
        team.add_member().unwrap();
        team.add_member().unwrap();
        team.add_member().unwrap();

        let result = team.update_details("Alpha", "desc", 2, None);
        assert_eq!(
            result,
            Err(TeamValidationError::CapacityBelowMembership {
                max_members: 2,
                current_members: 3
            })
        );
        assert_eq!(team.max_members(), 5);

        team.update_details("Alpha", "desc", 3, None).unwrap();
        assert_eq!(team.max_members(), 3);
    }

    #[test]
    fn test_update_details_touches_timestamp() {
        let mut team = Team::new("Alpha", "desc", 5).unwrap();
        let original_updated = team.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(10));

        team.update_details("Bravo", "new desc", 6, Some("https://cdn/logo.png".to_string()))
            .unwrap();
        assert_eq!(team.name(), "Bravo");
        assert_eq!(team.logo_url(), Some("https://cdn/logo.png"));
        assert!(team.updated_at() > original_updated);
        assert!(team.created_at() < team.updated_at());
    }

    #[test]
    fn test_from_record() {
        let team = Team::try_from(record(5, 3)).unwrap();
        assert_eq!(team.current_members(), 3);
        assert!(team.logo_url().is_none());

        assert!(Team::try_from(record(2, 3)).is_err());
        assert_eq!(
            Team::try_from(record(2, -1)).unwrap_err(),
            TeamValidationError::NegativeMembers(-1)
        );
    }
}
