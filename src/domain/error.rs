use thiserror::Error;

/// Coarse classification of a failure as seen by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied input violated a rule; nothing was mutated
    Validation,
    /// The data gateway failed or returned no row where one was expected
    Gateway,
}

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Team '{team_id}' is full ({max_members} members)")]
    CapacityExceeded { team_id: String, max_members: u32 },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Gateway error: {message}")]
    Gateway { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn capacity_exceeded(team_id: impl Into<String>, max_members: u32) -> Self {
        Self::CapacityExceeded {
            team_id: team_id.into(),
            max_members,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error as a validation or gateway failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::CapacityExceeded { .. } => ErrorKind::Validation,
            _ => ErrorKind::Gateway,
        }
    }

    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Team 'abc' not found");
        assert_eq!(error.to_string(), "Not found: Team 'abc' not found");
        assert_eq!(error.kind(), ErrorKind::Gateway);
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Invalid input");
        assert_eq!(error.to_string(), "Validation error: Invalid input");
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_capacity_exceeded_is_validation() {
        let error = DomainError::capacity_exceeded("team-1", 5);
        assert_eq!(error.to_string(), "Team 'team-1' is full (5 members)");
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert!(error.is_capacity_exceeded());
    }

    #[test]
    fn test_gateway_error() {
        let error = DomainError::gateway("connection refused");
        assert_eq!(error.kind(), ErrorKind::Gateway);
        assert!(!error.is_capacity_exceeded());
    }
}
