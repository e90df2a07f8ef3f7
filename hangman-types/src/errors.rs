use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HangmanError {
    /// Rejected input, e.g. an empty creator name on submission
    #[error("{message}")]
    Validation { message: String },
    /// The backing store was unreachable or refused the operation
    #[error("persistence failure: {message}")]
    Persistence { message: String },
    /// Unknown id, or a custom word that has already been claimed
    #[error("{what} not found")]
    NotFound { what: String },
}

impl HangmanError {
    pub fn validation(message: impl Into<String>) -> Self {
        HangmanError::Validation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        HangmanError::Persistence {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        HangmanError::NotFound { what: what.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, HangmanError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HangmanError::NotFound { .. })
    }

    pub fn is_persistence(&self) -> bool {
        matches!(self, HangmanError::Persistence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HangmanError::validation("Please enter your name").to_string(),
            "Please enter your name"
        );
        assert_eq!(
            HangmanError::not_found("custom word").to_string(),
            "custom word not found"
        );
        assert!(
            HangmanError::persistence("connection refused")
                .to_string()
                .contains("connection refused")
        );
    }

    #[test]
    fn test_error_serialization_is_tagged() {
        let json = serde_json::to_value(HangmanError::not_found("session")).unwrap();
        assert_eq!(json["kind"], "not_found");
        assert_eq!(json["what"], "session");
    }
}
