use std::fmt;

use hangman_types::{DEFAULT_CUSTOM_CATEGORY, HangmanError};

pub const MIN_WORD_LENGTH: usize = 1;
pub const MAX_WORD_LENGTH: usize = 15;
pub const MAX_CREATOR_NAME_LENGTH: usize = 30;

/// A word that can be played: 1 to 15 uppercase letters A-Z.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetWord(String);

impl TargetWord {
    /// Trim and case-fold `raw`, then check it only holds letters A-Z
    pub fn parse(raw: &str) -> Result<Self, HangmanError> {
        let word = raw.trim().to_uppercase();

        if word.is_empty() {
            return Err(HangmanError::validation("Please enter a word"));
        }

        if !word.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(HangmanError::validation(format!(
                "Only letters A-Z are allowed: {}",
                raw.trim()
            )));
        }

        let length = word.len();
        if !(MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&length) {
            return Err(HangmanError::validation(format!(
                "Words must be at most {} letters, got {}",
                MAX_WORD_LENGTH, length
            )));
        }

        Ok(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(letter)
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TargetWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a guessed character. Anything outside A-Z (after case-folding) is `None`.
pub fn normalize_letter(letter: char) -> Option<char> {
    let letter = letter.to_ascii_uppercase();
    letter.is_ascii_uppercase().then_some(letter)
}

/// Parse a guess sent as text; it must be exactly one letter
pub fn parse_letter(raw: &str) -> Option<char> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => normalize_letter(letter),
        _ => None,
    }
}

pub fn validate_creator_name(raw: &str) -> Result<String, HangmanError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(HangmanError::validation("Please enter your name"));
    }

    if name.chars().count() > MAX_CREATOR_NAME_LENGTH {
        return Err(HangmanError::validation(format!(
            "Names must be at most {} characters",
            MAX_CREATOR_NAME_LENGTH
        )));
    }

    Ok(name.to_string())
}

/// Blank or missing categories fall back to "Custom"
pub fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => DEFAULT_CUSTOM_CATEGORY.to_string(),
    }
}
