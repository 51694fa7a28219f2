//! User input for one count.

use serde::{Deserialize, Serialize};

use super::error::{ClientError, ClientResult};

/// A word and the letter to count in it, both non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRequest {
    pub word: String,
    pub letter: String,
}

impl CountRequest {
    /// Build a request from optional user input.
    ///
    /// Missing or empty values are a configuration error so that callers
    /// can report them before any connection is made.
    pub fn from_parts(word: Option<String>, letter: Option<String>) -> ClientResult<Self> {
        match (word, letter) {
            (Some(word), Some(letter)) if !word.is_empty() && !letter.is_empty() => {
                Ok(Self { word, letter })
            }
            _ => Err(ClientError::config(
                "both a word and a letter must be given",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_parts_present() {
        let request =
            CountRequest::from_parts(Some("Strawberry".into()), Some("r".into())).unwrap();
        assert_eq!(request.word, "Strawberry");
        assert_eq!(request.letter, "r");
    }

    #[test]
    fn test_missing_parts_are_config_errors() {
        assert!(matches!(
            CountRequest::from_parts(None, None),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            CountRequest::from_parts(Some("Strawberry".into()), None),
            Err(ClientError::Config(_))
        ));
        assert!(matches!(
            CountRequest::from_parts(Some("Strawberry".into()), Some(String::new())),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_multi_character_letter_is_accepted() {
        assert!(CountRequest::from_parts(Some("banana".into()), Some("an".into())).is_ok());
    }
}
