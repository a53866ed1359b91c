//! Chirp body validation and cleaning
//!
//! Length limit and the static profanity filter applied to every chirp body
//! before it is stored.

use crate::utils::error::{ChirpError, Result};

/// Maximum chirp body length in bytes
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Words replaced by the profanity filter
const PROFANE_WORDS: &[&str] = &["kerfuffle", "sharbert", "fornax"];

/// Replacement string for filtered words
const CENSOR: &str = "****";

/// Validate a chirp body and return the cleaned text
///
/// Rejects bodies longer than [`MAX_CHIRP_LENGTH`], then replaces each
/// profane word with asterisks. Matching is case-insensitive and whole-word
/// only; punctuation-adjacent words are left untouched.
pub fn validate_chirp_body(body: &str) -> Result<String> {
    if body.len() > MAX_CHIRP_LENGTH {
        return Err(ChirpError::validation("Chirp is too long"));
    }

    Ok(clean_body(body))
}

/// Replace profane words with asterisks
fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lowered = word.to_lowercase();
            if PROFANE_WORDS.contains(&lowered.as_str()) {
                CENSOR
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_body_replaces_profane_words() {
        let cleaned = validate_chirp_body("This is a kerfuffle opinion I need to share").unwrap();
        assert_eq!(cleaned, "This is a **** opinion I need to share");
    }

    #[test]
    fn test_clean_body_is_case_insensitive() {
        let cleaned = validate_chirp_body("I hear Mastodon is better than Sharbert").unwrap();
        assert_eq!(cleaned, "I hear Mastodon is better than ****");
    }

    #[test]
    fn test_clean_body_ignores_punctuation_adjacent_words() {
        let cleaned = validate_chirp_body("I really need a kerfuffle! to go to bed").unwrap();
        assert_eq!(cleaned, "I really need a kerfuffle! to go to bed");
    }

    #[test]
    fn test_clean_body_passes_clean_text_through() {
        let cleaned = validate_chirp_body("I had something interesting for breakfast").unwrap();
        assert_eq!(cleaned, "I had something interesting for breakfast");
    }

    #[test]
    fn test_rejects_long_chirp() {
        let body = "a".repeat(MAX_CHIRP_LENGTH + 1);
        let result = validate_chirp_body(&body);
        assert!(matches!(result, Err(ChirpError::Validation(_))));
    }

    #[test]
    fn test_accepts_chirp_at_limit() {
        let body = "a".repeat(MAX_CHIRP_LENGTH);
        assert!(validate_chirp_body(&body).is_ok());
    }
}
