use thiserror::Error;

pub const MAX_WORD_CHARS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordError {
    #[error("please enter a word")]
    Empty,

    #[error("please enter a single word (no spaces)")]
    Whitespace,

    #[error("word must be at most {MAX_WORD_CHARS} characters")]
    TooLong,
}

/// Checks a submitted word and returns it trimmed.
///
/// The entry store trusts its input, so every caller that builds an
/// [`Entry`](crate::models::Entry) from user input goes through here first.
pub fn validate_word(input: &str) -> Result<String, WordError> {
    let word = input.trim();
    if word.is_empty() {
        return Err(WordError::Empty);
    }
    if word.chars().any(char::is_whitespace) {
        return Err(WordError::Whitespace);
    }
    if word.chars().count() > MAX_WORD_CHARS {
        return Err(WordError::TooLong);
    }
    Ok(word.to_string())
}
