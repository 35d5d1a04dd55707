//! The natural-language question submitted by a caller.

use std::fmt;

/// Validation errors raised when constructing a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    /// The question was missing, empty, or whitespace only.
    #[error("question must not be empty")]
    Empty,
}

/// A caller's question, guaranteed to contain visible text.
///
/// ## Invariants
/// - The text is non-empty once trimmed.
/// - The original text (including surrounding whitespace) is preserved so
///   prompts see exactly what the caller typed.
///
/// # Examples
/// ```
/// use sqlqa::domain::Question;
///
/// let question = Question::new("what is the Manufacturer of the Deep Fryer").unwrap();
/// assert_eq!(question.as_str(), "what is the Manufacturer of the Deep Fryer");
/// assert!(Question::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    /// Validate and wrap raw question text.
    pub fn new(raw: impl Into<String>) -> Result<Self, QuestionValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(QuestionValidationError::Empty);
        }
        Ok(Self(raw))
    }

    /// Build a question from an optional form value.
    pub fn from_optional(raw: Option<String>) -> Result<Self, QuestionValidationError> {
        raw.map_or(Err(QuestionValidationError::Empty), Self::new)
    }

    /// Borrow the question text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Question {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(Some("\n\t"))]
    fn rejects_missing_or_blank(#[case] raw: Option<&str>) {
        let result = Question::from_optional(raw.map(str::to_owned));
        assert_eq!(result, Err(QuestionValidationError::Empty));
    }

    #[rstest]
    fn preserves_surrounding_whitespace() {
        let question = Question::new("  list assets  ").expect("valid question");
        assert_eq!(question.as_str(), "  list assets  ");
    }
}
