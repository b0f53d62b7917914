//! Review validation utilities

use thiserror::Error;

/// Errors that can occur during review validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReviewValidationError {
    #[error("Review content cannot be empty")]
    EmptyContent,

    #[error("Review content exceeds maximum length of {0} characters")]
    ContentTooLong(usize),

    #[error("Rating must be between {0} and {1}")]
    RatingOutOfRange(i32, i32),
}

const MAX_CONTENT_LENGTH: usize = 200;
const MIN_RATING: i32 = 1;
const MAX_RATING: i32 = 5;

/// Validate review content
///
/// Rules:
/// - Cannot be empty
/// - Maximum 200 characters
pub fn validate_content(content: &str) -> Result<(), ReviewValidationError> {
    if content.is_empty() {
        return Err(ReviewValidationError::EmptyContent);
    }

    if content.len() > MAX_CONTENT_LENGTH {
        return Err(ReviewValidationError::ContentTooLong(MAX_CONTENT_LENGTH));
    }

    Ok(())
}

/// Validate a rating value (1 to 5, matching the store's CHECK constraint)
pub fn validate_rating(rating: i32) -> Result<(), ReviewValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ReviewValidationError::RatingOutOfRange(MIN_RATING, MAX_RATING));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_content() {
        assert!(validate_content("great stay").is_ok());
        assert!(validate_content(&"a".repeat(200)).is_ok());
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(
            validate_content(""),
            Err(ReviewValidationError::EmptyContent)
        );
    }

    #[test]
    fn test_content_too_long() {
        assert_eq!(
            validate_content(&"a".repeat(201)),
            Err(ReviewValidationError::ContentTooLong(200))
        );
    }

    #[test]
    fn test_valid_ratings() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
    }

    #[test]
    fn test_rating_out_of_range() {
        assert_eq!(
            validate_rating(0),
            Err(ReviewValidationError::RatingOutOfRange(1, 5))
        );
        assert_eq!(
            validate_rating(6),
            Err(ReviewValidationError::RatingOutOfRange(1, 5))
        );
    }
}
