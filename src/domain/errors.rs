//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided contact id is not a positive integer.
    InvalidId(i64),

    /// A required field was absent from the request.
    MissingField(&'static str),

    /// A required text field was empty or whitespace only.
    BlankField(&'static str),

    /// A text field exceeds its column width.
    TooLong { field: &'static str, max: usize },

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number is invalid.
    InvalidPhone(String),

    /// The birthday is not a `YYYY-MM-DD` calendar date.
    InvalidBirthday(String),

    /// The page limit is outside `1..=max`.
    InvalidLimit { value: usize, max: usize },

    /// The birthday window length is outside `1..=365`.
    InvalidWindow(u32),

    /// The search text is empty or too long.
    InvalidSearch(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "Contact id must be positive, got {}", id),
            Self::MissingField(field) => write!(f, "{} is required", field),
            Self::BlankField(field) => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be at most {} characters", field, max)
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number: {}", phone),
            Self::InvalidBirthday(raw) => {
                write!(f, "Invalid birthday {:?}, expected YYYY-MM-DD", raw)
            }
            Self::InvalidLimit { value, max } => {
                write!(f, "limit must be between 1 and {}, got {}", max, value)
            }
            Self::InvalidWindow(days) => {
                write!(f, "days must be between 1 and 365, got {}", days)
            }
            Self::InvalidSearch(reason) => write!(f, "Invalid search text: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
