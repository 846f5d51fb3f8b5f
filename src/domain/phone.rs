//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Column width of `contacts.phone`.
pub const MAX_PHONE_LEN: usize = 20;

/// A type-safe wrapper for phone numbers.
///
/// The number is kept exactly as entered (after trimming); only its shape is
/// checked.
///
/// # Example
///
/// ```
/// use contacts_api::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+38 (050) 123-45-67").unwrap();
/// assert_eq!(phone.as_str(), "+38 (050) 123-45-67");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Must not be blank
    /// - Must contain at least one digit
    /// - Can contain: digits, spaces, hyphens, parentheses, plus sign, periods
    /// - At most 20 characters
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::BlankField`, `ValidationError::TooLong`, or
    /// `ValidationError::InvalidPhone`.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into().trim().to_string();

        if phone.is_empty() {
            return Err(ValidationError::BlankField("phone"));
        }
        if phone.chars().count() > MAX_PHONE_LEN {
            return Err(ValidationError::TooLong {
                field: "phone",
                max: MAX_PHONE_LEN,
            });
        }
        if !Self::is_valid(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    fn is_valid(phone: &str) -> bool {
        phone.chars().any(|c| c.is_ascii_digit())
            && phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'))
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
